use bevy::prelude::*;

use constants::reveal::MAX_REVEAL_ALPHA;

use super::evidence_source::{EvidenceMode, EvidenceSource};
use crate::engine::camera::observer::Observer;
use crate::engine::config::reveal_config::RevealConfig;
use crate::engine::materials::bridge::MaterialParameterBridge;
use crate::engine::surfaces::registry::SurfaceRegistry;
use crate::engine::surfaces::surface::MaterialMode;

/// Reveals surfaces the observer looks at from close enough.
#[derive(Debug, Clone)]
pub struct GazeEvidence {
    pub reveal_distance: f32,
    pub reveal_angle_degrees: f32,
    pub fade_in_duration: f32,
}

impl GazeEvidence {
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            reveal_distance: config.reveal_distance,
            reveal_angle_degrees: config.reveal_angle_degrees,
            fade_in_duration: config.fade_in_duration,
        }
    }

    pub fn is_in_view(&self, observer: &Observer, target: Vec3) -> bool {
        observer.distance_to(target) <= self.reveal_distance
            && observer.angle_to(target) <= self.reveal_angle_degrees
    }
}

impl EvidenceSource for GazeEvidence {
    fn mode(&self) -> EvidenceMode {
        EvidenceMode::Gaze
    }

    fn gather(
        &mut self,
        observer: &Observer,
        registry: &mut SurfaceRegistry,
        _bridge: &mut MaterialParameterBridge,
    ) -> bool {
        let mut revealed_any = false;
        for tracked in registry.iter_mut() {
            if tracked.state.revealed || !self.is_in_view(observer, tracked.surface.center) {
                continue;
            }
            if tracked.state.mark_revealed() {
                debug!("{} revealed by gaze", tracked.surface.id);
                revealed_any = true;
            }
        }
        revealed_any
    }

    fn animate(
        &mut self,
        delta: f32,
        registry: &mut SurfaceRegistry,
        bridge: &mut MaterialParameterBridge,
    ) {
        for tracked in registry.iter_mut() {
            if tracked.state.material_mode == MaterialMode::Solid {
                continue;
            }
            if let Some(progress) = tracked.state.advance_reveal(delta, self.fade_in_duration) {
                tracked.state.material_mode = MaterialMode::Revealing;
                bridge.set_color_alpha(tracked.surface.id, progress * MAX_REVEAL_ALPHA);
            }
        }
    }

    fn reveal_all(&mut self, registry: &mut SurfaceRegistry) {
        for tracked in registry.iter_mut() {
            tracked.state.reveal_fully();
        }
    }
}
