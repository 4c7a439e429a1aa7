use bevy::prelude::*;

use constants::reveal::MAX_REVEAL_ALPHA;

use super::evidence_source::{EvidenceMode, EvidenceSource};
use crate::engine::camera::observer::Observer;
use crate::engine::config::reveal_config::RevealConfig;
use crate::engine::coverage::evidence_trail::EvidenceTrail;
use crate::engine::materials::bridge::{MaterialParameterBridge, ScalarParam, VectorArrayParam};
use crate::engine::surfaces::registry::SurfaceRegistry;
use crate::engine::surfaces::surface::MaterialMode;

/// Reveals mesh around the path the observer walks.
#[derive(Debug, Clone)]
pub struct MovementEvidence {
    trail: EvidenceTrail,
    pub reveal_radius: f32,
    pub edge_softness: f32,
}

impl MovementEvidence {
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            trail: EvidenceTrail::new(config.min_distance_between_points, config.max_reveal_points),
            reveal_radius: config.reveal_radius,
            edge_softness: config.edge_softness,
        }
    }

    pub fn trail(&self) -> &EvidenceTrail {
        &self.trail
    }

    /// Sends the capped point list plus radius/softness to every surface that
    /// is still on its reveal material.
    fn push_to_renderer(
        &self,
        registry: &mut SurfaceRegistry,
        bridge: &mut MaterialParameterBridge,
    ) {
        let transferred = bridge.set_vector_array(
            VectorArrayParam::RevealPoints,
            self.trail.transfer_view(),
        );

        for tracked in registry.iter_mut() {
            if tracked.state.material_mode == MaterialMode::Solid {
                continue;
            }
            let id = tracked.surface.id;
            bridge.set_scalar(id, ScalarParam::RevealRadius, self.reveal_radius);
            bridge.set_scalar(id, ScalarParam::EdgeSoftness, self.edge_softness);
            bridge.set_scalar(id, ScalarParam::PointCount, transferred as f32);
            bridge.set_color_alpha(id, MAX_REVEAL_ALPHA);
            tracked.state.material_mode = MaterialMode::Revealing;
        }
    }
}

impl EvidenceSource for MovementEvidence {
    fn mode(&self) -> EvidenceMode {
        EvidenceMode::Movement
    }

    fn begin(
        &mut self,
        observer: &Observer,
        registry: &mut SurfaceRegistry,
        bridge: &mut MaterialParameterBridge,
    ) {
        if self.trail.record(observer.position) {
            self.push_to_renderer(registry, bridge);
        }
    }

    fn gather(
        &mut self,
        observer: &Observer,
        registry: &mut SurfaceRegistry,
        bridge: &mut MaterialParameterBridge,
    ) -> bool {
        if !self.trail.record(observer.position) {
            return false;
        }
        debug!(
            "Evidence point {} recorded at {:?}",
            self.trail.points().len(),
            observer.position
        );
        self.push_to_renderer(registry, bridge);
        true
    }

    fn refresh_surfaces(
        &mut self,
        registry: &mut SurfaceRegistry,
        bridge: &mut MaterialParameterBridge,
    ) {
        self.push_to_renderer(registry, bridge);
    }

    fn evidence(&self) -> &[Vec3] {
        self.trail.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surfaces::surface::{Surface, SurfaceId};

    fn at(x: f32, z: f32) -> Observer {
        Observer::new(Vec3::new(x, 1.6, z), Vec3::NEG_Z)
    }

    #[test]
    fn begin_seeds_trail_with_start_position() {
        let mut source = MovementEvidence::from_config(&RevealConfig::default());
        let mut registry = SurfaceRegistry::default();
        let mut bridge = MaterialParameterBridge::default();

        source.begin(&at(1.0, 2.0), &mut registry, &mut bridge);
        assert_eq!(source.evidence(), &[Vec3::new(1.0, 1.6, 2.0)]);
        assert_eq!(bridge.reveal_points().len(), 1);
    }

    #[test]
    fn small_steps_are_not_recorded() {
        let mut source = MovementEvidence::from_config(&RevealConfig::default());
        let mut registry = SurfaceRegistry::default();
        let mut bridge = MaterialParameterBridge::default();
        source.begin(&at(0.0, 0.0), &mut registry, &mut bridge);

        assert!(!source.gather(&at(0.2, 0.0), &mut registry, &mut bridge));
        assert!(source.gather(&at(0.6, 0.0), &mut registry, &mut bridge));
        assert_eq!(source.trail().points().len(), 2);
    }

    #[test]
    fn refresh_writes_reveal_parameters_to_tracked_surfaces() {
        let mut source = MovementEvidence::from_config(&RevealConfig::default());
        let mut registry = SurfaceRegistry::default();
        let mut bridge = MaterialParameterBridge::default();
        source.begin(&at(0.0, 0.0), &mut registry, &mut bridge);
        source.gather(&at(1.0, 0.0), &mut registry, &mut bridge);

        let chunk = Surface::new(SurfaceId(3), Vec3::new(1.0, 0.0, 1.0), Vec3::Y);
        registry.on_surfaces_added(&[chunk], &at(0.0, 0.0), &mut bridge);
        source.refresh_surfaces(&mut registry, &mut bridge);

        let params = bridge.surface_params(SurfaceId(3)).copied().expect("bound");
        assert_eq!(params.reveal_radius, 2.0);
        assert_eq!(params.edge_softness, 0.5);
        assert_eq!(params.point_count, 2);
        assert_eq!(params.color_alpha, MAX_REVEAL_ALPHA);
        assert_eq!(
            registry.get(SurfaceId(3)).expect("tracked").state.material_mode,
            MaterialMode::Revealing
        );
    }

    #[test]
    fn point_count_saturates_at_renderer_cap() {
        let mut source = MovementEvidence::from_config(&RevealConfig::default());
        let mut registry = SurfaceRegistry::default();
        let mut bridge = MaterialParameterBridge::default();
        let chunk = Surface::new(SurfaceId(1), Vec3::ZERO, Vec3::Y);
        registry.on_surfaces_added(&[chunk], &at(0.0, 0.0), &mut bridge);

        source.begin(&at(0.0, 0.0), &mut registry, &mut bridge);
        for step in 1..100 {
            source.gather(&at(step as f32, 0.0), &mut registry, &mut bridge);
        }

        assert_eq!(source.evidence().len(), 100);
        let params = bridge.surface_params(SurfaceId(1)).expect("bound");
        assert_eq!(params.point_count, 64);
    }
}
