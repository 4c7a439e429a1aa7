use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::gaze::GazeEvidence;
use super::movement::MovementEvidence;
use crate::engine::camera::observer::Observer;
use crate::engine::config::reveal_config::RevealConfig;
use crate::engine::coverage::estimator::CoverageStrategy;
use crate::engine::materials::bridge::MaterialParameterBridge;
use crate::engine::surfaces::registry::SurfaceRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceMode {
    /// Player movement over AR mesh fragments.
    Movement,
    /// Gaze direction over detected planes.
    #[default]
    Gaze,
}

impl EvidenceMode {
    pub fn coverage_strategy(self, room_size: f32) -> CoverageStrategy {
        match self {
            Self::Movement => CoverageStrategy::BoundingBox { room_size },
            Self::Gaze => CoverageStrategy::FractionRevealed,
        }
    }
}

/// A pluggable source of scan evidence.
///
/// The session calls these hooks in a fixed order each frame: `gather`, then
/// (after coverage and the latch check) `animate` while still scanning.
pub trait EvidenceSource: Send + Sync {
    fn mode(&self) -> EvidenceMode;

    /// Called once, on the first session update.
    fn begin(
        &mut self,
        _observer: &Observer,
        _registry: &mut SurfaceRegistry,
        _bridge: &mut MaterialParameterBridge,
    ) {
    }

    /// Collects this frame's evidence. Returns true when coverage must be
    /// recomputed.
    fn gather(
        &mut self,
        observer: &Observer,
        registry: &mut SurfaceRegistry,
        bridge: &mut MaterialParameterBridge,
    ) -> bool;

    /// Per-surface reveal animation while scanning.
    fn animate(
        &mut self,
        _delta: f32,
        _registry: &mut SurfaceRegistry,
        _bridge: &mut MaterialParameterBridge,
    ) {
    }

    /// Re-sends shader parameters after the surface set changed.
    fn refresh_surfaces(
        &mut self,
        _registry: &mut SurfaceRegistry,
        _bridge: &mut MaterialParameterBridge,
    ) {
    }

    /// Operator override: treat every surface as seen.
    fn reveal_all(&mut self, _registry: &mut SurfaceRegistry) {}

    /// Positions used by position-based coverage.
    fn evidence(&self) -> &[Vec3] {
        &[]
    }
}

pub fn evidence_source_for(config: &RevealConfig) -> Box<dyn EvidenceSource> {
    match config.evidence_mode {
        EvidenceMode::Movement => Box::new(MovementEvidence::from_config(config)),
        EvidenceMode::Gaze => Box::new(GazeEvidence::from_config(config)),
    }
}
