use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::reveal::{FLOOR_HEIGHT_MARGIN, FLOOR_NORMAL_THRESHOLD};

use crate::engine::transition::progress::advance_progress;

/// Opaque identifier assigned by the detection subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Label reported by the detection subsystem. Informational only, floor vs
/// wall is decided geometrically by [`FloorClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceClassification {
    Floor,
    Wall,
    Ceiling,
    #[default]
    Other,
}

/// Geometric summary of a detected plane or mesh fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub id: SurfaceId,
    pub center: Vec3,
    pub normal: Vec3,
    /// Half size of the bounding volume, in world axes.
    pub half_extents: Vec3,
    pub classification: SurfaceClassification,
}

impl Surface {
    pub fn new(id: SurfaceId, center: Vec3, normal: Vec3) -> Self {
        Self {
            id,
            center,
            normal,
            half_extents: Vec3::ZERO,
            classification: SurfaceClassification::Other,
        }
    }

    pub fn with_half_extents(mut self, half_extents: Vec3) -> Self {
        self.half_extents = half_extents;
        self
    }

    pub fn with_classification(mut self, classification: SurfaceClassification) -> Self {
        self.classification = classification;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialMode {
    #[default]
    Hidden,
    Revealing,
    Solid,
}

/// Mutable reveal bookkeeping for one surface.
///
/// `revealed` is a one-way latch and `reveal_progress` never decreases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRevealState {
    pub revealed: bool,
    pub reveal_progress: f32,
    pub is_floor: bool,
    pub material_mode: MaterialMode,
}

impl SurfaceRevealState {
    pub fn new(is_floor: bool) -> Self {
        Self {
            revealed: false,
            reveal_progress: 0.0,
            is_floor,
            material_mode: MaterialMode::Hidden,
        }
    }

    /// Returns true only on the call that flips the latch.
    pub fn mark_revealed(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn reveal_fully(&mut self) {
        self.revealed = true;
        self.reveal_progress = 1.0;
    }

    pub fn is_fading_in(&self) -> bool {
        self.revealed && self.reveal_progress < 1.0
    }

    /// Advances the fade-in of a revealed surface and returns the new progress.
    pub fn advance_reveal(&mut self, delta: f32, fade_in_duration: f32) -> Option<f32> {
        if !self.is_fading_in() {
            return None;
        }
        self.reveal_progress = advance_progress(self.reveal_progress, delta, fade_in_duration);
        Some(self.reveal_progress)
    }
}

/// Horizontal surfaces well below the observer are floors, everything else
/// solidifies as wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorClassifier {
    /// Minimum |cos| between the surface normal and world up.
    pub normal_threshold: f32,
    /// How far below eye height a floor must sit.
    pub height_margin: f32,
}

impl Default for FloorClassifier {
    fn default() -> Self {
        Self {
            normal_threshold: FLOOR_NORMAL_THRESHOLD,
            height_margin: FLOOR_HEIGHT_MARGIN,
        }
    }
}

impl FloorClassifier {
    pub fn is_horizontal(&self, surface: &Surface) -> bool {
        surface.normal.normalize_or_zero().dot(Vec3::Y).abs() > self.normal_threshold
    }

    pub fn is_below(&self, surface: &Surface, observer_height: f32) -> bool {
        surface.center.y < observer_height - self.height_margin
    }

    pub fn is_floor(&self, surface: &Surface, observer_height: f32) -> bool {
        self.is_horizontal(surface) && self.is_below(surface, observer_height)
    }
}
