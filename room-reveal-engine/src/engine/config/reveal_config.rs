use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::coverage::{MAX_REVEAL_POINTS, ROOM_SIZE, TARGET_COVERAGE};
use constants::render_settings::{FLOOR_SOLID_COLOR, WALL_SOLID_COLOR};
use constants::reveal::{
    EDGE_SOFTNESS, FADE_IN_DURATION, FLOOR_HEIGHT_MARGIN, FLOOR_NORMAL_THRESHOLD,
    MIN_DISTANCE_BETWEEN_POINTS, REVEAL_ANGLE_DEGREES, REVEAL_DISTANCE, REVEAL_RADIUS,
};
use constants::transition::{PASSTHROUGH_FADE_DURATION, SOLIDIFY_DURATION};

use crate::engine::errors::RevealSetupError;
use crate::engine::reveal::evidence_source::EvidenceMode;
use crate::engine::surfaces::surface::FloorClassifier;

/// Reveal configuration as a Bevy asset. Missing JSON fields take their
/// compile-time default, so a partial file is valid.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct RevealConfig {
    #[serde(default)]
    pub evidence_mode: EvidenceMode,
    #[serde(default = "default_reveal_radius")]
    pub reveal_radius: f32,
    #[serde(default = "default_edge_softness")]
    pub edge_softness: f32,
    #[serde(default = "default_reveal_distance")]
    pub reveal_distance: f32,
    #[serde(default = "default_reveal_angle_degrees")]
    pub reveal_angle_degrees: f32,
    #[serde(default = "default_fade_in_duration")]
    pub fade_in_duration: f32,
    #[serde(default = "default_target_coverage")]
    pub target_coverage: f32,
    #[serde(default = "default_room_size")]
    pub room_size: f32,
    #[serde(default = "default_min_distance_between_points")]
    pub min_distance_between_points: f32,
    #[serde(default = "default_max_reveal_points")]
    pub max_reveal_points: usize,
    #[serde(default = "default_solidify_duration")]
    pub solidify_duration: f32,
    #[serde(default = "default_passthrough_fade_duration")]
    pub passthrough_fade_duration: f32,
    #[serde(default = "default_floor_normal_threshold")]
    pub floor_normal_threshold: f32,
    #[serde(default = "default_floor_height_margin")]
    pub floor_height_margin: f32,
    #[serde(default = "default_floor_color")]
    pub floor_color: [f32; 4],
    #[serde(default = "default_wall_color")]
    pub wall_color: [f32; 4],
}

fn default_reveal_radius() -> f32 {
    REVEAL_RADIUS
}
fn default_edge_softness() -> f32 {
    EDGE_SOFTNESS
}
fn default_reveal_distance() -> f32 {
    REVEAL_DISTANCE
}
fn default_reveal_angle_degrees() -> f32 {
    REVEAL_ANGLE_DEGREES
}
fn default_fade_in_duration() -> f32 {
    FADE_IN_DURATION
}
fn default_target_coverage() -> f32 {
    TARGET_COVERAGE
}
fn default_room_size() -> f32 {
    ROOM_SIZE
}
fn default_min_distance_between_points() -> f32 {
    MIN_DISTANCE_BETWEEN_POINTS
}
fn default_max_reveal_points() -> usize {
    MAX_REVEAL_POINTS
}
fn default_solidify_duration() -> f32 {
    SOLIDIFY_DURATION
}
fn default_passthrough_fade_duration() -> f32 {
    PASSTHROUGH_FADE_DURATION
}
fn default_floor_normal_threshold() -> f32 {
    FLOOR_NORMAL_THRESHOLD
}
fn default_floor_height_margin() -> f32 {
    FLOOR_HEIGHT_MARGIN
}
fn default_floor_color() -> [f32; 4] {
    FLOOR_SOLID_COLOR
}
fn default_wall_color() -> [f32; 4] {
    WALL_SOLID_COLOR
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            evidence_mode: EvidenceMode::default(),
            reveal_radius: REVEAL_RADIUS,
            edge_softness: EDGE_SOFTNESS,
            reveal_distance: REVEAL_DISTANCE,
            reveal_angle_degrees: REVEAL_ANGLE_DEGREES,
            fade_in_duration: FADE_IN_DURATION,
            target_coverage: TARGET_COVERAGE,
            room_size: ROOM_SIZE,
            min_distance_between_points: MIN_DISTANCE_BETWEEN_POINTS,
            max_reveal_points: MAX_REVEAL_POINTS,
            solidify_duration: SOLIDIFY_DURATION,
            passthrough_fade_duration: PASSTHROUGH_FADE_DURATION,
            floor_normal_threshold: FLOOR_NORMAL_THRESHOLD,
            floor_height_margin: FLOOR_HEIGHT_MARGIN,
            floor_color: FLOOR_SOLID_COLOR,
            wall_color: WALL_SOLID_COLOR,
        }
    }
}

impl RevealConfig {
    /// Rejects values the session cannot run with.
    pub fn validate(&self) -> Result<(), RevealSetupError> {
        let durations = [
            ("fade_in_duration", self.fade_in_duration),
            ("solidify_duration", self.solidify_duration),
            ("passthrough_fade_duration", self.passthrough_fade_duration),
            ("room_size", self.room_size),
            ("reveal_distance", self.reveal_distance),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value > 0.0) {
                return Err(RevealSetupError::invalid(
                    field,
                    format!("must be positive, got {value}"),
                ));
            }
        }

        if !(self.target_coverage > 0.0 && self.target_coverage <= 1.0) {
            return Err(RevealSetupError::invalid(
                "target_coverage",
                format!("must be in (0, 1], got {}", self.target_coverage),
            ));
        }

        if !(self.reveal_angle_degrees > 0.0 && self.reveal_angle_degrees <= 180.0) {
            return Err(RevealSetupError::invalid(
                "reveal_angle_degrees",
                format!("must be in (0, 180], got {}", self.reveal_angle_degrees),
            ));
        }

        if !(1..=MAX_REVEAL_POINTS).contains(&self.max_reveal_points) {
            return Err(RevealSetupError::invalid(
                "max_reveal_points",
                format!(
                    "must be between 1 and {MAX_REVEAL_POINTS}, got {}",
                    self.max_reveal_points
                ),
            ));
        }

        if !(self.min_distance_between_points >= 0.0) {
            return Err(RevealSetupError::invalid(
                "min_distance_between_points",
                format!("must not be negative, got {}", self.min_distance_between_points),
            ));
        }

        if !(0.0..=1.0).contains(&self.floor_normal_threshold) {
            return Err(RevealSetupError::invalid(
                "floor_normal_threshold",
                format!("must be in [0, 1], got {}", self.floor_normal_threshold),
            ));
        }

        Ok(())
    }

    pub fn floor_classifier(&self) -> FloorClassifier {
        FloorClassifier {
            normal_threshold: self.floor_normal_threshold,
            height_margin: self.floor_height_margin,
        }
    }

    pub fn floor_color(&self) -> Color {
        let [r, g, b, a] = self.floor_color;
        Color::srgba(r, g, b, a)
    }

    pub fn wall_color(&self) -> Color {
        let [r, g, b, a] = self.wall_color;
        Color::srgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RevealConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: RevealConfig =
            serde_json::from_str(r#"{ "evidence_mode": "movement", "room_size": 4.0 }"#)
                .expect("valid json");

        assert_eq!(config.evidence_mode, EvidenceMode::Movement);
        assert_eq!(config.room_size, 4.0);
        assert_eq!(config.target_coverage, 0.8);
        assert_eq!(config.max_reveal_points, 64);
        assert_eq!(config.floor_color, FLOOR_SOLID_COLOR);
    }

    #[test]
    fn empty_json_is_the_default_config() {
        let config: RevealConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(config.evidence_mode, EvidenceMode::Gaze);
        assert_eq!(config.solidify_duration, 2.0);
        assert_eq!(config.reveal_angle_degrees, 30.0);
    }

    #[test]
    fn shipped_asset_parses_and_validates() {
        let raw = include_str!("../../../assets/config/reveal.json");
        let config: RevealConfig = serde_json::from_str(raw).expect("shipped config parses");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let config = RevealConfig {
            solidify_duration: 0.0,
            ..default()
        };
        match config.validate() {
            Err(RevealSetupError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "solidify_duration")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let cases = [
            RevealConfig {
                target_coverage: 1.5,
                ..default()
            },
            RevealConfig {
                reveal_angle_degrees: 0.0,
                ..default()
            },
            RevealConfig {
                max_reveal_points: 65,
                ..default()
            },
            RevealConfig {
                min_distance_between_points: -1.0,
                ..default()
            },
            RevealConfig {
                floor_normal_threshold: 1.2,
                ..default()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?} should be invalid");
        }
    }
}
