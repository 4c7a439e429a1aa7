//! Material property names shared between the parameter bridge and
//! `surface_reveal.wgsl`.

pub const REVEAL_RADIUS: &str = "reveal_radius";
pub const EDGE_SOFTNESS: &str = "edge_softness";
pub const POINT_COUNT: &str = "point_count";
pub const SURFACE_MODE: &str = "surface_mode";
pub const REVEAL_POINTS: &str = "points";

/// `surface_mode` value for alpha-blended rendering.
pub const SURFACE_MODE_TRANSPARENT: f32 = 1.0;

/// `surface_mode` value for opaque rendering.
pub const SURFACE_MODE_OPAQUE: f32 = 0.0;
