use bevy::prelude::*;

/// Tint of revealed surfaces while the room is being scanned.
pub const REVEAL_TINT: Color = Color::srgb(0.35, 0.75, 1.0);

pub const FLOOR_SOLID_COLOR: [f32; 4] = [0.42, 0.36, 0.30, 1.0];
pub const WALL_SOLID_COLOR: [f32; 4] = [0.86, 0.85, 0.82, 1.0];

/// Compositor background; its alpha is the passthrough opacity.
pub const PASSTHROUGH_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.0);

/// Eye height used for the desktop observer and the simulated room.
pub const OBSERVER_EYE_HEIGHT: f32 = 1.6;

pub const SIMULATED_ROOM_HEIGHT: f32 = 2.6;
