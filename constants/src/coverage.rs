/// Coverage fraction at which scanning is considered complete.
pub const TARGET_COVERAGE: f32 = 0.8;

/// Approximate side length of the room footprint in metres.
pub const ROOM_SIZE: f32 = 5.0;

/// The reveal shader holds a fixed-size array of evidence points.
pub const MAX_REVEAL_POINTS: usize = 64;
