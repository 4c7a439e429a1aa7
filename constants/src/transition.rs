/// Seconds for surfaces to go from transparent to fully solid.
pub const SOLIDIFY_DURATION: f32 = 2.0;

/// Seconds for the camera passthrough to fade to black once solidified.
pub const PASSTHROUGH_FADE_DURATION: f32 = 1.0;
