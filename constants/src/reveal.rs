/// Radius in metres around each evidence point that the reveal shader uncovers.
pub const REVEAL_RADIUS: f32 = 2.0;

/// Width of the soft falloff at the edge of the reveal radius.
pub const EDGE_SOFTNESS: f32 = 0.5;

/// Maximum distance from the observer at which a gazed-at surface is revealed.
pub const REVEAL_DISTANCE: f32 = 10.0;

/// Half-angle of the gaze cone, in degrees.
pub const REVEAL_ANGLE_DEGREES: f32 = 30.0;

/// Seconds for a revealed surface to fade in to its reveal opacity.
pub const FADE_IN_DURATION: f32 = 1.0;

/// Revealed surfaces stay half transparent until solidify.
pub const MAX_REVEAL_ALPHA: f32 = 0.5;

/// Minimum observer travel before another evidence point is recorded.
pub const MIN_DISTANCE_BETWEEN_POINTS: f32 = 0.5;

/// Surfaces whose normal has at least this |cos| against up count as horizontal.
pub const FLOOR_NORMAL_THRESHOLD: f32 = 0.7;

/// A horizontal surface must sit this far below the observer to be a floor.
pub const FLOOR_HEIGHT_MARGIN: f32 = 0.5;

/// Quest runtime capability needed before scene data is delivered.
pub const SCENE_PERMISSION: &str = "com.oculus.permission.USE_SCENE";
