//! Observer pose and the desktop camera that stands in for a headset.

/// Plain observer pose consumed by the reveal core.
pub mod observer;

/// `ObserverCamera` marker plus a WASD / right-mouse fly controller for
/// exercising the movement strategy without a headset.
pub mod observer_camera;
