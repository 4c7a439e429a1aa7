//! Surface detection collaborators.
//!
//! A provider plugin inserts [`events::DetectionSubsystem`], announces
//! surfaces through [`events::SurfacesChanged`] and owns the render entities
//! tagged [`events::DetectedSurface`]. The reveal core only subscribes.

/// Detection events, the surface entity marker and the subscription lifecycle.
pub mod events;

/// One-shot scene capability request gating the provider.
pub mod permission;

/// Desktop/CI provider that announces a synthetic room on a timer.
pub mod simulated;
