//! Normalised room coverage estimate.
//!
//! Two strategies, picked by evidence mode:
//! - bounding box: XZ extent of the observer's recorded path over the
//!   approximate room footprint (movement mode);
//! - fraction revealed: revealed surfaces over tracked surfaces (gaze mode).
//!
//! Coverage is recomputed on every triggering event. Additions and reveals
//! never lower it; removals report the raw value.

/// Coverage strategies and the estimator holding the latest value.
pub mod estimator;

/// Append-only, minimum-spaced record of observer positions.
pub mod evidence_trail;
