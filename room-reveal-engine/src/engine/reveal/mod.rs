//! Evidence sources: how the session learns which parts of the room have
//! been seen.
//!
//! Both variants plug into the same [`evidence_source::EvidenceSource`] seam;
//! everything downstream of it (coverage latch, solidify, passthrough fade)
//! is shared.

/// The evidence-source trait and the mode selector used by configuration.
pub mod evidence_source;

/// Gaze strategy: surfaces inside the view cone and range are revealed and
/// fade in to half opacity.
pub mod gaze;

/// Movement strategy: the walked path is recorded and streamed to the
/// reveal shader as a point list.
pub mod movement;
