//! Scanning → solidify → passthrough-off transition.
//!
//! The state machine owns both one-shot latches as explicit phases, so a
//! session can never fall back to an earlier stage:
//!
//! ```text
//! Scanning ──(coverage ≥ target | force)──> Solidifying ──(progress = 1)──> Complete
//!                      │                                        │
//!              ScanningComplete                         SolidifyComplete
//!                                                   + passthrough fade-out
//! ```

/// Passthrough fade-out sub-process started when solidify completes.
pub mod passthrough;

/// Frame-time progress helper shared by every timed animation.
pub mod progress;

/// Transition phases, latches and signals.
pub mod state_machine;
