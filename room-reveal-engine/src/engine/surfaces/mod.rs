//! Detected room surfaces and their per-surface reveal state.

/// Indexed table of tracked surfaces, mutated only by detection add/remove.
pub mod registry;

/// Surface identity, geometry summary, reveal state and floor classification.
pub mod surface;
