//! Per-frame Bevy systems around the reveal session.
//!
//! Frame order is fixed by the chained [`reveal_update::RevealSet`]:
//! ingest detection events, apply operator requests, advance the session,
//! flush materials.

/// Native coverage overlay text.
pub mod hud;

/// Force-complete / stop-revealing requests and their keyboard shortcuts.
pub mod operator;

/// Core plugin: system sets, signals, ingest and advance.
pub mod reveal_update;
