//! Reveal tuning loaded from `assets/config/reveal.json`.

/// Serde-backed configuration asset with defaults from the `constants` crate.
pub mod reveal_config;
