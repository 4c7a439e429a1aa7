//! Application setup and lifecycle states.

/// Builds the Bevy app: plugins, loading pipeline and runtime systems.
pub mod app_setup;

/// `Loading → Running | Disabled` and the transitions between them.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
