//! Startup loading: reveal configuration asset to a ready session.

/// Loads `config/reveal.json`, validates it and installs the session.
pub mod config_loader;

/// Loading progress flags checked by the state transition.
pub mod progress;
