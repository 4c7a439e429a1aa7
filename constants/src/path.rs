/// Reveal configuration, relative to the asset root.
pub const REVEAL_CONFIG_PATH: &str = "config/reveal.json";
