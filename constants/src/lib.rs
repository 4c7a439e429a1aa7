pub mod coverage;
pub mod path;
pub mod render_settings;
pub mod reveal;
pub mod shader_params;
pub mod transition;
