pub mod camera;
pub mod config;
pub mod core;
pub mod coverage;
pub mod detection;
pub mod errors;
pub mod loading;
pub mod materials;
pub mod reveal;
pub mod session;
pub mod surfaces;
pub mod systems;
pub mod transition;
