//! Material plumbing between the reveal core and Bevy's renderer.
//!
//! The core only ever writes into [`bridge::MaterialParameterBridge`]; the
//! flush system at the end of the frame turns those writes into material
//! assets, component swaps and the compositor clear colour.

/// Parameter cache written by the core, drained by the flush system.
pub mod bridge;

/// Applies dirty bridge state to material assets and `ClearColor`.
pub mod flush;

/// Custom reveal material and its uniform block.
pub mod reveal_material;

/// Floor and wall `StandardMaterial` templates used after solidify.
pub mod solid;
