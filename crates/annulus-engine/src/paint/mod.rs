//! Paint model shared between the scene, the CPU shading reference and renderers.
//!
//! Colors are straight-alpha linear RGBA. Geometry lives in `glam` types.

mod color;

pub use color::Rgba;
