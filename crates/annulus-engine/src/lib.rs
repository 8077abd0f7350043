//! Ring (annulus) rendering engine.
//!
//! The ring program maps a unit quad through `projection * view * model` and
//! keeps only the fragments whose normalized distance from the quad center
//! lies in `[inner, 1]`, filling them with a flat color.
//!
//! - [`shading`]: CPU reference of both program stages
//! - [`shader`]: the WGSL program text and stage selection
//! - [`render`]: wgpu renderers (instanced rings, low-res pixel target)
//! - [`scene`], [`camera`]: host-side inputs of the program
//! - [`device`], [`window`], [`core`], [`time`], [`logging`]: platform runtime

pub mod camera;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod shader;
pub mod shading;
pub mod time;
pub mod window;
