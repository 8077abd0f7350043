//! Cameras producing the projection and view matrices of the ring program.
//!
//! World space is +X right, +Y up. Clip space follows wgpu (NDC y up).

mod camera2d;

pub use camera2d::Camera2d;
