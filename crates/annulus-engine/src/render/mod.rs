//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw lists and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily for the target format it is asked to draw into.
//!
//! Convention:
//! - CPU geometry is in world units (+Y up).
//! - Vertex shaders map to clip space with `projection * view * model`.

pub(crate) mod common;
mod ctx;

pub mod pixel;
pub mod ring;

pub use ctx::{RenderCtx, RenderTarget};
pub use pixel::PixelTarget;
pub use ring::RingRenderer;
