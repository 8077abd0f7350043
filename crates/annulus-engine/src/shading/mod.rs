//! CPU reference of the ring program.
//!
//! Both stages are pure functions of their inputs. `shader/ring.wgsl` computes
//! the same arithmetic on the GPU; keep the two in lockstep.
//!
//! Pipeline:
//! - vertex: `clip = projection * view * model * (x, y, 0, 1)`, `uv = (x, 1 - y)`
//! - fragment: `len = 2 * |uv - (0.5, 0.5)|`; discard when `len > 1` or `len < inner`

mod fragment;
mod vertex;

pub use fragment::{Fragment, RING_CENTER, ring_length, shade_fragment};
pub use vertex::{Transforms, VertexOutput, transform_vertex};
