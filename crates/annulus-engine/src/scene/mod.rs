//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - describe rings in world space and derive their per-draw program inputs
//! - provide deterministic ordering (z-index + insertion order)

mod list;
mod ring;
mod z_index;

pub use list::{DrawItem, DrawList, SortKey};
pub use ring::Ring;
pub use z_index::ZIndex;
