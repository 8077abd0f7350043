//! Contracts between the runtime loop and applications.
//!
//! The runtime owns windows and GPU contexts; applications implement [`App`]
//! and draw through the per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
