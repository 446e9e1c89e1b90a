//! Level Editor
//!
//! - Edit session bound to the level catalog
//! - Key/mouse bindings
//! - 2D board view

mod session;
mod actions;
mod grid_view;

pub use session::*;
pub use actions::*;
pub use grid_view::*;
