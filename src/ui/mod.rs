//! UI helpers for the board editor
//!
//! Layout rectangles and the shared color/font constants.

mod rect;
mod theme;

pub use rect::*;
pub use theme::*;
