//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Window background (bright blue)
pub const BG_COLOR: Color = Color::new(0.0, 0.667, 1.0, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.85, 0.9, 1.0, 0.8);

/// Tile outlines
pub const GRID_COLOR: Color = Color::new(0.157, 0.157, 0.157, 1.0); // ~40, 40, 40

/// Hovered tile outline
pub const HIGHLIGHT_COLOR: Color = Color::new(0.0, 0.196, 1.0, 1.0); // ~0, 50, 255

// =============================================================================
// Font Sizes
// =============================================================================

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 24.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 20.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 16.0;

// =============================================================================
// Tile fallback colors (used when no image is loaded)
// =============================================================================

pub const WALL_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);

pub const STAR_COLOR: Color = Color::new(1.0, 0.85, 0.1, 1.0);

pub const PLAYER_COLOR: Color = Color::new(1.0, 0.6, 0.8, 1.0);

pub const GOAL_COLOR: Color = Color::new(0.9, 0.1, 0.1, 1.0);

pub const OUTLINE_COLOR: Color = Color::new(0.2, 0.2, 0.2, 1.0);
