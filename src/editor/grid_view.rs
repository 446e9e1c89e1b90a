//! 2D Grid View - the painted board
//!
//! Pure layout math (`BoardLayout`) plus the macroquad drawing calls for tiles,
//! grid lines, the hover highlight, the cursor preview and the HUD.

use macroquad::prelude::*;
use crate::config::TileImages;
use crate::level::{Tile, TileGrid, HEIGHT, WIDTH};
use crate::ui::{self, Rect};
use super::{EditSession, SessionState};

/// Screen placement of the board
///
/// The board is centred in the window and then shifted by the camera offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub tile_size: f32,
}

impl BoardLayout {
    pub fn new(screen_w: f32, screen_h: f32, tile_size: f32, camera: (f32, f32)) -> Self {
        let margin_x = ((screen_w - WIDTH as f32 * tile_size) / 2.0).floor();
        let margin_y = ((screen_h - HEIGHT as f32 * tile_size) / 2.0).floor();
        Self {
            origin_x: margin_x + camera.0,
            origin_y: margin_y + camera.1,
            tile_size,
        }
    }

    /// Board bounds on screen
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            WIDTH as f32 * self.tile_size,
            HEIGHT as f32 * self.tile_size,
        )
    }

    /// Top-left pixel of tile `(x, y)`
    pub fn tile_origin(&self, x: usize, y: usize) -> (f32, f32) {
        (
            self.origin_x + x as f32 * self.tile_size,
            self.origin_y + y as f32 * self.tile_size,
        )
    }

    pub fn tile_rect(&self, x: usize, y: usize) -> Rect {
        let (left, top) = self.tile_origin(x, y);
        Rect::new(left, top, self.tile_size, self.tile_size)
    }

    /// Tile under a pixel, or `None` off the board
    pub fn tile_at_pixel(&self, px: f32, py: f32) -> Option<(usize, usize)> {
        if !self.rect().contains(px, py) {
            return None;
        }
        let x = ((px - self.origin_x) / self.tile_size) as usize;
        let y = ((py - self.origin_y) / self.tile_size) as usize;
        TileGrid::in_bounds(x, y).then_some((x, y))
    }
}

/// Optional images for the placeable tiles
#[derive(Default)]
pub struct TileTextures {
    wall: Option<Texture2D>,
    star: Option<Texture2D>,
    player: Option<Texture2D>,
    goal: Option<Texture2D>,
}

impl TileTextures {
    /// Load whatever images are configured; failures fall back to shapes
    pub async fn load(images: &TileImages) -> Self {
        Self {
            wall: load_optional(images.wall.as_deref()).await,
            star: load_optional(images.star.as_deref()).await,
            player: load_optional(images.player.as_deref()).await,
            goal: load_optional(images.goal.as_deref()).await,
        }
    }

    fn get(&self, tile: Tile) -> Option<&Texture2D> {
        match tile {
            Tile::Empty => None,
            Tile::Wall => self.wall.as_ref(),
            Tile::Star => self.star.as_ref(),
            Tile::Player => self.player.as_ref(),
            Tile::UncoveredGoal => self.goal.as_ref(),
        }
    }
}

async fn load_optional(path: Option<&str>) -> Option<Texture2D> {
    let path = path?;
    match load_texture(path).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Linear);
            log::info!("Loaded tile image {}", path);
            Some(tex)
        }
        Err(e) => {
            log::warn!("Failed to load tile image {}: {}, drawing shapes instead", path, e);
            None
        }
    }
}

/// Draw one tile kind into `rect`
pub fn draw_tile(tile: Tile, rect: Rect, textures: &TileTextures) {
    if tile.is_empty() {
        return;
    }
    if let Some(tex) = textures.get(tile) {
        draw_texture_ex(
            tex,
            rect.x,
            rect.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(rect.w, rect.h)),
                ..Default::default()
            },
        );
        return;
    }

    let (cx, cy) = (rect.center_x(), rect.center_y());
    let r = rect.w * 0.35;
    match tile {
        Tile::Wall => draw_rectangle(rect.x, rect.y, rect.w, rect.h, ui::WALL_COLOR),
        Tile::Star => draw_poly(cx, cy, 5, r, -90.0, ui::STAR_COLOR),
        Tile::Player => {
            draw_circle(cx, cy, r, ui::PLAYER_COLOR);
            draw_circle_lines(cx, cy, r, 2.0, ui::OUTLINE_COLOR);
        }
        Tile::UncoveredGoal => draw_circle_lines(cx, cy, r, 4.0, ui::GOAL_COLOR),
        Tile::Empty => {}
    }
}

/// Draw every non-empty tile of the board
pub fn draw_board(layout: &BoardLayout, grid: &TileGrid, textures: &TileTextures) {
    for (x, y, tile) in grid.occupied() {
        draw_tile(tile, layout.tile_rect(x, y), textures);
    }
}

/// Grid lines around every cell
pub fn draw_grid_lines(layout: &BoardLayout) {
    let board = layout.rect();
    for x in 0..=WIDTH {
        let px = board.x + x as f32 * layout.tile_size;
        draw_line(px, board.y, px, board.bottom(), 1.0, ui::GRID_COLOR);
    }
    for y in 0..=HEIGHT {
        let py = board.y + y as f32 * layout.tile_size;
        draw_line(board.x, py, board.right(), py, 1.0, ui::GRID_COLOR);
    }
}

/// Outline the hovered cell
pub fn draw_highlight(layout: &BoardLayout, x: usize, y: usize) {
    let r = layout.tile_rect(x, y);
    draw_rectangle_lines(r.x, r.y, r.w, r.h, 4.0, ui::HIGHLIGHT_COLOR);
}

/// Selected tile kind drawn centred on the cursor
pub fn draw_cursor_preview(layout: &BoardLayout, tile: Tile, mouse: (f32, f32), textures: &TileTextures) {
    let size = layout.tile_size;
    let rect = Rect::new(mouse.0 - size / 2.0, mouse.1 - size / 2.0, size, size);
    draw_tile(tile, rect, textures);
}

/// Level counter, selected tile, status message and key help
pub fn draw_hud(session: &EditSession, selected: Tile, help: &str) {
    let level = match session.state() {
        SessionState::Empty => "No levels".to_string(),
        SessionState::Unsaved(0) => format!("New level ({} saved)", session.catalog_size()),
        SessionState::Unsaved(i) => format!("Level {}/{} *", i, session.catalog_size()),
        SessionState::Viewing(i) => format!("Level {}/{}", i, session.catalog_size()),
    };

    let pad = 10.0;
    let line = ui::FONT_SIZE_HEADER + 4.0;
    draw_text(&level, pad, pad + ui::FONT_SIZE_HEADER, ui::FONT_SIZE_HEADER, ui::TEXT_COLOR);
    draw_text(
        &format!("Tile: {}", selected.label()),
        pad,
        pad + ui::FONT_SIZE_HEADER + line,
        ui::FONT_SIZE_CONTENT,
        ui::TEXT_COLOR,
    );
    if !session.status().is_empty() {
        draw_text(
            session.status(),
            pad,
            pad + ui::FONT_SIZE_HEADER + line * 2.0,
            ui::FONT_SIZE_CONTENT,
            ui::TEXT_COLOR,
        );
    }
    draw_text(help, pad, screen_height() - pad, ui::FONT_SIZE_SMALL, ui::TEXT_DIM);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BoardLayout {
        BoardLayout::new(800.0, 800.0, 60.0, (0.0, 0.0))
    }

    #[test]
    fn test_board_is_centred() {
        let l = layout();
        assert_eq!(l.origin_x, 100.0);
        assert_eq!(l.origin_y, 100.0);
        assert_eq!(l.tile_origin(2, 3), (220.0, 280.0));
    }

    #[test]
    fn test_tile_at_pixel() {
        let l = layout();
        assert_eq!(l.tile_at_pixel(100.0, 100.0), Some((0, 0)));
        assert_eq!(l.tile_at_pixel(159.9, 100.0), Some((0, 0)));
        assert_eq!(l.tile_at_pixel(160.0, 100.0), Some((1, 0)));
        assert_eq!(l.tile_at_pixel(699.0, 699.0), Some((9, 9)));
        assert_eq!(l.tile_at_pixel(700.0, 400.0), None);
        assert_eq!(l.tile_at_pixel(99.0, 400.0), None);
    }

    #[test]
    fn test_camera_offset_moves_board() {
        let l = BoardLayout::new(800.0, 800.0, 60.0, (-40.0, 20.0));
        assert_eq!(l.tile_origin(0, 0), (60.0, 120.0));
        assert_eq!(l.tile_at_pixel(100.0, 100.0), None);
        assert_eq!(l.tile_at_pixel(130.0, 130.0), Some((1, 0)));
    }
}
