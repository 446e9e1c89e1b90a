//! Application state
//!
//! Owns the edit session plus everything the session does not care about:
//! palette selection, camera offset and loaded tile images. One `update` and
//! one `draw` per frame.

use macroquad::prelude::*;
use crate::config::EditorConfig;
use crate::editor::{
    draw_board, draw_cursor_preview, draw_grid_lines, draw_highlight, draw_hud, help_line,
    poll_key_commands, pointer_command, BoardLayout, EditSession, Palette, PointerInput, TileTextures,
};
use crate::ui;

/// Arrow keys held this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraPan {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl CameraPan {
    pub fn poll() -> Self {
        Self {
            left: is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::Right),
            up: is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::Down),
        }
    }

    /// Camera offset after one frame of panning
    pub fn apply(&self, camera: (f32, f32), speed: f32) -> (f32, f32) {
        let mut next = camera;
        if self.left {
            next.0 -= speed;
        }
        if self.right {
            next.0 += speed;
        }
        if self.up {
            next.1 -= speed;
        }
        if self.down {
            next.1 += speed;
        }
        next
    }
}

pub struct AppState {
    pub config: EditorConfig,
    pub session: EditSession,
    pub palette: Palette,
    /// Board offset from the centred position, in pixels
    pub camera: (f32, f32),
    pub textures: TileTextures,
    help: String,
}

impl AppState {
    pub fn new(config: EditorConfig, session: EditSession, textures: TileTextures) -> Self {
        Self {
            config,
            session,
            palette: Palette::default(),
            camera: (0.0, 0.0),
            textures,
            help: help_line(),
        }
    }

    fn layout(&self) -> BoardLayout {
        BoardLayout::new(screen_width(), screen_height(), self.config.tile_size, self.camera)
    }

    /// Poll input and run the resulting commands
    pub fn update(&mut self) {
        for command in poll_key_commands() {
            self.session.handle(command);
        }

        self.camera = CameraPan::poll().apply(self.camera, self.config.camera_speed);

        let (_, scroll) = mouse_wheel();
        self.palette.cycle(scroll);

        let (mx, my) = mouse_position();
        let pointer = PointerInput {
            tile: self.layout().tile_at_pixel(mx, my),
            left_released: is_mouse_button_released(MouseButton::Left),
            right_released: is_mouse_button_released(MouseButton::Right),
        };
        if let Some(command) = pointer_command(pointer, &self.palette) {
            self.session.handle(command);
        }
    }

    pub fn draw(&self) {
        clear_background(ui::BG_COLOR);

        let layout = self.layout();
        draw_board(&layout, self.session.grid(), &self.textures);
        draw_grid_lines(&layout);

        let mouse = mouse_position();
        if let Some((x, y)) = layout.tile_at_pixel(mouse.0, mouse.1) {
            draw_highlight(&layout, x, y);
            draw_cursor_preview(&layout, self.palette.selected(), mouse, &self.textures);
        }

        draw_hud(&self.session, self.palette.selected(), &self.help);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_pan() {
        let pan = CameraPan { left: true, down: true, ..Default::default() };
        assert_eq!(pan.apply((10.0, 10.0), 5.0), (5.0, 15.0));

        let opposite = CameraPan { left: true, right: true, ..Default::default() };
        assert_eq!(opposite.apply((0.0, 0.0), 5.0), (0.0, 0.0));

        assert_eq!(CameraPan::default().apply((3.0, 4.0), 5.0), (3.0, 4.0));
    }
}
