//! Editor Action Definitions
//!
//! Maps keyboard and mouse input onto [`EditorCommand`]s. The table below is
//! the only place keys are bound, so the HUD help line and the input loop
//! cannot drift apart.

use macroquad::prelude::*;
use crate::level::Tile;
use super::EditorCommand;

/// A bound key with the command it triggers and a short description
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub key_label: &'static str,
    pub command: EditorCommand,
    pub status_tip: &'static str,
}

pub const KEY_BINDINGS: [KeyBinding; 7] = [
    KeyBinding {
        key: KeyCode::N,
        key_label: "N",
        command: EditorCommand::New,
        status_tip: "New level",
    },
    KeyBinding {
        key: KeyCode::S,
        key_label: "S",
        command: EditorCommand::Save,
        status_tip: "Save",
    },
    KeyBinding {
        key: KeyCode::Delete,
        key_label: "Del",
        command: EditorCommand::Delete,
        status_tip: "Delete level",
    },
    KeyBinding {
        key: KeyCode::PageUp,
        key_label: "PgUp",
        command: EditorCommand::PrevLevel,
        status_tip: "Previous",
    },
    KeyBinding {
        key: KeyCode::PageDown,
        key_label: "PgDn",
        command: EditorCommand::NextLevel,
        status_tip: "Next",
    },
    KeyBinding {
        key: KeyCode::Home,
        key_label: "Home",
        command: EditorCommand::Load(1),
        status_tip: "First",
    },
    KeyBinding {
        key: KeyCode::R,
        key_label: "R",
        command: EditorCommand::Reload,
        status_tip: "Reload",
    },
];

/// Commands for every bound key pressed this frame
pub fn poll_key_commands() -> Vec<EditorCommand> {
    KEY_BINDINGS
        .iter()
        .filter(|b| is_key_pressed(b.key))
        .map(|b| b.command)
        .collect()
}

/// One-line help text for the HUD, e.g. "N: New level  S: Save"
pub fn help_line() -> String {
    KEY_BINDINGS
        .iter()
        .map(|b| format!("{}: {}", b.key_label, b.status_tip))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Currently selected placeable tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    selected: usize,
}

impl Palette {
    pub fn selected(&self) -> Tile {
        Tile::PLACEABLE[self.selected]
    }

    /// Advance by one entry per wheel notch, wrapping at both ends
    ///
    /// Positive `scroll` (wheel up) moves forward.
    pub fn cycle(&mut self, scroll: f32) {
        let len = Tile::PLACEABLE.len();
        if scroll > 0.0 {
            self.selected = (self.selected + 1) % len;
        } else if scroll < 0.0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

/// Mouse buttons released this frame over the board
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    /// Board cell under the cursor
    pub tile: Option<(usize, usize)>,
    pub left_released: bool,
    pub right_released: bool,
}

/// Translate a click into a tile command. Left places, right clears.
pub fn pointer_command(input: PointerInput, palette: &Palette) -> Option<EditorCommand> {
    let (x, y) = input.tile?;
    if input.left_released {
        Some(EditorCommand::PlaceTile { x, y, tile: palette.selected() })
    } else if input.right_released {
        Some(EditorCommand::ClearTile { x, y })
    } else {
        None
    }
}
