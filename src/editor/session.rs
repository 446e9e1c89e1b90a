//! Edit session - binds the board being painted to a catalog position
//!
//! The catalog on disk is authoritative. Every save or delete rewrites the
//! file and then reads it back; the in-memory [`Catalog`] is never patched.

use std::path::{Path, PathBuf};

use crate::catalog::{read_catalog, write_and_reload, Catalog, CatalogError, CatalogOp};
use crate::level::{decode, encode, Tile, TileGrid};
use crate::storage::LocalStorage;

pub const MSG_SAVED: &str = "Successfully saved map";
pub const MSG_NOTHING_TO_SAVE: &str = "Nothing to save";
pub const MSG_NEW_LEVEL: &str = "New level";

/// Discrete requests coming from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    New,
    Save,
    Delete,
    PrevLevel,
    NextLevel,
    /// Re-read the catalog file from disk
    Reload,
    /// Jump to a 1-based catalog position
    Load(usize),
    PlaceTile { x: usize, y: usize, tile: Tile },
    ClearTile { x: usize, y: usize },
}

/// Where the session stands relative to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No level loaded and nothing saved yet
    Empty,
    /// Board has no edits since it was loaded from or saved to this index
    Viewing(usize),
    /// Board differs from disk. Index 0 means it was never saved.
    Unsaved(usize),
}

pub struct EditSession {
    storage: LocalStorage,
    catalog_path: PathBuf,
    catalog: Catalog,
    /// 1-based catalog position, 0 for a level not yet saved
    current_index: usize,
    grid: TileGrid,
    dirty: bool,
    status: String,
}

impl EditSession {
    /// Open the catalog at `path` and show its first level
    ///
    /// Fails with [`CatalogError::FileNotFound`] if the file does not exist.
    pub fn open(storage: LocalStorage, path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let catalog_path = path.as_ref().to_path_buf();
        let catalog = read_catalog(&storage, &catalog_path)?;
        log::info!("Opened catalog {} ({} levels)", catalog_path.display(), catalog.len());

        let mut session = Self {
            storage,
            catalog_path,
            catalog,
            current_index: 0,
            grid: TileGrid::new(),
            dirty: false,
            status: String::new(),
        };
        if !session.catalog.is_empty() {
            session.load(1)?;
        }
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        match (self.current_index, self.dirty) {
            (0, false) if self.catalog.is_empty() && self.grid.is_empty() => SessionState::Empty,
            (0, _) => SessionState::Unsaved(0),
            (i, true) => SessionState::Unsaved(i),
            (i, false) => SessionState::Viewing(i),
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Last human-readable outcome, empty until something happened
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run a command, turning any failure into the status message
    ///
    /// State is left untouched when a command fails. Navigating an empty
    /// catalog is silently ignored.
    pub fn handle(&mut self, command: EditorCommand) {
        let result = match command {
            EditorCommand::New => {
                self.new_level();
                Ok(())
            }
            EditorCommand::Save => self.save().map(|_| ()),
            EditorCommand::Delete => self.delete(),
            EditorCommand::PrevLevel => self.prev_level().map(|_| ()),
            EditorCommand::NextLevel => self.next_level().map(|_| ()),
            EditorCommand::Reload => self.reload(),
            EditorCommand::Load(index) => self.load(index),
            EditorCommand::PlaceTile { x, y, tile } => {
                self.place_tile(x, y, tile);
                Ok(())
            }
            EditorCommand::ClearTile { x, y } => {
                self.clear_tile(x, y);
                Ok(())
            }
        };

        if let Err(e) = result {
            self.report(command, e);
        }
    }

    fn report(&mut self, command: EditorCommand, error: CatalogError) {
        let message = match (&command, &error) {
            (EditorCommand::PrevLevel | EditorCommand::NextLevel, CatalogError::IndexOutOfRange { .. })
            | (EditorCommand::Load(_), CatalogError::IndexOutOfRange { len: 0, .. }) => {
                log::debug!("Ignoring {:?} on empty catalog", command);
                return;
            }
            (_, CatalogError::EmptyLevel) => MSG_NOTHING_TO_SAVE.to_string(),
            (EditorCommand::Delete, CatalogError::IndexOutOfRange { len: 0, .. }) => {
                "Nothing to delete".to_string()
            }
            (EditorCommand::Delete, CatalogError::IndexOutOfRange { index: 0, .. }) => {
                "Level has not been saved yet".to_string()
            }
            (EditorCommand::Save, e) => format!("Save failed: {}", e),
            (EditorCommand::Delete, e) => format!("Delete failed: {}", e),
            (_, e) => e.to_string(),
        };
        log::warn!("{:?}: {}", command, error);
        self.status = message;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a blank, unsaved level
    pub fn new_level(&mut self) {
        self.grid.clear();
        self.current_index = 0;
        self.dirty = false;
        self.status = MSG_NEW_LEVEL.to_string();
    }

    /// Replace the board with the catalog record at 1-based `index`
    pub fn load(&mut self, index: usize) -> Result<(), CatalogError> {
        self.catalog.check_index(index)?;
        if let Some(record) = self.catalog.get(index) {
            self.grid = decode(record);
        }
        self.current_index = index;
        self.dirty = false;
        Ok(())
    }

    /// Step back one level, wrapping from the first to the last
    pub fn prev_level(&mut self) -> Result<usize, CatalogError> {
        let len = self.nav_len()?;
        let index = match self.current_index {
            0 | 1 => len,
            i => (i - 1).min(len),
        };
        self.load(index)?;
        Ok(index)
    }

    /// Step forward one level, wrapping from the last to the first
    pub fn next_level(&mut self) -> Result<usize, CatalogError> {
        let len = self.nav_len()?;
        let index = if self.current_index >= len { 1 } else { self.current_index + 1 };
        self.load(index)?;
        Ok(index)
    }

    fn nav_len(&self) -> Result<usize, CatalogError> {
        if self.catalog.is_empty() {
            return Err(CatalogError::IndexOutOfRange { index: self.current_index, len: 0 });
        }
        Ok(self.catalog.len())
    }

    /// Put `tile` at `(x, y)`; off-board coordinates are ignored
    pub fn place_tile(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        let changed = self.grid.set(x, y, tile);
        self.dirty |= changed;
        changed
    }

    pub fn clear_tile(&mut self, x: usize, y: usize) -> bool {
        self.place_tile(x, y, Tile::Empty)
    }

    /// Write the board to the catalog and return the index it was saved at
    ///
    /// An empty board fails with [`CatalogError::EmptyLevel`] without touching
    /// the file. The board itself is left as drawn.
    pub fn save(&mut self) -> Result<usize, CatalogError> {
        let record = encode(&self.grid).ok_or(CatalogError::EmptyLevel)?;
        let op = match self.current_index {
            0 => CatalogOp::Append(record),
            index => CatalogOp::Overwrite(index, record),
        };
        let (index, catalog) = write_and_reload(&self.storage, &self.catalog_path, &self.catalog, &op)?;

        log::info!(
            "Saved level {} to {} ({} levels)",
            index,
            self.catalog_path.display(),
            catalog.len()
        );
        self.catalog = catalog;
        self.current_index = index;
        self.dirty = false;
        self.status = MSG_SAVED.to_string();
        Ok(index)
    }

    /// Remove the current level from the catalog
    ///
    /// Afterwards the first remaining level is shown, or the session is
    /// empty if none is left.
    pub fn delete(&mut self) -> Result<(), CatalogError> {
        if self.catalog.is_empty() {
            return Err(CatalogError::IndexOutOfRange { index: self.current_index, len: 0 });
        }
        let deleted = self.current_index;
        let op = CatalogOp::Delete(deleted);
        let (_, catalog) = write_and_reload(&self.storage, &self.catalog_path, &self.catalog, &op)?;
        self.catalog = catalog;

        log::info!("Deleted level {} ({} left)", deleted, self.catalog.len());
        if self.catalog.is_empty() {
            self.grid.clear();
            self.current_index = 0;
            self.dirty = false;
        } else {
            self.load(1)?;
        }
        self.status = format!("Deleted level {}", deleted);
        Ok(())
    }

    /// Re-read the catalog from disk
    ///
    /// A board without edits is refreshed from its record. Edits are kept and
    /// stay unsaved. If the current index no longer exists the board becomes
    /// a new, unsaved level.
    pub fn reload(&mut self) -> Result<(), CatalogError> {
        self.catalog = read_catalog(&self.storage, &self.catalog_path)?;
        if self.current_index > self.catalog.len() {
            self.current_index = 0;
            self.dirty = !self.grid.is_empty();
        } else if self.current_index > 0 && !self.dirty {
            self.load(self.current_index)?;
        }
        self.status = format!("Reloaded {} levels", self.catalog.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::WIDTH;
    use tempfile::TempDir;

    const LEVEL_1: &str = "#####\n#. @#\n#$  #\n#####\n";
    const LEVEL_2: &str = "#####\n# @ #\n#  $#\n#####\n";

    fn setup(contents: &str) -> (TempDir, EditSession) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("levels.txt"), contents).unwrap();
        let session = EditSession::open(LocalStorage::with_base_dir(dir.path()), "levels.txt").unwrap();
        (dir, session)
    }

    fn on_disk(dir: &TempDir) -> String {
        std::fs::read_to_string(dir.path().join("levels.txt")).unwrap()
    }

    fn two_levels() -> String {
        format!("{}\n{}", LEVEL_1, LEVEL_2)
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = EditSession::open(LocalStorage::with_base_dir(dir.path()), "levels.txt");
        assert!(matches!(result, Err(CatalogError::FileNotFound(_))));
    }

    #[test]
    fn test_initial_state() {
        let (_dir, session) = setup("");
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.current_index(), 0);

        let (_dir, session) = setup(&two_levels());
        assert_eq!(session.state(), SessionState::Viewing(1));
        assert_eq!(session.catalog_size(), 2);
        assert_eq!(session.grid()[(3, 1)], Tile::Player);
    }

    #[test]
    fn test_navigation_wraps() {
        let (_dir, mut session) = setup(&two_levels());

        session.handle(EditorCommand::Load(1));
        session.handle(EditorCommand::Load(2));
        assert_eq!(session.current_index(), 2);
        session.handle(EditorCommand::PrevLevel);
        assert_eq!(session.current_index(), 1);
        session.handle(EditorCommand::PrevLevel);
        assert_eq!(session.current_index(), 2);
        session.handle(EditorCommand::NextLevel);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_navigation_from_new_level() {
        let (_dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::New);
        session.handle(EditorCommand::NextLevel);
        assert_eq!(session.current_index(), 1);

        session.handle(EditorCommand::New);
        session.handle(EditorCommand::PrevLevel);
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_navigation_on_empty_catalog_is_silent_noop() {
        let (_dir, mut session) = setup("");
        session.handle(EditorCommand::NextLevel);
        session.handle(EditorCommand::PrevLevel);
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.status(), "");
    }

    #[test]
    fn test_edit_and_save_preserves_other_level() {
        let (dir, mut session) = setup(&two_levels());

        session.handle(EditorCommand::Load(2));
        session.handle(EditorCommand::ClearTile { x: 2, y: 1 });
        assert_eq!(session.state(), SessionState::Unsaved(2));

        session.handle(EditorCommand::Save);
        assert_eq!(session.status(), MSG_SAVED);
        assert_eq!(session.state(), SessionState::Viewing(2));

        let contents = on_disk(&dir);
        assert!(contents.starts_with(&format!("{}\n", LEVEL_1)));

        let saved = session.catalog().get(2).unwrap();
        assert_eq!(saved.rows()[1], format!("{:<width$}", "#   #", width = WIDTH));
        assert_eq!(saved.rows()[2], format!("{:<width$}", "#  $#", width = WIDTH));
        assert_eq!(
            session.catalog().get(1).unwrap().rows(),
            ["#####", "#. @#", "#$  #", "#####"]
        );
    }

    #[test]
    fn test_save_new_level_appends() {
        let (dir, mut session) = setup(&two_levels());

        session.handle(EditorCommand::New);
        session.handle(EditorCommand::PlaceTile { x: 0, y: 5, tile: Tile::Wall });
        session.handle(EditorCommand::PlaceTile { x: 1, y: 5, tile: Tile::Player });
        assert_eq!(session.state(), SessionState::Unsaved(0));

        assert_eq!(session.save().unwrap(), 3);
        assert_eq!(session.catalog_size(), 3);
        assert_eq!(session.current_index(), 3);
        assert!(!session.is_dirty());
        // The board stays where it was drawn
        assert_eq!(session.grid()[(1, 5)], Tile::Player);
        assert!(on_disk(&dir).starts_with(&two_levels()));

        // Loading the saved record shows it from the top row
        session.handle(EditorCommand::Load(3));
        assert_eq!(session.grid()[(1, 0)], Tile::Player);
    }

    #[test]
    fn test_save_into_empty_catalog() {
        let (dir, mut session) = setup("");
        session.handle(EditorCommand::PlaceTile { x: 4, y: 4, tile: Tile::Star });
        session.handle(EditorCommand::Save);

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.state(), SessionState::Viewing(1));
        assert_eq!(on_disk(&dir), "    $     \n");
    }

    #[test]
    fn test_empty_save_is_noop() {
        let (dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::New);
        session.handle(EditorCommand::Save);

        assert_eq!(session.status(), MSG_NOTHING_TO_SAVE);
        assert_eq!(session.catalog_size(), 2);
        assert_eq!(session.current_index(), 0);
        assert_eq!(on_disk(&dir), two_levels());
    }

    #[test]
    fn test_delete_reloads_first_level() {
        let (dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::Load(1));
        session.handle(EditorCommand::Delete);

        assert_eq!(session.catalog_size(), 1);
        assert_eq!(session.state(), SessionState::Viewing(1));
        assert_eq!(session.grid()[(2, 1)], Tile::Player);
        assert_eq!(on_disk(&dir), LEVEL_2);
    }

    #[test]
    fn test_delete_last_level_empties_session() {
        let (dir, mut session) = setup(LEVEL_1);
        session.handle(EditorCommand::Delete);

        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.grid().is_empty());
        assert_eq!(on_disk(&dir), "");
    }

    #[test]
    fn test_delete_on_empty_catalog() {
        let (_dir, mut session) = setup("");
        session.handle(EditorCommand::Delete);
        assert_eq!(session.status(), "Nothing to delete");
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_delete_unsaved_level_is_rejected() {
        let (dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::New);
        session.handle(EditorCommand::Delete);

        assert_eq!(session.status(), "Level has not been saved yet");
        assert_eq!(session.catalog_size(), 2);
        assert_eq!(on_disk(&dir), two_levels());
    }

    #[test]
    fn test_save_after_file_removed_reports_error() {
        let (dir, mut session) = setup(&two_levels());
        std::fs::remove_file(dir.path().join("levels.txt")).unwrap();

        session.handle(EditorCommand::ClearTile { x: 0, y: 0 });
        session.handle(EditorCommand::Save);

        assert!(session.status().starts_with("Save failed"));
        assert_eq!(session.state(), SessionState::Unsaved(1));
        assert_eq!(session.catalog_size(), 2);
    }

    #[test]
    fn test_place_tile_outside_board_is_ignored() {
        let (_dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::PlaceTile { x: 50, y: 0, tile: Tile::Wall });
        assert_eq!(session.state(), SessionState::Viewing(1));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_load_out_of_range_reports_status() {
        let (_dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::Load(7));
        assert_eq!(session.current_index(), 1);
        assert!(session.status().contains("does not exist"));
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let (dir, mut session) = setup(LEVEL_1);
        std::fs::write(dir.path().join("levels.txt"), two_levels()).unwrap();

        session.handle(EditorCommand::Reload);
        assert_eq!(session.catalog_size(), 2);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.status(), "Reloaded 2 levels");
    }

    #[test]
    fn test_reload_refreshes_unedited_board() {
        let (dir, mut session) = setup("#####\n#. @#\n#####\n");
        std::fs::write(dir.path().join("levels.txt"), "$$$\n").unwrap();

        session.handle(EditorCommand::Reload);
        assert_eq!(session.state(), SessionState::Viewing(1));
        assert_eq!(*session.grid(), decode(session.catalog().get(1).unwrap()));

        // Saving without edits leaves the external level intact
        session.handle(EditorCommand::Save);
        assert_eq!(on_disk(&dir), format!("{:<width$}\n", "$$$", width = WIDTH));
    }

    #[test]
    fn test_reload_keeps_edited_board() {
        let (dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::PlaceTile { x: 8, y: 8, tile: Tile::Star });
        std::fs::write(dir.path().join("levels.txt"), LEVEL_2).unwrap();

        session.handle(EditorCommand::Reload);
        assert_eq!(session.state(), SessionState::Unsaved(1));
        assert_eq!(session.grid()[(8, 8)], Tile::Star);
        assert_eq!(session.grid()[(3, 1)], Tile::Player);
    }

    #[test]
    fn test_reload_after_external_truncation() {
        let (dir, mut session) = setup(&two_levels());
        session.handle(EditorCommand::Load(2));
        std::fs::write(dir.path().join("levels.txt"), LEVEL_1).unwrap();

        session.reload().unwrap();
        assert_eq!(session.catalog_size(), 1);
        assert_eq!(session.state(), SessionState::Unsaved(0));
        assert_eq!(session.grid()[(2, 1)], Tile::Player);
    }
}
