//! Text codec for levels
//!
//! Converts between a [`TileGrid`] and the compact row block stored in the
//! catalog file. Encoding drops leading and trailing all-empty rows but keeps
//! every column, so each encoded row is exactly `WIDTH` glyphs wide. Column
//! padding is kept so existing catalog files stay byte-compatible.

use super::{Tile, TileGrid, HEIGHT, WIDTH};

/// One level as stored in the catalog: rows of glyphs, top to bottom
///
/// Records read from disk are kept verbatim (including trailing spaces) so
/// untouched levels can be written back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelRecord {
    rows: Vec<String>,
}

impl LevelRecord {
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Build a full board from a record's rows
///
/// Missing rows and short rows are filled with `Empty`; anything beyond the
/// board is ignored, as are unknown glyphs.
pub fn decode(record: &LevelRecord) -> TileGrid {
    let mut grid = TileGrid::new();
    for (y, row) in record.rows().iter().take(HEIGHT).enumerate() {
        for (x, c) in row.chars().take(WIDTH).enumerate() {
            grid[(x, y)] = Tile::from_glyph(c);
        }
    }
    grid
}

/// Compact a board into a record
///
/// Returns `None` when the board holds no tiles at all.
pub fn encode(grid: &TileGrid) -> Option<LevelRecord> {
    let (y_min, y_max) = occupied_row_range(grid)?;
    let rows = (y_min..=y_max)
        .map(|y| grid.row(y).iter().map(|t| t.glyph()).collect::<String>())
        .collect::<Vec<_>>();
    Some(LevelRecord { rows })
}

/// First and last rows containing a non-empty tile
///
/// Empty rows between them stay part of the level.
pub fn occupied_row_range(grid: &TileGrid) -> Option<(usize, usize)> {
    let y_min = (0..HEIGHT).find(|&y| !grid.row_is_empty(y))?;
    let y_max = (y_min..HEIGHT).rev().find(|&y| !grid.row_is_empty(y))?;
    Some((y_min, y_max))
}
