//! Level model - tiles and the fixed-size editing grid
//!
//! A level is painted on a `WIDTH x HEIGHT` board of [`Tile`]s. Each tile kind
//! has exactly one glyph in the text catalog format; the glyph table below is
//! the only place where characters and tiles meet.

mod codec;

pub use codec::*;

/// Tiles per board row
pub const WIDTH: usize = 10;
/// Tiles per board column
pub const HEIGHT: usize = 10;

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Star,
    Player,
    UncoveredGoal,
}

impl Tile {
    /// Tile kinds the designer can place, in palette order
    pub const PLACEABLE: [Tile; 4] = [Tile::Wall, Tile::Star, Tile::Player, Tile::UncoveredGoal];

    /// Canonical glyph used in the catalog file
    pub const fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Star => '$',
            Tile::Player => '@',
            Tile::UncoveredGoal => '.',
        }
    }

    /// Map a glyph back to its tile. Unknown characters decode as `Empty`.
    pub const fn from_glyph(c: char) -> Tile {
        match c {
            '#' => Tile::Wall,
            '$' => Tile::Star,
            '@' => Tile::Player,
            '.' => Tile::UncoveredGoal,
            _ => Tile::Empty,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }

    /// Human-readable name for the HUD
    pub fn label(self) -> &'static str {
        match self {
            Tile::Empty => "Empty",
            Tile::Wall => "Wall",
            Tile::Star => "Star",
            Tile::Player => "Player",
            Tile::UncoveredGoal => "Goal",
        }
    }
}

/// Fixed-size board of tiles, indexed by `(x, y)`
///
/// Dimensions never change. Indexing outside the board panics; callers that
/// deal with untrusted coordinates go through [`TileGrid::get`] / [`TileGrid::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: [[Tile; WIDTH]; HEIGHT],
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGrid {
    /// An all-empty board
    pub const fn new() -> Self {
        Self {
            tiles: [[Tile::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Whether `(x, y)` lies on the board
    pub fn in_bounds(x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT
    }

    /// Set the tile at `(x, y)`. Returns true if the board changed.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        if !Self::in_bounds(x, y) || self.tiles[y][x] == tile {
            return false;
        }
        self.tiles[y][x] = tile;
        true
    }

    /// Reset every cell to `Empty`
    pub fn clear(&mut self) {
        self.tiles = [[Tile::Empty; WIDTH]; HEIGHT];
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Tile; WIDTH] {
        &self.tiles[y]
    }

    pub fn row_is_empty(&self, y: usize) -> bool {
        self.tiles[y].iter().all(|t| t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        (0..HEIGHT).all(|y| self.row_is_empty(y))
    }

    /// Iterate over all non-empty cells as `(x, y, tile)`
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, t)| !t.is_empty())
                .map(move |(x, t)| (x, y, *t))
        })
    }
}

impl std::ops::Index<(usize, usize)> for TileGrid {
    type Output = Tile;

    fn index(&self, (x, y): (usize, usize)) -> &Tile {
        &self.tiles[y][x]
    }
}

impl std::ops::IndexMut<(usize, usize)> for TileGrid {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Tile {
        &mut self.tiles[y][x]
    }
}
