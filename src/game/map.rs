//! Tile Map Accessor
//!
//! The mutable grid of tile-type codes the player moves through. The grid is
//! supplied externally at session start (no generation here) and mutated only
//! by the mining machine, one `Earth -> Tunnel` cell at a time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One cell of the map grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    /// Open air above ground. Never blocks, never minable.
    Sky = 0,
    /// Solid ground. Blocks movement; the only minable type.
    Earth = 1,
    /// An excavated cell. Passable, cannot be re-mined.
    Tunnel = 2,
    /// Unclassified decorative ground cover (the renderer's fallback type).
    /// Passable and not minable.
    #[default]
    Surface = 3,
}

impl TileType {
    /// Whether this tile blocks movement.
    #[inline]
    pub fn blocks(self) -> bool {
        matches!(self, TileType::Earth)
    }

    /// Whether this tile can be converted to a tunnel.
    #[inline]
    pub fn minable(self) -> bool {
        matches!(self, TileType::Earth)
    }
}

/// Error building a map from externally supplied rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The supplied grid has no rows or no columns.
    #[error("map grid must have at least one row and one column")]
    Empty,
    /// A row's width differs from the first row's.
    #[error("row {row} has {len} tiles, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Width established by the first row.
        expected: usize,
    },
}

/// 2D grid of tiles, row-major, `height` rows of `width` columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<TileType>,
}

impl TileMap {
    /// Create a map filled with a single tile type.
    pub fn new(width: usize, height: usize, fill: TileType) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Build a map from externally supplied rows (the session's map
    /// contract). Rows must be non-empty and rectangular.
    pub fn from_rows(rows: Vec<Vec<TileType>>) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, tiles) in rows.into_iter().enumerate() {
            if tiles.len() != width {
                return Err(MapError::RaggedRow {
                    row,
                    len: tiles.len(),
                    expected: width,
                });
            }
            cells.extend(tiles);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width in tiles.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked lookup. Out-of-range coordinates (including negative
    /// ones from neighbor offsets) return `None`, never an error; movement
    /// checks treat `None` as non-blocking and mining treats it as
    /// non-minable.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Write a cell. The caller guarantees bounds - the mining machine only
    /// targets cells it has already read back through [`TileMap::get`].
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: TileType) {
        self.cells[y as usize * self.width + x as usize] = tile;
    }

    /// Overwrite a whole row. Scenario/test convenience.
    pub fn fill_row(&mut self, y: usize, tile: TileType) {
        for x in 0..self.width {
            self.cells[y * self.width + x] = tile;
        }
    }

    /// Number of cells of the given type.
    pub fn count(&self, tile: TileType) -> usize {
        self.cells.iter().filter(|&&c| c == tile).count()
    }

    /// All cells in row-major order (the order state digests use).
    pub fn tiles(&self) -> impl Iterator<Item = TileType> + '_ {
        self.cells.iter().copied()
    }
}
