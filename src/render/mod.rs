// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rasterization of placed dungeons.
//!
//! [`rasterize`] paints rooms and corridors onto a [`TileGrid`]. The grid prints
//! one character per tile using the fixed [`Tile`] legend.

use std::fmt;

pub mod raster;
pub mod summary;
pub mod text;

pub use raster::{grid_extent, rasterize};
pub use summary::floor_summary;
pub use text::{legend, to_trimmed_string};

/// Blank tiles added past the furthest room edge on both axes.
pub const DEFAULT_GRID_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Floor,
    Wall,
    Corridor,
    Door,
    Spawn,
    Stairs,
}

impl Tile {
    pub const ALL: [Tile; 7] = [
        Self::Empty,
        Self::Floor,
        Self::Wall,
        Self::Corridor,
        Self::Door,
        Self::Spawn,
        Self::Stairs,
    ];

    pub fn as_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Corridor => ',',
            Self::Door => '+',
            Self::Spawn => 'S',
            Self::Stairs => '>',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|tile| tile.as_char() == ch)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Floor => "room floor",
            Self::Wall => "wall",
            Self::Corridor => "corridor",
            Self::Door => "door",
            Self::Spawn => "spawn",
            Self::Stairs => "stairs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One-tile wall ring around a floor interior.
    Walled,
    /// The whole footprint is floor.
    #[default]
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub padding: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            padding: DEFAULT_GRID_PADDING,
        }
    }
}

impl RenderOptions {
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }
}

/// A fixed-size, bounds-checked tile grid. Row-major, `y` grows downwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid filled with [`Tile::Empty`].
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = width
            .checked_mul(height)
            .ok_or(GridError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![Tile::Empty; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Tile, GridError> {
        let idx = self.index_of(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> Result<(), GridError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = tile;
        Ok(())
    }

    /// Row `y` as a slice, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[Tile]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|cell| **cell == tile).count()
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if !self.in_bounds(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y * self.width) + x)
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for tile in &self.cells[y * self.width..(y + 1) * self.width] {
                f.write_char(tile.as_char())?;
            }

            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "grid area overflow: {width}*{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::{GridError, Tile, TileGrid};

    #[test]
    fn set_and_get_in_bounds() {
        let mut grid = TileGrid::new(3, 2).expect("grid");
        assert_eq!(grid.get(1, 0).unwrap(), Tile::Empty);
        grid.set(1, 0, Tile::Floor).unwrap();
        assert_eq!(grid.get(1, 0).unwrap(), Tile::Floor);
        assert_eq!(grid.count(Tile::Floor), 1);
    }

    #[test]
    fn rejects_out_of_bounds_access() {
        let mut grid = TileGrid::new(3, 2).expect("grid");
        let err = grid.set(3, 0, Tile::Wall).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            }
        );
        assert!(grid.get(0, 2).is_err());
    }

    #[test]
    fn rejects_area_overflow() {
        let err = TileGrid::new(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            GridError::AreaOverflow {
                width: usize::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn displays_rows_joined_by_newlines() {
        let mut grid = TileGrid::new(3, 2).expect("grid");
        grid.set(0, 0, Tile::Wall).unwrap();
        grid.set(1, 0, Tile::Door).unwrap();
        grid.set(2, 1, Tile::Stairs).unwrap();
        assert_eq!(grid.to_string(), "#+ \n  >");
        assert_eq!(grid.row(1), Some(&[Tile::Empty, Tile::Empty, Tile::Stairs][..]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn legend_characters_round_trip() {
        for tile in Tile::ALL {
            assert_eq!(Tile::from_char(tile.as_char()), Some(tile));
        }
        assert_eq!(Tile::from_char('?'), None);
    }
}
