/*
board.rs

Copyright 2025 Hervé Quatremain

This file is part of Luminode.

Luminode is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Luminode is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Luminode. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Board context of the active level.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TILE_SIZE;
use crate::connectivity::GridPos;
use crate::math::Vec2;
use crate::generator::level::GeneratedLevel;

/// Dimensions and fixed cells of the active level.
///
/// The board is handed to the systems on every tick through
/// [`crate::store::TickContext`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Board {
    /// Number of cells on each side of the board.
    pub size: usize,

    /// Cell of the source tile.
    pub source: GridPos,

    /// Cell of the target tile.
    pub target: GridPos,

    /// Side of a tile in presentation units.
    pub tile_size: f64,
}

impl Board {
    /// Create a [`Board`] object.
    pub fn new(size: usize, source: GridPos, target: GridPos, tile_size: f64) -> Self {
        Self {
            size,
            source,
            target,
            tile_size,
        }
    }

    /// Create a [`Board`] object for the given level.
    pub fn from_level(level: &GeneratedLevel, tile_size: f64) -> Self {
        Self::new(level.size, level.source, level.target, tile_size)
    }

    /// Whether the position is on the board.
    pub fn contains(&self, position: GridPos) -> bool {
        position.is_inside(self.size)
    }

    /// Grid cell nearest to a tile whose top-left corner is at `corner`.
    ///
    /// # Panics
    ///
    /// Panics if the tile size is zero.
    pub fn snap(&self, corner: Vec2) -> GridPos {
        let cell: Vec2 = corner.div(self.tile_size);
        GridPos::new(cell.x.round() as i32, cell.y.round() as i32)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(0, GridPos::default(), GridPos::default(), DEFAULT_TILE_SIZE)
    }
}
