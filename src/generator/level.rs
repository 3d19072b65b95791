/*
level.rs

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

//! Turn a route into a playable level.
//!
//! The first cell of the route receives the source tile, the last cell the target tile.
//! Every cell in between receives a straight or a corner tile, rotated so that its two
//! open sides face the previous and the next cells of the route.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::longest_path::find_longest_path;
use super::maze::{Maze, mask_glyph};
use super::path::Path;
use crate::config::{MAX_GENERATION_ATTEMPTS, MIN_BOARD_SIZE};
use crate::connectivity::{self, Direction, GridPos, TileKind};

/// Type of errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The board is too small to hold a source and a target.
    #[error("board size {0} is too small (minimum is {min})", min = MIN_BOARD_SIZE)]
    InvalidSize(usize),

    /// The longest path of the generated tree is too short.
    #[error("longest path has only {length} cell(s)")]
    DegeneratePath { length: usize },

    /// No attempt produced a usable route.
    #[error("no usable route after {0} attempts")]
    AttemptsExhausted(usize),

    /// Two consecutive cells of the route do not share a side.
    #[error("cells {0} and {1} are not adjacent")]
    NotAdjacent(GridPos, GridPos),

    /// The route goes through the same cell twice.
    #[error("cell {0} appears more than once in the route")]
    RevisitedCell(GridPos),
}

/// Tile of a generated level.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct LevelTile {
    pub position: GridPos,
    pub kind: TileKind,
    pub rotation: u8,
}

impl LevelTile {
    /// Create a [`LevelTile`] object. The rotation is stored modulo 4.
    pub fn new(position: GridPos, kind: TileKind, rotation: u8) -> Self {
        Self {
            position,
            kind,
            rotation: rotation % 4,
        }
    }

    /// Open sides of the tile.
    pub fn connection_mask(&self) -> u8 {
        connectivity::connection_mask(self.kind, self.rotation)
    }
}

/// Generated level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratedLevel {
    /// Tiles of the level, in route order until the level is shuffled.
    pub tiles: Vec<LevelTile>,

    /// Cell of the source tile. It never moves.
    pub source: GridPos,

    /// Cell of the target tile. It never moves.
    pub target: GridPos,

    /// Number of cells on each side of the board.
    pub size: usize,

    /// Route the level was built from. The solution lays the tiles along that route.
    pub route: Path,
}

impl GeneratedLevel {
    /// Return the number of tiles of the given type.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    /// Return the tile at the given position.
    pub fn tile_at(&self, position: GridPos) -> Option<&LevelTile> {
        self.tiles.iter().find(|t| t.position == position)
    }

    /// Return the solved layout of the level.
    ///
    /// The tiles are laid along the route, with the rotation the assembly gives them.
    /// Returns [`None`] if the tiles of the level cannot cover the route, which
    /// happens only when the level was modified outside of this module.
    pub fn solve(&self) -> Option<Vec<LevelTile>> {
        let solved: GeneratedLevel = build_level(&self.route, self.size).ok()?;
        if solved.source != self.source || solved.target != self.target {
            return None;
        }
        let mut expected: Vec<TileKind> = solved.tiles.iter().map(|t| t.kind).collect();
        let mut available: Vec<TileKind> = self.tiles.iter().map(|t| t.kind).collect();
        expected.sort();
        available.sort();
        if expected != available {
            return None;
        }
        Some(solved.tiles)
    }

    /// Whether moving and rotating the tiles can solve the level.
    pub fn is_solvable(&self) -> bool {
        self.solve().is_some()
    }

    /// Render the board with one character per cell.
    ///
    /// `S` and `T` mark the source and the target, box-drawing characters show the
    /// open sides of the other tiles, and `·` marks empty cells.
    pub fn to_ascii(&self) -> String {
        let mut cells: Vec<char> = vec![mask_glyph(0); self.size * self.size];
        for tile in &self.tiles {
            if !tile.position.is_inside(self.size) {
                continue;
            }
            cells[tile.position.to_index(self.size)] = match tile.kind {
                TileKind::Source => 'S',
                TileKind::Target => 'T',
                _ => mask_glyph(tile.connection_mask()),
            };
        }
        cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Generate a level for a board of `size` x `size` cells.
///
/// Each attempt builds a uniform spanning tree of the grid and uses its longest path as
/// the route. Attempts that produce a route shorter than two cells are discarded.
///
/// # Errors
///
/// The function returns an error if the board is smaller than [`MIN_BOARD_SIZE`], or
/// if no attempt succeeded.
pub fn generate_level<R: Rng + ?Sized>(
    size: usize,
    rng: &mut R,
) -> Result<GeneratedLevel, LevelError> {
    if size < MIN_BOARD_SIZE {
        return Err(LevelError::InvalidSize(size));
    }
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let maze: Maze = Maze::generate(size, rng);
        let route: Path = find_longest_path(&maze);
        match build_level(&route, size) {
            Ok(level) => {
                debug!(
                    "Level {size}x{size} generated at attempt {attempt}: route of {} cells",
                    route.len()
                );
                return Ok(level);
            }
            Err(LevelError::DegeneratePath { length }) => {
                debug!("Attempt {attempt}: route of {length} cell(s), retrying");
            }
            Err(e) => return Err(e),
        }
    }
    Err(LevelError::AttemptsExhausted(MAX_GENERATION_ATTEMPTS))
}

/// Build the level tiles from the given route.
///
/// # Errors
///
/// The function returns an error if the route has fewer than two cells, goes
/// through a cell twice, or joins two cells that are not adjacent.
pub fn build_level(route: &Path, size: usize) -> Result<GeneratedLevel, LevelError> {
    let cells: &[GridPos] = route.get();
    let (Some(source), Some(target)) = (route.get_first(), route.get_last()) else {
        return Err(LevelError::DegeneratePath { length: 0 });
    };
    if cells.len() < 2 {
        return Err(LevelError::DegeneratePath { length: cells.len() });
    }
    if !route.is_simple() {
        let repeated: GridPos = cells
            .iter()
            .enumerate()
            .find(|(i, p)| cells[..*i].contains(p))
            .map_or(source, |(_, p)| *p);
        return Err(LevelError::RevisitedCell(repeated));
    }

    let directions: Vec<Direction> = cells
        .windows(2)
        .map(|w| Direction::between(w[0], w[1]).ok_or(LevelError::NotAdjacent(w[0], w[1])))
        .collect::<Result<_, _>>()?;

    let mut tiles: Vec<LevelTile> = Vec::with_capacity(cells.len());
    tiles.push(LevelTile::new(source, TileKind::Source, 0));
    for (i, position) in cells.iter().enumerate().take(cells.len() - 1).skip(1) {
        let (kind, rotation) = route_tile(directions[i - 1], directions[i])
            .ok_or(LevelError::RevisitedCell(*position))?;
        tiles.push(LevelTile::new(*position, kind, rotation));
    }
    tiles.push(LevelTile::new(target, TileKind::Target, 0));

    Ok(GeneratedLevel {
        tiles,
        source,
        target,
        size,
        route: route.clone(),
    })
}

/// Type and rotation of the tile on a route cell.
///
/// `entry` is the step that leads into the cell and `exit` the step that leaves it.
/// The tile must be open on the side facing the previous cell (`entry.opposite()`)
/// and on the side facing the next cell (`exit`).
fn route_tile(entry: Direction, exit: Direction) -> Option<(TileKind, u8)> {
    if entry == exit {
        let rotation: u8 = if exit.is_horizontal() { 1 } else { 0 };
        return Some((TileKind::Straight, rotation));
    }
    corner_rotation(entry.opposite(), exit).map(|r| (TileKind::Corner, r))
}

/// Rotation of the corner tile that is open on both sides.
///
/// Returns [`None`] if the sides are equal or opposite.
pub fn corner_rotation(a: Direction, b: Direction) -> Option<u8> {
    if a == b || a == b.opposite() {
        return None;
    }
    let wanted: u8 = a.mask() | b.mask();
    (0..4).find(|r| connectivity::connection_mask(TileKind::Corner, *r) == wanted)
}

/// Scramble the level.
///
/// The positions of the straight and corner tiles are permuted, and each of these
/// tiles gets a random rotation. The source and the target stay in place.
pub fn shuffle_tiles<R: Rng + ?Sized>(level: &mut GeneratedLevel, rng: &mut R) {
    let movable: Vec<usize> = level
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind.is_movable())
        .map(|(i, _)| i)
        .collect();
    let mut positions: Vec<GridPos> = movable.iter().map(|i| level.tiles[*i].position).collect();
    positions.shuffle(rng);
    for (index, position) in movable.into_iter().zip(positions) {
        let tile: &mut LevelTile = &mut level.tiles[index];
        tile.position = position;
        tile.rotation = rng.random_range(0..4);
    }
    debug!("Shuffled {} tiles", level.count(TileKind::Straight) + level.count(TileKind::Corner));
}
