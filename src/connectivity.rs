/*
connectivity.rs

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

//! Directions, grid positions, and tile connection masks.
//!
//! A connection mask is a 4-bit value with one bit per cardinal direction
//! (`1 << direction`). The level generator, the component store, and the
//! propagation solver all read tile openings through [`connection_mask`], so the
//! encoding below is shared by every part of the game.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Mask with the four direction bits set.
pub const ALL_DIRECTIONS_MASK: u8 = 0b1111;

/// Cardinal directions, in the order used for every traversal.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// All the directions, North first, then clockwise.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Direction after `n` clockwise quarter turns from North.
    pub const fn from_quarter_turns(n: u8) -> Self {
        match Direction::from_repr(n % 4) {
            Some(direction) => direction,
            None => Direction::North,
        }
    }

    /// Index of the direction (North=0 ... West=3).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn opposite(self) -> Self {
        Self::from_quarter_turns(self.index() + 2)
    }

    /// Rotate clockwise by the given number of quarter turns. Negative values rotate
    /// counterclockwise.
    pub fn rotate(self, quarter_turns: i32) -> Self {
        Self::from_quarter_turns((self.index() as i32 + quarter_turns).rem_euclid(4) as u8)
    }

    /// Bit of the direction in a connection mask.
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }

    /// Unit grid offset. The y axis grows toward the South.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Whether the direction is East or West.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Direction of the unit step from `from` to `to`, or [`None`] if the two
    /// positions are not orthogonally adjacent.
    pub fn between(from: GridPos, to: GridPos) -> Option<Direction> {
        let delta: (i32, i32) = (to.x - from.x, to.y - from.y);
        DIRECTIONS.into_iter().find(|d| d.offset() == delta)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Integer cell coordinates on the board. `(0, 0)` is the top-left cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Create a [`GridPos`] object.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Adjacent position in the given direction. The result might be off the board.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy): (i32, i32) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether the position lies on a `size` x `size` board.
    pub fn is_inside(self, size: usize) -> bool {
        let size: i64 = size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }

    /// Row-major index on a `size` x `size` board. The position must be inside.
    pub fn to_index(self, size: usize) -> usize {
        self.y as usize * size + self.x as usize
    }

    /// Position for a row-major index on a `size` x `size` board.
    pub fn from_index(index: usize, size: usize) -> Self {
        Self::new((index % size) as i32, (index / size) as i32)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tile types.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Source,
    Target,
    Straight,
    Corner,
    Empty,
}

impl TileKind {
    /// Connection mask before any rotation.
    pub const fn base_mask(self) -> u8 {
        match self {
            TileKind::Source | TileKind::Target => ALL_DIRECTIONS_MASK,
            TileKind::Straight => Direction::North.mask() | Direction::South.mask(),
            TileKind::Corner => Direction::North.mask() | Direction::East.mask(),
            TileKind::Empty => 0,
        }
    }

    /// Whether the player can move or rotate tiles of this type.
    pub const fn is_movable(self) -> bool {
        matches!(self, TileKind::Straight | TileKind::Corner)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TileKind::Source => write!(f, "source"),
            TileKind::Target => write!(f, "target"),
            TileKind::Straight => write!(f, "straight"),
            TileKind::Corner => write!(f, "corner"),
            TileKind::Empty => write!(f, "empty"),
        }
    }
}

/// Rotate a 4-bit mask clockwise by `rotation` quarter turns.
///
/// Bits leaving the top re-enter at the bottom. Only `rotation % 4` matters.
pub const fn rotate_mask(mask: u8, rotation: u8) -> u8 {
    let mask: u8 = mask & ALL_DIRECTIONS_MASK;
    let r: u8 = rotation % 4;
    ((mask << r) | (mask >> (4 - r))) & ALL_DIRECTIONS_MASK
}

/// Open sides of a tile of the given type after `rotation` quarter turns.
pub const fn connection_mask(kind: TileKind, rotation: u8) -> u8 {
    rotate_mask(kind.base_mask(), rotation)
}

/// Whether a tile of the given type and rotation is open toward `direction`.
pub const fn can_connect(kind: TileKind, rotation: u8, direction: Direction) -> bool {
    connection_mask(kind, rotation) & direction.mask() != 0
}

/// Directions whose bit is set in the mask, North first.
pub fn mask_directions(mask: u8) -> impl Iterator<Item = Direction> {
    DIRECTIONS.into_iter().filter(move |d| mask & d.mask() != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::West.opposite(), Direction::East);
    }

    #[test]
    fn rotate_wraps_both_ways() {
        assert_eq!(Direction::West.rotate(1), Direction::North);
        assert_eq!(Direction::North.rotate(-1), Direction::West);
        assert_eq!(Direction::East.rotate(6), Direction::West);
    }

    #[test]
    fn offsets_are_opposite() {
        for d in DIRECTIONS {
            let (dx, dy): (i32, i32) = d.offset();
            let (ox, oy): (i32, i32) = d.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn direction_between_cells() {
        let p: GridPos = GridPos::new(3, 3);
        for d in DIRECTIONS {
            assert_eq!(Direction::between(p, p.step(d)), Some(d));
        }
        assert_eq!(Direction::between(p, p), None);
        assert_eq!(Direction::between(p, GridPos::new(4, 4)), None);
        assert_eq!(Direction::between(p, GridPos::new(5, 3)), None);
    }

    #[test]
    fn base_masks() {
        assert_eq!(connection_mask(TileKind::Source, 0), 0b1111);
        assert_eq!(connection_mask(TileKind::Target, 3), 0b1111);
        assert_eq!(connection_mask(TileKind::Straight, 0), 0b0101);
        assert_eq!(connection_mask(TileKind::Corner, 0), 0b0011);
        assert_eq!(connection_mask(TileKind::Empty, 2), 0);
    }

    #[test]
    fn straight_rotations() {
        assert_eq!(connection_mask(TileKind::Straight, 1), 0b1010);
        assert_eq!(connection_mask(TileKind::Straight, 2), 0b0101);
        assert_eq!(connection_mask(TileKind::Straight, 3), 0b1010);
    }

    #[test]
    fn corner_rotations() {
        // North|East, East|South, South|West, West|North
        assert_eq!(connection_mask(TileKind::Corner, 1), 0b0110);
        assert_eq!(connection_mask(TileKind::Corner, 2), 0b1100);
        assert_eq!(connection_mask(TileKind::Corner, 3), 0b1001);
    }

    #[test]
    fn can_connect_reads_single_bit() {
        assert!(can_connect(TileKind::Corner, 1, Direction::East));
        assert!(can_connect(TileKind::Corner, 1, Direction::South));
        assert!(!can_connect(TileKind::Corner, 1, Direction::North));
        assert!(!can_connect(TileKind::Empty, 0, Direction::North));
    }

    #[test]
    fn mask_direction_listing() {
        let dirs: Vec<Direction> = mask_directions(0b1010).collect();
        assert_eq!(dirs, vec![Direction::East, Direction::West]);
    }

    #[test]
    fn grid_index_round_trip() {
        let size: usize = 5;
        for index in 0..size * size {
            assert_eq!(GridPos::from_index(index, size).to_index(size), index);
        }
        assert!(!GridPos::new(-1, 0).is_inside(size));
        assert!(!GridPos::new(0, 5).is_inside(size));
        assert!(GridPos::new(4, 4).is_inside(size));
    }
}
