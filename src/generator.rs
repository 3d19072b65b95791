/*
generator.rs

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

//! Generate random levels.
//!
//! A level is produced in three steps:
//!
//! * A uniform spanning tree of the `size` x `size` grid is drawn with Wilson's
//!   algorithm ([`maze::Maze::generate`]). Every grid cell becomes a
//!   [`maze::MazeCell`] that records its open sides.
//!
//! * The longest simple path of that tree is extracted
//!   ([`longest_path::find_longest_path`]) and stored as a [`path::Path`] object.
//!   It becomes the route from the source to the target.
//!
//! * The route is turned into typed and rotated tiles ([`level::build_level`]).
//!   [`level::generate_level`] chains the three steps and retries with a fresh tree
//!   when the route is too short. [`level::shuffle_tiles`] then scrambles the path
//!   tiles to produce the puzzle that the player sees.
//!
//! All the functions take the random number generator as a parameter so that a
//! seeded generator reproduces the same level.

pub mod level;
pub mod longest_path;
pub mod maze;
pub mod path;
