/*
lib.rs

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

//! Tile-connection puzzle engine.
//!
//! A level is a square grid of pipe tiles. The player rotates and moves the tiles until
//! a continuous path carries the light from the source tile to the target tile.
//!
//! * [`generator`] draws a uniform spanning tree of the grid, keeps its longest path as
//!   the route, and turns the route into source, straight, corner, and target tiles.
//! * [`store`] holds the tiles of the active level as entities with components, and
//!   runs the systems once per tick.
//! * [`solver`] provides the systems: light propagation from the source, and placement
//!   of the presentation transforms.
//! * [`game`] ties everything together for a session.
//!
//! # Examples
//!
//! ```
//! use luminode::config::GameConfig;
//! use luminode::game::Game;
//!
//! let config = GameConfig {
//!     board_size: 5,
//!     seed: Some(42),
//!     ..GameConfig::default()
//! };
//! let mut game = Game::new(config);
//! game.start_level().unwrap();
//! game.reveal_solution();
//! assert!(game.solved);
//! ```

pub mod board;
pub mod config;
pub mod connectivity;
pub mod game;
pub mod generator;
pub mod math;
pub mod saver;
pub mod solver;
pub mod store;
