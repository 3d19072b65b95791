/*
config.rs

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

//! Build-time constants and the game configuration.
//!
//! The [`GameConfig`] object is handed to [`crate::game::Game::new`] explicitly.
//! Nothing in the crate looks the configuration up from a global.

use serde::{Deserialize, Serialize};

/// Text printed by `--version` in long form.
pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Number of cells on each side of the board when nothing else is requested.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Smallest board that can hold a source and a target.
pub const MIN_BOARD_SIZE: usize = 2;

/// Side of a tile in presentation units.
pub const DEFAULT_TILE_SIZE: f64 = 75.0;

/// Number of spanning trees to draw before giving up on a level.
///
/// On a board of size 2 or more, every spanning tree has at least two leaves, so a
/// degenerate path never happens in practice. The limit only guards against bugs.
pub const MAX_GENERATION_ATTEMPTS: usize = 64;

/// Name of the file used to save a generated level.
pub const SAVE_FILE_NAME: &str = "level.json";

/// Parameters of a game session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells on each side of the board.
    pub board_size: usize,

    /// Side of a tile in presentation units. Used to derive the tile transforms.
    pub tile_size: f64,

    /// Whether to scramble the tiles before presenting the level.
    pub shuffle: bool,

    /// Seed for the random number generator. A random seed is used when [`None`].
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            shuffle: true,
            seed: None,
        }
    }
}
