/*
path.rs

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

//! Route through the grid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::connectivity::GridPos;

/// Path object.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<GridPos>", into = "Vec<GridPos>")]
pub struct Path {
    /// Path as an ordered list of positions.
    path: Vec<GridPos>,

    /// Stores the visited status of the positions.
    /// Instead of looking for the position in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<GridPos>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl From<Vec<GridPos>> for Path {
    fn from(path: Vec<GridPos>) -> Self {
        Self::from_slice(&path)
    }
}

impl From<Path> for Vec<GridPos> {
    fn from(path: Path) -> Self {
        path.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`Path`] object from a list of positions.
    pub fn from_slice(path: &[GridPos]) -> Self {
        Self {
            path: path.to_vec(),
            visited: path.iter().copied().collect(),
        }
    }

    /// Get the number of positions in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Return a reference to the positions.
    pub fn get(&self) -> &[GridPos] {
        &self.path
    }

    /// Return the first position in the path.
    pub fn get_first(&self) -> Option<GridPos> {
        self.path.first().copied()
    }

    /// Return the last position in the path.
    pub fn get_last(&self) -> Option<GridPos> {
        self.path.last().copied()
    }

    /// Whether no position appears twice.
    pub fn is_simple(&self) -> bool {
        self.visited.len() == self.path.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Path {
        Path::from_slice(&[GridPos::new(0, 0), GridPos::new(1, 0), GridPos::new(1, 1)])
    }

    #[test]
    fn shape_checks() {
        let path: Path = line();
        assert!(path.is_simple());
        assert_eq!(path.len(), 3);
        assert_eq!(path.get_first(), Some(GridPos::new(0, 0)));
        assert_eq!(path.get_last(), Some(GridPos::new(1, 1)));

        let looped: Path = Path::from_slice(&[
            GridPos::new(0, 0),
            GridPos::new(1, 0),
            GridPos::new(0, 0),
        ]);
        assert!(!looped.is_simple());
    }

    #[test]
    fn serialized_as_position_list() {
        let json: String = serde_json::to_string(&line()).unwrap();
        assert_eq!(json, r#"[{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1}]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line());
        assert!(back.is_simple());
    }
}
