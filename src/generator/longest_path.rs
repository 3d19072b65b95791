/*
longest_path.rs

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

//! Longest simple path in a spanning tree.

use log::debug;
use std::collections::VecDeque;

use super::maze::{Maze, MazeCell};
use super::path::Path;
use crate::connectivity::GridPos;

/// Return the longest path between two cells of the tree.
///
/// A breadth-first search starts from every leaf, in row-major order, and records
/// the farthest cell it reaches. The longest of these paths wins; on a tie the
/// first one found is kept. The returned path starts at the leaf.
///
/// The path is empty when the tree has no leaf (a single cell grid).
pub fn find_longest_path(maze: &Maze) -> Path {
    let mut longest: Path = Path::new(0);
    let leaves: Vec<GridPos> = maze.leaves();
    for leaf in &leaves {
        let path: Path = farthest_from(maze, *leaf);
        if path.len() > longest.len() {
            longest = path;
        }
    }
    debug!(
        "Longest path: {} cells out of {} (from {} leaves)",
        longest.len(),
        maze.cells().len(),
        leaves.len()
    );
    longest
}

/// Path from `start` to the first cell found at the largest distance.
fn farthest_from(maze: &Maze, start: GridPos) -> Path {
    let size: usize = maze.size();
    let num_cells: usize = maze.cells().len();
    if !start.is_inside(size) {
        return Path::new(0);
    }

    let mut parent: Vec<Option<usize>> = vec![None; num_cells];
    let mut depth: Vec<Option<usize>> = vec![None; num_cells];
    let start_index: usize = start.to_index(size);
    depth[start_index] = Some(0);

    let mut farthest: (usize, usize) = (start_index, 0);
    let mut queue: VecDeque<usize> = VecDeque::from([start_index]);
    while let Some(index) = queue.pop_front() {
        let current_depth: usize = depth[index].unwrap_or(0);
        if current_depth > farthest.1 {
            farthest = (index, current_depth);
        }

        let cell: &MazeCell = &maze.cells()[index];
        for direction in cell.open_directions() {
            let next: GridPos = cell.position.step(direction);
            if !next.is_inside(size) {
                continue;
            }
            let next_index: usize = next.to_index(size);
            if depth[next_index].is_some() {
                continue;
            }
            depth[next_index] = Some(current_depth + 1);
            parent[next_index] = Some(index);
            queue.push_back(next_index);
        }
    }

    // Walk back from the farthest cell
    let mut reversed: Vec<GridPos> = Vec::with_capacity(farthest.1 + 1);
    let mut cursor: Option<usize> = Some(farthest.0);
    while let Some(index) = cursor {
        reversed.push(GridPos::from_index(index, size));
        cursor = parent[index];
    }
    reversed.reverse();
    Path::from_slice(&reversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Spanning tree on a 3x3 grid:
    ///
    /// ```text
    /// ╶┬╴
    /// ╷│╷
    /// └┴┘
    /// ```
    fn t_maze() -> Maze {
        let mut maze: Maze = Maze::new(3);
        let edges: [((i32, i32), (i32, i32)); 8] = [
            ((0, 0), (1, 0)),
            ((1, 0), (2, 0)),
            ((1, 0), (1, 1)),
            ((1, 1), (1, 2)),
            ((1, 2), (0, 2)),
            ((0, 2), (0, 1)),
            ((1, 2), (2, 2)),
            ((2, 2), (2, 1)),
        ];
        for ((ax, ay), (bx, by)) in edges {
            assert!(maze.connect_positions(GridPos::new(ax, ay), GridPos::new(bx, by)));
        }
        maze
    }

    #[test]
    fn longest_path_in_known_tree() {
        let maze: Maze = t_maze();
        assert!(maze.is_spanning_tree());
        let path: Path = find_longest_path(&maze);
        // Leaves in row-major order: (0,0), (2,0), (0,1), (2,1)
        // From (0,0): (0,1) and (2,1) are both at distance 5. Neighbors are visited
        // north, east, south, west, so (2,1) is reached first.
        assert_eq!(path.len(), 6);
        assert_eq!(path.get_first(), Some(GridPos::new(0, 0)));
        assert_eq!(path.get_last(), Some(GridPos::new(2, 1)));
        assert!(path.is_simple());
    }

    #[test]
    fn single_cell_has_no_path() {
        let maze: Maze = Maze::new(1);
        assert!(find_longest_path(&maze).is_empty());
    }

    #[test]
    fn path_follows_tree_edges() {
        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(21);
        for size in 2..=9 {
            let maze: Maze = Maze::generate(size, &mut rng);
            let path: Path = find_longest_path(&maze);
            assert!(path.len() >= 2);
            assert!(path.is_simple());
            for w in path.get().windows(2) {
                let direction = crate::connectivity::Direction::between(w[0], w[1]).unwrap();
                assert!(maze.cell(w[0]).unwrap().is_open(direction));
            }
            // Both ends of a longest path are leaves
            assert!(maze.cell(path.get_first().unwrap()).unwrap().is_leaf());
            assert!(maze.cell(path.get_last().unwrap()).unwrap().is_leaf());
        }
    }
}
