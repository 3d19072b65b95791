/*
maze.rs

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

//! Uniform spanning tree of the grid, built with Wilson's algorithm.

use log::{Level, debug, log_enabled};
use rand::Rng;

use crate::connectivity::{self, DIRECTIONS, Direction, GridPos};

/// Cell of the maze with the directions of its tree edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MazeCell {
    pub position: GridPos,

    /// Connection mask of the open sides (`1 << direction`).
    pub connections: u8,
}

impl MazeCell {
    /// Create a [`MazeCell`] object without connections.
    pub fn new(position: GridPos) -> Self {
        Self {
            position,
            connections: 0,
        }
    }

    pub fn is_open(&self, direction: Direction) -> bool {
        self.connections & direction.mask() != 0
    }

    pub fn degree(&self) -> u32 {
        self.connections.count_ones()
    }

    /// Whether the cell has exactly one tree edge.
    pub fn is_leaf(&self) -> bool {
        self.degree() == 1
    }

    /// Open directions, North first.
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> {
        connectivity::mask_directions(self.connections)
    }
}

/// Grid of cells connected by tree edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    size: usize,

    /// Cells in row-major order.
    cells: Vec<MazeCell>,
}

impl Maze {
    /// Create a [`Maze`] object without any edge.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: (0..size * size)
                .map(|i| MazeCell::new(GridPos::from_index(i, size)))
                .collect(),
        }
    }

    /// Draw a spanning tree uniformly at random among all the spanning trees of the
    /// `size` x `size` grid.
    ///
    /// Wilson's algorithm: one random cell starts the tree. Then, while cells
    /// remain outside the tree, a random walk starts from a random outside cell
    /// and erases every loop as soon as it closes. When the walk hits the tree, the
    /// loop-erased walk is grafted to the tree.
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut maze: Maze = Maze::new(size);
        let num_cells: usize = size * size;
        if num_cells == 0 {
            return maze;
        }

        let mut in_tree: Vec<bool> = vec![false; num_cells];
        let mut outside: OutsideCells = OutsideCells::new(num_cells);

        let root: usize = rng.random_range(0..num_cells);
        in_tree[root] = true;
        outside.remove(root);
        debug!("Maze {size}x{size}: root cell {}", GridPos::from_index(root, size));

        // Position of each cell in the current walk
        let mut walk_index: Vec<Option<usize>> = vec![None; num_cells];
        let mut walk: Vec<usize> = Vec::with_capacity(num_cells);
        let mut steps: usize = 0;

        while let Some(start) = outside.pick(rng) {
            walk.clear();
            walk.push(start);
            walk_index[start] = Some(0);

            let mut current: usize = start;
            while !in_tree[current] {
                let next: usize = maze.random_neighbor(current, rng);
                steps += 1;
                match walk_index[next] {
                    // Loop: erase it, back to the first visit of the cell
                    Some(i) => {
                        for erased in walk.drain(i + 1..) {
                            walk_index[erased] = None;
                        }
                    }
                    None => {
                        walk_index[next] = Some(walk.len());
                        walk.push(next);
                    }
                }
                current = next;
            }

            for pair in walk.windows(2) {
                maze.connect(pair[0], pair[1]);
            }
            for &cell in &walk {
                walk_index[cell] = None;
                if !in_tree[cell] {
                    in_tree[cell] = true;
                    outside.remove(cell);
                }
            }
        }

        debug!("Maze {size}x{size}: {steps} random walk steps");
        maze.debug();
        maze
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    /// Return the cell at the given position, or [`None`] if it is off the grid.
    pub fn cell(&self, position: GridPos) -> Option<&MazeCell> {
        if position.is_inside(self.size) {
            self.cells.get(position.to_index(self.size))
        } else {
            None
        }
    }

    /// Open the edge between two adjacent positions.
    ///
    /// Return `false`, and leave the maze untouched, if the positions are not
    /// adjacent cells of the grid.
    pub fn connect_positions(&mut self, a: GridPos, b: GridPos) -> bool {
        if !a.is_inside(self.size) || !b.is_inside(self.size) {
            return false;
        }
        match Direction::between(a, b) {
            Some(direction) => {
                let (ia, ib): (usize, usize) = (a.to_index(self.size), b.to_index(self.size));
                self.cells[ia].connections |= direction.mask();
                self.cells[ib].connections |= direction.opposite().mask();
                true
            }
            None => false,
        }
    }

    /// Number of tree edges.
    pub fn edge_count(&self) -> usize {
        let ends: u32 = self.cells.iter().map(MazeCell::degree).sum();
        ends as usize / 2
    }

    /// Cells with exactly one edge, in row-major order.
    pub fn leaves(&self) -> Vec<GridPos> {
        self.cells
            .iter()
            .filter(|c| c.is_leaf())
            .map(|c| c.position)
            .collect()
    }

    /// Whether the edges form a tree that spans every cell.
    pub fn is_spanning_tree(&self) -> bool {
        let num_cells: usize = self.cells.len();
        if num_cells == 0 || self.edge_count() != num_cells - 1 {
            return false;
        }

        // With n-1 edges, the graph is a tree if and only if it is connected
        let mut seen: Vec<bool> = vec![false; num_cells];
        let mut stack: Vec<GridPos> = vec![self.cells[0].position];
        seen[0] = true;
        let mut count: usize = 1;
        while let Some(position) = stack.pop() {
            let Some(cell) = self.cell(position) else {
                continue;
            };
            for direction in cell.open_directions() {
                let next: GridPos = position.step(direction);
                if !next.is_inside(self.size) {
                    return false;
                }
                let index: usize = next.to_index(self.size);
                if !seen[index] {
                    seen[index] = true;
                    count += 1;
                    stack.push(next);
                }
            }
        }
        count == num_cells
    }

    /// Pick a random grid neighbor of the cell.
    fn random_neighbor<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> usize {
        let position: GridPos = GridPos::from_index(index, self.size);
        let mut neighbors: [usize; 4] = [0; 4];
        let mut count: usize = 0;
        for direction in DIRECTIONS {
            let next: GridPos = position.step(direction);
            if next.is_inside(self.size) {
                neighbors[count] = next.to_index(self.size);
                count += 1;
            }
        }
        // Grids of size 2 or more give every cell at least two neighbors
        neighbors[rng.random_range(0..count)]
    }

    fn connect(&mut self, a: usize, b: usize) {
        let (pa, pb): (GridPos, GridPos) = (
            GridPos::from_index(a, self.size),
            GridPos::from_index(b, self.size),
        );
        let _ = self.connect_positions(pa, pb);
    }

    /// Print the maze with box drawing characters.
    fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let mut s: String = String::new();
        for y in 0..self.size {
            s.clear();
            for x in 0..self.size {
                let cell: &MazeCell = &self.cells[y * self.size + x];
                s.push(mask_glyph(cell.connections));
            }
            debug!("{s}");
        }
    }
}

/// Character that draws the given connection mask.
pub fn mask_glyph(mask: u8) -> char {
    const GLYPHS: [char; 16] = [
        '·', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
    ];
    GLYPHS[(mask & connectivity::ALL_DIRECTIONS_MASK) as usize]
}

/// Cells not yet in the tree, with constant time random pick and removal.
struct OutsideCells {
    cells: Vec<usize>,

    /// Position of each cell in `cells`.
    slots: Vec<usize>,
}

impl OutsideCells {
    fn new(num_cells: usize) -> Self {
        Self {
            cells: (0..num_cells).collect(),
            slots: (0..num_cells).collect(),
        }
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.cells.is_empty() {
            None
        } else {
            Some(self.cells[rng.random_range(0..self.cells.len())])
        }
    }

    fn remove(&mut self, cell: usize) {
        let slot: usize = self.slots[cell];
        let _ = self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.slots[moved] = slot;
        }
    }
}
