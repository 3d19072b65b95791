/*
solver.rs

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

//! Light propagation.
//!
//! On every tick the [`LightPropagation`] system switches all the tiles off, then lights
//! the source tile and spreads the light breadth first. Light crosses the side shared by
//! two tiles only when both tiles are open on that side. The level is solved when the
//! light reaches the target tile.
//!
//! The [`TransformSync`] system runs afterward and places the presentation transform of
//! every tile on its grid cell, except for the tiles the player is dragging.

use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::connectivity::{DIRECTIONS, GridPos, TileKind};
use crate::store::{
    ComponentKind, Draggable, EntityId, Event, Query, Store, System, TickContext, Tile, Transform,
};

/// Priority of the [`LightPropagation`] system.
pub const PROPAGATION_PRIORITY: i32 = 10;

/// Priority of the [`TransformSync`] system.
pub const TRANSFORM_SYNC_PRIORITY: i32 = 20;

/// Outcome of a propagation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationResult {
    /// Lit entities, in the order the light reached them.
    pub lit: Vec<EntityId>,

    /// Whether the target tile is lit.
    pub target_lit: bool,
}

/// Recompute the `lit` flag of every tile in the store.
///
/// Without a source tile, nothing is lit. If several tiles claim the same cell, the
/// source wins, otherwise the one created first is used.
pub fn propagate(store: &mut Store) -> PropagationResult {
    let entities: Vec<EntityId> = store.query(&Query::new().with(ComponentKind::Tile));

    // Reset, and index the tiles by cell
    let mut grid: HashMap<GridPos, (EntityId, Tile)> = HashMap::with_capacity(entities.len());
    let mut source: Option<(EntityId, GridPos)> = None;
    for id in &entities {
        let Some(tile) = store.get_mut::<Tile>(*id) else {
            continue;
        };
        tile.lit = false;
        let tile: Tile = *tile;
        if tile.kind == TileKind::Source && source.is_none() {
            source = Some((*id, tile.position()));
        }
        grid.entry(tile.position()).or_insert((*id, tile));
    }

    let mut result: PropagationResult = PropagationResult::default();
    let Some((source_id, source_position)) = source else {
        return result;
    };
    if let Some(source_tile) = store.get::<Tile>(source_id) {
        let _ = grid.insert(source_position, (source_id, *source_tile));
    }

    let mut visited: HashSet<GridPos> = HashSet::from([source_position]);
    let mut queue: VecDeque<GridPos> = VecDeque::from([source_position]);
    result.lit.push(source_id);
    while let Some(position) = queue.pop_front() {
        let Some((_, tile)) = grid.get(&position) else {
            continue;
        };
        for direction in DIRECTIONS {
            if !tile.can_connect(direction) {
                continue;
            }
            let next: GridPos = position.step(direction);
            if visited.contains(&next) {
                continue;
            }
            let Some((next_id, next_tile)) = grid.get(&next) else {
                continue;
            };
            if !next_tile.can_connect(direction.opposite()) {
                continue;
            }
            let _ = visited.insert(next);
            result.lit.push(*next_id);
            if next_tile.kind == TileKind::Target {
                result.target_lit = true;
            }
            queue.push_back(next);
        }
    }

    for id in &result.lit {
        if let Some(tile) = store.get_mut::<Tile>(*id) {
            tile.lit = true;
        }
    }
    result
}

/// System that runs [`propagate`] on every tick and reports [`Event::TargetLit`].
#[derive(Debug, Default)]
pub struct LightPropagation {
    /// Number of tiles lit during the last tick.
    last_lit: usize,
}

impl LightPropagation {
    /// Create a [`LightPropagation`] object.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_lit(&self) -> usize {
        self.last_lit
    }
}

impl System for LightPropagation {
    fn name(&self) -> &str {
        "light-propagation"
    }

    fn priority(&self) -> i32 {
        PROPAGATION_PRIORITY
    }

    fn run(&mut self, store: &mut Store, _context: &TickContext, events: &mut Vec<Event>) {
        let result: PropagationResult = propagate(store);
        if result.lit.len() != self.last_lit {
            debug!(
                "Propagation: {} tile(s) lit, target lit: {}",
                result.lit.len(),
                result.target_lit
            );
        }
        self.last_lit = result.lit.len();
        if result.target_lit {
            events.push(Event::TargetLit);
        }
    }
}

/// System that places the presentation transform of the tiles on their grid cell.
#[derive(Debug, Default)]
pub struct TransformSync;

impl System for TransformSync {
    fn name(&self) -> &str {
        "transform-sync"
    }

    fn priority(&self) -> i32 {
        TRANSFORM_SYNC_PRIORITY
    }

    fn run(&mut self, store: &mut Store, context: &TickContext, _events: &mut Vec<Event>) {
        let query: Query = Query::new()
            .with(ComponentKind::Tile)
            .with(ComponentKind::Transform);
        for id in store.query(&query) {
            if store.get::<Draggable>(id).is_some_and(|d| d.is_dragging) {
                continue;
            }
            let Some(tile) = store.get::<Tile>(id).copied() else {
                continue;
            };
            if let Some(transform) = store.get_mut::<Transform>(id) {
                let scale = transform.scale;
                *transform = Transform::from_tile(&tile, context.board.tile_size);
                transform.scale = scale;
            }
        }
    }
}
