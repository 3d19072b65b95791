/*
game.rs

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

//! Manage the status of a level in progress.
//!
//! The [`Game`] object owns the entity store, the systems, and the board of the active
//! level. Everything the systems need is passed to them explicitly on each tick.

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use thiserror::Error;

use crate::board::Board;
use crate::config::GameConfig;
use crate::connectivity::{GridPos, TileKind};
use crate::generator::level::{
    GeneratedLevel, LevelError, LevelTile, generate_level, shuffle_tiles,
};
use crate::math::Vec2;
use crate::solver::{LightPropagation, TransformSync};
use crate::store::{
    ComponentKind, Draggable, EntityId, Event, Query, Scheduler, Store, StoreError, TickContext,
    Tile, Transform,
};

/// Type of errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Manage the status of the level in progress.
pub struct Game {
    /// Entities of the level.
    store: Store,

    /// Systems run on every tick.
    scheduler: Scheduler,

    /// Board of the active level.
    board: Board,

    /// Level as generated (and shuffled). Tile positions in the store may differ.
    level: Option<GeneratedLevel>,

    /// Whether the light reached the target since the level started.
    pub solved: bool,

    /// Whether the player asked for the solution.
    pub user_has_cheated: bool,

    config: GameConfig,

    rng: ChaCha8Rng,
}

impl Game {
    /// Create a [`Game`] object. No level is loaded yet.
    pub fn new(config: GameConfig) -> Self {
        let rng: ChaCha8Rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let mut scheduler: Scheduler = Scheduler::new();
        scheduler.register(LightPropagation::new());
        scheduler.register(TransformSync);

        Self {
            store: Store::new(),
            scheduler,
            board: Board {
                tile_size: config.tile_size,
                ..Board::default()
            },
            level: None,
            solved: false,
            user_has_cheated: false,
            config,
            rng,
        }
    }

    /// Generate a new level and load it.
    ///
    /// # Errors
    ///
    /// The method returns an error if the level cannot be generated.
    pub fn start_level(&mut self) -> Result<(), GameError> {
        let mut level: GeneratedLevel = generate_level(self.config.board_size, &mut self.rng)?;
        if self.config.shuffle {
            shuffle_tiles(&mut level, &mut self.rng);
        }
        self.load_level(level)
    }

    /// Drop the current level and start a fresh one.
    pub fn restart(&mut self) -> Result<(), GameError> {
        debug!("Restarting with a new level");
        self.start_level()
    }

    /// Replace the entities of the store with the tiles of the given level.
    ///
    /// Source and target tiles do not receive a [`Draggable`] component.
    pub fn load_level(&mut self, level: GeneratedLevel) -> Result<(), GameError> {
        self.store.clear();
        self.board = Board::from_level(&level, self.config.tile_size);
        for level_tile in &level.tiles {
            let id: EntityId = self.store.create_entity();
            let tile: Tile = Tile::new(level_tile.kind, level_tile.position, level_tile.rotation);
            self.store.add_component(id, tile)?;
            self.store
                .add_component(id, Transform::from_tile(&tile, self.board.tile_size))?;
            if level_tile.kind.is_movable() {
                self.store.add_component(id, Draggable::default())?;
            }
        }
        debug!(
            "Level loaded: {} tiles on a {}x{} board",
            level.tiles.len(),
            level.size,
            level.size
        );
        self.level = Some(level);
        self.solved = false;
        self.user_has_cheated = false;
        self.tick(0.0);
        Ok(())
    }

    /// Run the systems once.
    ///
    /// Return whether the target is lit after this tick. The first time it is, the
    /// level is marked as solved and stays solved until the next level.
    pub fn tick(&mut self, elapsed: f64) -> bool {
        let context: TickContext = TickContext {
            board: &self.board,
            elapsed,
        };
        let events: Vec<Event> = self.scheduler.run(&mut self.store, &context);
        let target_lit: bool = events.contains(&Event::TargetLit);
        if target_lit && !self.solved {
            self.solved = true;
            info!("Level solved");
        }
        target_lit
    }

    /// Rotate the tile one quarter turn clockwise.
    ///
    /// Return `false` if the tile cannot be rotated.
    ///
    /// # Errors
    ///
    /// The method returns an error if the entity does not exist.
    pub fn rotate_tile(&mut self, id: EntityId) -> Result<bool, GameError> {
        self.ensure_alive(id)?;
        if !self.store.get::<Draggable>(id).is_some_and(|d| d.can_rotate) {
            return Ok(false);
        }
        match self.store.get_mut::<Tile>(id) {
            Some(tile) => {
                tile.rotate_clockwise();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move the tile to another cell.
    ///
    /// The move is rejected, and `false` returned, if the tile cannot move, or if the
    /// cell is outside the board or already used by another tile. The tile then stays
    /// where it was.
    ///
    /// # Errors
    ///
    /// The method returns an error if the entity does not exist.
    pub fn move_tile(&mut self, id: EntityId, to: GridPos) -> Result<bool, GameError> {
        self.ensure_alive(id)?;
        if !self.store.get::<Draggable>(id).is_some_and(|d| d.can_move) {
            debug!("{id} cannot move");
            return Ok(false);
        }
        if !self.board.contains(to) {
            debug!("{id} cannot move to {to}: outside the board");
            return Ok(false);
        }
        if self.is_position_occupied(to, Some(id)) {
            debug!("{id} cannot move to {to}: cell already used");
            return Ok(false);
        }
        match self.store.get_mut::<Tile>(id) {
            Some(tile) => {
                tile.set_position(to);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Finish dragging a tile.
    ///
    /// The tile moves to the cell nearest to its presentation transform, when
    /// [`Game::move_tile`] accepts it. Otherwise it stays on its cell, and the next tick
    /// snaps its transform back.
    ///
    /// # Errors
    ///
    /// The method returns an error if the entity does not exist.
    pub fn drop_tile(&mut self, id: EntityId) -> Result<bool, GameError> {
        self.ensure_alive(id)?;
        if let Some(draggable) = self.store.get_mut::<Draggable>(id) {
            draggable.is_dragging = false;
            draggable.drag_offset = None;
        }
        let Some(transform) = self.store.get::<Transform>(id) else {
            return Ok(false);
        };
        let to: GridPos = self.board.snap(transform.position);
        self.move_tile(id, to)
    }

    /// Whether a tile, other than `exclude`, uses the given cell.
    pub fn is_position_occupied(&self, position: GridPos, exclude: Option<EntityId>) -> bool {
        self.store
            .query(&Query::new().with(ComponentKind::Tile))
            .into_iter()
            .filter(|id| Some(*id) != exclude)
            .any(|id| {
                self.store
                    .get::<Tile>(id)
                    .is_some_and(|t| t.position() == position)
            })
    }

    /// Return the entity of the tile at the given cell.
    pub fn tile_at(&self, position: GridPos) -> Option<EntityId> {
        self.store
            .query(&Query::new().with(ComponentKind::Tile))
            .into_iter()
            .find(|id| {
                self.store
                    .get::<Tile>(*id)
                    .is_some_and(|t| t.position() == position)
            })
    }

    /// Return the entity of the tile under the given point, in presentation units.
    pub fn entity_at_point(&self, point: Vec2) -> Option<EntityId> {
        let query: Query = Query::new()
            .with(ComponentKind::Tile)
            .with(ComponentKind::Transform);
        self.store.query(&query).into_iter().find(|id| {
            self.store
                .get::<Transform>(*id)
                .is_some_and(|t| t.contains_point(point, self.board.tile_size))
        })
    }

    /// Place every tile at its solution cell and rotation, then run the systems.
    ///
    /// Return `false` if no level is loaded or if the tiles cannot solve it.
    pub fn reveal_solution(&mut self) -> bool {
        let Some(solution) = self.level.as_ref().and_then(GeneratedLevel::solve) else {
            return false;
        };

        // Pair the tiles of each type with the solution cells for that type
        let mut cells: HashMap<TileKind, Vec<LevelTile>> = HashMap::new();
        for level_tile in solution.into_iter().rev() {
            cells.entry(level_tile.kind).or_default().push(level_tile);
        }
        for id in self.store.query(&Query::new().with(ComponentKind::Tile)) {
            let Some(tile) = self.store.get_mut::<Tile>(id) else {
                continue;
            };
            if let Some(level_tile) = cells.get_mut(&tile.kind).and_then(Vec::pop) {
                tile.set_position(level_tile.position);
                tile.set_rotation(level_tile.rotation);
            }
        }
        self.user_has_cheated = true;
        debug!("Solution revealed");
        self.tick(0.0);
        true
    }

    /// Return the level with the tiles where the player left them.
    pub fn snapshot(&self) -> Option<GeneratedLevel> {
        let mut level: GeneratedLevel = self.level.clone()?;
        level.tiles = self
            .store
            .query(&Query::new().with(ComponentKind::Tile))
            .into_iter()
            .filter_map(|id| self.store.get::<Tile>(id))
            .map(|t| LevelTile::new(t.position(), t.kind, t.rotation))
            .collect();
        Some(level)
    }

    /// Number of lit tiles.
    pub fn lit_count(&self) -> usize {
        self.store
            .query(&Query::new().with(ComponentKind::Tile))
            .into_iter()
            .filter(|id| self.store.get::<Tile>(*id).is_some_and(|t| t.lit))
            .count()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn level(&self) -> Option<&GeneratedLevel> {
        self.level.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn ensure_alive(&self, id: EntityId) -> Result<(), StoreError> {
        if self.store.is_alive(id) {
            Ok(())
        } else {
            Err(StoreError::UnknownEntity(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64, shuffle: bool) -> GameConfig {
        GameConfig {
            board_size: 6,
            seed: Some(seed),
            shuffle,
            ..GameConfig::default()
        }
    }

    fn movable_tile(game: &Game) -> EntityId {
        let query: Query = Query::new()
            .with(ComponentKind::Tile)
            .with(ComponentKind::Draggable);
        game.store().query(&query)[0]
    }

    #[test]
    fn unshuffled_level_is_solved() {
        let mut game: Game = Game::new(config(1, false));
        game.start_level().unwrap();
        assert!(game.solved);
        let tiles: usize = game.level().unwrap().tiles.len();
        assert_eq!(game.lit_count(), tiles);
        assert_eq!(game.store().entity_count(), tiles);
    }

    #[test]
    fn fixed_tiles_are_not_draggable() {
        let mut game: Game = Game::new(config(2, true));
        game.start_level().unwrap();
        let source: EntityId = game.tile_at(game.board().source).unwrap();
        let target: EntityId = game.tile_at(game.board().target).unwrap();
        assert!(!game.store().has_component(source, ComponentKind::Draggable));
        assert!(!game.store().has_component(target, ComponentKind::Draggable));
        assert_eq!(game.rotate_tile(source), Ok(false));
        assert_eq!(game.move_tile(target, GridPos::new(0, 0)), Ok(false));
    }

    #[test]
    fn same_seed_same_level() {
        let mut first: Game = Game::new(config(77, true));
        let mut second: Game = Game::new(config(77, true));
        first.start_level().unwrap();
        second.start_level().unwrap();
        assert_eq!(first.level(), second.level());
    }

    #[test]
    fn reveal_solution_solves() {
        let mut game: Game = Game::new(config(3, true));
        game.start_level().unwrap();
        assert!(game.reveal_solution());
        assert!(game.solved);
        assert!(game.user_has_cheated);
        assert_eq!(game.lit_count(), game.level().unwrap().tiles.len());
    }

    #[test]
    fn rotate_and_move() {
        let mut game: Game = Game::new(config(4, true));
        game.start_level().unwrap();
        let id: EntityId = movable_tile(&game);
        let before: Tile = *game.store().get::<Tile>(id).unwrap();

        assert_eq!(game.rotate_tile(id), Ok(true));
        assert_eq!(
            game.store().get::<Tile>(id).unwrap().rotation,
            (before.rotation + 1) % 4
        );

        // Outside the board
        assert_eq!(game.move_tile(id, GridPos::new(-1, 0)), Ok(false));
        assert_eq!(game.move_tile(id, GridPos::new(6, 0)), Ok(false));

        // Onto another tile
        let source: GridPos = game.board().source;
        assert_eq!(game.move_tile(id, source), Ok(false));
        assert_eq!(game.store().get::<Tile>(id).unwrap().position(), before.position());

        // Onto a free cell, if any
        let free: Option<GridPos> = (0..36)
            .map(|i| GridPos::from_index(i, 6))
            .find(|p| !game.is_position_occupied(*p, None));
        if let Some(free) = free {
            assert_eq!(game.move_tile(id, free), Ok(true));
            assert_eq!(game.tile_at(free), Some(id));
            assert!(!game.is_position_occupied(before.position(), None));
        }
    }

    #[test]
    fn rotate_after_direct_write() {
        let mut game: Game = Game::new(config(10, true));
        game.start_level().unwrap();
        let id: EntityId = movable_tile(&game);
        game.store_mut().get_mut::<Tile>(id).unwrap().rotation = 255;
        assert_eq!(game.rotate_tile(id), Ok(true));
        assert_eq!(game.store().get::<Tile>(id).unwrap().rotation, 0);
    }

    #[test]
    fn drop_snaps_to_nearest_cell() {
        let mut game: Game = Game::new(config(12, true));
        game.start_level().unwrap();
        let id: EntityId = movable_tile(&game);
        let home: GridPos = game.store().get::<Tile>(id).unwrap().position();
        let size: f64 = game.board().tile_size;

        // Dropped on the source: rejected, and the transform goes back home
        let source: GridPos = game.board().source;
        game.store_mut().get_mut::<Draggable>(id).unwrap().is_dragging = true;
        game.store_mut().get_mut::<Transform>(id).unwrap().position =
            Vec2::new(source.x as f64 * size + 3.0, source.y as f64 * size - 3.0);
        assert_eq!(game.drop_tile(id), Ok(false));
        assert!(!game.store().get::<Draggable>(id).unwrap().is_dragging);
        game.tick(0.016);
        let expected: Vec2 = Vec2::new(home.x as f64 * size, home.y as f64 * size);
        assert!(game.store().get::<Transform>(id).unwrap().position.approx_eq(expected));

        // Dropped near a free cell: accepted
        let free: Option<GridPos> = (0..36)
            .map(|i| GridPos::from_index(i, 6))
            .find(|p| !game.is_position_occupied(*p, None));
        if let Some(free) = free {
            game.store_mut().get_mut::<Transform>(id).unwrap().position =
                Vec2::new(free.x as f64 * size - 10.0, free.y as f64 * size + 10.0);
            assert_eq!(game.drop_tile(id), Ok(true));
            assert_eq!(game.tile_at(free), Some(id));
        }
    }

    #[test]
    fn unknown_entity() {
        let mut game: Game = Game::new(config(5, true));
        game.start_level().unwrap();
        let ghost: EntityId = EntityId::new(10_000);
        assert_eq!(
            game.rotate_tile(ghost),
            Err(GameError::Store(StoreError::UnknownEntity(ghost)))
        );
    }

    #[test]
    fn restart_replaces_entities() {
        let mut game: Game = Game::new(config(6, true));
        game.start_level().unwrap();
        let old: Vec<EntityId> = game.store().entities().collect();
        game.restart().unwrap();
        assert!(old.iter().all(|id| !game.store().is_alive(*id)));
        assert_eq!(
            game.store().entity_count(),
            game.level().unwrap().tiles.len()
        );
    }

    #[test]
    fn hit_testing() {
        let mut game: Game = Game::new(config(8, false));
        game.start_level().unwrap();
        let source: GridPos = game.board().source;
        let size: f64 = game.board().tile_size;
        let center: Vec2 = Vec2::new(
            (source.x as f64 + 0.5) * size,
            (source.y as f64 + 0.5) * size,
        );
        assert_eq!(game.entity_at_point(center), game.tile_at(source));
        assert_eq!(game.entity_at_point(Vec2::new(-10.0, -10.0)), None);
    }

    #[test]
    fn snapshot_follows_player_moves() {
        let mut game: Game = Game::new(config(9, true));
        game.start_level().unwrap();
        let id: EntityId = movable_tile(&game);
        game.rotate_tile(id).unwrap();
        let snapshot: GeneratedLevel = game.snapshot().unwrap();
        let tile: Tile = *game.store().get::<Tile>(id).unwrap();
        assert_eq!(snapshot.tile_at(tile.position()).unwrap().rotation, tile.rotation);
        assert!(snapshot.is_solvable());
    }
}
