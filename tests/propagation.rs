/*
propagation.rs

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

//! Light propagation scenarios.

use luminode::board::Board;
use luminode::connectivity::{GridPos, TileKind};
use luminode::solver::{LightPropagation, PropagationResult, TransformSync, propagate};
use luminode::store::{EntityId, Event, Scheduler, Store, TickContext, Tile};

fn spawn(store: &mut Store, kind: TileKind, x: i32, y: i32, rotation: u8) -> EntityId {
    let id: EntityId = store.create_entity();
    store
        .add_component(id, Tile::new(kind, GridPos::new(x, y), rotation))
        .unwrap();
    id
}

fn lit(store: &Store, id: EntityId) -> bool {
    store.get::<Tile>(id).unwrap().lit
}

/// Source, straight, and target on the first row.
fn line(straight_rotation: u8) -> (Store, [EntityId; 3]) {
    let mut store: Store = Store::new();
    let source: EntityId = spawn(&mut store, TileKind::Source, 0, 0, 0);
    let straight: EntityId = spawn(&mut store, TileKind::Straight, 1, 0, straight_rotation);
    let target: EntityId = spawn(&mut store, TileKind::Target, 2, 0, 0);
    (store, [source, straight, target])
}

#[test]
fn horizontal_straight_lights_target() {
    let (mut store, [source, straight, target]) = line(1);
    let result: PropagationResult = propagate(&mut store);
    assert!(result.target_lit);
    assert_eq!(result.lit, vec![source, straight, target]);
    assert!(lit(&store, target));
}

#[test]
fn vertical_straight_blocks_light() {
    let (mut store, [source, straight, target]) = line(0);
    let result: PropagationResult = propagate(&mut store);
    assert!(!result.target_lit);
    assert_eq!(result.lit, vec![source]);
    assert!(!lit(&store, straight));
    assert!(!lit(&store, target));
}

#[test]
fn connection_must_be_mutual() {
    // Straight open north/south at (0, 1), below a corner at (0, 0) open north/east.
    // The straight faces the corner but the corner does not face the straight.
    let mut store: Store = Store::new();
    let source: EntityId = spawn(&mut store, TileKind::Source, 0, 2, 0);
    let straight: EntityId = spawn(&mut store, TileKind::Straight, 0, 1, 0);
    let corner: EntityId = spawn(&mut store, TileKind::Corner, 0, 0, 0);
    let result: PropagationResult = propagate(&mut store);
    assert_eq!(result.lit, vec![source, straight]);
    assert!(!lit(&store, corner));

    // Turning the corner to open south lets the light through
    store.get_mut::<Tile>(corner).unwrap().set_rotation(1);
    let result: PropagationResult = propagate(&mut store);
    assert_eq!(result.lit, vec![source, straight, corner]);
}

#[test]
fn propagation_is_idempotent() {
    let (mut store, _) = line(1);
    spawn(&mut store, TileKind::Corner, 1, 1, 3);
    spawn(&mut store, TileKind::Straight, 2, 1, 0);
    let first: PropagationResult = propagate(&mut store);
    let lit_after_first: Vec<bool> = store
        .entities()
        .map(|id| store.get::<Tile>(id).unwrap().lit)
        .collect();
    let second: PropagationResult = propagate(&mut store);
    let lit_after_second: Vec<bool> = store
        .entities()
        .map(|id| store.get::<Tile>(id).unwrap().lit)
        .collect();
    assert_eq!(first, second);
    assert_eq!(lit_after_first, lit_after_second);
}

#[test]
fn scheduler_reports_target_lit_every_tick() {
    let (mut store, [_, straight, _]) = line(1);
    let mut scheduler: Scheduler = Scheduler::new();
    scheduler.register(TransformSync);
    scheduler.register(LightPropagation::new());
    assert_eq!(
        scheduler.system_names(),
        vec!["light-propagation", "transform-sync"]
    );

    let board: Board = Board::new(3, GridPos::new(0, 0), GridPos::new(2, 0), 10.0);
    let context: TickContext = TickContext {
        board: &board,
        elapsed: 0.016,
    };
    assert_eq!(scheduler.run(&mut store, &context), vec![Event::TargetLit]);
    assert_eq!(scheduler.run(&mut store, &context), vec![Event::TargetLit]);

    store.get_mut::<Tile>(straight).unwrap().rotate_clockwise();
    assert!(scheduler.run(&mut store, &context).is_empty());
}
