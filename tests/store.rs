/*
store.rs

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

//! Entity store behavior seen from outside the crate.

use luminode::connectivity::{GridPos, TileKind};
use luminode::store::{
    ComponentKind, Draggable, EntityId, Query, Store, StoreError, Tile, Transform,
};
use proptest::prelude::*;

fn tile(x: i32, y: i32) -> Tile {
    Tile::new(TileKind::Straight, GridPos::new(x, y), 0)
}

#[test]
fn destroyed_entity_leaves_cached_queries() {
    let mut store: Store = Store::new();
    let a: EntityId = store.create_entity();
    let b: EntityId = store.create_entity();
    store.add_component(a, tile(0, 0)).unwrap();
    store.add_component(b, tile(1, 0)).unwrap();

    let query: Query = Query::new().with(ComponentKind::Tile);
    assert_eq!(store.query(&query), vec![a, b]);
    assert_eq!(store.cached_queries(), 1);

    store.destroy_entity(a).unwrap();
    assert_eq!(store.query(&query), vec![b]);
    assert_eq!(store.get::<Tile>(a), None);
    assert_eq!(store.destroy_entity(a), Err(StoreError::UnknownEntity(a)));
}

#[test]
fn required_and_excluded_kinds() {
    let mut store: Store = Store::new();
    let fixed: EntityId = store.create_entity();
    let movable: EntityId = store.create_entity();
    let decoration: EntityId = store.create_entity();
    for id in [fixed, movable] {
        store.add_component(id, tile(0, 0)).unwrap();
        store.add_component(id, Transform::default()).unwrap();
    }
    store.add_component(movable, Draggable::default()).unwrap();
    store.add_component(decoration, Transform::default()).unwrap();

    let drawable: Query = Query::new()
        .with(ComponentKind::Tile)
        .with(ComponentKind::Transform);
    assert_eq!(store.query(&drawable), vec![fixed, movable]);

    let locked: Query = drawable.clone().without(ComponentKind::Draggable);
    assert_eq!(store.query(&locked), vec![fixed]);

    // Detaching a component updates the results
    store.remove_component(movable, ComponentKind::Draggable).unwrap();
    assert_eq!(store.query(&locked), vec![fixed, movable]);
}

#[test]
fn adding_overwrites_same_kind() {
    let mut store: Store = Store::new();
    let id: EntityId = store.create_entity();
    store.add_component(id, tile(0, 0)).unwrap();
    store.add_component(id, tile(4, 2)).unwrap();
    assert_eq!(store.get::<Tile>(id).unwrap().position(), GridPos::new(4, 2));
}

#[test]
fn identifiers_are_never_reused() {
    let mut store: Store = Store::new();
    let first: EntityId = store.create_entity();
    store.destroy_entity(first).unwrap();
    store.clear();
    let second: EntityId = store.create_entity();
    assert_ne!(first, second);
}

proptest! {
    #[test]
    fn queries_match_component_sets(flags in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..40)) {
        let mut store: Store = Store::new();
        let mut with_tile: Vec<EntityId> = Vec::new();
        let mut tile_only: Vec<EntityId> = Vec::new();
        for (has_tile, has_drag) in &flags {
            let id: EntityId = store.create_entity();
            if *has_tile {
                store.add_component(id, tile(0, 0)).unwrap();
                with_tile.push(id);
            }
            if *has_drag {
                store.add_component(id, Draggable::default()).unwrap();
            }
            if *has_tile && !*has_drag {
                tile_only.push(id);
            }
        }
        prop_assert_eq!(store.query(&Query::new().with(ComponentKind::Tile)), with_tile);
        let query: Query = Query::new()
            .with(ComponentKind::Tile)
            .without(ComponentKind::Draggable);
        prop_assert_eq!(store.query(&query), tile_only);
        prop_assert_eq!(store.entity_count(), flags.len());
    }
}
