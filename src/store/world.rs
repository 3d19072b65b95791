/*
world.rs

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

//! Entity and component storage with cached queries.

use log::debug;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use super::component::{Component, ComponentKind, ComponentRecord};
use super::entity::EntityId;
use super::error::StoreError;

/// Component selection: the entities must carry every required component and none
/// of the excluded components.
///
/// A query without required components selects every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    required: Vec<ComponentKind>,
    excluded: Vec<ComponentKind>,
}

/// Normalized query used as the cache key: sorted and deduplicated lists.
type QueryKey = (Vec<ComponentKind>, Vec<ComponentKind>);

impl Query {
    /// Create an empty [`Query`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Query`] object from lists of required and excluded components.
    pub fn from_kinds(required: &[ComponentKind], excluded: &[ComponentKind]) -> Self {
        Self {
            required: required.to_vec(),
            excluded: excluded.to_vec(),
        }
    }

    /// Require the given component.
    pub fn with(mut self, kind: ComponentKind) -> Self {
        self.required.push(kind);
        self
    }

    /// Exclude the entities that carry the given component.
    pub fn without(mut self, kind: ComponentKind) -> Self {
        self.excluded.push(kind);
        self
    }

    fn key(&self) -> QueryKey {
        let mut required: Vec<ComponentKind> = self.required.clone();
        required.sort_unstable();
        required.dedup();
        let mut excluded: Vec<ComponentKind> = self.excluded.clone();
        excluded.sort_unstable();
        excluded.dedup();
        (required, excluded)
    }

    fn matches(&self, components: &HashMap<ComponentKind, Component>) -> bool {
        self.required.iter().all(|k| components.contains_key(k))
            && !self.excluded.iter().any(|k| components.contains_key(k))
    }
}

/// Store for all the entities of a game session.
#[derive(Debug, Default)]
pub struct Store {
    /// Next identifier to hand out. Identifiers are never reused.
    next_entity_id: u64,

    /// Components of every live entity.
    entities: BTreeMap<EntityId, HashMap<ComponentKind, Component>>,

    /// Query results, cleared on every structural change.
    query_cache: RefCell<HashMap<QueryKey, Vec<EntityId>>>,
}

impl Store {
    /// Create an empty [`Store`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity without components.
    pub fn create_entity(&mut self) -> EntityId {
        let id: EntityId = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        let _ = self.entities.insert(id, HashMap::new());
        self.invalidate_queries();
        id
    }

    /// Destroy an entity and all its components.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownEntity`] if the entity does not exist.
    pub fn destroy_entity(&mut self, id: EntityId) -> Result<(), StoreError> {
        match self.entities.remove(&id) {
            Some(_) => {
                self.invalidate_queries();
                Ok(())
            }
            None => Err(StoreError::UnknownEntity(id)),
        }
    }

    /// Destroy all the entities. Identifiers are still not reused afterward.
    pub fn clear(&mut self) {
        debug!("Destroying {} entities", self.entities.len());
        self.entities.clear();
        self.invalidate_queries();
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Attach a component to the entity. An existing component of the same type is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownEntity`] if the entity does not exist.
    pub fn add_component(
        &mut self,
        id: EntityId,
        component: impl Into<Component>,
    ) -> Result<(), StoreError> {
        let component: Component = component.into();
        let components: &mut HashMap<ComponentKind, Component> = self
            .entities
            .get_mut(&id)
            .ok_or(StoreError::UnknownEntity(id))?;
        let _ = components.insert(component.kind(), component);
        self.invalidate_queries();
        Ok(())
    }

    /// Detach a component from the entity and return it. Nothing happens if the
    /// entity does not carry the component.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownEntity`] if the entity does not exist.
    pub fn remove_component(
        &mut self,
        id: EntityId,
        kind: ComponentKind,
    ) -> Result<Option<Component>, StoreError> {
        let components: &mut HashMap<ComponentKind, Component> = self
            .entities
            .get_mut(&id)
            .ok_or(StoreError::UnknownEntity(id))?;
        let removed: Option<Component> = components.remove(&kind);
        self.invalidate_queries();
        Ok(removed)
    }

    pub fn get_component(&self, id: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.entities.get(&id)?.get(&kind)
    }

    pub fn get_component_mut(
        &mut self,
        id: EntityId,
        kind: ComponentKind,
    ) -> Option<&mut Component> {
        self.entities.get_mut(&id)?.get_mut(&kind)
    }

    pub fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.get_component(id, kind).is_some()
    }

    /// Typed access to a component record.
    pub fn get<T: ComponentRecord>(&self, id: EntityId) -> Option<&T> {
        T::from_component(self.get_component(id, T::KIND)?)
    }

    /// Typed mutable access to a component record.
    ///
    /// Changing the fields of a record does not change which entities match a
    /// query, so the query cache stays valid.
    pub fn get_mut<T: ComponentRecord>(&mut self, id: EntityId) -> Option<&mut T> {
        T::from_component_mut(self.get_component_mut(id, T::KIND)?)
    }

    /// Return the entities that match the query, in creation order.
    pub fn query(&self, query: &Query) -> Vec<EntityId> {
        let key: QueryKey = query.key();
        if let Some(ids) = self.query_cache.borrow().get(&key) {
            return ids.clone();
        }

        let ids: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, components)| query.matches(components))
            .map(|(id, _)| *id)
            .collect();
        let _ = self.query_cache.borrow_mut().insert(key, ids.clone());
        ids
    }

    /// Number of query results currently cached.
    pub fn cached_queries(&self) -> usize {
        self.query_cache.borrow().len()
    }

    fn invalidate_queries(&mut self) {
        self.query_cache.get_mut().clear();
    }
}
