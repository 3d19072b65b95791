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

//! Entity and component store.
//!
//! The store maps opaque entity identifiers ([`entity::EntityId`]) to component
//! records. Component records form a closed set ([`component::Component`]) keyed by
//! [`component::ComponentKind`], so a system reading a component gets an exhaustive
//! `match` instead of a string lookup.
//!
//! * [`world::Store`] creates and destroys entities, attaches and detaches
//!   components, and answers [`world::Query`] requests. Query results are cached
//!   until the next structural change (add, remove, destroy).
//! * [`system::Scheduler`] runs the registered [`system::System`] objects once per
//!   tick, in ascending priority order.
//!
//! The store is single threaded. It uses a [`std::cell::RefCell`] for its query
//! cache and is therefore not [`Sync`]: the owning game session must not share it
//! between threads. Changing the store while holding the result of a previous
//! query is allowed, but that result is not updated (last write wins).

pub mod component;
pub mod entity;
pub mod error;
pub mod system;
pub mod world;

pub use component::{Component, ComponentKind, ComponentRecord, Draggable, Tile, Transform};
pub use entity::EntityId;
pub use error::StoreError;
pub use system::{Event, Scheduler, System, TickContext};
pub use world::{Query, Store};
