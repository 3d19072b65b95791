/*
system.rs

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

//! Systems and their scheduler.
//!
//! A system is the logic that runs on the store once per tick. Systems receive the
//! store, a [`TickContext`] with the elapsed time and the board, and an event list
//! they can append to. The [`Scheduler`] runs them one after the other, lowest
//! priority number first. Systems never run concurrently because they all mutate
//! the same store.

use log::debug;

use super::world::Store;
use crate::board::Board;

/// Information available to every system during a tick.
#[derive(Debug, Copy, Clone)]
pub struct TickContext<'a> {
    /// Board of the active level.
    pub board: &'a Board,

    /// Time elapsed since the previous tick, in seconds.
    pub elapsed: f64,
}

/// Outcomes reported by the systems during a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    /// Light from the source reached the target tile.
    TargetLit,
}

/// Logic run on the store once per tick.
pub trait System {
    /// Name of the system for debugging.
    fn name(&self) -> &str;

    /// Execution order. Lower values run first.
    fn priority(&self) -> i32;

    /// Run the system.
    fn run(&mut self, store: &mut Store, context: &TickContext, events: &mut Vec<Event>);
}

/// Ordered list of systems.
#[derive(Default)]
pub struct Scheduler {
    /// Systems sorted by priority. Systems with the same priority keep their
    /// registration order.
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    /// Create a [`Scheduler`] object without systems.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system.
    pub fn register<S: System + 'static>(&mut self, system: S) {
        let priority: i32 = system.priority();
        let index: usize = self
            .systems
            .partition_point(|s| s.priority() <= priority);
        debug!(
            "Registering system {} (priority {priority}) at position {index}",
            system.name()
        );
        self.systems.insert(index, Box::new(system));
    }

    /// Run all the systems once and return the events they reported.
    pub fn run(&mut self, store: &mut Store, context: &TickContext) -> Vec<Event> {
        let mut events: Vec<Event> = Vec::new();
        for system in &mut self.systems {
            system.run(store, context, &mut events);
        }
        events
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Names of the systems in execution order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Remove all the systems.
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}
