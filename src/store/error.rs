/*
error.rs

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

//! Store errors.

use thiserror::Error;

use super::entity::EntityId;

/// Errors raised by [`super::Store`] operations.
///
/// They all indicate a bug in the caller, which used an identifier it does not own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The entity was never created, or it has been destroyed.
    #[error("{0} does not exist")]
    UnknownEntity(EntityId),
}
