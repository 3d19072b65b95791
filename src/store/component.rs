/*
component.rs

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

//! Component records.
//!
//! * [`Tile`] holds the gameplay state: type, grid position, rotation, and the lit
//!   flag recomputed by the propagation solver.
//! * [`Transform`] holds the presentation position, angle, and scale. It is derived
//!   from [`Tile`] and is never authoritative for gameplay.
//! * [`Draggable`] marks the tiles that the player can move or rotate. Source and
//!   target tiles never carry it.

use serde::{Deserialize, Serialize};

use crate::connectivity::{self, Direction, GridPos, TileKind};
use crate::math::{Mat2, QUARTER_TURN, Vec2};

/// Component types.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Tile,
    Transform,
    Draggable,
}

/// Gameplay state of a tile.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub grid_x: i32,
    pub grid_y: i32,

    /// Number of clockwise quarter turns, between 0 and 3.
    pub rotation: u8,

    /// Whether light from the source reaches the tile. Recomputed on every tick.
    pub lit: bool,
}

impl Tile {
    /// Create a [`Tile`] object. The rotation is reduced modulo 4.
    pub fn new(kind: TileKind, position: GridPos, rotation: u8) -> Self {
        Self {
            kind,
            grid_x: position.x,
            grid_y: position.y,
            rotation: rotation % 4,
            lit: false,
        }
    }

    pub fn position(&self) -> GridPos {
        GridPos::new(self.grid_x, self.grid_y)
    }

    pub fn set_position(&mut self, position: GridPos) {
        self.grid_x = position.x;
        self.grid_y = position.y;
    }

    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation % 4;
    }

    /// Apply one clockwise quarter turn.
    pub fn rotate_clockwise(&mut self) {
        self.rotation = (self.rotation % 4 + 1) % 4;
    }

    /// Open sides of the tile at its current rotation.
    pub fn connection_mask(&self) -> u8 {
        connectivity::connection_mask(self.kind, self.rotation)
    }

    pub fn can_connect(&self, direction: Direction) -> bool {
        connectivity::can_connect(self.kind, self.rotation, direction)
    }
}

/// Presentation transform of an entity.
///
/// `position` is the top-left corner of the tile, `rotation` is in radians.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    /// Create a [`Transform`] object.
    pub fn new(position: Vec2, rotation: f64, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Transform that places a tile on its grid cell.
    pub fn from_tile(tile: &Tile, tile_size: f64) -> Self {
        Self::new(
            Vec2::new(tile.grid_x as f64, tile.grid_y as f64) * tile_size,
            tile.rotation as f64 * QUARTER_TURN,
            Vec2::ONE,
        )
    }

    /// Rotation and scale of the transform.
    pub fn matrix(&self) -> Mat2 {
        Mat2::rotation(self.rotation).mul_mat(&Mat2::scale(self.scale))
    }

    /// Convert a point to coordinates relative to the tile center, in unscaled and
    /// unrotated units.
    ///
    /// # Panics
    ///
    /// Panics if the scale has a zero component.
    pub fn to_local(&self, point: Vec2, tile_size: f64) -> Vec2 {
        let center: Vec2 = self.position + Vec2::ONE * (tile_size / 2.0);
        self.matrix().inverse().mul_vec(point - center)
    }

    /// Whether the point is over the tile.
    pub fn contains_point(&self, point: Vec2, tile_size: f64) -> bool {
        let local: Vec2 = self.to_local(point, tile_size);
        let half: f64 = tile_size / 2.0;
        (-half..half).contains(&local.x) && (-half..half).contains(&local.y)
    }
}

/// Player interaction flags.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Draggable {
    /// Whether the tile is currently being dragged.
    pub is_dragging: bool,

    /// Offset between the pointer and the tile position during a drag.
    pub drag_offset: Option<Vec2>,

    pub can_rotate: bool,
    pub can_move: bool,
}

impl Default for Draggable {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Draggable {
    /// Create a [`Draggable`] object.
    pub fn new(can_rotate: bool, can_move: bool) -> Self {
        Self {
            is_dragging: false,
            drag_offset: None,
            can_rotate,
            can_move,
        }
    }
}

/// Any component record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Component {
    Tile(Tile),
    Transform(Transform),
    Draggable(Draggable),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Tile(_) => ComponentKind::Tile,
            Component::Transform(_) => ComponentKind::Transform,
            Component::Draggable(_) => ComponentKind::Draggable,
        }
    }
}

/// Record types that can be stored in a [`Component`].
///
/// The trait gives typed access through [`super::Store::get`] and
/// [`super::Store::get_mut`].
pub trait ComponentRecord: Into<Component> {
    const KIND: ComponentKind;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_record {
    ($record:ident) => {
        impl From<$record> for Component {
            fn from(record: $record) -> Component {
                Component::$record(record)
            }
        }

        impl ComponentRecord for $record {
            const KIND: ComponentKind = ComponentKind::$record;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$record(record) => Some(record),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$record(record) => Some(record),
                    _ => None,
                }
            }
        }
    };
}

component_record!(Tile);
component_record!(Transform);
component_record!(Draggable);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_rotation_is_reduced() {
        let mut tile: Tile = Tile::new(TileKind::Corner, GridPos::new(1, 2), 6);
        assert_eq!(tile.rotation, 2);
        tile.rotate_clockwise();
        tile.rotate_clockwise();
        assert_eq!(tile.rotation, 0);
        tile.set_rotation(7);
        assert_eq!(tile.rotation, 3);
        assert!(!tile.lit);
    }

    #[test]
    fn rotate_out_of_range_value() {
        let mut tile: Tile = Tile::new(TileKind::Straight, GridPos::new(0, 0), 0);
        tile.rotation = 255;
        tile.rotate_clockwise();
        assert_eq!(tile.rotation, 0);
        tile.rotation = 6;
        tile.rotate_clockwise();
        assert_eq!(tile.rotation, 3);
    }

    #[test]
    fn tile_connections_follow_rotation() {
        let tile: Tile = Tile::new(TileKind::Straight, GridPos::new(0, 0), 1);
        assert!(tile.can_connect(Direction::East));
        assert!(tile.can_connect(Direction::West));
        assert!(!tile.can_connect(Direction::North));
        assert_eq!(tile.connection_mask(), 0b1010);
    }

    #[test]
    fn component_kinds() {
        let tile: Tile = Tile::new(TileKind::Source, GridPos::new(0, 0), 0);
        assert_eq!(Component::from(tile).kind(), ComponentKind::Tile);
        assert_eq!(
            Component::from(Transform::default()).kind(),
            ComponentKind::Transform
        );
        assert_eq!(
            Component::from(Draggable::default()).kind(),
            ComponentKind::Draggable
        );
    }

    #[test]
    fn typed_access() {
        let mut component: Component = Draggable::new(true, false).into();
        assert!(Tile::from_component(&component).is_none());
        let draggable: &mut Draggable = Draggable::from_component_mut(&mut component).unwrap();
        draggable.is_dragging = true;
        assert!(Draggable::from_component(&component).unwrap().is_dragging);
    }

    #[test]
    fn transform_from_tile() {
        let tile: Tile = Tile::new(TileKind::Corner, GridPos::new(2, 3), 2);
        let transform: Transform = Transform::from_tile(&tile, 10.0);
        assert_eq!(transform.position, Vec2::new(20.0, 30.0));
        assert!((transform.rotation - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn hit_test() {
        let tile: Tile = Tile::new(TileKind::Straight, GridPos::new(1, 1), 1);
        let transform: Transform = Transform::from_tile(&tile, 10.0);
        assert!(transform.contains_point(Vec2::new(15.0, 15.0), 10.0));
        assert!(transform.contains_point(Vec2::new(10.5, 19.5), 10.0));
        assert!(!transform.contains_point(Vec2::new(5.0, 15.0), 10.0));
        assert!(!transform.contains_point(Vec2::new(15.0, 21.0), 10.0));
    }
}
