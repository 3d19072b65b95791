/*
math.rs

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

//! Small 2D vector and matrix helpers for tile transforms.
//!
//! Division by zero and inversion of a singular matrix are caller bugs and panic.
//! Use [`Vec2::checked_div`] or [`Mat2::try_inverse`] to check first.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Mul, Sub};

/// Tolerance used when comparing floating point values.
pub const EPSILON: f64 = 1e-10;

/// Angle of a quarter turn, in radians.
pub const QUARTER_TURN: f64 = FRAC_PI_2;

/// 2D vector.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    /// Create a [`Vec2`] object.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Divide by a scalar, or return [`None`] if the scalar is zero.
    pub fn checked_div(self, scalar: f64) -> Option<Vec2> {
        if scalar == 0.0 {
            None
        } else {
            Some(Vec2::new(self.x / scalar, self.y / scalar))
        }
    }

    /// Divide by a scalar.
    ///
    /// # Panics
    ///
    /// Panics if `scalar` is zero.
    pub fn div(self, scalar: f64) -> Vec2 {
        match self.checked_div(scalar) {
            Some(v) => v,
            None => panic!("Bug: division of {self:?} by zero"),
        }
    }

    /// Whether the two vectors are equal within [`EPSILON`].
    pub fn approx_eq(self, other: Vec2) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

/// 2x2 matrix stored row by row.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat2 {
    pub rows: [[f64; 2]; 2],
}

impl Mat2 {
    /// Rotation by the given angle in radians.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos): (f64, f64) = radians.sin_cos();
        Self {
            rows: [[cos, -sin], [sin, cos]],
        }
    }

    /// Non-uniform scaling.
    pub fn scale(scale: Vec2) -> Self {
        Self {
            rows: [[scale.x, 0.0], [0.0, scale.y]],
        }
    }

    pub fn determinant(&self) -> f64 {
        self.rows[0][0] * self.rows[1][1] - self.rows[0][1] * self.rows[1][0]
    }

    pub fn mul_vec(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.rows[0][0] * v.x + self.rows[0][1] * v.y,
            self.rows[1][0] * v.x + self.rows[1][1] * v.y,
        )
    }

    pub fn mul_mat(&self, other: &Mat2) -> Mat2 {
        let mut rows: [[f64; 2]; 2] = [[0.0; 2]; 2];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[i][0] * other.rows[0][j] + self.rows[i][1] * other.rows[1][j];
            }
        }
        Mat2 { rows }
    }

    /// Inverse matrix, or [`None`] if the matrix is singular.
    pub fn try_inverse(&self) -> Option<Mat2> {
        let det: f64 = self.determinant();
        if det.abs() < EPSILON {
            return None;
        }
        Some(Mat2 {
            rows: [
                [self.rows[1][1] / det, -self.rows[0][1] / det],
                [-self.rows[1][0] / det, self.rows[0][0] / det],
            ],
        })
    }

    /// Inverse matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is singular.
    pub fn inverse(&self) -> Mat2 {
        match self.try_inverse() {
            Some(m) => m,
            None => panic!("Bug: cannot invert singular matrix {self:?}"),
        }
    }
}
