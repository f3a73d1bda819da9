/*
coordinates.rs

Copyright 2025 Hervé Quatremain

This file is part of Rikudo.

Rikudo is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Rikudo is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Rikudo. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Axial hex coordinates and their pixel-plane (offset) counterparts.
//!
//! Hexagons are laid out "pointy-top": the axial `q` axis goes east, the axial `r` axis goes
//! south-east.
//! The `size` parameter of the conversions is the circumradius of a hexagon, in pixels.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use strum_macros::FromRepr;

use crate::errors::{Result, RikudoError};

pub const SQRT_3: f64 = 1.732_050_807_568_877_2_f64;

/// Number of neighbors of a hexagon.
pub const NUM_DIRECTIONS: usize = 6;

/// Return an error if the hexagon size is not strictly positive.
pub fn check_size(size: i32) -> Result<()> {
    if size <= 0 {
        return Err(RikudoError::invalid(format!(
            "hexagon size must be positive, got {size}"
        )));
    }
    Ok(())
}

/// Directions of the six neighbors of a hexagon.
///
/// The discriminant gives the iteration order used when the graph inserts edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(usize)]
pub enum Direction {
    East,
    SouthEast,
    West,
    NorthWest,
    NorthEast,
    SouthWest,
}

impl Direction {
    /// Iterate over the six directions, always in the same order.
    pub fn all() -> impl Iterator<Item = Direction> {
        (0..NUM_DIRECTIONS).filter_map(Direction::from_repr)
    }

    /// Unit axial vector for the direction.
    pub fn offset(self) -> AxialCoord {
        match self {
            Direction::East => AxialCoord::new(1, 0),
            Direction::SouthEast => AxialCoord::new(0, 1),
            Direction::West => AxialCoord::new(-1, 0),
            Direction::NorthWest => AxialCoord::new(0, -1),
            Direction::NorthEast => AxialCoord::new(1, -1),
            Direction::SouthWest => AxialCoord::new(-1, 1),
        }
    }
}

/// Position of a hexagon in axial coordinates.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct AxialCoord {
    /// Horizontal step.
    pub q: i32,

    /// Diagonal step.
    pub r: i32,
}

impl AxialCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Return the pixel coordinates of the hexagon center.
    ///
    /// The result is truncated towards zero, so the conversion back with
    /// [`OffsetCoord::to_axial`] relies on cube rounding to find the hexagon again.
    pub fn to_offset(self, size: i32) -> Result<OffsetCoord> {
        check_size(size)?;
        let size: f64 = size as f64;
        let x: f64 = size * SQRT_3 * (self.q as f64 + self.r as f64 * 0.5);
        let y: f64 = size * 1.5 * self.r as f64;
        Ok(OffsetCoord::new(x as i32, y as i32))
    }

    /// Return the six neighbors, in the [`Direction::all`] order.
    pub fn neighbors(self) -> [AxialCoord; NUM_DIRECTIONS] {
        let mut result: [AxialCoord; NUM_DIRECTIONS] = [self; NUM_DIRECTIONS];
        for (n, d) in result.iter_mut().zip(Direction::all()) {
            *n = self + d.offset();
        }
        result
    }

    /// Return the neighbor in the given direction.
    pub fn neighbor(self, direction: Direction) -> AxialCoord {
        self + direction.offset()
    }
}

impl Add for AxialCoord {
    type Output = AxialCoord;

    fn add(self, other: AxialCoord) -> AxialCoord {
        AxialCoord::new(self.q + other.q, self.r + other.r)
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Point in the pixel plane. The origin is the top-left corner, `y` grows downward.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct OffsetCoord {
    pub x: i32,
    pub y: i32,
}

impl OffsetCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the hexagon that contains the point.
    pub fn to_axial(self, size: i32) -> Result<AxialCoord> {
        check_size(size)?;
        let size: f64 = size as f64;
        let x: f64 = self.x as f64;
        let y: f64 = self.y as f64;
        let q: f64 = (SQRT_3 * x - y) / (3.0 * size);
        let r: f64 = (2.0 * y) / (3.0 * size);
        Ok(axial_round(q, r))
    }

    /// Middle of the segment between two points, with integer division.
    pub fn midpoint(self, other: OffsetCoord) -> OffsetCoord {
        OffsetCoord::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

/// Round a half-way value up, whatever its sign.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Snap fractional axial coordinates to the hexagon that contains them.
///
/// The three cube coordinates are rounded separately. The one with the largest rounding error
/// is then recomputed from the two others so that `q + r + s == 0` still holds.
pub fn axial_round(q: f64, r: f64) -> AxialCoord {
    let s: f64 = -q - r;
    let mut rq: f64 = round_half_up(q);
    let mut rr: f64 = round_half_up(r);
    let rs: f64 = round_half_up(s);
    let q_diff: f64 = (rq - q).abs();
    let r_diff: f64 = (rr - r).abs();
    let s_diff: f64 = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }
    // Otherwise `s` is the one to fix, and it is not part of the axial result

    AxialCoord::new(rq as i32, rr as i32)
}
