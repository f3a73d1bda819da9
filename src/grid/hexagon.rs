/*
hexagon.rs

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

//! Corners of a regular hexagon in the pixel plane.

use crate::errors::Result;
use crate::grid::coordinates::{NUM_DIRECTIONS, OffsetCoord, check_size};

/// Hexagon corners, in rotation order.
pub type HexagonVertices = [(i32, i32); NUM_DIRECTIONS];

/// Return the six corners of the hexagon centered at `center`.
///
/// Corner `i` is at angle `60° * i + 90°` and at distance `size` from the center. Coordinates
/// are truncated to integers.
///
/// # Errors
///
/// A `size` that is not strictly positive is rejected.
pub fn hexagon_vertices(center: OffsetCoord, size: i32) -> Result<HexagonVertices> {
    check_size(size)?;

    let mut vertices: HexagonVertices = [(0, 0); NUM_DIRECTIONS];
    for (i, v) in vertices.iter_mut().enumerate() {
        let angle: f64 = (60.0 * i as f64 + 90.0).to_radians();
        let x: f64 = center.x as f64 + size as f64 * angle.cos();
        let y: f64 = center.y as f64 + size as f64 * angle.sin();
        *v = (x as i32, y as i32);
    }
    Ok(vertices)
}
