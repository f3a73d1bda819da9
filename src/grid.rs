/*
grid.rs

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

//! Hexagonal grid: coordinates, hexagon shapes, and the graph of the cells.
//!
//! A [`graph::HexGraph`] is either built from a list of [`coordinates::AxialCoord`] positions
//! or by scanning a [`bitmap::Bitmap`] for black areas with
//! [`graph::HexGraph::from_bitmap`].
//! [`coordinates::AxialCoord::to_offset`] and [`hexagon::hexagon_vertices`] give the pixel
//! geometry used to draw the cells.

pub mod bitmap;
pub mod coordinates;
pub mod graph;
pub mod hexagon;
