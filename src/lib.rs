/*
lib.rs

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

//! Hexagonal grids for Rikudo puzzles, and the interface with an external solver.
//!
//! The puzzle cells form a [`grid::graph::HexGraph`], built from axial positions or from the
//! black areas of an image.
//! The [`solver`] module writes that graph for an external solver, runs it, and reads back a
//! Hamiltonian path with the hints that make it unique (known positions and diamonds).
//! The [`draw`] module turns the graph and the solution into [`scene::Scene`] objects, which
//! list the polygons, segments, and labels that a renderer draws.

pub mod cli_options;
pub mod config;
pub mod draw;
pub mod errors;
pub mod grid;
pub mod scene;
pub mod session;
pub mod solver;
