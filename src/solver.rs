/*
solver.rs

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

//! File-based interface with the external Rikudo solver.
//!
//! The solver is an independent executable.
//! [`graph_file`] writes the graph it reads, [`solution`] parses what it writes back, and
//! [`process::Solver`] runs it between the two:
//!
//! ```no_run
//! use rikudo::grid::coordinates::AxialCoord;
//! use rikudo::grid::graph::HexGraph;
//! use rikudo::solver::{SolveOutcome, Solver};
//!
//! let graph = HexGraph::from_positions(&[AxialCoord::new(3, 3), AxialCoord::new(3, 2)]);
//! match Solver::new("./RikudoSolver").solve(&graph, 0, 1)? {
//!     SolveOutcome::Solved(solution) => println!("{:?}", solution.path),
//!     SolveOutcome::NoSolution => println!("Try other vertexes"),
//! }
//! # Ok::<(), rikudo::errors::RikudoError>(())
//! ```

pub mod graph_file;
pub mod process;
pub mod solution;

pub use process::{SolveOutcome, Solver, SolverVariant};
pub use solution::{Diamond, Solution};
