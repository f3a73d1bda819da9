/*
process.rs

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

//! Run the external solver.
//!
//! The graph is written to the graph file, the solver is started with the file paths as
//! arguments, and the caller blocks until the solver exits. The solution file is then parsed.
//! An optional timeout kills a solver that takes too long.

use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::graph_file;
use super::solution::Solution;
use crate::errors::{Result, RikudoError};
use crate::grid::graph::HexGraph;

/// Delay between two checks of the solver status when a timeout is set.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Command-line convention of the solver.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverVariant {
    /// `solver <graph file> <solution file>`: the solver writes the path, the positions, and
    /// the diamonds to the solution file.
    #[default]
    Constrained,

    /// `solver <graph file>`: the solver prints the path only, on its standard output.
    PathOnly,
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Solved(Solution),

    /// No path exists between the source and the destination. The user should pick other
    /// vertexes.
    NoSolution,
}

/// Solver invocation parameters.
#[derive(Debug, Clone)]
pub struct Solver {
    /// Solver executable.
    program: PathBuf,

    /// Arguments inserted before the file paths.
    args: Vec<String>,

    graph_file: PathBuf,
    solution_file: PathBuf,
    variant: SolverVariant,

    /// Without a timeout, wait for the solver for as long as it takes.
    timeout: Option<Duration>,
}

impl Solver {
    /// Create a [`Solver`] object for the given executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            graph_file: PathBuf::from("graph.txt"),
            solution_file: PathBuf::from("solution.txt"),
            variant: SolverVariant::default(),
            timeout: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_files(mut self, graph_file: PathBuf, solution_file: PathBuf) -> Self {
        self.graph_file = graph_file;
        self.solution_file = solution_file;
        self
    }

    pub fn with_variant(mut self, variant: SolverVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn graph_file(&self) -> &Path {
        &self.graph_file
    }

    pub fn solution_file(&self) -> &Path {
        &self.solution_file
    }

    /// Search a Hamiltonian path from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// Invalid endpoints are rejected before the solver starts. Failures to write the graph,
    /// to run the solver, or to read its solution are recoverable errors.
    pub fn solve(
        &self,
        graph: &HexGraph,
        source: usize,
        destination: usize,
    ) -> Result<SolveOutcome> {
        graph_file::save_graph(&self.graph_file, graph, source, destination)?;

        // Do not read the solution of a previous run if the solver does not write anything
        match fs::remove_file(&self.solution_file) {
            Ok(()) => debug!("Removed previous solution {:?}", self.solution_file),
            Err(e) if e.kind() == ErrorKind::NotFound => (),
            Err(e) => {
                return Err(RikudoError::io(
                    format!("Cannot remove the previous solution {:?}", self.solution_file),
                    e,
                ));
            }
        }

        self.run()?;

        let solution: Solution = match self.variant {
            SolverVariant::Constrained => Solution::read(&self.solution_file)?,
            SolverVariant::PathOnly => Solution::read_path_only(&self.solution_file)?,
        };
        if !solution.is_solved() {
            info!("No path from vertex {source} to vertex {destination}");
            return Ok(SolveOutcome::NoSolution);
        }
        solution.validate(graph, source, destination, &self.solution_file)?;
        info!(
            "Found a path of {} vertexes with {} positions and {} diamonds",
            solution.path.len(),
            solution.partial_assignment.len(),
            solution.diamonds.len()
        );
        Ok(SolveOutcome::Solved(solution))
    }

    /// Build the solver command line.
    fn command(&self) -> Result<Command> {
        let mut cmd: Command = Command::new(&self.program);
        cmd.args(&self.args).arg(&self.graph_file).stdin(Stdio::null());
        match self.variant {
            SolverVariant::Constrained => {
                cmd.arg(&self.solution_file);
            }
            SolverVariant::PathOnly => {
                let out: File = File::create(&self.solution_file).map_err(|e| {
                    RikudoError::io(format!("Cannot create {:?}", self.solution_file), e)
                })?;
                cmd.stdout(out);
            }
        }
        Ok(cmd)
    }

    /// Start the solver and wait for it to exit.
    fn run(&self) -> Result<()> {
        let mut cmd: Command = self.command()?;
        debug!("Running {cmd:?}");

        let start: Instant = Instant::now();
        let mut child: Child = cmd.spawn().map_err(|e| RikudoError::Subprocess {
            reason: format!("cannot start {:?}: {e}", self.program),
        })?;
        let status: ExitStatus = match self.timeout {
            None => child.wait().map_err(|e| RikudoError::Subprocess {
                reason: format!("cannot wait for {:?}: {e}", self.program),
            })?,
            Some(t) => wait_timeout(&mut child, t)?,
        };
        debug!("Solver exited with {status} after {:?}", start.elapsed());

        if !status.success() {
            return Err(RikudoError::Subprocess {
                reason: format!("{:?} exited with {status}", self.program),
            });
        }
        Ok(())
    }
}

/// Wait for the child process, and kill it if it is still running after `timeout`.
fn wait_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let start: Instant = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => (),
            Err(e) => {
                return Err(RikudoError::Subprocess {
                    reason: format!("cannot check the solver status: {e}"),
                });
            }
        }
        let elapsed: Duration = start.elapsed();
        if elapsed >= timeout {
            warn!("Solver still running after {elapsed:?}, killing it");
            if let Err(e) = child.kill() {
                warn!("Cannot kill the solver: {e}");
            }
            // Reap the process
            let _ = child.wait();
            return Err(RikudoError::Timeout { elapsed });
        }
        thread::sleep(POLL_INTERVAL);
    }
}
