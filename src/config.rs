/*
config.rs

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

//! Configuration of the solver interface.
//!
//! The configuration is stored in JSON format and every field is optional:
//!
//! ```json
//! {
//!     "solver_path": "./RikudoSolver",
//!     "hex_size": 40,
//!     "timeout_secs": 30,
//!     "variant": "constrained"
//! }
//! ```
//!
//! Command-line options override the values from the file.

use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RikudoError};
use crate::solver::{Solver, SolverVariant};

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://www.gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Size of the drawing area when the graph does not come from an image.
pub const DEFAULT_SCENE_SIZE: u32 = 1024;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Solver executable.
    pub solver_path: PathBuf,

    /// Arguments given to the solver before the file paths.
    pub solver_args: Vec<String>,

    /// File where the graph is written for the solver.
    pub graph_file: PathBuf,

    /// File where the solver writes the solution.
    pub solution_file: PathBuf,

    /// Image to scan for the puzzle cells.
    pub image_file: PathBuf,

    /// Hexagon circumradius, in pixels.
    pub hex_size: i32,

    /// Maximum solver run time. No limit by default.
    pub timeout_secs: Option<u64>,

    pub variant: SolverVariant,

    /// Directory where the scenes are saved.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver_path: PathBuf::from("./RikudoSolver"),
            solver_args: Vec::new(),
            graph_file: PathBuf::from("graph.txt"),
            solution_file: PathBuf::from("solution.txt"),
            image_file: PathBuf::from("input.png"),
            hex_size: 50,
            timeout_secs: None,
            variant: SolverVariant::Constrained,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Read the configuration file.
    ///
    /// Return None if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let file: File = match File::open(path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(RikudoError::io(format!("Cannot open {path:?}"), error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        debug!("Configuration from {path:?}: {config:?}");
        Ok(Some(config))
    }

    /// Save the configuration.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file: File =
            File::create(path).map_err(|e| RikudoError::io(format!("Cannot create {path:?}"), e))?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self)?;
        writer
            .flush()
            .map_err(|e| RikudoError::io(format!("Cannot write {path:?}"), e))
    }

    /// Reject values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.hex_size <= 0 {
            return Err(RikudoError::invalid(format!(
                "hex_size must be positive, got {}",
                self.hex_size
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(RikudoError::invalid("timeout_secs must be at least 1"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build the [`Solver`] object for this configuration.
    pub fn solver(&self) -> Solver {
        Solver::new(&self.solver_path)
            .with_args(self.solver_args.clone())
            .with_files(self.graph_file.clone(), self.solution_file.clone())
            .with_variant(self.variant)
            .with_timeout(self.timeout())
    }
}
