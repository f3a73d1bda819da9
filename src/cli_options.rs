/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Scan `bowtie.png` with hexagons of 40 pixels and ask for the source and the destination:
//!
//! ```text
//! $ rikudo --image bowtie.png --hex-size 40
//! Source (1 to 23): 1
//! Target (1 to 23 and different of 1): 23
//! Scenes saved to ./initial.json, ./constraints.json, and ./solved.json
//! ```
//!
//! Run the small built-in puzzle with a specific solver and a one minute time limit:
//!
//! ```text
//! $ rikudo --demo --solver ../graph/RikudoSolver --timeout 60 --source 4 --destination 2
//! ```

use clap::Parser;
use log::debug;
use std::env;
use std::io;
use std::path::PathBuf;

use crate::config::{COPYRIGHT_NOTICE, Config};
use crate::errors::RikudoError;
use crate::session::{DEMO_POSITIONS, Endpoints, GraphSource, SceneFiles, Session};
use crate::solver::SolverVariant;

/// Configuration file read when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "rikudo.json";

/// Build Rikudo puzzles from hexagonal grids with an external solver.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
pub struct Args {
    /// Configuration file in JSON format
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image to scan for the puzzle cells (black areas)
    #[arg(short, long, conflicts_with = "demo")]
    image: Option<PathBuf>,

    /// Use a small built-in puzzle instead of an image
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Hexagon size in pixels
    #[arg(short = 's', long)]
    hex_size: Option<i32>,

    /// Solver executable
    #[arg(long)]
    solver: Option<PathBuf>,

    /// File where the graph is written for the solver
    #[arg(long)]
    graph_file: Option<PathBuf>,

    /// File where the solver writes its solution
    #[arg(long)]
    solution_file: Option<PathBuf>,

    /// Maximum solver run time, in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// The solver only prints a path on its standard output
    #[arg(long, default_value_t = false)]
    path_only: bool,

    /// First vertex of the path (starting at 1)
    #[arg(long, requires = "destination", conflicts_with = "random")]
    source: Option<usize>,

    /// Last vertex of the path (starting at 1)
    #[arg(long, requires = "source")]
    destination: Option<usize>,

    /// Choose random source and destination vertexes
    #[arg(short, long, default_value_t = false)]
    random: bool,

    /// Directory where the scenes are saved
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Override the configuration with the command-line values.
    fn apply(&self, config: &mut Config) {
        if let Some(s) = self.hex_size {
            config.hex_size = s;
        }
        if let Some(p) = &self.solver {
            config.solver_path = p.clone();
        }
        if let Some(p) = &self.graph_file {
            config.graph_file = p.clone();
        }
        if let Some(p) = &self.solution_file {
            config.solution_file = p.clone();
        }
        if let Some(p) = &self.image {
            config.image_file = p.clone();
        }
        if let Some(t) = self.timeout {
            config.timeout_secs = Some(t);
        }
        if self.path_only {
            config.variant = SolverVariant::PathOnly;
        }
        if let Some(p) = &self.output_dir {
            config.output_dir = p.clone();
        }
    }

    /// Return how the endpoints must be chosen. Vertex numbers start at 1 on the command line.
    fn endpoints(&self) -> Result<Endpoints, RikudoError> {
        match (self.source, self.destination) {
            (Some(s), Some(d)) => {
                if s == 0 || d == 0 {
                    return Err(RikudoError::invalid("vertex numbers start at 1"));
                }
                Ok(Endpoints::Fixed {
                    source: s - 1,
                    destination: d - 1,
                })
            }
            _ if self.random => Ok(Endpoints::Random),
            _ => Ok(Endpoints::Prompt),
        }
    }
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();
    debug!("{args:?}");

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn run(args: &Args) -> Result<u8, RikudoError> {
    let config_file: PathBuf = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config: Config = match Config::load(&config_file)? {
        Some(c) => c,
        None => {
            if args.config.is_some() {
                return Err(RikudoError::invalid(format!(
                    "configuration file {config_file:?} does not exist"
                )));
            }
            Config::default()
        }
    };
    args.apply(&mut config);

    let source: GraphSource = if args.demo {
        GraphSource::Positions(DEMO_POSITIONS.to_vec())
    } else {
        GraphSource::Image(config.image_file.clone())
    };
    let endpoints: Endpoints = args.endpoints()?;
    let session: Session = Session::new(&config, &source)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    match session.run(endpoints, &mut input, &mut output)? {
        Some(solution) => {
            let files: SceneFiles = session.save_scenes(&solution, &config.output_dir)?;
            println!(
                "Scenes saved to {}, {}, and {}",
                files.initial.display(),
                files.constraints.display(),
                files.solved.display()
            );
            Ok(0)
        }
        None => {
            eprintln!("No solution found");
            Ok(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_configuration() {
        let args: Args = Args::parse_from([
            "rikudo",
            "--demo",
            "--hex-size",
            "30",
            "--solver",
            "/opt/solver",
            "--timeout",
            "5",
            "--path-only",
        ]);
        let mut config: Config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.hex_size, 30);
        assert_eq!(config.solver_path, PathBuf::from("/opt/solver"));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.variant, SolverVariant::PathOnly);
        assert_eq!(config.graph_file, PathBuf::from("graph.txt"));
    }

    #[test]
    fn endpoints_from_the_command_line() {
        let args: Args = Args::parse_from(["rikudo", "--source", "4", "--destination", "2"]);
        assert_eq!(
            args.endpoints().unwrap(),
            Endpoints::Fixed {
                source: 3,
                destination: 1
            }
        );
        let args: Args = Args::parse_from(["rikudo", "--random"]);
        assert_eq!(args.endpoints().unwrap(), Endpoints::Random);
        let args: Args = Args::parse_from(["rikudo"]);
        assert_eq!(args.endpoints().unwrap(), Endpoints::Prompt);
        let args: Args = Args::parse_from(["rikudo", "--source", "0", "--destination", "2"]);
        assert!(args.endpoints().is_err());
    }

    #[test]
    fn conflicting_options() {
        assert!(Args::try_parse_from(["rikudo", "--demo", "--image", "a.png"]).is_err());
        assert!(Args::try_parse_from(["rikudo", "--source", "1"]).is_err());
        assert!(
            Args::try_parse_from(["rikudo", "--random", "--source", "1", "--destination", "2"])
                .is_err()
        );
    }
}
