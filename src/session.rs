/*
session.rs

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

//! Solve a puzzle from start to end.
//!
//! A [`Session`] builds the graph, asks the solver for a path between two vertexes until one
//! is found, and produces three scenes:
//!
//! * `initial.json`: the cells with their vertex numbers (`v1`, `v2`, ...), which the user
//!   refers to when choosing the source and the destination.
//! * `constraints.json`: the puzzle as given to a player, with the known positions and the
//!   diamonds returned by the solver.
//! * `solved.json`: the cells with the path drawn over them.

use log::{debug, info, warn};
use rand::Rng;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_SCENE_SIZE};
use crate::draw::Draw;
use crate::errors::{Result, RikudoError};
use crate::grid::bitmap::{Bitmap, BinaryImage};
use crate::grid::coordinates::AxialCoord;
use crate::grid::graph::HexGraph;
use crate::scene::Scene;
use crate::solver::{SolveOutcome, Solution, Solver};

/// Number of random source and destination pairs to try before giving up.
const MAX_RANDOM_ATTEMPTS: usize = 10;

/// Small hand-made puzzle, used when no image is provided.
pub const DEMO_POSITIONS: [AxialCoord; 4] = [
    AxialCoord::new(3, 3),
    AxialCoord::new(3, 2),
    AxialCoord::new(2, 3),
    AxialCoord::new(2, 4),
];

/// Origin of the puzzle cells.
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// Scan the black areas of an image.
    Image(PathBuf),

    /// Use the given cells.
    Positions(Vec<AxialCoord>),
}

/// How the source and destination vertexes are chosen. Vertexes are numbered from 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoints {
    /// Use these vertexes. If there is no path between them, then the session fails.
    Fixed { source: usize, destination: usize },

    /// Pick random vertexes, and try others if there is no path.
    Random,

    /// Ask the user, and ask again if there is no path.
    Prompt,
}

/// Scene files written by [`Session::save_scenes`].
#[derive(Debug, Clone)]
pub struct SceneFiles {
    pub initial: PathBuf,
    pub constraints: PathBuf,
    pub solved: PathBuf,
}

pub struct Session {
    graph: HexGraph,
    draw: Draw,
    solver: Solver,

    /// Cells only. The other scenes are copies of this one.
    grid: Scene,
}

impl Session {
    /// Create a [`Session`] object and draw the grid.
    ///
    /// # Errors
    ///
    /// The configuration must be valid, the image must be readable, and the graph must have at
    /// least one vertex.
    pub fn new(config: &Config, source: &GraphSource) -> Result<Self> {
        config.validate()?;

        let (graph, width, height) = match source {
            GraphSource::Image(path) => {
                let img: BinaryImage = BinaryImage::open(path)?;
                let graph: HexGraph = HexGraph::from_bitmap(&img, config.hex_size)?;
                (graph, img.width() as u32, img.height() as u32)
            }
            GraphSource::Positions(positions) => (
                HexGraph::from_positions(positions),
                DEFAULT_SCENE_SIZE,
                DEFAULT_SCENE_SIZE,
            ),
        };
        if graph.is_empty() {
            return Err(RikudoError::invalid("the puzzle does not have any cell"));
        }
        info!("Puzzle with {} cells", graph.num_vertexes());

        let draw: Draw = Draw::new(config.hex_size);
        let grid: Scene = Scene::new(width, height);
        draw.grid(&grid, &graph)?;

        Ok(Self {
            graph,
            draw,
            solver: config.solver(),
            grid,
        })
    }

    pub fn graph(&self) -> &HexGraph {
        &self.graph
    }

    /// Scene with the cells and their numbers.
    pub fn initial_scene(&self) -> Result<Scene> {
        let scene: Scene = self.grid.clone();
        self.draw.vertex_labels(&scene, &self.graph)?;
        Ok(scene)
    }

    /// Scene with the hints for the player.
    pub fn constraints_scene(&self, solution: &Solution) -> Result<Scene> {
        let scene: Scene = self.grid.clone();
        self.draw.constraints(&scene, &self.graph, solution)?;
        Ok(scene)
    }

    /// Scene with the path.
    pub fn solved_scene(&self, solution: &Solution) -> Result<Scene> {
        let scene: Scene = self.grid.clone();
        self.draw.path(&scene, &self.graph, solution)?;
        Ok(scene)
    }

    /// Run the solver once.
    pub fn solve(&self, source: usize, destination: usize) -> Result<SolveOutcome> {
        self.solver.solve(&self.graph, source, destination)
    }

    /// Search a path, choosing the endpoints as requested.
    ///
    /// `input` and `output` are used to talk to the user with [`Endpoints::Prompt`].
    /// Return None when no path could be found: with [`Endpoints::Fixed`], with
    /// [`Endpoints::Random`] after several tries, or when the user stops answering.
    ///
    /// # Errors
    ///
    /// Solver errors end the session with [`Endpoints::Fixed`] only. In the other modes they
    /// are reported and other endpoints are tried.
    pub fn run(
        &self,
        endpoints: Endpoints,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<Option<Solution>> {
        let n: usize = self.graph.num_vertexes();
        let mut attempt: usize = 0;

        loop {
            attempt += 1;
            let (source, destination) = match endpoints {
                Endpoints::Fixed {
                    source,
                    destination,
                } => (source, destination),
                Endpoints::Random => {
                    if attempt > MAX_RANDOM_ATTEMPTS {
                        warn!("No path found after {MAX_RANDOM_ATTEMPTS} random tries");
                        return Ok(None);
                    }
                    random_endpoints(n)
                }
                Endpoints::Prompt => match prompt_endpoints(input, output, n)? {
                    Some(e) => e,
                    None => return Ok(None),
                },
            };
            debug!("Attempt {attempt}: from {source} to {destination}");

            match self.solve(source, destination) {
                Ok(SolveOutcome::Solved(solution)) => return Ok(Some(solution)),
                Ok(SolveOutcome::NoSolution) => {
                    if let Endpoints::Fixed { .. } = endpoints {
                        return Ok(None);
                    }
                    say(output, "This yields no solution. Try again.")?;
                }
                Err(e) if e.is_recoverable() && !matches!(endpoints, Endpoints::Fixed { .. }) => {
                    warn!("{e}");
                    say(output, &format!("{e}. Try again."))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Save the three scenes in the given directory.
    pub fn save_scenes(&self, solution: &Solution, dir: &Path) -> Result<SceneFiles> {
        let files: SceneFiles = SceneFiles {
            initial: dir.join("initial.json"),
            constraints: dir.join("constraints.json"),
            solved: dir.join("solved.json"),
        };
        self.initial_scene()?.save(&files.initial)?;
        self.constraints_scene(solution)?.save(&files.constraints)?;
        self.solved_scene(solution)?.save(&files.solved)?;
        Ok(files)
    }
}

fn say(output: &mut impl Write, message: &str) -> Result<()> {
    writeln!(output, "{message}").map_err(|e| RikudoError::io("Cannot write to the terminal", e))
}

/// Pick two distinct vertexes (or twice the same when there is only one).
fn random_endpoints(n: usize) -> (usize, usize) {
    if n < 2 {
        return (0, 0);
    }
    let mut rng = rand::rng();
    let source: usize = rng.random_range(0..n);
    let mut destination: usize = rng.random_range(0..n - 1);
    if destination >= source {
        destination += 1;
    }
    (source, destination)
}

/// Ask for a vertex number between 1 and `n`. Return a vertex ID, which starts from 0.
fn prompt_vertex(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
    n: usize,
    exclude: Option<usize>,
) -> Result<Option<usize>> {
    let mut line: String = String::new();
    loop {
        write!(output, "{question}")
            .and_then(|_| output.flush())
            .map_err(|e| RikudoError::io("Cannot write to the terminal", e))?;
        line.clear();
        let read: usize = input
            .read_line(&mut line)
            .map_err(|e| RikudoError::io("Cannot read the answer", e))?;
        if read == 0 {
            return Ok(None);
        }
        match line.trim().parse::<usize>() {
            Ok(v) if (1..=n).contains(&v) && Some(v - 1) != exclude => return Ok(Some(v - 1)),
            _ => say(output, &format!("Invalid vertex: {}", line.trim()))?,
        }
    }
}

fn prompt_endpoints(
    input: &mut impl BufRead,
    output: &mut impl Write,
    n: usize,
) -> Result<Option<(usize, usize)>> {
    let question: String = format!("Source (1 to {n}): ");
    let source: usize = match prompt_vertex(input, output, &question, n, None)? {
        Some(v) => v,
        None => return Ok(None),
    };
    // A single cell is its own path
    let exclude: Option<usize> = if n > 1 { Some(source) } else { None };
    let question: String = format!("Target (1 to {n} and different of {}): ", source + 1);
    match prompt_vertex(input, output, &question, n, exclude)? {
        Some(destination) => Ok(Some((source, destination))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn random_endpoints_differ() {
        for _ in 0..100 {
            let (s, d) = random_endpoints(4);
            assert!(s < 4 && d < 4);
            assert_ne!(s, d);
        }
        assert_eq!(random_endpoints(1), (0, 0));
    }

    #[test]
    fn prompt_retries_on_bad_input() {
        let mut input = Cursor::new("x\n0\n2\n2\n5\n4\n");
        let mut output: Vec<u8> = Vec::new();
        let e = prompt_endpoints(&mut input, &mut output, 4).unwrap();
        assert_eq!(e, Some((1, 3)));
        let text: String = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid vertex: x"));
        assert!(text.contains("Invalid vertex: 0"));
        assert!(text.contains("Invalid vertex: 5"));
        assert!(text.contains("different of 2"));
    }

    #[test]
    fn prompt_stops_at_end_of_input() {
        let mut input = Cursor::new("1\n");
        let mut output: Vec<u8> = Vec::new();
        assert_eq!(prompt_endpoints(&mut input, &mut output, 3).unwrap(), None);
    }

    #[test]
    fn demo_scenes() {
        let config: Config = Config::default();
        let session: Session =
            Session::new(&config, &GraphSource::Positions(DEMO_POSITIONS.to_vec())).unwrap();
        assert_eq!(session.graph().num_vertexes(), 4);
        let initial: Scene = session.initial_scene().unwrap();
        assert_eq!(initial.polygons().len(), 4);
        assert_eq!(initial.labels().len(), 4);
        assert_eq!(initial.width(), DEFAULT_SCENE_SIZE);

        let solution: Solution =
            Solution::parse("3 2 0 1 -1 3 1 -1 -1", Path::new("solution.txt")).unwrap();
        let solved: Scene = session.solved_scene(&solution).unwrap();
        assert_eq!(solved.segments().len(), 3);
        assert_eq!(solved.labels().len(), 4);
        let constraints: Scene = session.constraints_scene(&solution).unwrap();
        assert_eq!(constraints.labels().len(), 1);
        assert_eq!(constraints.segments().len(), 0);
    }

    #[test]
    fn empty_puzzle_is_rejected() {
        assert!(Session::new(&Config::default(), &GraphSource::Positions(Vec::new())).is_err());
    }
}
