/*
solution.rs

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

//! Parse the solution file written by the solver.
//!
//! The file has three lists, each one ends with `-1`:
//!
//! ```text
//! 0 2 1 3 -1   <- Hamiltonian path, in walk order
//! 2 1 -1       <- vertex and position pairs (positions start at 1)
//! 0 2 -1       <- diamonds: pairs of vertexes that must follow each other in the path
//! ```
//!
//! An empty path means that the solver did not find any path between the source and the
//! destination.

use log::{Level, debug, log_enabled};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use serde::{Deserialize, Serialize};

use super::graph_file::SENTINEL;
use crate::errors::{Result, RikudoError};
use crate::grid::graph::HexGraph;

/// Two vertexes that are consecutive in the path.
///
/// The order of the vertexes does not matter: `(a, b)` and `(b, a)` are the same diamond.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone)]
pub struct Diamond {
    pub first: usize,
    pub second: usize,
}

impl Hash for Diamond {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first.min(self.second).hash(state);
        self.first.max(self.second).hash(state);
    }
}

impl PartialEq for Diamond {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl Eq for Diamond {}

impl Diamond {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    /// Whether the given vertex is one member of the diamond.
    pub fn is_in(&self, vertex: usize) -> bool {
        self.first == vertex || self.second == vertex
    }

    /// Given a vertex, return the other vertex.
    pub fn other(&self, vertex: usize) -> usize {
        if self.first == vertex {
            self.second
        } else {
            self.first
        }
    }
}

/// Solution returned by the solver.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Solution {
    /// Vertexes in path order. Empty when there is no solution.
    pub path: Vec<usize>,

    /// Position in the path (starting at 1) of some vertexes.
    pub partial_assignment: BTreeMap<usize, usize>,

    /// Diamonds, in the solver order.
    pub diamonds: Vec<Diamond>,
}

/// Integer reader over the whitespace-separated tokens of a solver file.
struct Tokens<'a> {
    tokens: SplitWhitespace<'a>,
    file: &'a Path,
    count: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str, file: &'a Path) -> Self {
        Self {
            tokens: text.split_whitespace(),
            file,
            count: 0,
        }
    }

    fn error(&self, reason: String) -> RikudoError {
        RikudoError::ProtocolParse {
            file: self.file.to_path_buf(),
            reason,
        }
    }

    /// Return the next integer, or None at the end of the file.
    fn next_int(&mut self) -> Result<Option<i64>> {
        match self.tokens.next() {
            None => Ok(None),
            Some(t) => {
                self.count += 1;
                t.parse::<i64>().map(Some).map_err(|_| {
                    self.error(format!("malformed integer '{t}' at token {}", self.count))
                })
            }
        }
    }

    /// Return the next vertex, or None for the end-of-list marker.
    fn next_vertex(&mut self, section: &str) -> Result<Option<usize>> {
        match self.next_int()? {
            None => Err(self.error(format!("truncated file: missing -1 after the {section}"))),
            Some(SENTINEL) => Ok(None),
            Some(v) => self.to_index(v, section).map(Some),
        }
    }

    /// Return the second member of a pair. The end-of-list marker is not allowed here.
    fn next_pair_member(&mut self, section: &str) -> Result<usize> {
        match self.next_int()? {
            None => Err(self.error(format!("truncated file: incomplete pair in the {section}"))),
            Some(v) => self.to_index(v, section),
        }
    }

    fn to_index(&self, value: i64, section: &str) -> Result<usize> {
        usize::try_from(value).map_err(|_| {
            self.error(format!(
                "negative value {value} at token {} in the {section}",
                self.count
            ))
        })
    }
}

impl Solution {
    /// Parse the content of a solution file. `file` is only used in error messages.
    pub fn parse(text: &str, file: &Path) -> Result<Self> {
        let mut tokens: Tokens = Tokens::new(text, file);
        let mut solution: Solution = Solution::default();

        while let Some(v) = tokens.next_vertex("path")? {
            solution.path.push(v);
        }

        while let Some(v) = tokens.next_vertex("position list")? {
            let position: usize = tokens.next_pair_member("position list")?;
            if position == 0 {
                return Err(
                    tokens.error(format!("position 0 for vertex {v} (positions start at 1)"))
                );
            }
            solution.partial_assignment.insert(v, position);
        }

        while let Some(v) = tokens.next_vertex("diamond list")? {
            let w: usize = tokens.next_pair_member("diamond list")?;
            solution.diamonds.push(Diamond::new(v, w));
        }

        if tokens.next_int()?.is_some() {
            debug!("Ignoring the data after the diamond list in {file:?}");
        }
        if log_enabled!(Level::Debug) {
            solution.debug();
        }
        Ok(solution)
    }

    /// Parse a bare path: vertexes separated by white spaces, without any end-of-list marker.
    ///
    /// This is what the solver prints when it is only given the graph file.
    pub fn parse_path_only(text: &str, file: &Path) -> Result<Self> {
        let mut tokens: Tokens = Tokens::new(text, file);
        let mut solution: Solution = Solution::default();

        while let Some(v) = tokens.next_int()? {
            if v == SENTINEL {
                break;
            }
            let vertex: usize = tokens.to_index(v, "path")?;
            solution.path.push(vertex);
        }
        debug!("Path from {file:?}: {:?}", solution.path);
        Ok(solution)
    }

    /// Read and parse a solution file.
    pub fn read(file: &Path) -> Result<Self> {
        Self::parse(&read_file(file)?, file)
    }

    /// Read and parse a file that only contains a path.
    pub fn read_path_only(file: &Path) -> Result<Self> {
        Self::parse_path_only(&read_file(file)?, file)
    }

    /// Whether the solver found a path.
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Check the solution against the graph that was sent to the solver.
    ///
    /// The path must go from `source` to `destination` and visit every vertex once, through
    /// existing edges. All the vertexes and positions must exist. `file` is only used in error
    /// messages.
    pub fn validate(
        &self,
        graph: &HexGraph,
        source: usize,
        destination: usize,
        file: &Path,
    ) -> Result<()> {
        let n: usize = graph.num_vertexes();
        let error = |reason: String| RikudoError::ProtocolParse {
            file: PathBuf::from(file),
            reason,
        };

        let all_vertexes = self
            .path
            .iter()
            .chain(self.partial_assignment.keys())
            .chain(self.diamonds.iter().flat_map(|d| [&d.first, &d.second]));
        for v in all_vertexes {
            if *v >= n {
                return Err(error(format!("vertex {v} is not in the graph ({n} vertexes)")));
            }
        }

        if self.is_solved() {
            let visited: HashSet<usize> = self.path.iter().copied().collect();
            if self.path.len() != n || visited.len() != n {
                return Err(error(format!(
                    "the path visits {} distinct vertexes out of {n}",
                    visited.len()
                )));
            }
            let first: Option<&usize> = self.path.first();
            let last: Option<&usize> = self.path.last();
            if first != Some(&source) || last != Some(&destination) {
                return Err(error(format!(
                    "the path goes from {first:?} to {last:?} instead of {source} to {destination}"
                )));
            }
            for w in self.path.windows(2) {
                if !graph.is_adjacent(w[0], w[1]) {
                    return Err(error(format!(
                        "the path goes from {} to {} which are not adjacent",
                        w[0], w[1]
                    )));
                }
            }
        }

        for (v, position) in &self.partial_assignment {
            if *position > n {
                return Err(error(format!(
                    "position {position} of vertex {v} is beyond the {n} vertexes"
                )));
            }
        }
        Ok(())
    }

    /// Print the solution.
    pub fn debug(&self) {
        debug!("Solution:");
        debug!("      path = {:?}", self.path);
        debug!("  position = {:?}", self.partial_assignment);
        debug!(
            "  diamonds = {:?}",
            self.diamonds
                .iter()
                .map(|d| (d.first, d.second))
                .collect::<Vec<(usize, usize)>>()
        );
    }
}

fn read_file(file: &Path) -> Result<String> {
    fs::read_to_string(file)
        .map_err(|e| RikudoError::io(format!("Cannot read the solution from {file:?}"), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::coordinates::AxialCoord;

    fn file() -> &'static Path {
        Path::new("solution.txt")
    }

    fn parse_error(text: &str) -> String {
        match Solution::parse(text, file()) {
            Err(RikudoError::ProtocolParse { reason, .. }) => reason,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn three_sections() {
        let s: Solution = Solution::parse("0 1 2 -1 1 5 -1 0 2 -1", file()).unwrap();
        assert_eq!(s.path, vec![0, 1, 2]);
        assert_eq!(s.partial_assignment, BTreeMap::from([(1, 5)]));
        assert_eq!(s.diamonds.len(), 1);
        assert_eq!(s.diamonds[0].first, 0);
        assert_eq!(s.diamonds[0].second, 2);
        assert!(s.is_solved());
    }

    #[test]
    fn line_breaks_do_not_matter() {
        let s: Solution = Solution::parse("0\n2\n1\n3\n-1\n1 2\n-1\n0 2\n-1\n", file()).unwrap();
        assert_eq!(s.path, vec![0, 2, 1, 3]);
        assert_eq!(s.partial_assignment.get(&1), Some(&2));
        assert_eq!(s.diamonds, vec![Diamond::new(0, 2)]);
    }

    #[test]
    fn empty_path_means_no_solution() {
        let s: Solution = Solution::parse("-1 -1 -1", file()).unwrap();
        assert!(s.path.is_empty());
        assert!(!s.is_solved());
    }

    #[test]
    fn malformed_files_are_reported() {
        assert!(parse_error("0 1 x -1 -1 -1").contains("malformed integer 'x' at token 3"));
        assert!(parse_error("0 1 2").contains("after the path"));
        assert!(parse_error("0 1 -1 1 3 -1").contains("diamond list"));
        assert!(parse_error("0 1 -1 1").contains("incomplete pair"));
        assert!(parse_error("0 -4 -1 -1 -1").contains("negative value -4"));
        assert!(parse_error("0 1 -1 1 0 -1 -1").contains("position 0"));
        assert!(parse_error("").contains("truncated"));
    }

    #[test]
    fn diamonds_ignore_order() {
        let mut set: HashSet<Diamond> = HashSet::new();
        set.insert(Diamond::new(3, 7));
        assert!(set.contains(&Diamond::new(7, 3)));
        assert_eq!(Diamond::new(3, 7), Diamond::new(7, 3));
        assert_ne!(Diamond::new(3, 7), Diamond::new(3, 8));
        assert!(Diamond::new(3, 7).is_in(7));
        assert_eq!(Diamond::new(3, 7).other(7), 3);
    }

    #[test]
    fn bare_path() {
        let s: Solution = Solution::parse_path_only("3 1 0 2 \n", file()).unwrap();
        assert_eq!(s.path, vec![3, 1, 0, 2]);
        assert!(s.partial_assignment.is_empty());
        assert!(!Solution::parse_path_only("\n", file()).unwrap().is_solved());
        assert!(Solution::parse_path_only("3 a", file()).is_err());
    }

    #[test]
    fn validation_against_the_graph() {
        let g: HexGraph = HexGraph::from_positions(&[
            AxialCoord::new(0, 0),
            AxialCoord::new(1, 0),
            AxialCoord::new(2, 0),
        ]);
        let ok: Solution = Solution::parse("0 1 2 -1 1 1 -1 1 2 -1", file()).unwrap();
        assert!(ok.validate(&g, 0, 2, file()).is_ok());

        let jump: Solution = Solution::parse("0 2 1 -1 -1 -1", file()).unwrap();
        assert!(jump.validate(&g, 0, 2, file()).is_err());

        let short: Solution = Solution::parse("0 1 -1 -1 -1", file()).unwrap();
        assert!(short.validate(&g, 0, 2, file()).is_err());

        let unknown: Solution = Solution::parse("-1 -1 0 9 -1", file()).unwrap();
        assert!(matches!(
            unknown.validate(&g, 0, 2, file()),
            Err(RikudoError::ProtocolParse { .. })
        ));

        let far: Solution = Solution::parse("0 1 2 -1 1 5 -1 -1", file()).unwrap();
        assert!(far.validate(&g, 0, 2, file()).is_err());
    }

    #[test]
    fn path_must_join_the_requested_vertexes() {
        let g: HexGraph = HexGraph::from_positions(&[
            AxialCoord::new(0, 0),
            AxialCoord::new(1, 0),
            AxialCoord::new(2, 0),
        ]);
        let reversed: Solution = Solution::parse("2 1 0 -1 -1 -1", file()).unwrap();
        assert!(reversed.validate(&g, 2, 0, file()).is_ok());
        assert!(matches!(
            reversed.validate(&g, 0, 2, file()),
            Err(RikudoError::ProtocolParse { .. })
        ));
        assert!(reversed.validate(&g, 2, 1, file()).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let e = Solution::read(Path::new("/nonexistent/rikudo/solution.txt")).unwrap_err();
        assert!(matches!(e, RikudoError::Io { .. }));
        assert!(e.is_recoverable());
    }
}
