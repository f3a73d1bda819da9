/*
graph_file.rs

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

//! Write the graph file read by the solver.
//!
//! ```text
//! 3          <- number of vertexes
//! 0 1        <- one line per edge and per direction
//! 1 0
//! 1 2
//! 2 1
//! -1         <- end of the edge list
//! 0 2        <- source and destination vertexes
//! ```
//!
//! Each undirected edge appears twice, once from each end. The solver expects it.

use log::debug;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::errors::{Result, RikudoError};
use crate::grid::graph::HexGraph;

/// Marks the end of a list in the solver files.
pub const SENTINEL: i64 = -1;

/// Return an error if the path endpoints cannot be used with the graph.
pub fn check_endpoints(graph: &HexGraph, source: usize, destination: usize) -> Result<()> {
    let n: usize = graph.num_vertexes();
    if source >= n {
        return Err(RikudoError::NotFound { vertex: source });
    }
    if destination >= n {
        return Err(RikudoError::NotFound {
            vertex: destination,
        });
    }
    if source == destination && n > 1 {
        return Err(RikudoError::invalid(format!(
            "the source and the destination must differ (both are {source})"
        )));
    }
    Ok(())
}

/// Return the content of the graph file.
pub fn write_graph(graph: &HexGraph, source: usize, destination: usize) -> Result<String> {
    check_endpoints(graph, source, destination)?;

    let mut text: String = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(text, "{}", graph.num_vertexes());
    for (u, v) in graph.directed_edges() {
        let _ = writeln!(text, "{u} {v}");
    }
    let _ = writeln!(text, "{SENTINEL}");
    let _ = writeln!(text, "{source} {destination}");
    Ok(text)
}

/// Write the graph file at the given location.
pub fn save_graph(path: &Path, graph: &HexGraph, source: usize, destination: usize) -> Result<()> {
    let text: String = write_graph(graph, source, destination)?;
    fs::write(path, text)
        .map_err(|e| RikudoError::io(format!("Cannot write the graph to {path:?}"), e))?;
    debug!(
        "Graph file {path:?}: {} vertexes, from {source} to {destination}",
        graph.num_vertexes()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::coordinates::AxialCoord;

    fn line_graph() -> HexGraph {
        HexGraph::from_positions(&[
            AxialCoord::new(0, 0),
            AxialCoord::new(1, 0),
            AxialCoord::new(2, 0),
        ])
    }

    #[test]
    fn edges_are_written_both_ways() {
        let text: String = write_graph(&line_graph(), 0, 2).unwrap();
        assert_eq!(text, "3\n0 1\n1 0\n1 2\n2 1\n-1\n0 2\n");
    }

    #[test]
    fn edges_follow_insertion_order() {
        // The last vertex touches the two others: its list is [0, 1] and both older lists grow
        let g: HexGraph = HexGraph::from_positions(&[
            AxialCoord::new(0, 0),
            AxialCoord::new(1, -1),
            AxialCoord::new(1, 0),
        ]);
        let text: String = write_graph(&g, 1, 0).unwrap();
        assert_eq!(text, "3\n0 1\n0 2\n1 0\n1 2\n2 0\n2 1\n-1\n1 0\n");
    }

    #[test]
    fn isolated_vertex_has_no_edge_lines() {
        let g: HexGraph = HexGraph::from_positions(&[AxialCoord::new(0, 0)]);
        assert_eq!(write_graph(&g, 0, 0).unwrap(), "1\n-1\n0 0\n");
    }

    #[test]
    fn endpoints_must_be_in_the_graph() {
        assert!(matches!(
            write_graph(&line_graph(), 0, 3),
            Err(RikudoError::NotFound { vertex: 3 })
        ));
        assert!(matches!(
            write_graph(&line_graph(), 1, 1),
            Err(RikudoError::InvalidArgument { .. })
        ));
    }
}
