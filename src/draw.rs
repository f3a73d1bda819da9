/*
draw.rs

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

//! Draw puzzle components into a [`Scene`].
//!
//! Cells are hexagons centered on the pixel coordinates of their axial position.
//! Labels are placed at the cell centers; the renderer adjusts them to its font.

use log::{Level, debug, log_enabled};

use crate::errors::Result;
use crate::grid::coordinates::OffsetCoord;
use crate::grid::graph::HexGraph;
use crate::scene::{Color, Scene};
use crate::solver::Solution;

/// Width of the path segments, in pixels.
const PATH_WIDTH: u32 = 5;

/// Draw object that is used to draw the puzzle components.
#[derive(Debug, Clone)]
pub struct Draw {
    /// Hexagon circumradius, in pixels.
    hex_size: i32,

    /// Inside color of the cells.
    cell_color: Color,

    /// Border color of the cells.
    border_color: Color,

    /// Color of the path segments and of the diamonds.
    path_color: Color,
}

impl Draw {
    /// Create a [`Draw`] object for cells of the given size.
    pub fn new(hex_size: i32) -> Self {
        Self {
            hex_size,
            cell_color: Color::BLUE,
            border_color: Color::RED,
            path_color: Color::BLACK,
        }
    }

    pub fn hex_size(&self) -> i32 {
        self.hex_size
    }

    /// Pixel coordinates of the center of a vertex.
    fn center(&self, graph: &HexGraph, vertex: usize) -> Result<OffsetCoord> {
        graph.center(vertex, self.hex_size)
    }

    /// Draw one hexagon per vertex.
    pub fn grid(&self, scene: &Scene, graph: &HexGraph) -> Result<()> {
        for (vertex, position) in graph.iter() {
            debug!("Draw cell {vertex} at {position}");
            scene.add_cell(position, self.hex_size, self.cell_color, self.border_color)?;
        }
        Ok(())
    }

    /// Write the given text at the center of a vertex.
    pub fn label(&self, scene: &Scene, graph: &HexGraph, vertex: usize, text: &str) -> Result<()> {
        let c: OffsetCoord = self.center(graph, vertex)?;
        scene.add_text(text, c.x, c.y);
        Ok(())
    }

    /// Write the vertex numbers as shown to the user: `v1`, `v2`, ...
    pub fn vertex_labels(&self, scene: &Scene, graph: &HexGraph) -> Result<()> {
        for vertex in 0..graph.num_vertexes() {
            self.label(scene, graph, vertex, &format!("v{}", vertex + 1))?;
        }
        Ok(())
    }

    /// Draw a diamond between two cells.
    ///
    /// The diamond is a small hexagon at the middle of the two cell centers.
    pub fn diamond(
        &self,
        scene: &Scene,
        graph: &HexGraph,
        vertex1: usize,
        vertex2: usize,
    ) -> Result<()> {
        let c1: OffsetCoord = self.center(graph, vertex1)?;
        let c2: OffsetCoord = self.center(graph, vertex2)?;
        let size: i32 = (self.hex_size / 3).max(1);
        debug!("Draw diamond between {vertex1} and {vertex2}");
        scene.add_hexagon(c1.midpoint(c2), size, self.path_color, self.path_color)
    }

    /// Draw the hints produced by the solver: the known positions and the diamonds.
    pub fn constraints(&self, scene: &Scene, graph: &HexGraph, solution: &Solution) -> Result<()> {
        for (vertex, position) in &solution.partial_assignment {
            self.label(scene, graph, *vertex, &position.to_string())?;
        }
        for d in &solution.diamonds {
            self.diamond(scene, graph, d.first, d.second)?;
        }
        Ok(())
    }

    /// Draw the path and number its cells from 1.
    pub fn path(&self, scene: &Scene, graph: &HexGraph, solution: &Solution) -> Result<()> {
        for w in solution.path.windows(2) {
            let from: OffsetCoord = self.center(graph, w[0])?;
            let to: OffsetCoord = self.center(graph, w[1])?;
            scene.add_segment(from, to, PATH_WIDTH, self.path_color);
        }
        for (i, vertex) in solution.path.iter().enumerate() {
            self.label(scene, graph, *vertex, &(i + 1).to_string())?;
        }

        if log_enabled!(Level::Debug) {
            debug!("Path drawn:");
            debug!("  segments = {}", solution.path.len().saturating_sub(1));
            debug!("    labels = {}", solution.path.len());
        }
        Ok(())
    }
}
