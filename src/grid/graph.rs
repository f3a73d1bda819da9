/*
graph.rs

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

//! Graph of the hexagonal cells.
//!
//! Vertexes are numbered from 0, in insertion order. Each vertex is bound to exactly one axial
//! position, and two vertexes are adjacent when their hexagons share a side.

use log::{Level, debug, log_enabled};
use std::collections::HashMap;

use super::bitmap::Bitmap;
use super::coordinates::{AxialCoord, OffsetCoord, SQRT_3, check_size};
use crate::errors::{Result, RikudoError};

/// Undirected graph of the puzzle cells.
#[derive(Debug, Clone, Default)]
pub struct HexGraph {
    /// Position of each vertex, indexed by vertex ID.
    positions: Vec<AxialCoord>,

    /// Reverse lookup of [`HexGraph::positions`].
    ///
    /// Both are only updated together by [`HexGraph::add_vertex`].
    vertexes: HashMap<AxialCoord, usize>,

    /// For each vertex, the adjacent vertexes in insertion order.
    adjacency: Vec<Vec<usize>>,
}

impl HexGraph {
    /// Create an empty [`HexGraph`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph from a list of positions. Duplicated positions are ignored.
    pub fn from_positions(positions: &[AxialCoord]) -> Self {
        let mut graph: HexGraph = HexGraph::new();
        for p in positions {
            graph.add_vertex(*p);
        }
        if log_enabled!(Level::Debug) {
            graph.debug();
        }
        graph
    }

    /// Build the graph by sampling the image on a hexagonal lattice.
    ///
    /// Lattice row `i` holds the hexagons with `r = i + 1` and `q = j - i / 2`. A hexagon is
    /// kept when it fits completely inside the image and when the pixel at `(i * hex_size,
    /// j * hex_size)` is inside the image and black. That pixel is not the hexagon center;
    /// fixtures built for the solver depend on this exact sampling. With tall images, the
    /// sampled pixel of some hexagons that fit falls outside the image: they are skipped.
    ///
    /// # Errors
    ///
    /// `hex_size` must be positive.
    pub fn from_bitmap(image: &impl Bitmap, hex_size: i32) -> Result<Self> {
        check_size(hex_size)?;
        let step: usize = hex_size as usize;
        let width: usize = image.width();
        let height: usize = image.height();
        let half_width: f64 = hex_size as f64 * SQRT_3 / 2.0;
        let half_height: f64 = hex_size as f64;
        let mut graph: HexGraph = HexGraph::new();

        let mut i: usize = 0;
        while i * step < height {
            let initial_q: i32 = -((i / 2) as i32);
            let r: i32 = i as i32 + 1;
            let mut j: usize = 0;
            while j * step < width {
                let position: AxialCoord = AxialCoord::new(initial_q + j as i32, r);
                let center: OffsetCoord = position.to_offset(hex_size)?;
                let min_x: f64 = center.x as f64 - half_width;
                let max_x: f64 = center.x as f64 + half_width;
                let min_y: f64 = center.y as f64 - half_height;
                let max_y: f64 = center.y as f64 + half_height;

                if 0.0 <= min_x
                    && max_x < width as f64
                    && 0.0 <= min_y
                    && max_y < height as f64
                    && i * step < width
                    && j * step < height
                    && image.is_black(i * step, j * step)?
                {
                    graph.add_vertex(position);
                }
                j += 1;
            }
            i += 1;
        }

        debug!(
            "{}x{} image with hexagon size {hex_size}: {} vertexes",
            width,
            height,
            graph.num_vertexes()
        );
        if log_enabled!(Level::Debug) {
            graph.debug();
        }
        Ok(graph)
    }

    /// Add a vertex at the given position and return its ID.
    ///
    /// If the position is already in the graph, then the existing ID is returned and the graph
    /// is not modified. Otherwise, edges are created with all the vertexes already present
    /// around the new one.
    pub fn add_vertex(&mut self, position: AxialCoord) -> usize {
        if let Some(v) = self.vertexes.get(&position) {
            return *v;
        }

        let vertex: usize = self.positions.len();
        self.positions.push(position);
        self.vertexes.insert(position, vertex);
        self.adjacency.push(Vec::new());

        for neighbor in position.neighbors() {
            if let Some(&v) = self.vertexes.get(&neighbor) {
                self.adjacency[vertex].push(v);
                self.adjacency[v].push(vertex);
            }
        }
        vertex
    }

    /// Number of vertexes in the graph.
    pub fn num_vertexes(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Return the axial position of the given vertex.
    pub fn position(&self, vertex: usize) -> Result<AxialCoord> {
        self.positions
            .get(vertex)
            .copied()
            .ok_or(RikudoError::NotFound { vertex })
    }

    /// Return the pixel coordinates of the center of the given vertex.
    pub fn center(&self, vertex: usize, hex_size: i32) -> Result<OffsetCoord> {
        self.position(vertex)?.to_offset(hex_size)
    }

    /// Return the vertex at the given position, if any.
    pub fn vertex(&self, position: AxialCoord) -> Option<usize> {
        self.vertexes.get(&position).copied()
    }

    /// Return the adjacent vertexes of the given vertex, in insertion order.
    pub fn neighbors(&self, vertex: usize) -> Result<&[usize]> {
        self.adjacency
            .get(vertex)
            .map(|a| &a[..])
            .ok_or(RikudoError::NotFound { vertex })
    }

    /// Whether two vertexes are adjacent.
    pub fn is_adjacent(&self, vertex1: usize, vertex2: usize) -> bool {
        match self.adjacency.get(vertex1) {
            Some(a) => a.contains(&vertex2),
            None => false,
        }
    }

    /// Iterate over the edges in both directions: vertexes in ascending order, and for each
    /// vertex its neighbors in insertion order.
    pub fn directed_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, a)| a.iter().map(move |v| (u, *v)))
    }

    /// Iterate over the vertexes and their positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, AxialCoord)> + '_ {
        self.positions.iter().copied().enumerate()
    }

    /// Print the adjacency lists.
    pub fn debug(&self) {
        let mut s: String = String::new();

        for (v1, a) in self.adjacency.iter().enumerate() {
            s.clear();
            s.push_str(&format!("{v1:>3} {:<10} -->", self.positions[v1].to_string()));
            for v2 in a {
                s.push_str(&format!(" {v2}"));
            }
            debug!("{s}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::bitmap::BinaryImage;

    fn sample_positions() -> Vec<AxialCoord> {
        vec![
            AxialCoord::new(1, 1),
            AxialCoord::new(2, 1),
            AxialCoord::new(0, 2),
            AxialCoord::new(1, 2),
            AxialCoord::new(0, 3),
            AxialCoord::new(1, 3),
        ]
    }

    #[test]
    fn vertexes_are_numbered_in_insertion_order() {
        let g: HexGraph = HexGraph::from_positions(&sample_positions());
        assert_eq!(g.num_vertexes(), 6);
        assert_eq!(g.position(3).unwrap(), AxialCoord::new(1, 2));
        assert_eq!(g.vertex(AxialCoord::new(0, 3)), Some(4));
        assert_eq!(g.vertex(AxialCoord::new(5, 5)), None);
    }

    #[test]
    fn adjacency_follows_insertion_order() {
        let g: HexGraph = HexGraph::from_positions(&sample_positions());
        assert_eq!(g.neighbors(0).unwrap(), &[1, 2, 3]);
        assert_eq!(g.neighbors(1).unwrap(), &[0, 3]);
        assert_eq!(g.neighbors(2).unwrap(), &[0, 3, 4]);
        assert_eq!(g.neighbors(3).unwrap(), &[2, 0, 1, 4, 5]);
        assert_eq!(g.neighbors(4).unwrap(), &[2, 3, 5]);
        assert_eq!(g.neighbors(5).unwrap(), &[4, 3]);
        assert_eq!(g.directed_edges().count(), 18);
    }

    #[test]
    fn adding_twice_is_a_no_op() {
        let mut g: HexGraph = HexGraph::from_positions(&sample_positions());
        let before: Vec<Vec<usize>> = (0..6).map(|v| g.neighbors(v).unwrap().to_vec()).collect();
        assert_eq!(g.add_vertex(AxialCoord::new(1, 2)), 3);
        assert_eq!(g.num_vertexes(), 6);
        for (v, a) in before.iter().enumerate() {
            assert_eq!(g.neighbors(v).unwrap(), &a[..]);
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mut positions: Vec<AxialCoord> = Vec::new();
        for q in -3..4 {
            for r in -3..4 {
                if (q + r) % 3 != 0 {
                    positions.push(AxialCoord::new(q, r));
                }
            }
        }
        let g: HexGraph = HexGraph::from_positions(&positions);
        for (u, v) in g.directed_edges() {
            assert!(g.is_adjacent(v, u), "{u} -> {v} has no reverse edge");
            assert_eq!(
                g.neighbors(u).unwrap().iter().filter(|w| **w == v).count(),
                1
            );
        }
    }

    #[test]
    fn unknown_vertex_is_not_found() {
        let g: HexGraph = HexGraph::from_positions(&sample_positions());
        assert!(matches!(
            g.position(6),
            Err(RikudoError::NotFound { vertex: 6 })
        ));
        assert!(g.neighbors(42).is_err());
        assert!(!g.is_adjacent(42, 0));
    }

    #[test]
    fn bitmap_scan_of_a_black_square() {
        let img: BinaryImage = BinaryImage::square(300);
        let g: HexGraph = HexGraph::from_bitmap(&img, 50).unwrap();
        let positions: Vec<AxialCoord> = g.iter().map(|(_, p)| p).collect();
        assert_eq!(positions, sample_positions());
    }

    #[test]
    fn bitmap_scan_of_a_rectangle() {
        let img: BinaryImage = BinaryImage::new(400, 300);
        let g: HexGraph = HexGraph::from_bitmap(&img, 50).unwrap();
        assert_eq!(g.num_vertexes(), 10);
        assert_eq!(g.position(2).unwrap(), AxialCoord::new(3, 1));
        assert_eq!(g.position(9).unwrap(), AxialCoord::new(2, 3));
    }

    #[test]
    fn bitmap_scan_samples_off_center() {
        let mut img: BinaryImage = BinaryImage::square(300);
        // Sample pixel of the lattice point i = 1, j = 1, which is hexagon (1, 2)
        img.to_white(50, 50).unwrap();
        let g: HexGraph = HexGraph::from_bitmap(&img, 50).unwrap();
        assert_eq!(g.num_vertexes(), 5);
        assert_eq!(g.vertex(AxialCoord::new(1, 2)), None);
        // Whitening the real center of a hexagon changes nothing
        let mut img: BinaryImage = BinaryImage::square(300);
        let center: OffsetCoord = AxialCoord::new(1, 1).to_offset(50).unwrap();
        img.to_white(center.x as usize, center.y as usize).unwrap();
        assert_eq!(HexGraph::from_bitmap(&img, 50).unwrap().num_vertexes(), 6);
    }

    #[test]
    fn bitmap_scan_of_a_tall_image() {
        let img: BinaryImage = BinaryImage::new(300, 600);
        let g: HexGraph = HexGraph::from_bitmap(&img, 50).unwrap();
        let positions: Vec<AxialCoord> = g.iter().map(|(_, p)| p).collect();
        let mut expected: Vec<AxialCoord> = sample_positions();
        expected.extend([
            AxialCoord::new(-1, 4),
            AxialCoord::new(0, 4),
            AxialCoord::new(-1, 5),
            AxialCoord::new(0, 5),
            AxialCoord::new(-2, 6),
            AxialCoord::new(-1, 6),
        ]);
        assert_eq!(positions, expected);
        // Row 7 fits in the image but its sample pixels are beyond the 300 pixel width
        assert_eq!(g.vertex(AxialCoord::new(-2, 7)), None);
        assert_eq!(g.vertex(AxialCoord::new(-1, 7)), None);
    }

    #[test]
    fn bitmap_scan_needs_a_positive_size() {
        let img: BinaryImage = BinaryImage::square(10);
        assert!(HexGraph::from_bitmap(&img, 0).is_err());
    }
}
