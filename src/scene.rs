/*
scene.rs

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

//! Renderer-agnostic description of what to draw.
//!
//! A [`Scene`] holds three ordered lists: filled polygons, line segments, and text labels.
//! Renderers draw them in that order. Any thread can append to a [`Scene`] while another one
//! reads it: each list is protected by its own lock, and readers see a consistent prefix of the
//! appended elements.
//!
//! [`Scene::snapshot`] copies the lists into a [`SceneSnapshot`] that can be saved in JSON
//! format for an external renderer.

use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RikudoError};
use crate::grid::coordinates::{AxialCoord, OffsetCoord};
use crate::grid::hexagon::hexagon_vertices;

/// RGB color.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColoredPolygon {
    /// Corners, in drawing order.
    pub vertices: Vec<(i32, i32)>,
    pub fill_color: Color,
    pub stroke_color: Color,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColoredSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub stroke_width: u32,
    pub color: Color,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Copy of the content of a [`Scene`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub width: u32,
    pub height: u32,
    pub polygons: Vec<ColoredPolygon>,
    pub segments: Vec<ColoredSegment>,
    pub labels: Vec<TextLabel>,
}

/// Lock a list. A writer that panicked cannot leave a list half updated, so the poisoned
/// state is ignored.
fn lock<T>(list: &Mutex<T>) -> MutexGuard<'_, T> {
    list.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scene to draw.
///
/// When several lists are locked together, the locks are taken in the polygons, segments,
/// labels order.
#[derive(Debug, Default)]
pub struct Scene {
    /// Size of the drawing area, in pixels.
    width: u32,
    height: u32,

    polygons: Mutex<Vec<ColoredPolygon>>,
    segments: Mutex<Vec<ColoredSegment>>,
    labels: Mutex<Vec<TextLabel>>,
}

impl Clone for Scene {
    fn clone(&self) -> Self {
        let s: SceneSnapshot = self.snapshot();
        Self {
            width: s.width,
            height: s.height,
            polygons: Mutex::new(s.polygons),
            segments: Mutex::new(s.segments),
            labels: Mutex::new(s.labels),
        }
    }
}

impl Scene {
    /// Create an empty [`Scene`] object.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn add_polygon(&self, vertices: Vec<(i32, i32)>, fill_color: Color, stroke_color: Color) {
        lock(&self.polygons).push(ColoredPolygon {
            vertices,
            fill_color,
            stroke_color,
        });
    }

    /// Add a regular hexagon centered at the given point.
    ///
    /// # Errors
    ///
    /// `size` must be positive.
    pub fn add_hexagon(
        &self,
        center: OffsetCoord,
        size: i32,
        fill_color: Color,
        stroke_color: Color,
    ) -> Result<()> {
        let vertices = hexagon_vertices(center, size)?;
        self.add_polygon(vertices.to_vec(), fill_color, stroke_color);
        Ok(())
    }

    /// Add the hexagon of the given grid cell.
    pub fn add_cell(
        &self,
        position: AxialCoord,
        size: i32,
        fill_color: Color,
        stroke_color: Color,
    ) -> Result<()> {
        self.add_hexagon(position.to_offset(size)?, size, fill_color, stroke_color)
    }

    pub fn add_segment(
        &self,
        from: OffsetCoord,
        to: OffsetCoord,
        stroke_width: u32,
        color: Color,
    ) {
        lock(&self.segments).push(ColoredSegment {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke_width,
            color,
        });
    }

    pub fn add_text(&self, text: impl Into<String>, x: i32, y: i32) {
        lock(&self.labels).push(TextLabel {
            text: text.into(),
            x,
            y,
        });
    }

    /// Remove the polygons and the segments. The text labels are kept.
    ///
    /// Both lists are emptied together: [`Scene::snapshot`] never sees one cleared without the
    /// other.
    pub fn clear(&self) {
        let mut polygons: MutexGuard<'_, Vec<ColoredPolygon>> = lock(&self.polygons);
        let mut segments: MutexGuard<'_, Vec<ColoredSegment>> = lock(&self.segments);
        polygons.clear();
        segments.clear();
    }

    /// Remove the text labels.
    pub fn clear_labels(&self) {
        *lock(&self.labels) = Vec::new();
    }

    /// Run `f` on the polygons. Appends from other threads wait until `f` returns.
    pub fn with_polygons<R>(&self, f: impl FnOnce(&[ColoredPolygon]) -> R) -> R {
        f(lock(&self.polygons).as_slice())
    }

    /// Run `f` on the segments. Appends from other threads wait until `f` returns.
    pub fn with_segments<R>(&self, f: impl FnOnce(&[ColoredSegment]) -> R) -> R {
        f(lock(&self.segments).as_slice())
    }

    /// Run `f` on the text labels. Appends from other threads wait until `f` returns.
    pub fn with_labels<R>(&self, f: impl FnOnce(&[TextLabel]) -> R) -> R {
        f(lock(&self.labels).as_slice())
    }

    pub fn polygons(&self) -> Vec<ColoredPolygon> {
        lock(&self.polygons).clone()
    }

    pub fn segments(&self) -> Vec<ColoredSegment> {
        lock(&self.segments).clone()
    }

    pub fn labels(&self) -> Vec<TextLabel> {
        lock(&self.labels).clone()
    }

    /// Copy the content of the scene. The three lists are read at the same instant.
    pub fn snapshot(&self) -> SceneSnapshot {
        let polygons: MutexGuard<'_, Vec<ColoredPolygon>> = lock(&self.polygons);
        let segments: MutexGuard<'_, Vec<ColoredSegment>> = lock(&self.segments);
        let labels: MutexGuard<'_, Vec<TextLabel>> = lock(&self.labels);
        SceneSnapshot {
            width: self.width,
            height: self.height,
            polygons: polygons.clone(),
            segments: segments.clone(),
            labels: labels.clone(),
        }
    }

    /// Save a snapshot of the scene in JSON format.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file: File = File::create(path)
            .map_err(|e| RikudoError::io(format!("Cannot create {path:?}"), e))?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &self.snapshot())?;
        writer
            .flush()
            .map_err(|e| RikudoError::io(format!("Cannot write {path:?}"), e))?;
        debug!("Scene saved to {path:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn elements_keep_insertion_order() {
        let scene: Scene = Scene::new(1024, 1024);
        scene.add_polygon(vec![(0, 0), (10, 0), (0, 10)], Color::BLUE, Color::RED);
        scene
            .add_hexagon(OffsetCoord::new(100, 100), 50, Color::WHITE, Color::BLACK)
            .unwrap();
        scene.add_segment(OffsetCoord::new(0, 0), OffsetCoord::new(5, 5), 5, Color::BLACK);
        scene.add_text("v1", 10, 20);
        scene.add_text("v2", 30, 40);

        let polygons: Vec<ColoredPolygon> = scene.polygons();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].vertices.len(), 3);
        assert_eq!(polygons[1].vertices.len(), 6);
        assert_eq!(polygons[1].vertices[0], (100, 150));
        assert_eq!(scene.segments()[0].x2, 5);
        let texts: Vec<String> = scene.labels().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["v1", "v2"]);
    }

    #[test]
    fn hexagon_needs_a_positive_size() {
        let scene: Scene = Scene::new(100, 100);
        assert!(
            scene
                .add_hexagon(OffsetCoord::new(0, 0), 0, Color::BLUE, Color::RED)
                .is_err()
        );
        assert!(scene.polygons().is_empty());
    }

    #[test]
    fn clear_keeps_the_labels() {
        let scene: Scene = Scene::new(100, 100);
        scene
            .add_cell(AxialCoord::new(1, 1), 20, Color::BLUE, Color::RED)
            .unwrap();
        scene.add_segment(OffsetCoord::new(0, 0), OffsetCoord::new(1, 1), 1, Color::RED);
        scene.add_text("1", 0, 0);
        scene.clear();
        assert!(scene.polygons().is_empty());
        assert!(scene.segments().is_empty());
        assert_eq!(scene.labels().len(), 1);
        scene.clear_labels();
        assert!(scene.labels().is_empty());
    }

    #[test]
    fn snapshots_never_see_half_a_clear() {
        let scene: Arc<Scene> = Arc::new(Scene::new(100, 100));
        for i in 0..50 {
            scene.add_polygon(vec![(i, 0), (i, 1), (i + 1, 0)], Color::BLUE, Color::RED);
            scene.add_segment(OffsetCoord::new(i, 0), OffsetCoord::new(i, 1), 1, Color::RED);
        }

        let readers: Vec<thread::JoinHandle<()>> = (0..4)
            .map(|_| {
                let scene: Arc<Scene> = Arc::clone(&scene);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let s: SceneSnapshot = scene.snapshot();
                        let sizes: (usize, usize) = (s.polygons.len(), s.segments.len());
                        assert!(sizes == (50, 50) || sizes == (0, 0), "{sizes:?}");
                        thread::yield_now();
                    }
                })
            })
            .collect();
        scene.clear();

        for r in readers {
            r.join().unwrap();
        }
        assert!(scene.snapshot().polygons.is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let scene: Scene = Scene::new(100, 100);
        scene.add_text("a", 0, 0);
        let copy: Scene = scene.clone();
        scene.add_text("b", 0, 0);
        assert_eq!(copy.labels().len(), 1);
        assert_eq!(scene.labels().len(), 2);
        assert_eq!(copy.width(), 100);
    }

    #[test]
    fn snapshot_in_json() {
        let scene: Scene = Scene::new(300, 200);
        scene.add_text("v3", 7, 8);
        scene.add_segment(OffsetCoord::new(1, 2), OffsetCoord::new(3, 4), 5, Color::BLACK);
        let json: String = serde_json::to_string(&scene.snapshot()).unwrap();
        let back: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene.snapshot());
        assert_eq!(back.width, 300);
        assert_eq!(Color::BLUE.to_string(), "#0000ff");
    }

    #[test]
    fn concurrent_appends_while_reading() {
        let scene: Arc<Scene> = Arc::new(Scene::new(1024, 1024));
        let writers: Vec<thread::JoinHandle<()>> = (0..4)
            .map(|w| {
                let scene: Arc<Scene> = Arc::clone(&scene);
                thread::spawn(move || {
                    for i in 0..250 {
                        scene
                            .add_hexagon(OffsetCoord::new(w * 100, i), 10, Color::BLUE, Color::RED)
                            .unwrap();
                    }
                })
            })
            .collect();

        let reader: thread::JoinHandle<()> = {
            let scene: Arc<Scene> = Arc::clone(&scene);
            thread::spawn(move || {
                let mut previous: Vec<ColoredPolygon> = Vec::new();
                for _ in 0..100 {
                    scene.with_polygons(|polygons| {
                        assert!(polygons.len() >= previous.len());
                        // What was seen before is still there, in the same order
                        assert_eq!(&polygons[..previous.len()], &previous[..]);
                        for p in polygons {
                            assert_eq!(p.vertices.len(), 6);
                        }
                        previous = polygons.to_vec();
                    });
                    thread::yield_now();
                }
            })
        };

        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();
        assert_eq!(scene.polygons().len(), 1000);
    }
}
