/*
errors.rs

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

//! Error types shared by the geometry, graph, and solver modules.
//!
//! Geometry and graph errors ([`RikudoError::InvalidArgument`], [`RikudoError::NotFound`]) are
//! programming contract violations.
//! Protocol, subprocess, and I/O errors happen at the boundary with the external solver; the
//! caller reports them and lets the user try again with another input.
//! A solver run that finds no path is not an error, see [`crate::solver::SolveOutcome`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RikudoError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Vertex {vertex} is not in the graph")]
    NotFound { vertex: usize },

    #[error("Cannot parse {file:?}: {reason}")]
    ProtocolParse { file: PathBuf, reason: String },

    #[error("Solver failed: {reason}")]
    Subprocess { reason: String },

    #[error("Solver did not finish after {elapsed:?}")]
    Timeout { elapsed: Duration },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RikudoError>;

impl RikudoError {
    /// Build an [`RikudoError::InvalidArgument`] error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        RikudoError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Build an [`RikudoError::Io`] error with a short description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        RikudoError::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the user can retry with a different input.
    ///
    /// Errors coming from the solver interop (file protocol, subprocess, file system) are
    /// recoverable. Geometry and graph errors are bugs in the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RikudoError::ProtocolParse { .. }
                | RikudoError::Subprocess { .. }
                | RikudoError::Timeout { .. }
                | RikudoError::Io { .. }
        )
    }
}
