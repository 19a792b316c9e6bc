// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for frame geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating cabin frame geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid column count {0}: expected 1, 2 or 4")]
    InvalidColumnCount(u32),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Degenerate beam: {0}")]
    DegenerateBeam(String),

    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Unknown grid side: {0}")]
    UnknownGridSide(String),

    #[error("Unknown grid pattern: {0}")]
    UnknownGridPattern(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Shorthand for [`Error::DegenerateBeam`]
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateBeam(msg.into())
    }
}
