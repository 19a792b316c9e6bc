// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cabin Frame Geometry
//!
//! Parametric structural frame for elevator cabins: level corners,
//! perimeter beams, zig-zag braces and per-side grids, emitted as hollow
//! tube primitives tessellated with earcutr and placed with nalgebra.

pub mod beam;
pub mod diagonal;
pub mod error;
pub mod extrusion;
pub mod frame;
pub mod grid;
pub mod horizontal;
pub mod levels;
pub mod mesh;
pub mod params;
pub mod profile;
pub mod profiles;
pub mod scene;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

pub use beam::{build_diagonal_beam, build_tube_beam, BeamPrimitive, BeamRole, INNER_LENGTH_EPSILON};
pub use diagonal::{build_diagonal_supports, diagonal_pairing, DiagonalLayer, DiagonalMeasurement};
pub use error::{Error, Result};
pub use frame::{generate_frame, FrameGeometry, FrameSession};
pub use grid::{
    build_grid_beams, CabinBox, GridConfigurations, GridPattern, GridSide, GridSpec, MAX_DIVISIONS,
};
pub use horizontal::build_horizontal_beams;
pub use levels::{compute_levels, CornerKey, Face, LevelCornerSequence, LevelCorners};
pub use mesh::Mesh;
pub use params::{ColumnLayout, FrameInput, FrameParameters, MAX_SECTIONS, MM_TO_M};
pub use profiles::{
    grid_size_labels, lookup, BeamType, ColumnType, CrossSection, ProfileKind, TubeSection,
};
pub use scene::{BeamKey, MemoryScene, Scene};
