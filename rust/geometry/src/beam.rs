// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Beam primitives - hollow rectangular tubes
//!
//! A beam is an outer box minus an inner cavity. The cavity is not cut out
//! of the solid; it is emitted as a second, inside-out box so the renderer
//! shows the tube wall from within. The cavity is slightly longer than the
//! outer box so its end faces never coincide with the outer end caps.

use crate::error::{Error, Result};
use crate::extrusion::extrude_centered;
use crate::grid::GridSide;
use crate::levels::Face;
use crate::mesh::Mesh;
use crate::profile::create_rectangle;
use crate::profiles::TubeSection;
use crate::transform::rotation_onto;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;
use tracing::warn;

/// Extra length of the inner cavity, in metres
pub const INNER_LENGTH_EPSILON: f64 = 0.01;

/// Shortest beam the builders accept, in metres
pub const MIN_BEAM_LENGTH: f64 = 1e-9;

/// Fraction of the half-side a clamped wall may occupy
const WALL_CLAMP_RATIO: f64 = 0.99;

/// Which part of the frame a beam belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeamRole {
    /// Built directly, not by a frame layer
    Standalone,
    /// Perimeter beam at a level (0-based index into the level sequence)
    Horizontal { level: usize, face: Face },
    /// Brace across the gap below level `gap` (1-based upper level index)
    Diagonal { gap: usize, face: Face },
    /// Member of a structural grid on a cabin side
    Grid { side: GridSide, index: usize },
}

/// A placed hollow-tube beam
///
/// Local frame: length along +Z, `section.width` along X, `section.height`
/// along Y. `position` is the beam's midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamPrimitive {
    pub role: BeamRole,
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub length: f64,
    /// Outer section with the wall thickness actually used
    pub section: TubeSection,
}

impl BeamPrimitive {
    /// Move the beam into place
    pub fn placed(mut self, position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        self.position = position;
        self.rotation = rotation;
        self
    }

    pub fn with_role(mut self, role: BeamRole) -> Self {
        self.role = role;
        self
    }

    /// Local-to-world rigid transform
    pub fn placement(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation)
    }

    /// Unit direction of the length axis
    pub fn axis(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    /// Direction of the wider cross-section side
    pub fn width_direction(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    /// Direction of the narrower cross-section side
    pub fn height_direction(&self) -> Vector3<f64> {
        self.rotation * Vector3::y()
    }

    /// End points of the centreline
    pub fn endpoints(&self) -> (Point3<f64>, Point3<f64>) {
        let half = self.axis() * (self.length / 2.0);
        (self.position - half, self.position + half)
    }

    pub fn is_hollow(&self) -> bool {
        self.section.thickness > 0.0
    }

    /// Cavity box `(width, height, length)`, if the tube is hollow
    pub fn cavity(&self) -> Option<(f64, f64, f64)> {
        if !self.is_hollow() {
            return None;
        }
        let t2 = 2.0 * self.section.thickness;
        Some((
            self.section.width - t2,
            self.section.height - t2,
            self.length + INNER_LENGTH_EPSILON,
        ))
    }

    /// Tessellate into world space: outer shell plus inverted cavity shell
    pub fn to_mesh(&self) -> Result<Mesh> {
        let placement = self.placement();
        let outer = create_rectangle(self.section.width, self.section.height);
        let mut mesh = extrude_centered(&outer, self.length, Some(&placement))?;

        if let Some((w, h, l)) = self.cavity() {
            let mut inner = extrude_centered(&create_rectangle(w, h), l, Some(&placement))?;
            inner.invert();
            mesh.merge(&inner);
        }

        Ok(mesh)
    }
}

/// Keep the wall inside `(0, min(width, height) / 2)`.
///
/// Non-positive walls mean a solid bar; walls that would swallow the cavity
/// are clamped just below half the narrower side.
fn effective_thickness(section: &TubeSection) -> f64 {
    let t = section.thickness;
    if t.is_nan() || t <= 0.0 {
        return 0.0;
    }

    let half_side = 0.5 * section.width.min(section.height);
    if t >= half_side {
        let clamped = half_side * WALL_CLAMP_RATIO;
        warn!(
            thickness = t,
            clamped, "wall thickness leaves no cavity, clamping"
        );
        clamped
    } else {
        t
    }
}

fn check_section(section: &TubeSection) -> Result<()> {
    if !section.width.is_finite()
        || !section.height.is_finite()
        || section.width <= 0.0
        || section.height <= 0.0
    {
        return Err(Error::invalid(format!(
            "beam section must be positive, got {}×{}",
            section.width, section.height
        )));
    }
    Ok(())
}

/// Build an axis-aligned tube centred on the origin, length along +Z
pub fn build_tube_beam(length: f64, section: &TubeSection) -> Result<BeamPrimitive> {
    if !length.is_finite() || length < MIN_BEAM_LENGTH {
        return Err(Error::degenerate(format!(
            "beam length must be positive, got {}",
            length
        )));
    }
    check_section(section)?;

    Ok(BeamPrimitive {
        role: BeamRole::Standalone,
        position: Point3::origin(),
        rotation: UnitQuaternion::identity(),
        length,
        section: TubeSection {
            thickness: effective_thickness(section),
            ..*section
        },
    })
}

/// Build a tube spanning exactly from `start` to `end`.
///
/// The length axis is swung onto the span direction along the shortest arc,
/// then the tube is turned a quarter turn about its own axis. For spans in a
/// plane of constant X (the left and right faces) the wide side ends up in
/// that plane. Spans in a plane of constant Z (front and back faces) leave
/// the wide side tilted out of the face by the swing.
pub fn build_diagonal_beam(
    start: &Point3<f64>,
    end: &Point3<f64>,
    section: &TubeSection,
) -> Result<BeamPrimitive> {
    let direction = end - start;
    let length = direction.norm();
    if !length.is_finite() || length < MIN_BEAM_LENGTH {
        return Err(Error::degenerate(format!(
            "diagonal from {:?} to {:?} has no length",
            start.coords.as_slice(),
            end.coords.as_slice()
        )));
    }

    let align = rotation_onto(&Vector3::z(), &direction)
        .ok_or_else(|| Error::degenerate("diagonal direction is undefined"))?;
    let twist = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);

    let beam = build_tube_beam(length, section)?;
    Ok(beam.placed(nalgebra::center(start, end), align * twist))
}
