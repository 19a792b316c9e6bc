// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Horizontal beam layer
//!
//! Joins the corners of each level into perimeter beams. Beams are pushed
//! outward by half the column section so they sit against the column faces
//! instead of running through the column centrelines.

use crate::beam::{build_tube_beam, BeamPrimitive, BeamRole};
use crate::error::Result;
use crate::levels::{CornerKey, Face, LevelCornerSequence, LevelCorners};
use crate::params::ColumnLayout;
use crate::profiles::{ColumnType, TubeSection};
use crate::transform::euler_xyz;
use nalgebra::{Point3, UnitQuaternion};
use std::f64::consts::FRAC_PI_2;

/// Length along world X, width vertical
fn along_x() -> UnitQuaternion<f64> {
    euler_xyz(FRAC_PI_2, FRAC_PI_2, 0.0)
}

/// Length along world Z, width vertical
fn along_z() -> UnitQuaternion<f64> {
    euler_xyz(0.0, 0.0, FRAC_PI_2)
}

/// Beam between two corners, placed at `position`
fn span(
    from: Point3<f64>,
    to: Point3<f64>,
    position: Point3<f64>,
    rotation: UnitQuaternion<f64>,
    section: &TubeSection,
    role: BeamRole,
) -> Result<BeamPrimitive> {
    let length = (to - from).norm();
    Ok(build_tube_beam(length, section)?
        .placed(position, rotation)
        .with_role(role))
}

fn quad_level(
    n: usize,
    level: &LevelCorners,
    section: &TubeSection,
    column: &ColumnType,
    out: &mut Vec<BeamPrimitive>,
) -> Result<()> {
    let col = column.cross_section();
    let rf = level.get(CornerKey::RightFront);
    let rb = level.get(CornerKey::RightBack);
    let lf = level.get(CornerKey::LeftFront);
    let lb = level.get(CornerKey::LeftBack);

    let y = level.y;
    let mid_x = (lf.x + rf.x) / 2.0;
    let mid_z = (rf.z + rb.z) / 2.0;
    let role = |face| BeamRole::Horizontal { level: n, face };

    out.push(span(
        lf,
        rf,
        Point3::new(mid_x, y, rf.z + col.depth / 2.0),
        along_x(),
        section,
        role(Face::Front),
    )?);
    out.push(span(
        lb,
        rb,
        Point3::new(mid_x, y, rb.z - col.depth / 2.0),
        along_x(),
        section,
        role(Face::Back),
    )?);
    out.push(span(
        lb,
        lf,
        Point3::new(lf.x - col.width / 2.0, y, mid_z),
        along_z(),
        section,
        role(Face::Left),
    )?);
    out.push(span(
        rb,
        rf,
        Point3::new(rf.x + col.width / 2.0, y, mid_z),
        along_z(),
        section,
        role(Face::Right),
    )?);
    Ok(())
}

fn pair_level(
    n: usize,
    level: &LevelCorners,
    section: &TubeSection,
    column: &ColumnType,
    out: &mut Vec<BeamPrimitive>,
) -> Result<()> {
    let front = level.get(CornerKey::RightFront);
    let back = level.get(CornerKey::RightBack);
    let mid_z = (front.z + back.z) / 2.0;
    let role = BeamRole::Horizontal {
        level: n,
        face: Face::Center,
    };

    if column.is_channel() {
        // Beams flank the channel's open sides, offset across X
        let half = column.cross_section().depth / 2.0;
        for x in [front.x - half, front.x + half] {
            out.push(span(
                front,
                back,
                Point3::new(x, level.y, mid_z),
                along_z(),
                section,
                role,
            )?);
        }
    } else {
        out.push(span(
            front,
            back,
            Point3::new(front.x, level.y, mid_z),
            along_z(),
            section,
            role,
        )?);
    }
    Ok(())
}

/// Build the perimeter beams of every level.
///
/// Four columns give front, back, left and right beams per level; two
/// columns give a single front-to-back beam (two for channel columns); a
/// single column gives nothing.
pub fn build_horizontal_beams(
    levels: &LevelCornerSequence,
    layout: ColumnLayout,
    section: &TubeSection,
    column: ColumnType,
) -> Result<Vec<BeamPrimitive>> {
    let per_level = match layout {
        ColumnLayout::Single => return Ok(Vec::new()),
        ColumnLayout::Pair if column.is_channel() => 2,
        ColumnLayout::Pair => 1,
        ColumnLayout::Quad => 4,
    };

    let mut beams = Vec::with_capacity(levels.len() * per_level);
    for (n, level) in levels.iter().enumerate() {
        match layout {
            ColumnLayout::Quad => quad_level(n, level, section, &column, &mut beams)?,
            ColumnLayout::Pair => pair_level(n, level, section, &column, &mut beams)?,
            ColumnLayout::Single => {}
        }
    }
    Ok(beams)
}
