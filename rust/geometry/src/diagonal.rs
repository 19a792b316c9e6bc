// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagonal support layer
//!
//! Braces run from a corner of one level to a different corner of the level
//! above. The corner pair flips with the parity of the gap so consecutive
//! braces on the same face form a zig-zag.

use crate::beam::{build_diagonal_beam, BeamPrimitive, BeamRole};
use crate::error::Result;
use crate::levels::{CornerKey, Face, LevelCornerSequence};
use crate::params::ColumnLayout;
use crate::profiles::TubeSection;
use nalgebra::Point3;
use tracing::debug;

const QUAD_FACES: [Face; 4] = [Face::Right, Face::Left, Face::Front, Face::Back];
const PAIR_FACES: [Face; 1] = [Face::Center];

/// Lower and upper corner of the brace on `face` across gap `gap`.
///
/// `gap` is the position of the upper level in the sequence, so the first
/// gap is 1 (odd).
pub fn diagonal_pairing(face: Face, gap: usize) -> (CornerKey, CornerKey) {
    use CornerKey::*;

    let even = gap % 2 == 0;
    let (a, b) = match face {
        Face::Right | Face::Center => (RightFront, RightBack),
        Face::Left => (LeftBack, LeftFront),
        Face::Front => (RightFront, LeftFront),
        Face::Back => (LeftBack, RightBack),
    };
    if even {
        (a, b)
    } else {
        (b, a)
    }
}

/// Cut length of one brace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalMeasurement {
    pub gap: usize,
    pub face: Face,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    /// Metres
    pub length: f64,
}

impl DiagonalMeasurement {
    /// Length rounded to whole millimetres
    pub fn length_mm(&self) -> u32 {
        (self.length * 1000.0).round() as u32
    }
}

/// Braces for a whole frame plus their measured lengths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagonalLayer {
    pub beams: Vec<BeamPrimitive>,
    pub measurements: Vec<DiagonalMeasurement>,
}

impl DiagonalLayer {
    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    /// Longest brace in millimetres, `None` without braces
    pub fn max_length_mm(&self) -> Option<u32> {
        self.measurements.iter().map(|m| m.length_mm()).max()
    }
}

/// Build the zig-zag braces between every pair of adjacent levels.
///
/// Four columns brace the right, left, front and back faces; two columns
/// brace the centreline. Fewer than two levels or a single column yield an
/// empty layer.
pub fn build_diagonal_supports(
    levels: &LevelCornerSequence,
    layout: ColumnLayout,
    section: &TubeSection,
) -> Result<DiagonalLayer> {
    let faces: &[Face] = match layout {
        ColumnLayout::Single => return Ok(DiagonalLayer::default()),
        ColumnLayout::Pair => &PAIR_FACES,
        ColumnLayout::Quad => &QUAD_FACES,
    };

    let gaps = levels.len().saturating_sub(1);
    let mut layer = DiagonalLayer {
        beams: Vec::with_capacity(gaps * faces.len()),
        measurements: Vec::with_capacity(gaps * faces.len()),
    };

    for (gap, lower, upper) in levels.gaps() {
        for &face in faces {
            let (from, to) = diagonal_pairing(face, gap);
            let start = lower.get(from);
            let end = upper.get(to);

            let beam = build_diagonal_beam(&start, &end, section)?
                .with_role(BeamRole::Diagonal { gap, face });
            debug!(gap, ?face, length = beam.length, "placed diagonal");

            layer.measurements.push(DiagonalMeasurement {
                gap,
                face,
                start,
                end,
                length: beam.length,
            });
            layer.beams.push(beam);
        }
    }

    Ok(layer)
}
