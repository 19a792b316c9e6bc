// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level corner calculator
//!
//! Every horizontal level of the frame has four named corners where the
//! columns pass through it. The horizontal and diagonal layers only ever read
//! these points, so all column offset arithmetic lives here.

use crate::error::Result;
use crate::params::{ColumnLayout, FrameParameters};
use nalgebra::Point3;
use tracing::debug;

/// Named corner of a level, viewed from the front of the cabin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerKey {
    RightFront,
    RightBack,
    LeftFront,
    LeftBack,
}

impl CornerKey {
    pub const ALL: [CornerKey; 4] = [
        CornerKey::RightFront,
        CornerKey::RightBack,
        CornerKey::LeftFront,
        CornerKey::LeftBack,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Side of the frame a beam runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    /// Front-to-back centreline of a two-column frame
    Center,
}

impl Face {
    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// The four corners of one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCorners {
    /// 1-based level number, counted from the floor
    pub index: u32,
    /// Height of the level above the floor
    pub y: f64,
    corners: [Point3<f64>; 4],
}

impl LevelCorners {
    pub fn new(index: u32, y: f64, corners: [Point3<f64>; 4]) -> Self {
        Self { index, y, corners }
    }

    #[inline]
    pub fn get(&self, key: CornerKey) -> Point3<f64> {
        self.corners[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CornerKey, Point3<f64>)> + '_ {
        CornerKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

/// Levels ordered bottom to top
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelCornerSequence {
    levels: Vec<LevelCorners>,
}

impl LevelCornerSequence {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelCorners> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LevelCorners> {
        self.levels.iter()
    }

    /// Adjacent level pairs as `(i, lower, upper)` with `i` the position of
    /// the upper level, starting at 1
    pub fn gaps(&self) -> impl Iterator<Item = (usize, &LevelCorners, &LevelCorners)> + '_ {
        self.levels
            .windows(2)
            .enumerate()
            .map(|(n, pair)| (n + 1, &pair[0], &pair[1]))
    }

    pub fn as_slice(&self) -> &[LevelCorners] {
        &self.levels
    }
}

impl<'a> IntoIterator for &'a LevelCornerSequence {
    type Item = &'a LevelCorners;
    type IntoIter = std::slice::Iter<'a, LevelCorners>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

/// Corner X/Z coordinates shared by every level
struct Footprint {
    right_x: f64,
    left_x: f64,
    front_z: f64,
    back_z: f64,
}

impl Footprint {
    fn for_layout(params: &FrameParameters) -> Option<Self> {
        let offset = params.column_offset;
        let col_x = params.column_x_position;
        let col_z = params.column_z_position;

        match params.layout {
            ColumnLayout::Single => None,
            ColumnLayout::Pair => Some(Self {
                // Both columns sit on x = colX; left and right coincide
                right_x: col_x,
                left_x: col_x,
                front_z: params.depth / 2.0 + offset - col_z,
                back_z: -params.depth / 2.0 - offset + col_z,
            }),
            ColumnLayout::Quad => {
                let x_off = params.width / 2.0 + offset;
                let z_off = params.depth / 2.0 + offset;
                Some(Self {
                    right_x: x_off - col_x,
                    left_x: -x_off + col_x,
                    front_z: z_off - col_z,
                    back_z: -z_off + col_z,
                })
            }
        }
    }

    fn at(&self, index: u32, y: f64) -> LevelCorners {
        // Order follows CornerKey discriminants
        LevelCorners::new(
            index,
            y,
            [
                Point3::new(self.right_x, y, self.front_z),
                Point3::new(self.right_x, y, self.back_z),
                Point3::new(self.left_x, y, self.front_z),
                Point3::new(self.left_x, y, self.back_z),
            ],
        )
    }
}

/// Compute the corner points of every level, bottom to top.
///
/// Levels divide the height into `sections + 1` equal spans. A single
/// column or zero sections yields an empty sequence.
pub fn compute_levels(params: &FrameParameters) -> Result<LevelCornerSequence> {
    params.validate()?;

    let footprint = match Footprint::for_layout(params) {
        Some(f) if params.sections > 0 => f,
        _ => return Ok(LevelCornerSequence::default()),
    };

    let section_height = params.height / (params.sections as f64 + 1.0);
    let levels: Vec<LevelCorners> = (1..=params.sections)
        .map(|i| {
            let level = footprint.at(i, i as f64 * section_height);
            debug!(level = i, y = level.y, "computed level corners");
            level
        })
        .collect();

    Ok(LevelCornerSequence { levels })
}
