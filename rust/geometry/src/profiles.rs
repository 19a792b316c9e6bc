// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile catalog - steel cross-sections available to the designer
//!
//! Sizes are stored in metres. Catalogue labels use the millimetre notation
//! printed on stock lists (`"50×25×3.2mm"`); an ASCII `x` is accepted in
//! place of `×`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Outer dimensions of a cross-section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// Wider dimension
    pub width: f64,
    /// Narrower dimension
    pub depth: f64,
    /// Wall thickness, for hollow sections only
    pub thickness: Option<f64>,
}

impl CrossSection {
    const fn solid(width: f64, depth: f64) -> Self {
        Self {
            width,
            depth,
            thickness: None,
        }
    }

    const fn hollow(width: f64, depth: f64, thickness: f64) -> Self {
        Self {
            width,
            depth,
            thickness: Some(thickness),
        }
    }

    /// View this section as a hollow tube. Solid sections get zero wall
    /// thickness, which the beam builder renders as a bar.
    pub fn tube(&self) -> TubeSection {
        TubeSection {
            width: self.width,
            height: self.depth,
            thickness: self.thickness.unwrap_or(0.0),
        }
    }
}

/// Cross-section of a rectangular tube member
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeSection {
    /// Wider side, kept vertical on horizontal beams
    pub width: f64,
    /// Narrower side
    pub height: f64,
    /// Wall thickness
    pub thickness: f64,
}

impl TubeSection {
    pub const fn new(width: f64, height: f64, thickness: f64) -> Self {
        Self {
            width,
            height,
            thickness,
        }
    }
}

/// Family of a cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    RectTube,
    HBeam,
    CChannel,
    LAngle,
}

impl ProfileKind {
    /// Catalogue entries for this family, in display order
    fn table(self) -> &'static [(&'static str, CrossSection)] {
        match self {
            Self::RectTube => RECT_TUBE_SIZES,
            Self::HBeam => H_BEAM_SIZES,
            Self::CChannel => C_CHANNEL_SIZES,
            Self::LAngle => L_ANGLE_SIZES,
        }
    }

    /// Profile returned when a label is not in the catalogue
    pub fn default_section(self) -> CrossSection {
        self.table()[0].1
    }

    /// Size labels offered for this family
    pub fn size_labels(self) -> impl Iterator<Item = &'static str> {
        self.table().iter().map(|(label, _)| *label)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RectTube => "rectTube",
            Self::HBeam => "hbeam",
            Self::CChannel => "cChannel",
            Self::LAngle => "lAngle",
        }
    }
}

/// Leading rect-tube entries offered as grid member sizes
const GRID_SIZE_COUNT: usize = 6;

/// Rectangular tube labels the grid tool offers, smallest first
pub fn grid_size_labels() -> impl Iterator<Item = &'static str> {
    RECT_TUBE_SIZES[..GRID_SIZE_COUNT]
        .iter()
        .map(|(label, _)| *label)
}

const RECT_TUBE_SIZES: &[(&str, CrossSection)] = &[
    ("50×25×3.2mm", CrossSection::hollow(0.05, 0.025, 0.0032)),
    ("75×50×3.2mm", CrossSection::hollow(0.075, 0.05, 0.0032)),
    ("100×50×4mm", CrossSection::hollow(0.1, 0.05, 0.004)),
    ("120×60×4mm", CrossSection::hollow(0.12, 0.06, 0.004)),
    ("150×75×5mm", CrossSection::hollow(0.15, 0.075, 0.005)),
    ("200×100×6mm", CrossSection::hollow(0.2, 0.1, 0.006)),
    // 1/8" and 1/4" wall stock used for the horizontal frame beams
    ("50×30×3.175mm", CrossSection::hollow(0.05, 0.03, 0.003175)),
    ("80×40×3.175mm", CrossSection::hollow(0.08, 0.04, 0.003175)),
    ("100×50×6.35mm", CrossSection::hollow(0.1, 0.05, 0.00635)),
];

const H_BEAM_SIZES: &[(&str, CrossSection)] = &[
    ("100×100", CrossSection::solid(0.1, 0.1)),
    ("200×200", CrossSection::solid(0.2, 0.2)),
    ("300×300", CrossSection::solid(0.3, 0.3)),
];

const C_CHANNEL_SIZES: &[(&str, CrossSection)] = &[
    ("80×40", CrossSection::solid(0.08, 0.04)),
    ("100×50", CrossSection::solid(0.1, 0.05)),
    ("150×75", CrossSection::solid(0.15, 0.075)),
];

const L_ANGLE_SIZES: &[(&str, CrossSection)] = &[
    ("50×50", CrossSection::solid(0.05, 0.05)),
    ("75×75", CrossSection::solid(0.075, 0.075)),
    ("100×100", CrossSection::solid(0.1, 0.1)),
];

/// Look up a catalogue size.
///
/// Unknown labels fall back to the family's default section instead of
/// failing.
pub fn lookup(kind: ProfileKind, size_label: &str) -> CrossSection {
    let label = size_label.trim().replace(['x', 'X'], "×");
    match kind.table().iter().find(|(l, _)| *l == label) {
        Some((_, section)) => *section,
        None => {
            let fallback = kind.default_section();
            warn!(
                kind = kind.name(),
                label = size_label,
                "unknown profile size, using default {}×{}",
                fallback.width,
                fallback.depth
            );
            fallback
        }
    }
}

/// Column cross-section selectable in the designer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    HBeam100,
    HBeam200,
    HBeam300,
    RectTube100x50,
    RectTube150x75,
    CChannel80,
    CChannel100,
    CChannel150,
    LAngle50x50,
    LAngle75x75,
    LAngle100x100,
}

impl ColumnType {
    pub const ALL: [ColumnType; 11] = [
        Self::HBeam100,
        Self::HBeam200,
        Self::HBeam300,
        Self::RectTube100x50,
        Self::RectTube150x75,
        Self::CChannel80,
        Self::CChannel100,
        Self::CChannel150,
        Self::LAngle50x50,
        Self::LAngle75x75,
        Self::LAngle100x100,
    ];

    /// Identifier used by the parameter source
    pub fn name(self) -> &'static str {
        match self {
            Self::HBeam100 => "hbeam100",
            Self::HBeam200 => "hbeam200",
            Self::HBeam300 => "hbeam300",
            Self::RectTube100x50 => "rectTube100x50",
            Self::RectTube150x75 => "rectTube150x75",
            Self::CChannel80 => "cChannel80",
            Self::CChannel100 => "cChannel100",
            Self::CChannel150 => "cChannel150",
            Self::LAngle50x50 => "lAngle50x50",
            Self::LAngle75x75 => "lAngle75x75",
            Self::LAngle100x100 => "lAngle100x100",
        }
    }

    fn catalogue_entry(self) -> (ProfileKind, &'static str) {
        match self {
            Self::HBeam100 => (ProfileKind::HBeam, "100×100"),
            Self::HBeam200 => (ProfileKind::HBeam, "200×200"),
            Self::HBeam300 => (ProfileKind::HBeam, "300×300"),
            Self::RectTube100x50 => (ProfileKind::RectTube, "100×50×4mm"),
            Self::RectTube150x75 => (ProfileKind::RectTube, "150×75×5mm"),
            Self::CChannel80 => (ProfileKind::CChannel, "80×40"),
            Self::CChannel100 => (ProfileKind::CChannel, "100×50"),
            Self::CChannel150 => (ProfileKind::CChannel, "150×75"),
            Self::LAngle50x50 => (ProfileKind::LAngle, "50×50"),
            Self::LAngle75x75 => (ProfileKind::LAngle, "75×75"),
            Self::LAngle100x100 => (ProfileKind::LAngle, "100×100"),
        }
    }

    pub fn kind(self) -> ProfileKind {
        self.catalogue_entry().0
    }

    /// Footprint of the column: `width` along X, `depth` along Z
    pub fn cross_section(self) -> CrossSection {
        let (kind, label) = self.catalogue_entry();
        lookup(kind, label)
    }

    /// Open-sided channel columns take a pair of beams in 2-column frames
    pub fn is_channel(self) -> bool {
        self.kind() == ProfileKind::CChannel
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownProfile(format!("column type '{}'", s)))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tube used for the horizontal and diagonal frame members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeamType {
    RectTube50x30,
    RectTube80x40,
    RectTube100x50,
}

impl BeamType {
    pub const ALL: [BeamType; 3] = [
        Self::RectTube50x30,
        Self::RectTube80x40,
        Self::RectTube100x50,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::RectTube50x30 => "rectTube50x30",
            Self::RectTube80x40 => "rectTube80x40",
            Self::RectTube100x50 => "rectTube100x50",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::RectTube50x30 => "50×30×3.175mm",
            Self::RectTube80x40 => "80×40×3.175mm",
            Self::RectTube100x50 => "100×50×6.35mm",
        }
    }

    pub fn section(self) -> TubeSection {
        lookup(ProfileKind::RectTube, self.label()).tube()
    }
}

impl FromStr for BeamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| Error::UnknownProfile(format!("beam type '{}'", s)))
    }
}

impl fmt::Display for BeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
