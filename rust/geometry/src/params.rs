// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame parameters
//!
//! The designer's form controls deliver millimetres ([`FrameInput`]); the
//! engine works in metres ([`FrameParameters`]).

use crate::error::{Error, Result};
use crate::profiles::{BeamType, ColumnType};
use serde::{Deserialize, Serialize};

/// Millimetre to metre scale applied to every length read from the UI
pub const MM_TO_M: f64 = 0.001;

/// Most horizontal levels a frame may have
pub const MAX_SECTIONS: u32 = 100;

/// Number and arrangement of frame columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnLayout {
    /// Single column: no beams are generated
    Single,
    /// A front/back pair on the centreline
    Pair,
    /// One column per cabin corner
    Quad,
}

impl ColumnLayout {
    pub fn column_count(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Pair => 2,
            Self::Quad => 4,
        }
    }
}

impl TryFrom<u32> for ColumnLayout {
    type Error = Error;

    fn try_from(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Self::Single),
            2 => Ok(Self::Pair),
            4 => Ok(Self::Quad),
            other => Err(Error::InvalidColumnCount(other)),
        }
    }
}

/// Validated geometry parameters for one rebuild pass, in metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParameters {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    /// Number of horizontal levels between floor and roof
    pub sections: u32,
    pub layout: ColumnLayout,
    pub column_type: ColumnType,
    /// Outward offset of every column from the cabin box
    pub column_offset: f64,
    /// Inward adjustment of the left/right columns along X
    pub column_x_position: f64,
    /// Inward adjustment of the front/back columns along Z
    pub column_z_position: f64,
    pub beam_type: BeamType,
}

impl FrameParameters {
    /// Parameters for a box with no offsets, rectTube50x30 beams and
    /// H-beam columns
    pub fn new(width: f64, depth: f64, height: f64, sections: u32, layout: ColumnLayout) -> Self {
        Self {
            width,
            depth,
            height,
            sections,
            layout,
            column_type: ColumnType::HBeam100,
            column_offset: 0.0,
            column_x_position: 0.0,
            column_z_position: 0.0,
            beam_type: BeamType::RectTube50x30,
        }
    }

    pub fn with_column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    pub fn with_beam_type(mut self, beam_type: BeamType) -> Self {
        self.beam_type = beam_type;
        self
    }

    pub fn with_column_offset(mut self, offset: f64) -> Self {
        self.column_offset = offset;
        self
    }

    pub fn with_column_position(mut self, x: f64, z: f64) -> Self {
        self.column_x_position = x;
        self.column_z_position = z;
        self
    }

    /// Reject dimensions that would produce NaN or inside-out geometry
    pub fn validate(&self) -> Result<()> {
        if self.sections > MAX_SECTIONS {
            return Err(Error::invalid(format!(
                "at most {} sections are supported, got {}",
                MAX_SECTIONS, self.sections
            )));
        }
        for (name, value) in [
            ("width", self.width),
            ("depth", self.depth),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid(format!(
                    "{} must be a positive length, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("column offset", self.column_offset),
            ("column X position", self.column_x_position),
            ("column Z position", self.column_z_position),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid(format!("{} must be finite", name)));
            }
        }
        Ok(())
    }
}

/// Raw parameter set as read from the designer's form, lengths in mm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameInput {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub sections: u32,
    pub column_count: u32,
    pub column_type: String,
    pub column_offset: f64,
    #[serde(alias = "columnXPosition")]
    pub column_x: f64,
    #[serde(alias = "columnZPosition")]
    pub column_z: f64,
    #[serde(alias = "horizontalBeamType")]
    pub beam_type: String,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            width: 2000.0,
            depth: 2000.0,
            height: 2500.0,
            sections: 3,
            column_count: 4,
            column_type: ColumnType::HBeam100.name().to_string(),
            column_offset: 0.0,
            column_x: 0.0,
            column_z: 0.0,
            beam_type: BeamType::RectTube50x30.name().to_string(),
        }
    }
}

impl FrameInput {
    /// Parse a JSON parameter set; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::invalid(format!("parameter JSON: {}", e)))
    }

    /// Convert to metres and resolve profile names
    pub fn to_parameters(&self) -> Result<FrameParameters> {
        let params = FrameParameters {
            width: self.width * MM_TO_M,
            depth: self.depth * MM_TO_M,
            height: self.height * MM_TO_M,
            sections: self.sections,
            layout: ColumnLayout::try_from(self.column_count)?,
            column_type: self.column_type.parse()?,
            column_offset: self.column_offset * MM_TO_M,
            column_x_position: self.column_x * MM_TO_M,
            column_z_position: self.column_z * MM_TO_M,
            beam_type: self.beam_type.parse()?,
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_column_layout_from_count() {
        assert_eq!(ColumnLayout::try_from(1).unwrap(), ColumnLayout::Single);
        assert_eq!(ColumnLayout::try_from(2).unwrap(), ColumnLayout::Pair);
        assert_eq!(ColumnLayout::try_from(4).unwrap(), ColumnLayout::Quad);
        assert_eq!(ColumnLayout::try_from(3), Err(Error::InvalidColumnCount(3)));
        assert_eq!(ColumnLayout::try_from(0), Err(Error::InvalidColumnCount(0)));
    }

    #[test]
    fn test_input_converts_millimetres() {
        let input = FrameInput {
            width: 1200.0,
            column_x: 50.0,
            ..FrameInput::default()
        };
        let params = input.to_parameters().unwrap();
        assert_relative_eq!(params.width, 1.2);
        assert_relative_eq!(params.height, 2.5);
        assert_relative_eq!(params.column_x_position, 0.05);
        assert_eq!(params.layout, ColumnLayout::Quad);
        assert_eq!(params.column_type, ColumnType::HBeam100);
    }

    #[test]
    fn test_input_from_json_uses_defaults_and_aliases() {
        let input = FrameInput::from_json(
            r#"{"width": 1500, "columnCount": 2, "columnType": "cChannel100",
                "columnZPosition": 20, "horizontalBeamType": "rectTube80x40"}"#,
        )
        .unwrap();

        assert_eq!(input.width, 1500.0);
        assert_eq!(input.depth, 2000.0);
        assert_eq!(input.column_z, 20.0);

        let params = input.to_parameters().unwrap();
        assert_eq!(params.layout, ColumnLayout::Pair);
        assert_eq!(params.beam_type, BeamType::RectTube80x40);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let bad_count = FrameInput {
            column_count: 3,
            ..FrameInput::default()
        };
        assert_eq!(
            bad_count.to_parameters(),
            Err(Error::InvalidColumnCount(3))
        );

        let bad_column = FrameInput {
            column_type: "woodenPost".into(),
            ..FrameInput::default()
        };
        assert!(matches!(
            bad_column.to_parameters(),
            Err(Error::UnknownProfile(_))
        ));

        let zero_height = FrameInput {
            height: 0.0,
            ..FrameInput::default()
        };
        assert!(matches!(
            zero_height.to_parameters(),
            Err(Error::InvalidParameter(_))
        ));

        let too_many = FrameInput::from_json(r#"{"sections": 4294967295}"#).unwrap();
        assert!(matches!(
            too_many.to_parameters(),
            Err(Error::InvalidParameter(_))
        ));
        let most = FrameInput {
            sections: MAX_SECTIONS,
            ..FrameInput::default()
        };
        assert!(most.to_parameters().is_ok());

        assert!(FrameInput::from_json("{not json").is_err());
    }
}
