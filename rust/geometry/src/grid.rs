// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural grid layer
//!
//! Evenly spaced tube members laid on one face of the cabin box. Each side
//! carries its own pattern and division count, applied and cleared
//! independently of the frame beams.

use crate::beam::{build_tube_beam, BeamPrimitive, BeamRole};
use crate::error::{Error, Result};
use crate::params::FrameParameters;
use crate::profiles::{lookup, ProfileKind, TubeSection};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

/// Grid tube used when no size is chosen
pub const DEFAULT_GRID_SIZE: &str = "50×25×3.2mm";

/// Divisions preselected by the grid tool
pub const DEFAULT_DIVISIONS: u32 = 5;

/// Most members a single run may carry
pub const MAX_DIVISIONS: u32 = 200;

/// Face of the cabin box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridSide {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl GridSide {
    pub const ALL: [GridSide; 6] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Outward normal of the face
    pub fn normal(self) -> Vector3<f64> {
        match self {
            Self::Front => Vector3::z(),
            Self::Back => -Vector3::z(),
            Self::Left => -Vector3::x(),
            Self::Right => Vector3::x(),
            Self::Top => Vector3::y(),
            Self::Bottom => -Vector3::y(),
        }
    }

    /// The two member runs of this face: `[vertical, horizontal]`
    fn runs(self, cabin: &CabinBox) -> [Run; 2] {
        let CabinBox {
            width,
            depth,
            height,
        } = *cabin;

        let wall = |plane: Point3<f64>, across: Vector3<f64>, span: f64| {
            [
                Run {
                    direction: Vector3::y(),
                    length: height,
                    spacing: across,
                    span,
                    base: plane + Vector3::y() * (height / 2.0),
                    centred: true,
                },
                Run {
                    direction: across,
                    length: span,
                    spacing: Vector3::y(),
                    span: height,
                    base: plane,
                    centred: false,
                },
            ]
        };
        let cap = |y: f64| {
            let centre = Point3::new(0.0, y, 0.0);
            [
                Run {
                    direction: Vector3::z(),
                    length: depth,
                    spacing: Vector3::x(),
                    span: width,
                    base: centre,
                    centred: true,
                },
                Run {
                    direction: Vector3::x(),
                    length: width,
                    spacing: Vector3::z(),
                    span: depth,
                    base: centre,
                    centred: true,
                },
            ]
        };

        match self {
            Self::Front => wall(Point3::new(0.0, 0.0, depth / 2.0), Vector3::x(), width),
            Self::Back => wall(Point3::new(0.0, 0.0, -depth / 2.0), Vector3::x(), width),
            Self::Left => wall(Point3::new(-width / 2.0, 0.0, 0.0), Vector3::z(), depth),
            Self::Right => wall(Point3::new(width / 2.0, 0.0, 0.0), Vector3::z(), depth),
            Self::Top => cap(height),
            Self::Bottom => cap(0.0),
        }
    }
}

impl FromStr for GridSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|side| side.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownGridSide(s.to_string()))
    }
}

impl fmt::Display for GridSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Member layout on a face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridPattern {
    #[default]
    None,
    Vertical,
    Horizontal,
    Crossed,
}

impl GridPattern {
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Crossed => "crossed",
        }
    }

    fn has_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Crossed)
    }

    fn has_horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Crossed)
    }
}

impl FromStr for GridPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            "crossed" => Ok(Self::Crossed),
            _ => Err(Error::UnknownGridPattern(s.to_string())),
        }
    }
}

/// Grid settings for one side
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub pattern: GridPattern,
    pub divisions: u32,
    /// Catalogue label of the rectangular tube
    pub size_label: String,
}

impl GridSpec {
    pub fn new(pattern: GridPattern, divisions: u32) -> Self {
        Self {
            pattern,
            divisions,
            size_label: DEFAULT_GRID_SIZE.to_string(),
        }
    }

    pub fn with_size(mut self, label: impl Into<String>) -> Self {
        self.size_label = label.into();
        self
    }

    /// Tube section, falling back to the default size for unknown labels
    pub fn section(&self) -> TubeSection {
        lookup(ProfileKind::RectTube, &self.size_label).tube()
    }

    /// Number of members this spec places on a face
    pub fn member_count(&self) -> usize {
        let runs = self.pattern.has_vertical() as usize + self.pattern.has_horizontal() as usize;
        runs * self.divisions as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(GridPattern::None, DEFAULT_DIVISIONS)
    }
}

/// Outer box the grids are laid on, in metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CabinBox {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl CabinBox {
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.depth) && ok(self.height) {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "cabin box must be positive, got {}×{}×{}",
                self.width, self.depth, self.height
            )))
        }
    }
}

impl From<&FrameParameters> for CabinBox {
    fn from(params: &FrameParameters) -> Self {
        Self::new(params.width, params.depth, params.height)
    }
}

/// A family of parallel members spread evenly across a face
struct Run {
    /// Member length axis
    direction: Vector3<f64>,
    length: f64,
    /// Axis the members are spread along
    spacing: Vector3<f64>,
    span: f64,
    base: Point3<f64>,
    /// Spread symmetric about `base` instead of starting at it
    centred: bool,
}

impl Run {
    fn offsets(&self, divisions: u32) -> impl Iterator<Item = f64> + '_ {
        let step = self.span / (divisions as f64 + 1.0);
        let start = if self.centred { -self.span / 2.0 } else { 0.0 };
        (1..=divisions).map(move |i| start + i as f64 * step)
    }
}

/// Build the members of one side's grid.
///
/// Members keep their wide side in the face plane. Vertical members on the
/// top and bottom faces run front to back.
pub fn build_grid_beams(
    side: GridSide,
    spec: &GridSpec,
    cabin: &CabinBox,
) -> Result<Vec<BeamPrimitive>> {
    if spec.pattern == GridPattern::None {
        return Ok(Vec::new());
    }
    if spec.divisions == 0 {
        return Err(Error::invalid("grid needs at least one division"));
    }
    if spec.divisions > MAX_DIVISIONS {
        return Err(Error::invalid(format!(
            "at most {} grid divisions are supported, got {}",
            MAX_DIVISIONS, spec.divisions
        )));
    }
    cabin.validate()?;

    let section = spec.section();
    let normal = side.normal();
    let [vertical, horizontal] = side.runs(cabin);

    let runs = [
        (spec.pattern.has_vertical(), vertical),
        (spec.pattern.has_horizontal(), horizontal),
    ];

    let mut beams = Vec::with_capacity(spec.member_count());
    for run in runs.iter().filter(|(on, _)| *on).map(|(_, run)| run) {
        let rotation = UnitQuaternion::face_towards(&run.direction, &normal);
        for offset in run.offsets(spec.divisions) {
            let position = run.base + run.spacing * offset;
            let index = beams.len();
            beams.push(
                build_tube_beam(run.length, &section)?
                    .placed(position, rotation)
                    .with_role(BeamRole::Grid { side, index }),
            );
        }
    }

    Ok(beams)
}

/// Grid settings currently applied, per side
#[derive(Debug, Clone, Default)]
pub struct GridConfigurations {
    applied: FxHashMap<GridSide, GridSpec>,
}

impl GridConfigurations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a spec; a `None` pattern clears the side
    pub fn set(&mut self, side: GridSide, spec: GridSpec) {
        if spec.pattern == GridPattern::None {
            self.applied.remove(&side);
        } else {
            self.applied.insert(side, spec);
        }
    }

    pub fn clear(&mut self, side: GridSide) -> Option<GridSpec> {
        self.applied.remove(&side)
    }

    pub fn get(&self, side: GridSide) -> Option<&GridSpec> {
        self.applied.get(&side)
    }

    pub fn is_applied(&self, side: GridSide) -> bool {
        self.applied.contains_key(&side)
    }

    /// Applied sides in [`GridSide::ALL`] order
    pub fn applied_sides(&self) -> impl Iterator<Item = GridSide> + '_ {
        GridSide::ALL
            .into_iter()
            .filter(move |side| self.applied.contains_key(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn cabin() -> CabinBox {
        CabinBox::new(2.0, 1.6, 2.4)
    }

    #[test]
    fn test_member_counts_per_pattern() {
        for (pattern, expected) in [
            (GridPattern::None, 0),
            (GridPattern::Vertical, 3),
            (GridPattern::Horizontal, 3),
            (GridPattern::Crossed, 6),
        ] {
            let spec = GridSpec::new(pattern, 3);
            assert_eq!(spec.member_count(), expected);
            for side in GridSide::ALL {
                let beams = build_grid_beams(side, &spec, &cabin()).unwrap();
                assert_eq!(beams.len(), expected, "{} {}", side, pattern.name());
            }
        }
    }

    #[test]
    fn test_front_vertical_members() {
        let spec = GridSpec::new(GridPattern::Vertical, 3);
        let beams = build_grid_beams(GridSide::Front, &spec, &cabin()).unwrap();

        let xs: Vec<f64> = beams.iter().map(|b| b.position.x).collect();
        assert_relative_eq!(xs[0], -0.5, epsilon = 1e-12);
        assert_relative_eq!(xs[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(xs[2], 0.5, epsilon = 1e-12);

        for beam in &beams {
            assert_relative_eq!(beam.length, 2.4);
            assert_relative_eq!(beam.position.y, 1.2);
            assert_relative_eq!(beam.position.z, 0.8);
            assert_relative_eq!(beam.axis(), Vector3::y(), epsilon = 1e-12);
            // Narrow side faces out of the wall
            assert_abs_diff_eq!(beam.height_direction().z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_side_wall_uses_depth_span() {
        let spec = GridSpec::new(GridPattern::Horizontal, 2);
        let beams = build_grid_beams(GridSide::Left, &spec, &cabin()).unwrap();

        for (i, beam) in beams.iter().enumerate() {
            assert_relative_eq!(beam.length, 1.6);
            assert_relative_eq!(beam.position.x, -1.0);
            assert_relative_eq!(beam.position.y, (i as f64 + 1.0) * 0.8, epsilon = 1e-12);
            assert_relative_eq!(beam.axis(), Vector3::z(), epsilon = 1e-12);
        }

        let spec = GridSpec::new(GridPattern::Vertical, 1);
        let beams = build_grid_beams(GridSide::Right, &spec, &cabin()).unwrap();
        assert_relative_eq!(beams[0].position, Point3::new(1.0, 1.2, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_top_and_bottom_caps() {
        let spec = GridSpec::new(GridPattern::Crossed, 1);
        let top = build_grid_beams(GridSide::Top, &spec, &cabin()).unwrap();
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|b| b.position.y == 2.4));

        // Front-to-back member, then side-to-side member
        assert_relative_eq!(top[0].axis(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(top[0].length, 1.6);
        assert_relative_eq!(top[1].axis(), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(top[1].length, 2.0);

        let bottom = build_grid_beams(GridSide::Bottom, &spec, &cabin()).unwrap();
        assert!(bottom.iter().all(|b| b.position.y == 0.0));
    }

    #[test]
    fn test_roles_are_indexed() {
        let spec = GridSpec::new(GridPattern::Crossed, 2);
        let beams = build_grid_beams(GridSide::Back, &spec, &cabin()).unwrap();
        for (i, beam) in beams.iter().enumerate() {
            assert_eq!(
                beam.role,
                BeamRole::Grid {
                    side: GridSide::Back,
                    index: i
                }
            );
        }
    }

    #[test]
    fn test_size_label_and_fallback() {
        let spec = GridSpec::new(GridPattern::Vertical, 1).with_size("100x50x4mm");
        let beams = build_grid_beams(GridSide::Front, &spec, &cabin()).unwrap();
        assert_relative_eq!(beams[0].section.width, 0.1);
        assert_relative_eq!(beams[0].section.thickness, 0.004);

        let unknown = GridSpec::new(GridPattern::Vertical, 1).with_size("999×1mm");
        assert_eq!(unknown.section(), GridSpec::default().section());
    }

    #[test]
    fn test_rejects_bad_input() {
        let zero = GridSpec::new(GridPattern::Vertical, 0);
        assert!(matches!(
            build_grid_beams(GridSide::Front, &zero, &cabin()),
            Err(Error::InvalidParameter(_))
        ));

        let huge = GridSpec::new(GridPattern::Crossed, u32::MAX);
        assert!(matches!(
            build_grid_beams(GridSide::Top, &huge, &cabin()),
            Err(Error::InvalidParameter(_))
        ));
        let most = GridSpec::new(GridPattern::Vertical, MAX_DIVISIONS);
        assert_eq!(
            build_grid_beams(GridSide::Back, &most, &cabin()).unwrap().len(),
            MAX_DIVISIONS as usize
        );

        let flat = CabinBox::new(2.0, 0.0, 2.4);
        let spec = GridSpec::new(GridPattern::Vertical, 2);
        assert!(build_grid_beams(GridSide::Front, &spec, &flat).is_err());
    }

    #[test]
    fn test_parse_side_and_pattern() {
        assert_eq!("left".parse::<GridSide>().unwrap(), GridSide::Left);
        assert_eq!("Top".parse::<GridSide>().unwrap(), GridSide::Top);
        assert_eq!(
            "roof".parse::<GridSide>(),
            Err(Error::UnknownGridSide("roof".into()))
        );
        assert_eq!("crossed".parse::<GridPattern>().unwrap(), GridPattern::Crossed);
        assert!(matches!(
            "diamond".parse::<GridPattern>(),
            Err(Error::UnknownGridPattern(_))
        ));
    }

    #[test]
    fn test_configurations() {
        let mut configs = GridConfigurations::new();
        configs.set(GridSide::Right, GridSpec::new(GridPattern::Vertical, 4));
        configs.set(GridSide::Front, GridSpec::new(GridPattern::Crossed, 2));
        assert_eq!(
            configs.applied_sides().collect::<Vec<_>>(),
            vec![GridSide::Front, GridSide::Right]
        );

        configs.set(GridSide::Right, GridSpec::default());
        assert!(!configs.is_applied(GridSide::Right));

        assert!(configs.clear(GridSide::Front).is_some());
        assert!(configs.clear(GridSide::Front).is_none());
        assert_eq!(configs.applied_sides().count(), 0);
    }
}
