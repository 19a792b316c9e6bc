// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame generation and scene session
//!
//! [`generate_frame`] is a pure function of the parameters. [`FrameSession`]
//! owns the handles of whatever it has put into a [`Scene`] and swaps a
//! complete new beam set in on every rebuild. Nothing in the scene changes
//! until the new geometry has been computed successfully.

use crate::beam::BeamPrimitive;
use crate::diagonal::{build_diagonal_supports, DiagonalLayer, DiagonalMeasurement};
use crate::error::Result;
use crate::grid::{build_grid_beams, CabinBox, GridConfigurations, GridPattern, GridSide, GridSpec};
use crate::horizontal::build_horizontal_beams;
use crate::levels::{compute_levels, LevelCornerSequence};
use crate::mesh::Mesh;
use crate::params::FrameParameters;
use crate::scene::Scene;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Every beam of one frame configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameGeometry {
    pub levels: LevelCornerSequence,
    pub horizontal: Vec<BeamPrimitive>,
    pub diagonals: DiagonalLayer,
}

impl FrameGeometry {
    pub fn beam_count(&self) -> usize {
        self.horizontal.len() + self.diagonals.len()
    }

    /// Horizontal beams first, then diagonals
    pub fn beams(&self) -> impl Iterator<Item = &BeamPrimitive> {
        self.horizontal.iter().chain(self.diagonals.beams.iter())
    }

    pub fn into_beams(self) -> impl Iterator<Item = BeamPrimitive> {
        self.horizontal.into_iter().chain(self.diagonals.beams)
    }

    /// Tessellate every beam into one mesh
    pub fn combined_mesh(&self) -> Result<Mesh> {
        let all: Vec<&BeamPrimitive> = self.beams().collect();
        let meshes = all
            .par_iter()
            .map(|beam| beam.to_mesh())
            .collect::<Result<Vec<Mesh>>>()?;

        let mut combined = Mesh::new();
        combined.merge_all(&meshes);
        Ok(combined)
    }
}

/// Compute levels, perimeter beams and braces for a parameter set
pub fn generate_frame(params: &FrameParameters) -> Result<FrameGeometry> {
    let levels = compute_levels(params)?;
    let section = params.beam_type.section();

    let horizontal = build_horizontal_beams(&levels, params.layout, &section, params.column_type)?;
    let diagonals = build_diagonal_supports(&levels, params.layout, &section)?;

    debug!(
        levels = levels.len(),
        horizontal = horizontal.len(),
        diagonals = diagonals.len(),
        "generated frame"
    );

    Ok(FrameGeometry {
        levels,
        horizontal,
        diagonals,
    })
}

/// Frame and grid beams currently held by a scene
pub struct FrameSession<S: Scene> {
    params: Option<FrameParameters>,
    frame: Vec<S::Handle>,
    measurements: Vec<DiagonalMeasurement>,
    grids: FxHashMap<GridSide, Vec<S::Handle>>,
    grid_configs: GridConfigurations,
}

impl<S: Scene> Default for FrameSession<S> {
    fn default() -> Self {
        Self {
            params: None,
            frame: Vec::new(),
            measurements: Vec::new(),
            grids: FxHashMap::default(),
            grid_configs: GridConfigurations::new(),
        }
    }
}

/// Remove beams from the scene and release their resources
fn dispose<S: Scene>(scene: &mut S, handles: Vec<S::Handle>) -> usize {
    let mut removed = 0;
    for handle in handles {
        if scene.remove(&handle).is_some() {
            scene.release_geometry(&handle);
            scene.release_material(&handle);
            removed += 1;
        }
    }
    removed
}

impl<S: Scene> FrameSession<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of the last successful rebuild
    pub fn params(&self) -> Option<&FrameParameters> {
        self.params.as_ref()
    }

    /// Number of frame beams in the scene, grids excluded
    pub fn beam_count(&self) -> usize {
        self.frame.len()
    }

    pub fn grid_beam_count(&self) -> usize {
        self.grids.values().map(Vec::len).sum()
    }

    pub fn frame_handles(&self) -> &[S::Handle] {
        &self.frame
    }

    pub fn grid_handles(&self, side: GridSide) -> &[S::Handle] {
        self.grids.get(&side).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn measurements(&self) -> &[DiagonalMeasurement] {
        &self.measurements
    }

    /// Longest brace of the current frame, in millimetres
    pub fn corner_distance_mm(&self) -> Option<u32> {
        self.measurements.iter().map(DiagonalMeasurement::length_mm).max()
    }

    pub fn grid_configurations(&self) -> &GridConfigurations {
        &self.grid_configs
    }

    /// Replace the frame with one built from `params`.
    ///
    /// Grids already applied are laid again on the new cabin box. On error
    /// the scene keeps the previous beams. Returns the new frame beam count.
    pub fn rebuild(&mut self, scene: &mut S, params: &FrameParameters) -> Result<usize> {
        let geometry = generate_frame(params)?;

        let cabin = CabinBox::from(params);
        let grids = self
            .grid_configs
            .applied_sides()
            .map(|side| {
                let spec = self.grid_configs.get(side).cloned().unwrap_or_default();
                build_grid_beams(side, &spec, &cabin).map(|beams| (side, beams))
            })
            .collect::<Result<Vec<_>>>()?;

        let removed = dispose(scene, std::mem::take(&mut self.frame));
        self.measurements = geometry.diagonals.measurements.clone();
        self.frame = geometry.into_beams().map(|beam| scene.add(beam)).collect();

        for (side, beams) in grids {
            self.swap_grid(scene, side, beams);
        }

        self.params = Some(*params);
        info!(
            removed,
            added = self.frame.len(),
            grids = self.grid_beam_count(),
            "rebuilt cabin frame"
        );
        Ok(self.frame.len())
    }

    /// Lay a grid on one side, replacing that side's previous grid.
    ///
    /// A `None` pattern clears the side. Returns the number of members added.
    pub fn apply_grid(
        &mut self,
        scene: &mut S,
        side: GridSide,
        spec: GridSpec,
        cabin: &CabinBox,
    ) -> Result<usize> {
        if spec.pattern == GridPattern::None {
            self.clear_grid(scene, side);
            return Ok(0);
        }

        let beams = build_grid_beams(side, &spec, cabin)?;
        let added = beams.len();
        self.swap_grid(scene, side, beams);
        self.grid_configs.set(side, spec);

        info!(%side, added, "applied grid");
        Ok(added)
    }

    /// Remove one side's grid. Returns the number of members removed.
    pub fn clear_grid(&mut self, scene: &mut S, side: GridSide) -> usize {
        self.grid_configs.clear(side);
        let removed = self
            .grids
            .remove(&side)
            .map(|handles| dispose(scene, handles))
            .unwrap_or(0);
        if removed > 0 {
            info!(%side, removed, "cleared grid");
        }
        removed
    }

    /// Remove everything this session put into the scene
    pub fn clear(&mut self, scene: &mut S) -> usize {
        let mut removed = dispose(scene, std::mem::take(&mut self.frame));
        for (_, handles) in self.grids.drain() {
            removed += dispose(scene, handles);
        }
        self.grid_configs = GridConfigurations::new();
        self.measurements.clear();
        self.params = None;
        removed
    }

    fn swap_grid(&mut self, scene: &mut S, side: GridSide, beams: Vec<BeamPrimitive>) {
        if let Some(old) = self.grids.remove(&side) {
            dispose(scene, old);
        }
        let handles = beams.into_iter().map(|beam| scene.add(beam)).collect();
        self.grids.insert(side, handles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ColumnLayout;
    use crate::scene::MemoryScene;

    fn params(sections: u32) -> FrameParameters {
        FrameParameters::new(2.0, 2.0, 2.5, sections, ColumnLayout::Quad)
    }

    #[test]
    fn test_generate_frame_counts() {
        let frame = generate_frame(&params(3)).unwrap();
        assert_eq!(frame.levels.len(), 3);
        assert_eq!(frame.horizontal.len(), 12);
        assert_eq!(frame.diagonals.len(), 8);
        assert_eq!(frame.beam_count(), 20);
        assert_eq!(frame.beams().count(), 20);
    }

    #[test]
    fn test_combined_mesh_covers_all_beams() {
        let frame = generate_frame(&params(2)).unwrap();
        let mesh = frame.combined_mesh().unwrap();
        // Each hollow beam is two closed boxes
        assert_eq!(mesh.triangle_count(), frame.beam_count() * 24);
    }

    #[test]
    fn test_single_column_frame_is_empty() {
        let single = FrameParameters::new(2.0, 2.0, 2.5, 3, ColumnLayout::Single);
        let frame = generate_frame(&single).unwrap();
        assert_eq!(frame.beam_count(), 0);
        assert!(frame.combined_mesh().unwrap().is_empty());
    }

    #[test]
    fn test_session_swaps_beams() {
        let mut scene = MemoryScene::new();
        let mut session = FrameSession::new();

        assert_eq!(session.rebuild(&mut scene, &params(3)).unwrap(), 20);
        assert_eq!(scene.len(), 20);

        assert_eq!(session.rebuild(&mut scene, &params(2)).unwrap(), 12);
        assert_eq!(scene.len(), 12);
        assert_eq!(scene.geometry_releases(), 20);
        assert_eq!(scene.material_releases(), 20);
        assert_eq!(session.measurements().len(), 4);
        assert!(session.corner_distance_mm().is_some());
    }

    #[test]
    fn test_grid_apply_and_clear() {
        let mut scene = MemoryScene::new();
        let mut session = FrameSession::new();
        let cabin = CabinBox::new(2.0, 2.0, 2.5);

        let added = session
            .apply_grid(&mut scene, GridSide::Front, GridSpec::new(GridPattern::Crossed, 3), &cabin)
            .unwrap();
        assert_eq!(added, 6);
        assert_eq!(scene.len(), 6);

        // Re-applying replaces, never stacks
        session
            .apply_grid(&mut scene, GridSide::Front, GridSpec::new(GridPattern::Vertical, 2), &cabin)
            .unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.geometry_releases(), 6);

        assert_eq!(session.clear_grid(&mut scene, GridSide::Front), 2);
        assert!(scene.is_empty());
        assert!(!session.grid_configurations().is_applied(GridSide::Front));
    }

    #[test]
    fn test_grids_follow_rebuilds() {
        let mut scene = MemoryScene::new();
        let mut session = FrameSession::new();
        let p = params(1);

        session.rebuild(&mut scene, &p).unwrap();
        session
            .apply_grid(
                &mut scene,
                GridSide::Left,
                GridSpec::new(GridPattern::Horizontal, 2),
                &CabinBox::from(&p),
            )
            .unwrap();
        assert_eq!(scene.len(), 4 + 2);

        let wider = FrameParameters::new(3.0, 2.0, 2.5, 1, ColumnLayout::Quad);
        session.rebuild(&mut scene, &wider).unwrap();
        assert_eq!(scene.len(), 4 + 2);
        assert_eq!(session.grid_beam_count(), 2);

        for key in session.grid_handles(GridSide::Left) {
            let beam = scene.get(*key).unwrap();
            assert_eq!(beam.position.x, -1.5);
        }
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut scene = MemoryScene::new();
        let mut session = FrameSession::new();
        session.rebuild(&mut scene, &params(2)).unwrap();
        session
            .apply_grid(
                &mut scene,
                GridSide::Top,
                GridSpec::new(GridPattern::Vertical, 1),
                &CabinBox::new(2.0, 2.0, 2.5),
            )
            .unwrap();

        assert_eq!(session.clear(&mut scene), 13);
        assert!(scene.is_empty());
        assert!(session.params().is_none());
    }
}
