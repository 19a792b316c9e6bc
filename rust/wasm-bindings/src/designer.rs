// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript API for the cabin frame designer
//!
//! Holds the beam scene between calls. The page calls `rebuild` whenever a
//! form control changes and re-reads `meshes()` afterwards.

use crate::mesh_data::{BeamMeshCollection, BeamMeshJs};
use crate::utils::report;
use cabin_frame_geometry::{
    grid_size_labels, BeamType, CabinBox, ColumnType, Error, FrameInput, FrameSession,
    GridPattern, GridSide, GridSpec, MemoryScene,
};
use wasm_bindgen::prelude::*;

/// Parametric cabin frame with its current beams
#[wasm_bindgen]
#[derive(Default)]
pub struct CabinFrameDesigner {
    scene: MemoryScene,
    session: FrameSession<MemoryScene>,
}

#[wasm_bindgen]
impl CabinFrameDesigner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the frame from a parameter object (millimetres, camelCase).
    /// Missing fields take their defaults; `undefined` rebuilds the default
    /// cabin. On error the previous frame stays in place.
    ///
    /// Example:
    /// ```javascript
    /// const designer = new CabinFrameDesigner();
    /// designer.rebuild({ width: 1600, depth: 1400, sections: 4, columnCount: 4 });
    /// ```
    #[wasm_bindgen]
    pub fn rebuild(&mut self, params: JsValue) -> Result<usize, JsValue> {
        let input: FrameInput = if params.is_undefined() || params.is_null() {
            FrameInput::default()
        } else {
            serde_wasm_bindgen::from_value(params)
                .map_err(|e| report("rebuild", Error::invalid(e.to_string())))?
        };
        self.rebuild_with(&input)
    }

    /// Same as `rebuild`, taking a JSON string
    #[wasm_bindgen(js_name = rebuildFromJson)]
    pub fn rebuild_from_json(&mut self, json: &str) -> Result<usize, JsValue> {
        let input = FrameInput::from_json(json).map_err(|e| report("rebuild", e))?;
        self.rebuild_with(&input)
    }

    /// Number of frame beams, grids excluded
    #[wasm_bindgen(getter, js_name = beamCount)]
    pub fn beam_count(&self) -> usize {
        self.session.beam_count()
    }

    #[wasm_bindgen(getter, js_name = gridBeamCount)]
    pub fn grid_beam_count(&self) -> usize {
        self.session.grid_beam_count()
    }

    /// Tessellate every beam in the scene
    #[wasm_bindgen]
    pub fn meshes(&self) -> Result<BeamMeshCollection, JsValue> {
        let meshes = self
            .scene
            .beams()
            .map(|beam| beam.to_mesh().map(|mesh| BeamMeshJs::new(beam, mesh)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| report("meshes", e))?;
        Ok(BeamMeshCollection::from_vec(meshes))
    }

    /// Cut length of every diagonal, rounded to millimetres
    #[wasm_bindgen(js_name = diagonalLengthsMm)]
    pub fn diagonal_lengths_mm(&self) -> Vec<u32> {
        self.session
            .measurements()
            .iter()
            .map(|m| m.length_mm())
            .collect()
    }

    /// Longest diagonal in millimetres, `undefined` without diagonals
    #[wasm_bindgen(getter, js_name = cornerDistanceMm)]
    pub fn corner_distance_mm(&self) -> Option<u32> {
        self.session.corner_distance_mm()
    }

    /// Lay a grid on one cabin side, replacing the side's previous grid.
    /// `size` is a rectangular tube label such as "75×50×3.2mm".
    #[wasm_bindgen(js_name = applyGrid)]
    pub fn apply_grid(
        &mut self,
        side: &str,
        pattern: &str,
        divisions: u32,
        size: Option<String>,
    ) -> Result<usize, JsValue> {
        let side: GridSide = side.parse().map_err(|e| report("applyGrid", e))?;
        let pattern: GridPattern = pattern.parse().map_err(|e| report("applyGrid", e))?;

        let mut spec = GridSpec::new(pattern, divisions);
        if let Some(size) = size {
            spec = spec.with_size(size);
        }

        let cabin = self.cabin()?;
        self.session
            .apply_grid(&mut self.scene, side, spec, &cabin)
            .map_err(|e| report("applyGrid", e))
    }

    /// Remove one side's grid, returning how many members were removed
    #[wasm_bindgen(js_name = clearGrid)]
    pub fn clear_grid(&mut self, side: &str) -> Result<usize, JsValue> {
        let side: GridSide = side.parse().map_err(|e| report("clearGrid", e))?;
        Ok(self.session.clear_grid(&mut self.scene, side))
    }

    /// Sides that currently carry a grid
    #[wasm_bindgen(js_name = gridSides)]
    pub fn grid_sides(&self) -> Vec<String> {
        self.session
            .grid_configurations()
            .applied_sides()
            .map(|side| side.name().to_string())
            .collect()
    }

    /// Column type names accepted by `rebuild`
    #[wasm_bindgen(js_name = columnTypes)]
    pub fn column_types() -> Vec<String> {
        ColumnType::ALL.iter().map(|c| c.name().to_string()).collect()
    }

    /// Horizontal beam type names accepted by `rebuild`
    #[wasm_bindgen(js_name = beamTypes)]
    pub fn beam_types() -> Vec<String> {
        BeamType::ALL.iter().map(|b| b.name().to_string()).collect()
    }

    /// Rectangular tube labels accepted by `applyGrid`
    #[wasm_bindgen(js_name = gridSizes)]
    pub fn grid_sizes() -> Vec<String> {
        grid_size_labels().map(str::to_string).collect()
    }
}

impl CabinFrameDesigner {
    fn rebuild_with(&mut self, input: &FrameInput) -> Result<usize, JsValue> {
        let params = input.to_parameters().map_err(|e| report("rebuild", e))?;
        self.session
            .rebuild(&mut self.scene, &params)
            .map_err(|e| report("rebuild", e))
    }

    /// Box of the last rebuild, or the default cabin before the first one
    fn cabin(&self) -> Result<CabinBox, JsValue> {
        match self.session.params() {
            Some(params) => Ok(CabinBox::from(params)),
            None => FrameInput::default()
                .to_parameters()
                .map(|params| CabinBox::from(&params))
                .map_err(|e| report("applyGrid", e)),
        }
    }
}
