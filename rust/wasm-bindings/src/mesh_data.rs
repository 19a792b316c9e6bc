// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tessellated beams handed to the renderer

use cabin_frame_geometry::{BeamPrimitive, BeamRole, Mesh};
use wasm_bindgen::prelude::*;

/// 0x3498db
const FRAME_COLOR: [f32; 4] = [0.204, 0.596, 0.859, 1.0];
/// 0x808080
const GRID_COLOR: [f32; 4] = [0.502, 0.502, 0.502, 1.0];

/// One beam's triangle mesh plus what it is
#[wasm_bindgen]
pub struct BeamMeshJs {
    layer: &'static str,
    side: &'static str,
    length: f64,
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    color: [f32; 4],
}

#[wasm_bindgen]
impl BeamMeshJs {
    /// "horizontal", "diagonal", "grid" or "standalone"
    #[wasm_bindgen(getter)]
    pub fn layer(&self) -> String {
        self.layer.to_string()
    }

    /// Face or cabin side the beam belongs to
    #[wasm_bindgen(getter)]
    pub fn side(&self) -> String {
        self.side.to_string()
    }

    /// Cut length in millimetres
    #[wasm_bindgen(getter, js_name = lengthMm)]
    pub fn length_mm(&self) -> u32 {
        (self.length * 1000.0).round() as u32
    }

    /// Get positions as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.positions[..])
    }

    /// Get normals as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.normals[..])
    }

    /// Get indices as Uint32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.indices[..])
    }

    /// Get color as [r, g, b, a] array
    #[wasm_bindgen(getter)]
    pub fn color(&self) -> Vec<f32> {
        self.color.to_vec()
    }

    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl BeamMeshJs {
    pub fn new(beam: &BeamPrimitive, mesh: Mesh) -> Self {
        let (layer, side, color) = match beam.role {
            BeamRole::Standalone => ("standalone", "", FRAME_COLOR),
            BeamRole::Horizontal { face, .. } => ("horizontal", face.name(), FRAME_COLOR),
            BeamRole::Diagonal { face, .. } => ("diagonal", face.name(), FRAME_COLOR),
            BeamRole::Grid { side, .. } => ("grid", side.name(), GRID_COLOR),
        };
        Self {
            layer,
            side,
            length: beam.length,
            positions: mesh.positions,
            normals: mesh.normals,
            indices: mesh.indices,
            color,
        }
    }
}

/// Every beam currently in the designer's scene
#[wasm_bindgen]
#[derive(Default)]
pub struct BeamMeshCollection {
    meshes: Vec<BeamMeshJs>,
}

#[wasm_bindgen]
impl BeamMeshCollection {
    /// Get number of meshes
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.meshes.len()
    }

    /// Get mesh at index
    #[wasm_bindgen]
    pub fn get(&self, index: usize) -> Option<BeamMeshJs> {
        self.meshes.get(index).map(|m| BeamMeshJs {
            layer: m.layer,
            side: m.side,
            length: m.length,
            positions: m.positions.clone(),
            normals: m.normals.clone(),
            indices: m.indices.clone(),
            color: m.color,
        })
    }

    #[wasm_bindgen(getter, js_name = totalVertices)]
    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len() / 3).sum()
    }

    #[wasm_bindgen(getter, js_name = totalTriangles)]
    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }
}

impl BeamMeshCollection {
    pub fn from_vec(meshes: Vec<BeamMeshJs>) -> Self {
        Self { meshes }
    }
}
