// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle mesh output handed to the renderer

use nalgebra::{Point3, Vector3};

/// Indexed triangle mesh in f32, ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mesh sized for `vertices` vertices and `indices` indices
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(indices),
        }
    }

    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        let p = position.cast::<f32>();
        let n = normal.cast::<f32>();
        self.positions.extend_from_slice(&[p.x, p.y, p.z]);
        self.normals.extend_from_slice(&[n.x, n.y, n.z]);
    }

    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    /// Turn the mesh inside out: reverse every triangle and negate normals.
    ///
    /// Used for the inner cavity of hollow tubes, which must be visible
    /// from inside the outer shell.
    pub fn invert(&mut self) {
        self.indices.chunks_exact_mut(3).for_each(|tri| tri.swap(1, 2));
        self.normals.iter_mut().for_each(|n| *n = -*n);
    }

    /// Append `other`, shifting its indices past our vertices
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|&i| i + base));
    }

    /// Append several meshes with a single reservation
    pub fn merge_all(&mut self, meshes: &[Mesh]) {
        let floats: usize = meshes.iter().map(|m| m.positions.len()).sum();
        let indices: usize = meshes.iter().map(|m| m.indices.len()).sum();
        self.positions.reserve(floats);
        self.normals.reserve(floats);
        self.indices.reserve(indices);

        meshes.iter().for_each(|mesh| self.merge(mesh));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds `(min, max)`; both are the origin for an empty mesh
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut points = self
            .positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]));

        let Some(first) = points.next() else {
            return (Point3::origin(), Point3::origin());
        };
        points.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)))
    }
}
