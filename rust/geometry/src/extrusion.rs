// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to closed 3D meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use nalgebra::{Isometry3, Point2, Point3, Vector3};

/// Extrude a 2D profile along the local Z axis, centred on `z = 0`.
///
/// The solid spans `-depth/2..depth/2` so a beam's placement origin is its
/// midpoint.
pub fn extrude_centered(
    profile: &Profile2D,
    depth: f64,
    placement: Option<&Isometry3<f64>>,
) -> Result<Mesh> {
    if !depth.is_finite() || depth <= 0.0 {
        return Err(Error::degenerate(format!(
            "extrusion depth must be positive, got {}",
            depth
        )));
    }

    let triangulation = profile.triangulate()?;
    let half = depth / 2.0;

    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + profile.outer.len() * 4,
        triangulation.indices.len() * 2 + profile.outer.len() * 6,
    );

    create_cap_mesh(&triangulation, -half, false, &mut mesh);
    create_cap_mesh(&triangulation, half, true, &mut mesh);
    create_side_walls(&profile.outer, -half, half, &mut mesh);

    if let Some(iso) = placement {
        apply_isometry(&mut mesh, iso);
    }

    Ok(mesh)
}

/// Signed area of a 2D triangle (positive = counter-clockwise)
#[inline]
fn signed_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Create a cap mesh at `z`. Top caps face +Z, bottom caps face -Z.
fn create_cap_mesh(triangulation: &Triangulation, z: f64, top: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if top {
        Vector3::new(0.0, 0.0, 1.0)
    } else {
        Vector3::new(0.0, 0.0, -1.0)
    };

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ccw = signed_area(
            &triangulation.points[a],
            &triangulation.points[b],
            &triangulation.points[c],
        ) > 0.0;

        let (i0, i1, i2) = (
            base_index + a as u32,
            base_index + b as u32,
            base_index + c as u32,
        );

        // Seen from outside, top caps wind CCW and bottom caps CW
        if ccw == top {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

/// Create outward-facing side walls for a counter-clockwise boundary
fn create_side_walls(boundary: &[Point2<f64>], z0: f64, z1: f64, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let mut quad_count = 0u32;

    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-12) {
            Some(n) => n,
            None => continue, // duplicate consecutive points
        };

        let idx = base_index + quad_count * 4;
        mesh.add_vertex(Point3::new(p0.x, p0.y, z0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, z0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, z1), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, z1), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);

        quad_count += 1;
    }
}

/// Apply a rigid placement to every vertex and normal of a mesh
pub fn apply_isometry(mesh: &mut Mesh, iso: &Isometry3<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = iso.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Rotation only; a rigid motion keeps normals unit length
    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = iso.rotation * normal;
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::create_rectangle;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Translation3, UnitQuaternion};

    /// Sum of signed tetrahedron volumes; positive for outward winding
    fn signed_volume(mesh: &Mesh) -> f64 {
        let p = |i: u32| {
            let i = i as usize * 3;
            Vector3::new(
                mesh.positions[i] as f64,
                mesh.positions[i + 1] as f64,
                mesh.positions[i + 2] as f64,
            )
        };
        mesh.indices
            .chunks_exact(3)
            .map(|t| p(t[0]).dot(&p(t[1]).cross(&p(t[2]))) / 6.0)
            .sum()
    }

    #[test]
    fn test_extrude_rectangle_is_centered() {
        let profile = create_rectangle(10.0, 5.0);
        let mesh = extrude_centered(&profile, 20.0, None).unwrap();

        // 2 caps * 4 + 4 sides * 4
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, -5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(max.x, 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(min.y, -2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(max.y, 2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(min.z, -10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(max.z, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_extrusion_winds_outward() {
        let profile = create_rectangle(2.0, 3.0);
        let mesh = extrude_centered(&profile, 4.0, None).unwrap();
        assert_abs_diff_eq!(signed_volume(&mesh), 24.0, epsilon = 1e-4);
    }

    #[test]
    fn test_extrude_with_placement() {
        let profile = create_rectangle(10.0, 5.0);
        let iso = Isometry3::from_parts(
            Translation3::new(100.0, 200.0, 300.0),
            UnitQuaternion::identity(),
        );

        let mesh = extrude_centered(&profile, 20.0, Some(&iso)).unwrap();

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, 95.0, epsilon = 1e-3);
        assert_abs_diff_eq!(max.x, 105.0, epsilon = 1e-3);
        assert_abs_diff_eq!(min.z, 290.0, epsilon = 1e-3);
        assert_abs_diff_eq!(max.z, 310.0, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_depth() {
        let profile = create_rectangle(10.0, 5.0);
        assert!(extrude_centered(&profile, -1.0, None).is_err());
        assert!(extrude_centered(&profile, 0.0, None).is_err());
        assert!(extrude_centered(&profile, f64::NAN, None).is_err());
    }
}
