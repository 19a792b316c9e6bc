// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rotation helpers shared by the beam layers
//!
//! Beams are modelled with their length along local +Z, width along local X
//! and height along local Y. The layers orient them either with fixed
//! Euler rotations (horizontal beams) or by rotating +Z onto an arbitrary
//! direction (diagonals and grid members).

use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Compose an intrinsic X-then-Y-then-Z Euler rotation.
///
/// The resulting matrix is `Rx * Ry * Rz`, the convention used by scene
/// graphs that expose `rotation.{x,y,z}` on their nodes.
pub fn euler_xyz(x: f64, y: f64, z: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z)
}

/// Shortest rotation taking direction `from` onto direction `to`.
///
/// Returns `None` when either vector has (near) zero length. Opposite
/// directions get a half turn about an axis orthogonal to `from`.
pub fn rotation_onto(from: &Vector3<f64>, to: &Vector3<f64>) -> Option<UnitQuaternion<f64>> {
    let from = from.try_normalize(1e-12)?;
    let to = to.try_normalize(1e-12)?;

    if let Some(q) = UnitQuaternion::rotation_between(&from, &to) {
        return Some(q);
    }

    // Antiparallel: pick any axis perpendicular to `from`
    let helper = if from.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let axis = Unit::new_normalize(from.cross(&helper));
    Some(UnitQuaternion::from_axis_angle(&axis, PI))
}
