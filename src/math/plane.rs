// src/math/plane.rs

use crate::math::vec3d::{v3d_cross, v3d_dot, v3d_normalize, v3d_sub};
use crate::types::{DggrsError, Plane, Vec3d};

/// Plane through three points, with the normal oriented by the right-hand
/// rule on `p1 -> p2 -> p3`.
///
/// Fails with [`DggrsError::DegenerateGeometry`] when the points are
/// coincident or collinear.
pub fn plane_from_points(p1: &Vec3d, p2: &Vec3d, p3: &Vec3d) -> Result<Plane, DggrsError> {
  let n = v3d_normalize(&v3d_cross(&v3d_sub(p2, p1), &v3d_sub(p3, p1)))?;
  Ok(Plane {
    a: n.x,
    b: n.y,
    c: n.z,
    d: -v3d_dot(&n, p1),
  })
}

/// Signed distance from `p` to the plane, positive on the normal side.
#[inline]
#[must_use]
pub fn plane_signed_distance(plane: &Plane, p: &Vec3d) -> f64 {
  plane.a * p.x + plane.b * p.y + plane.c * p.z + plane.d
}

/// Unit normal of the plane.
#[inline]
#[must_use]
pub(crate) fn _plane_normal(plane: &Plane) -> Vec3d {
  Vec3d {
    x: plane.a,
    y: plane.b,
    z: plane.c,
  }
}
