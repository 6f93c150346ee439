// src/math/vec3d.rs

use crate::types::{DggrsError, GeoPoint, Vec3d};
use std::f64;

/// Square of a number.
#[inline]
fn _square(x: f64) -> f64 {
  x * x
}

/// Component-wise sum.
#[inline]
#[must_use]
pub fn v3d_add(a: &Vec3d, b: &Vec3d) -> Vec3d {
  Vec3d {
    x: a.x + b.x,
    y: a.y + b.y,
    z: a.z + b.z,
  }
}

/// Component-wise difference `a - b`.
#[inline]
#[must_use]
pub fn v3d_sub(a: &Vec3d, b: &Vec3d) -> Vec3d {
  Vec3d {
    x: a.x - b.x,
    y: a.y - b.y,
    z: a.z - b.z,
  }
}

#[inline]
#[must_use]
pub fn v3d_scale(a: &Vec3d, s: f64) -> Vec3d {
  Vec3d {
    x: a.x * s,
    y: a.y * s,
    z: a.z * s,
  }
}

#[inline]
#[must_use]
pub fn v3d_dot(a: &Vec3d, b: &Vec3d) -> f64 {
  a.x * b.x + a.y * b.y + a.z * b.z
}

#[inline]
#[must_use]
pub fn v3d_cross(a: &Vec3d, b: &Vec3d) -> Vec3d {
  Vec3d {
    x: a.y * b.z - a.z * b.y,
    y: a.z * b.x - a.x * b.z,
    z: a.x * b.y - a.y * b.x,
  }
}

#[inline]
#[must_use]
pub fn v3d_length(a: &Vec3d) -> f64 {
  v3d_dot(a, a).sqrt()
}

/// Unit vector in the direction of `a`.
///
/// Fails with [`DggrsError::DegenerateGeometry`] on a zero-length vector.
#[inline]
pub fn v3d_normalize(a: &Vec3d) -> Result<Vec3d, DggrsError> {
  let l = v3d_length(a);
  if l <= 0.0 || !l.is_finite() {
    return Err(DggrsError::DegenerateGeometry);
  }
  Ok(v3d_scale(a, 1.0 / l))
}

/// Angle between two vectors, in radians. Accurate for nearly parallel inputs.
#[inline]
#[must_use]
pub fn v3d_angle(a: &Vec3d, b: &Vec3d) -> f64 {
  v3d_length(&v3d_cross(a, b)).atan2(v3d_dot(a, b))
}

/// Calculate the square of the Euclidean distance between two 3D coordinates.
#[inline]
#[must_use]
pub(crate) fn _point_square_dist(v1: &Vec3d, v2: &Vec3d) -> f64 {
  _square(v1.x - v2.x) + _square(v1.y - v2.y) + _square(v1.z - v2.z)
}

/// Calculate the 3D Cartesian coordinate on a unit sphere from latitude and longitude.
#[inline]
#[must_use]
pub(crate) fn _geo_to_vec3d(geo: &GeoPoint) -> Vec3d {
  let r = geo.lat.cos();
  Vec3d {
    x: geo.lon.cos() * r,
    y: geo.lon.sin() * r,
    z: geo.lat.sin(),
  }
}

/// Latitude and longitude of the direction of `v` (need not be unit length).
#[inline]
#[must_use]
pub(crate) fn _vec3d_to_geo(v: &Vec3d) -> GeoPoint {
  GeoPoint {
    lat: v.z.atan2(v.x.hypot(v.y)),
    lon: v.y.atan2(v.x),
  }
}

/// Component of `v` orthogonal to unit vector `c`, normalized. Zero when `v` is parallel to `c`.
#[inline]
#[must_use]
pub(crate) fn _tangent(c: &Vec3d, v: &Vec3d) -> Vec3d {
  let t = v3d_sub(v, &v3d_scale(c, v3d_dot(v, c)));
  v3d_normalize(&t).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::{EPSILON_RAD, M_PI_2};

  #[test]
  fn test_point_square_dist() {
    let v1 = Vec3d { x: 0.0, y: 0.0, z: 0.0 };
    let v2 = Vec3d { x: 1.0, y: 0.0, z: 0.0 };
    let v5 = Vec3d { x: 1.0, y: 1.0, z: 2.0 };

    assert!(_point_square_dist(&v1, &v1).abs() < f64::EPSILON, "distance to self is 0");
    assert!((_point_square_dist(&v1, &v2) - 1.0).abs() < f64::EPSILON, "distance to <1,0,0> is 1");
    assert!((_point_square_dist(&v1, &v5) - 6.0).abs() < f64::EPSILON, "distance to <1,1,2> is 6");
  }

  #[test]
  fn test_cross_and_dot() {
    let x = Vec3d { x: 1.0, y: 0.0, z: 0.0 };
    let y = Vec3d { x: 0.0, y: 1.0, z: 0.0 };
    let z = v3d_cross(&x, &y);
    assert!((z.z - 1.0).abs() < f64::EPSILON, "x cross y is z");
    assert!(v3d_dot(&x, &y).abs() < f64::EPSILON, "orthogonal");
    assert!((v3d_dot(&z, &z) - 1.0).abs() < f64::EPSILON);
    let s = v3d_sub(&v3d_add(&x, &y), &y);
    assert!(_point_square_dist(&s, &x) < f64::EPSILON);
  }

  #[test]
  fn test_normalize() {
    let v = Vec3d { x: 3.0, y: 0.0, z: 4.0 };
    let n = v3d_normalize(&v).unwrap();
    assert!((v3d_length(&n) - 1.0).abs() < 1e-15);
    assert!((n.x - 0.6).abs() < 1e-15);
    assert_eq!(v3d_normalize(&Vec3d::default()), Err(DggrsError::DegenerateGeometry));
  }

  #[test]
  fn test_angle() {
    let a = Vec3d { x: 1.0, y: 0.0, z: 0.0 };
    let b = Vec3d { x: 0.0, y: 2.0, z: 0.0 };
    assert!((v3d_angle(&a, &b) - M_PI_2).abs() < 1e-15, "right angle");
    let c = Vec3d { x: 1.0, y: 1e-12, z: 0.0 };
    assert!((v3d_angle(&a, &c) - 1e-12).abs() < 1e-24, "tiny angle resolved");
  }

  #[test]
  fn test_geo_round_trip() {
    let origin = Vec3d::default();
    let g = GeoPoint { lat: 0.4, lon: -2.5 };
    let p = _geo_to_vec3d(&g);
    assert!((_point_square_dist(&origin, &p) - 1.0).abs() < EPSILON_RAD, "on the unit sphere");
    let back = _vec3d_to_geo(&v3d_scale(&p, 7.0));
    assert!((back.lat - g.lat).abs() < 1e-15);
    assert!((back.lon - g.lon).abs() < 1e-15);

    let pole = _geo_to_vec3d(&GeoPoint { lat: M_PI_2, lon: 0.0 });
    assert!((pole.z - 1.0).abs() < f64::EPSILON, "north pole");
  }

  #[test]
  fn test_tangent() {
    let c = Vec3d { x: 0.0, y: 0.0, z: 1.0 };
    let v = Vec3d { x: 2.0, y: 0.0, z: 5.0 };
    let t = _tangent(&c, &v);
    assert!((t.x - 1.0).abs() < 1e-15);
    assert!(t.z.abs() < 1e-15);
    assert_eq!(_tangent(&c, &c), Vec3d::default(), "parallel input has no tangent");
  }
}
