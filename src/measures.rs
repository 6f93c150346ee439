// src/measures.rs

use crate::constants::AUTHALIC_RADIUS_M;
use crate::latlng::authalic_latitude;
use crate::math::vec3d::{_geo_to_vec3d, v3d_cross, v3d_dot};
use crate::types::{GeoPoint, Vec3d};

fn _authalic_vec3d(p: &GeoPoint) -> Vec3d {
  _geo_to_vec3d(&GeoPoint {
    lat: authalic_latitude(p.lat),
    lon: p.lon,
  })
}

/// Area in steradians of the spherical polygon whose WGS84 vertices are
/// `ring`, measured on the authalic sphere. Edges are great-circle arcs.
///
/// The polygon is fanned into triangles from the first vertex; each
/// triangle's excess is `2·atan2(V, S)` with `V` the triple product and
/// `S = 1 + a·b + b·c + c·a`.
pub fn ring_area_rads2(ring: &[GeoPoint]) -> f64 {
  let num_verts = ring.len();
  if num_verts < 3 {
    return 0.0;
  }

  let anchor = _authalic_vec3d(&ring[0]);
  let mut total = 0.0;
  let mut v1 = _authalic_vec3d(&ring[1]);
  for p in &ring[2..] {
    let v2 = _authalic_vec3d(p);
    let v = v3d_dot(&v3d_cross(&anchor, &v1), &v2);
    let s = 1.0 + v3d_dot(&anchor, &v1) + v3d_dot(&v1, &v2) + v3d_dot(&v2, &anchor);
    total += v.atan2(s);
    v1 = v2;
  }
  (total * 2.0).abs()
}

/// Area in square metres of a WGS84 ring, see [`ring_area_rads2`].
///
/// The authalic sphere preserves areas, so densely refined zone outlines
/// measure close to their geodetic area.
pub fn ring_area_m2(ring: &[GeoPoint]) -> f64 {
  ring_area_rads2(ring) * AUTHALIC_RADIUS_M * AUTHALIC_RADIUS_M
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::{EARTH_AREA_M2, M_PI, M_PI_2};

  #[test]
  fn test_octant_area() {
    let verts = [
      GeoPoint { lat: 0.0, lon: 0.0 },
      GeoPoint { lat: M_PI_2, lon: 0.0 },
      GeoPoint { lat: 0.0, lon: M_PI_2 },
    ];
    let area = ring_area_rads2(&verts);
    assert!((area - M_PI / 2.0).abs() < 1e-7, "octant is 1/8 of the sphere, got {area}");
    let m2 = ring_area_m2(&verts);
    assert!((m2 - EARTH_AREA_M2 / 8.0).abs() / m2 < 1e-7, "octant in square metres");
  }

  #[test]
  fn test_degenerate_ring() {
    let verts = [GeoPoint::default(), GeoPoint { lat: 0.1, lon: 0.1 }];
    assert!(ring_area_rads2(&verts).abs() < f64::EPSILON);
  }

  #[test]
  fn test_winding_independent() {
    let mut verts = vec![
      GeoPoint::from_degrees(10.0, 10.0),
      GeoPoint::from_degrees(10.0, 20.0),
      GeoPoint::from_degrees(20.0, 20.0),
      GeoPoint::from_degrees(20.0, 10.0),
    ];
    let a = ring_area_rads2(&verts);
    verts.reverse();
    assert!((a - ring_area_rads2(&verts)).abs() < 1e-15);
  }
}
