// src/latlng.rs

use crate::constants::{
  AUTHALIC_RADIUS_M, M_180_PI, M_2PI, M_PI, M_PI_180, M_PI_2, WGS84_E, WGS84_E2, WGS84_QP,
};
use crate::types::GeoPoint;
use std::f64;

impl GeoPoint {
  /// Point from radians. Longitude is normalized to `[-PI, PI)` and
  /// latitude clamped to `[-PI/2, PI/2]`.
  #[inline]
  #[must_use]
  pub fn new(lat: f64, lon: f64) -> Self {
    Self {
      lat: constrain_lat(lat),
      lon: constrain_lon(lon),
    }
  }

  /// Point from decimal degrees, normalized as [`GeoPoint::new`].
  #[inline]
  #[must_use]
  pub fn from_degrees(lat: f64, lon: f64) -> Self {
    Self::new(degs_to_rads(lat), degs_to_rads(lon))
  }

  #[inline]
  #[must_use]
  pub fn lat_degrees(&self) -> f64 {
    rads_to_degs(self.lat)
  }

  #[inline]
  #[must_use]
  pub fn lon_degrees(&self) -> f64 {
    rads_to_degs(self.lon)
  }
}

/// Normalizes radians to a value between `0.0` and `2 * PI`.
#[inline]
#[must_use]
pub(crate) fn _pos_angle_rads(rads: f64) -> f64 {
  let tmp = rads.rem_euclid(M_2PI);
  // rem_euclid can round up to exactly 2PI for tiny negative inputs
  if tmp >= M_2PI {
    0.0
  } else {
    tmp
  }
}

/// Clamps latitude to the range `[-PI/2, PI/2]`.
#[inline]
#[must_use]
pub(crate) fn constrain_lat(lat: f64) -> f64 {
  lat.clamp(-M_PI_2, M_PI_2)
}

/// Constrains longitude to the range `[-PI, PI)`.
#[inline]
#[must_use]
pub(crate) fn constrain_lon(lon: f64) -> f64 {
  if (-M_PI..M_PI).contains(&lon) {
    return lon;
  }
  _pos_angle_rads(lon + M_PI) - M_PI
}

/// The great circle distance in radians between two spherical coordinates
/// (Haversine formula).
pub fn great_circle_distance_rads(a: &GeoPoint, b: &GeoPoint) -> f64 {
  let sin_lat_half = ((b.lat - a.lat) * 0.5).sin();
  let sin_lon_half = ((b.lon - a.lon) * 0.5).sin();
  let h = sin_lat_half * sin_lat_half + a.lat.cos() * b.lat.cos() * sin_lon_half * sin_lon_half;
  let h = h.clamp(0.0, 1.0);
  2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// The great circle distance in metres on the authalic sphere.
pub fn great_circle_distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
  great_circle_distance_rads(a, b) * AUTHALIC_RADIUS_M
}

/// Converts degrees to radians.
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * M_PI_180
}

/// Converts radians to degrees.
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * M_180_PI
}

/// Authalic q function of the WGS84 ellipsoid.
#[inline]
fn _authalic_q(sin_phi: f64) -> f64 {
  let es = WGS84_E * sin_phi;
  (1.0 - WGS84_E2)
    * (sin_phi / (1.0 - WGS84_E2 * sin_phi * sin_phi) - (1.0 / (2.0 * WGS84_E)) * ((1.0 - es) / (1.0 + es)).ln())
}

/// Authalic latitude of geodetic latitude `phi`: the latitude on the sphere of
/// equal surface that preserves areas between parallels.
#[must_use]
pub fn authalic_latitude(phi: f64) -> f64 {
  (_authalic_q(phi.sin()) / WGS84_QP).clamp(-1.0, 1.0).asin()
}

/// Geodetic latitude of authalic latitude `beta`.
///
/// Series expansion refined by two Newton steps on q.
#[must_use]
pub fn geodetic_latitude(beta: f64) -> f64 {
  let e4 = WGS84_E2 * WGS84_E2;
  let e6 = e4 * WGS84_E2;
  let mut phi = beta
    + (WGS84_E2 / 3.0 + 31.0 * e4 / 180.0 + 517.0 * e6 / 5040.0) * (2.0 * beta).sin()
    + (23.0 * e4 / 360.0 + 251.0 * e6 / 3780.0) * (4.0 * beta).sin()
    + (761.0 * e6 / 45360.0) * (6.0 * beta).sin();
  let q = WGS84_QP * beta.sin();
  for _ in 0..2 {
    let (s, c) = phi.sin_cos();
    if c.abs() < 1e-12 {
      break;
    }
    let es = WGS84_E * s;
    let one = 1.0 - es * es;
    phi += one * one / (2.0 * c)
      * (q / (1.0 - WGS84_E2) - s / one + (1.0 / (2.0 * WGS84_E)) * ((1.0 - es) / (1.0 + es)).ln());
  }
  phi.clamp(-M_PI_2, M_PI_2)
}
