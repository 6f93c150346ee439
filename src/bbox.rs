// src/bbox.rs

use crate::constants::{EPSILON_RAD, M_2PI, M_PI, M_PI_2, WGS84_B, WGS84_E, WGS84_E2};
use crate::latlng::constrain_lon;
use crate::types::{GeoExtent, GeoPoint};

impl GeoExtent {
  /// The whole globe.
  pub const WHOLE_WORLD: GeoExtent = GeoExtent {
    ll: GeoPoint { lat: -M_PI_2, lon: -M_PI },
    ur: GeoPoint { lat: M_PI_2, lon: M_PI },
  };

  /// An empty extent.
  pub const NULL: GeoExtent = GeoExtent {
    ll: GeoPoint { lat: M_PI_2, lon: M_PI },
    ur: GeoPoint { lat: -M_PI_2, lon: -M_PI },
  };

  /// Resets to the empty extent.
  pub fn clear(&mut self) {
    *self = Self::NULL;
  }

  /// An extent is null when its latitude range is inverted.
  #[must_use]
  pub fn is_null(&self) -> bool {
    self.ll.lat > self.ur.lat
  }

  /// Whether the longitude range crosses the antimeridian.
  #[inline]
  #[must_use]
  pub fn is_transmeridian(&self) -> bool {
    self.ur.lon < self.ll.lon
  }

  /// Longitude span in radians, accounting for wrap.
  #[must_use]
  pub fn width_rads(&self) -> f64 {
    if self.is_transmeridian() {
      self.ur.lon - self.ll.lon + M_2PI
    } else {
      self.ur.lon - self.ll.lon
    }
  }

  /// Latitude span in radians.
  #[must_use]
  pub fn height_rads(&self) -> f64 {
    self.ur.lat - self.ll.lat
  }

  /// Whether the extent contains `point`, boundaries included.
  #[must_use]
  pub fn contains_point(&self, point: &GeoPoint) -> bool {
    if self.is_null() {
      return false;
    }
    if point.lat < self.ll.lat - EPSILON_RAD || point.lat > self.ur.lat + EPSILON_RAD {
      return false;
    }
    lon_intervals(self)
      .iter()
      .flatten()
      .any(|&(w, e)| point.lon >= w - EPSILON_RAD && point.lon <= e + EPSILON_RAD)
  }

  /// Whether the two extents share at least one point.
  #[must_use]
  pub fn intersects(&self, other: &GeoExtent) -> bool {
    if self.is_null() || other.is_null() {
      return false;
    }
    if self.ll.lat > other.ur.lat || other.ll.lat > self.ur.lat {
      return false;
    }
    let a = lon_intervals(self);
    let b = lon_intervals(other);
    a.iter()
      .flatten()
      .any(|&(aw, ae)| b.iter().flatten().any(|&(bw, be)| aw <= be && bw <= ae))
  }

  /// Whether `other` lies entirely within this extent.
  #[must_use]
  pub fn contains(&self, other: &GeoExtent) -> bool {
    if self.is_null() || other.is_null() {
      return false;
    }
    if other.ll.lat < self.ll.lat || other.ur.lat > self.ur.lat {
      return false;
    }
    let a = lon_intervals(self);
    lon_intervals(other)
      .iter()
      .flatten()
      .all(|&(bw, be)| a.iter().flatten().any(|&(aw, ae)| aw <= bw && be <= ae))
  }

  /// Grows the latitude range to include `lat`.
  pub fn extend_lat(&mut self, lat: f64) {
    self.ll.lat = self.ll.lat.min(lat);
    self.ur.lat = self.ur.lat.max(lat);
  }

  /// Geodetic area of the extent on the WGS84 ellipsoid, in square metres.
  #[must_use]
  pub fn geodetic_area(&self) -> f64 {
    if self.is_null() {
      return 0.0;
    }
    self.width_rads() * WGS84_B * WGS84_B * (_band_integral(self.ur.lat) - _band_integral(self.ll.lat))
  }

  /// The extent grown by the given margins in radians on every side.
  /// Latitudes stop at the poles; a longitude range reaching all the way
  /// round becomes the full range.
  #[must_use]
  pub fn inflated(&self, lat_margin: f64, lon_margin: f64) -> GeoExtent {
    if self.is_null() {
      return *self;
    }
    let mut out = *self;
    out.ll.lat = (self.ll.lat - lat_margin).max(-M_PI_2);
    out.ur.lat = (self.ur.lat + lat_margin).min(M_PI_2);
    if self.width_rads() + 2.0 * lon_margin >= M_2PI {
      out.ll.lon = -M_PI;
      out.ur.lon = M_PI;
    } else {
      out.ll.lon = constrain_lon(self.ll.lon - lon_margin);
      out.ur.lon = constrain_lon(self.ur.lon + lon_margin);
    }
    out
  }
}

/// Longitude range split into at most two non-wrapping intervals.
fn lon_intervals(e: &GeoExtent) -> [Option<(f64, f64)>; 2] {
  if e.is_transmeridian() {
    [Some((e.ll.lon, M_PI)), Some((-M_PI, e.ur.lon))]
  } else {
    [Some((e.ll.lon, e.ur.lon)), None]
  }
}

/// Antiderivative of the ellipsoidal band area per radian of longitude,
/// divided by b².
fn _band_integral(phi: f64) -> f64 {
  let s = phi.sin();
  let es = WGS84_E * s;
  s / (2.0 * (1.0 - WGS84_E2 * s * s)) + ((1.0 + es) / (1.0 - es)).ln() / (4.0 * WGS84_E)
}

/// Smallest extent enclosing the closed ring `points`.
///
/// A ring winding around a pole gets the full longitude range and reaches
/// that pole. Otherwise the longitude range is the complement of the widest
/// gap between consecutive sorted longitudes, so rings straddling the
/// antimeridian produce a wrapping extent.
#[must_use]
pub fn extent_from_ring(points: &[GeoPoint]) -> GeoExtent {
  let mut extent = GeoExtent::NULL;
  if points.is_empty() {
    return extent;
  }
  for p in points {
    extent.extend_lat(p.lat);
  }

  let mut winding = 0.0;
  for (i, p) in points.iter().enumerate() {
    let q = &points[(i + 1) % points.len()];
    winding += constrain_lon(q.lon - p.lon);
  }
  if winding.abs() > M_PI {
    if winding > 0.0 {
      extent.ur.lat = M_PI_2;
    } else {
      extent.ll.lat = -M_PI_2;
    }
    extent.ll.lon = -M_PI;
    extent.ur.lon = M_PI;
    return extent;
  }
  // Poles have no meaningful longitude
  let mut lons: Vec<f64> = points
    .iter()
    .filter(|p| (p.lat.abs() - M_PI_2).abs() > EPSILON_RAD)
    .map(|p| constrain_lon(p.lon))
    .collect();
  if lons.is_empty() {
    extent.ll.lon = -M_PI;
    extent.ur.lon = M_PI;
    return extent;
  }
  lons.sort_by(f64::total_cmp);
  let mut gap = lons[0] + M_2PI - lons[lons.len() - 1];
  let mut west = lons[0];
  let mut east = lons[lons.len() - 1];
  for w in lons.windows(2) {
    if w[1] - w[0] > gap {
      gap = w[1] - w[0];
      west = w[1];
      east = w[0];
    }
  }
  extent.ll.lon = west;
  extent.ur.lon = east;
  extent
}
