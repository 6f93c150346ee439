// src/crs/mod.rs

//! CRS identifiers and the transforms between WGS84, the grids' native
//! planes and the supported projected CRSs.

pub mod icosahedron;
pub mod rhealpix;

pub use icosahedron::{IseaProjection, RhombusPoint};
pub use rhealpix::RhealpixProjection;

use crate::constants::{
  AUTHALIC_RADIUS_M, CRS_CODE_MASK, CRS_CODE_OFFSET, CRS_H_FLAG, CRS_REGISTRY_MASK, ISEA_PLANAR_EDGE_M, M_SQRT3_2,
};
use crate::types::{Crs, CrsPoint, CrsRegistry, DggrsError, GeoPoint, GridFamily, Vec2d};

impl Crs {
  /// The grid's native CRS.
  pub const NATIVE: Crs = Crs(0);

  /// Packs a registry and code. `h` flags a CRS with a height axis.
  #[inline]
  #[must_use]
  pub const fn new(registry: CrsRegistry, code: u32, h: bool) -> Self {
    let mut bits = (registry as u64) & CRS_REGISTRY_MASK;
    bits |= ((code as u64) << CRS_CODE_OFFSET) & CRS_CODE_MASK;
    if h {
      bits |= CRS_H_FLAG;
    }
    Crs(bits)
  }

  /// Registry part, or `None` for an unknown registry number.
  #[must_use]
  pub fn registry(self) -> Option<CrsRegistry> {
    match self.0 & CRS_REGISTRY_MASK {
      0 => Some(CrsRegistry::Epsg),
      1 => Some(CrsRegistry::Ogc),
      _ => None,
    }
  }

  #[inline]
  #[must_use]
  pub const fn code(self) -> u32 {
    ((self.0 & CRS_CODE_MASK) >> CRS_CODE_OFFSET) as u32
  }

  #[inline]
  #[must_use]
  pub const fn has_height(self) -> bool {
    self.0 & CRS_H_FLAG != 0
  }

  #[inline]
  #[must_use]
  pub const fn is_native(self) -> bool {
    self.0 == 0
  }
}

/// WGS84 geographic, latitude first, in degrees.
pub const EPSG_4326: Crs = Crs::new(CrsRegistry::Epsg, 4326, false);
/// WGS84 geographic, longitude first, in degrees.
pub const OGC_CRS84: Crs = Crs::new(CrsRegistry::Ogc, 84, false);
/// The 5x6 net of the ISEA projection in unit rhombus coordinates.
pub const OGC_ISEA_5X6: Crs = Crs::new(CrsRegistry::Ogc, 153_456, false);
/// Planar ISEA in metres: the net sheared into equilateral triangles.
pub const OGC_ISEA_PLANAR: Crs = Crs::new(CrsRegistry::Ogc, 1534, false);

/// How a CRS relates to a grid's native plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsKind {
  /// `(lat, lon)` in degrees.
  LatLon,
  /// `(lon, lat)` in degrees.
  LonLat,
  /// Unit 5x6 net coordinates.
  IseaNet,
  /// ISEA planar metres.
  IseaPlanar,
  /// rHEALPix plane in metres on the authalic sphere.
  RhealpixMetres,
}

impl CrsKind {
  #[inline]
  #[must_use]
  pub const fn is_geographic(self) -> bool {
    matches!(self, CrsKind::LatLon | CrsKind::LonLat)
  }
}

/// Resolves `crs` for a grid of `family`.
pub fn crs_kind(crs: Crs, family: GridFamily) -> Result<CrsKind, DggrsError> {
  let isea = matches!(family, GridFamily::Isea3h | GridFamily::Isea9r);
  if crs.is_native() {
    return Ok(if isea { CrsKind::IseaNet } else { CrsKind::RhealpixMetres });
  }
  match (crs.registry(), crs.code()) {
    (Some(CrsRegistry::Epsg), 4326) => Ok(CrsKind::LatLon),
    (Some(CrsRegistry::Ogc), 84) => Ok(CrsKind::LonLat),
    (Some(CrsRegistry::Ogc), 153_456) if isea => Ok(CrsKind::IseaNet),
    (Some(CrsRegistry::Ogc), 1534) if isea => Ok(CrsKind::IseaPlanar),
    _ => Err(DggrsError::UnsupportedCrs(crs)),
  }
}

/// A projection of the authalic sphere onto a grid's native plane.
pub trait Projection: Send + Sync {
  /// Native plane coordinates of a WGS84 point.
  fn forward(&self, p: &GeoPoint) -> Vec2d;

  /// WGS84 point of a native plane position. `hint` names the root the
  /// position was reached from, for planes with interruptions. Returns
  /// `None` outside the projection's domain.
  fn inverse(&self, q: &Vec2d, hint: Option<i32>) -> Option<GeoPoint>;
}

/// Native plane position to CRS coordinates.
pub fn plane_to_crs(
  proj: &dyn Projection,
  kind: CrsKind,
  q: &Vec2d,
  hint: Option<i32>,
) -> Result<CrsPoint, DggrsError> {
  match kind {
    CrsKind::LatLon | CrsKind::LonLat => {
      let g = proj.inverse(q, hint).ok_or(DggrsError::DegenerateGeometry)?;
      Ok(geo_to_crs_direct(kind, &g))
    }
    CrsKind::IseaNet => Ok(CrsPoint { x: q.x, y: q.y }),
    CrsKind::IseaPlanar => Ok(CrsPoint {
      x: ISEA_PLANAR_EDGE_M * (q.x - 0.5 * q.y),
      y: -ISEA_PLANAR_EDGE_M * M_SQRT3_2 * q.y,
    }),
    CrsKind::RhealpixMetres => Ok(CrsPoint {
      x: q.x * AUTHALIC_RADIUS_M,
      y: q.y * AUTHALIC_RADIUS_M,
    }),
  }
}

/// CRS coordinates to a native plane position. Geographic input is
/// projected.
#[must_use]
pub fn crs_to_plane(proj: &dyn Projection, kind: CrsKind, p: &CrsPoint) -> Vec2d {
  match kind {
    CrsKind::LatLon | CrsKind::LonLat => proj.forward(&crs_to_geo_direct(kind, p)),
    CrsKind::IseaNet => Vec2d { x: p.x, y: p.y },
    CrsKind::IseaPlanar => {
      let y = -p.y / (ISEA_PLANAR_EDGE_M * M_SQRT3_2);
      Vec2d {
        x: p.x / ISEA_PLANAR_EDGE_M + 0.5 * y,
        y,
      }
    }
    CrsKind::RhealpixMetres => Vec2d {
      x: p.x / AUTHALIC_RADIUS_M,
      y: p.y / AUTHALIC_RADIUS_M,
    },
  }
}

/// WGS84 point in a CRS.
pub fn geo_to_crs(proj: &dyn Projection, kind: CrsKind, g: &GeoPoint) -> Result<CrsPoint, DggrsError> {
  if kind.is_geographic() {
    return Ok(geo_to_crs_direct(kind, g));
  }
  plane_to_crs(proj, kind, &proj.forward(g), None)
}

/// CRS point back to WGS84.
pub fn crs_to_geo(proj: &dyn Projection, kind: CrsKind, p: &CrsPoint) -> Result<GeoPoint, DggrsError> {
  if kind.is_geographic() {
    return Ok(crs_to_geo_direct(kind, p));
  }
  proj
    .inverse(&crs_to_plane(proj, kind, p), None)
    .ok_or(DggrsError::DegenerateGeometry)
}

fn geo_to_crs_direct(kind: CrsKind, g: &GeoPoint) -> CrsPoint {
  if kind == CrsKind::LonLat {
    CrsPoint {
      x: g.lon_degrees(),
      y: g.lat_degrees(),
    }
  } else {
    CrsPoint {
      x: g.lat_degrees(),
      y: g.lon_degrees(),
    }
  }
}

fn crs_to_geo_direct(kind: CrsKind, p: &CrsPoint) -> GeoPoint {
  if kind == CrsKind::LonLat {
    GeoPoint::from_degrees(p.y, p.x)
  } else {
    GeoPoint::from_degrees(p.x, p.y)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_crs_packing() {
    assert_eq!(EPSG_4326.registry(), Some(CrsRegistry::Epsg));
    assert_eq!(EPSG_4326.code(), 4326);
    assert_eq!(OGC_ISEA_5X6.registry(), Some(CrsRegistry::Ogc));
    assert_eq!(OGC_ISEA_5X6.code(), 153_456);
    assert!(!OGC_CRS84.has_height());
    assert!(Crs::new(CrsRegistry::Epsg, 4979, true).has_height());
    assert!(Crs::NATIVE.is_native());
    assert!(!EPSG_4326.is_native());
  }

  #[test]
  fn test_crs_kinds() {
    assert_eq!(crs_kind(EPSG_4326, GridFamily::RHealpix), Ok(CrsKind::LatLon));
    assert_eq!(crs_kind(OGC_CRS84, GridFamily::Isea9r), Ok(CrsKind::LonLat));
    assert_eq!(crs_kind(Crs::NATIVE, GridFamily::Isea3h), Ok(CrsKind::IseaNet));
    assert_eq!(crs_kind(Crs::NATIVE, GridFamily::RHealpix), Ok(CrsKind::RhealpixMetres));
    assert_eq!(crs_kind(OGC_ISEA_PLANAR, GridFamily::Isea3h), Ok(CrsKind::IseaPlanar));
    assert_eq!(
      crs_kind(OGC_ISEA_5X6, GridFamily::RHealpix),
      Err(DggrsError::UnsupportedCrs(OGC_ISEA_5X6))
    );
    let mercator = Crs::new(CrsRegistry::Epsg, 3857, false);
    assert_eq!(crs_kind(mercator, GridFamily::Isea3h), Err(DggrsError::UnsupportedCrs(mercator)));
  }

  #[test]
  fn test_isea_planar_affine() {
    let proj = IseaProjection::new().unwrap();
    let q = Vec2d { x: 2.0, y: 2.0 };
    let p = plane_to_crs(&proj, CrsKind::IseaPlanar, &q, None).unwrap();
    assert!((p.x - ISEA_PLANAR_EDGE_M).abs() < 1e-6);
    assert!((p.y + 2.0 * ISEA_PLANAR_EDGE_M * M_SQRT3_2).abs() < 1e-6);
    let back = crs_to_plane(&proj, CrsKind::IseaPlanar, &p);
    assert!((back.x - q.x).abs() < 1e-12 && (back.y - q.y).abs() < 1e-12);
  }

  #[test]
  fn test_geographic_axis_order() {
    let proj = IseaProjection::new().unwrap();
    let g = GeoPoint::from_degrees(45.0, -120.0);
    let a = geo_to_crs(&proj, CrsKind::LatLon, &g).unwrap();
    let b = geo_to_crs(&proj, CrsKind::LonLat, &g).unwrap();
    assert!((a.x - 45.0).abs() < 1e-12 && (a.y + 120.0).abs() < 1e-12);
    assert!((b.x + 120.0).abs() < 1e-12 && (b.y - 45.0).abs() < 1e-12);
    let g2 = crs_to_geo(&proj, CrsKind::LonLat, &b).unwrap();
    assert!((g2.lat - g.lat).abs() < 1e-15 && (g2.lon - g.lon).abs() < 1e-15);
  }

  #[test]
  fn test_net_round_trip_through_projection() {
    let proj = IseaProjection::new().unwrap();
    let g = GeoPoint::from_degrees(-33.9, 18.4);
    let net = geo_to_crs(&proj, CrsKind::IseaNet, &g).unwrap();
    let back = crs_to_geo(&proj, CrsKind::IseaNet, &net).unwrap();
    assert!((back.lat - g.lat).abs() < 1e-9 && (back.lon - g.lon).abs() < 1e-9);
  }
}
