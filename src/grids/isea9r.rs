// src/grids/isea9r.rs

//! ISEA9R: aperture 9 rhombic zones on the 5x6 net.
//!
//! A level `L` zone is one of the `3^L x 3^L` sub-rhombi of a root rhombus,
//! addressed by its global row (net `y`) and column (net `x`).

use crate::constants::{
  A9_64K_DEPTH, A9_INDEX_MAX_DEPTH, A9_MAX_DEPTH, EARTH_AREA_M2, I9R_MAX_LEVEL, NUM_ROOT_RHOMBI,
};
use crate::coords::net5x6::{glue_across, root_square, wrap, NetCoord};
use crate::crs::{IseaProjection, Projection};
use crate::grids::{pow3, Grid, PlaneEdge};
use crate::types::{DggrsError, DggrsZone, GeoPoint, GridFamily, Vec2d, NULL_ZONE};
use crate::zone::RhombicZone;
use tracing::debug;

/// Edge directions in the doubled lattice: left, top, right, bottom.
const DIRS: [NetCoord; 4] = [
  NetCoord::new(-1, 0),
  NetCoord::new(0, -1),
  NetCoord::new(1, 0),
  NetCoord::new(0, 1),
];

#[derive(Debug, Clone)]
pub struct Isea9r {
  projection: IseaProjection,
}

impl Isea9r {
  pub fn new() -> Result<Self, DggrsError> {
    let projection = IseaProjection::new()?;
    debug!(grid = "ISEA9R", "grid constructed");
    Ok(Self { projection })
  }

  #[inline]
  fn _root(z: RhombicZone) -> i32 {
    let p = pow3(z.level());
    ((z.col() / p) + (z.row() / p)) as i32
  }
}

/// Shared parts of the two aperture 9 grids.
pub(crate) mod aperture9 {
  use super::*;

  pub(crate) fn parent(zone: DggrsZone) -> Vec<DggrsZone> {
    let z = RhombicZone::from(zone);
    if z.level() == 0 {
      return Vec::new();
    }
    vec![RhombicZone::new(z.level() - 1, z.row() / 3, z.col() / 3).into()]
  }

  pub(crate) fn children(zone: DggrsZone, max_level: i32) -> Vec<DggrsZone> {
    let z = RhombicZone::from(zone);
    if z.level() >= max_level {
      return Vec::new();
    }
    let (r, c) = (3 * z.row(), 3 * z.col());
    let mut out = Vec::with_capacity(9);
    out.push(RhombicZone::new(z.level() + 1, r + 1, c + 1).into());
    for i in 0..3 {
      for j in 0..3 {
        if i != 1 || j != 1 {
          out.push(RhombicZone::new(z.level() + 1, r + i, c + j).into());
        }
      }
    }
    out
  }

  pub(crate) fn centroid_child(zone: DggrsZone, max_level: i32) -> DggrsZone {
    let z = RhombicZone::from(zone);
    if z.level() >= max_level {
      return NULL_ZONE;
    }
    RhombicZone::new(z.level() + 1, 3 * z.row() + 1, 3 * z.col() + 1).into()
  }

  pub(crate) fn is_centroid_child(zone: DggrsZone) -> bool {
    let z = RhombicZone::from(zone);
    z.level() > 0 && z.row() % 3 == 1 && z.col() % 3 == 1
  }

  pub(crate) fn count_sub_zones(depth: i32) -> u64 {
    9u64.saturating_pow(depth as u32)
  }

  /// Row-major position within the `3^depth` square block under `zone`.
  pub(crate) fn sub_zone_at_index(zone: DggrsZone, depth: i32, index: u64) -> DggrsZone {
    let z = RhombicZone::from(zone);
    let side = pow3(depth);
    if index >= side.saturating_mul(side) {
      return NULL_ZONE;
    }
    RhombicZone::new(z.level() + depth, z.row() * side + index / side, z.col() * side + index % side).into()
  }

  pub(crate) fn sub_zone_index(zone: DggrsZone, sub_zone: DggrsZone) -> Option<u64> {
    let (a, b) = (RhombicZone::from(zone), RhombicZone::from(sub_zone));
    if !contains(zone, sub_zone) {
      return None;
    }
    let side = pow3(b.level() - a.level());
    Some((b.row() - a.row() * side) * side + (b.col() - a.col() * side))
  }

  pub(crate) fn contains(a: DggrsZone, b: DggrsZone) -> bool {
    let (a, b) = (RhombicZone::from(a), RhombicZone::from(b));
    if b.level() < a.level() {
      return false;
    }
    let side = pow3(b.level() - a.level());
    b.row() / side == a.row() && b.col() / side == a.col()
  }

  pub(crate) fn sub_zones(zone: DggrsZone, depth: i32) -> impl Iterator<Item = DggrsZone> {
    let z = RhombicZone::from(zone);
    let side = pow3(depth);
    let level = z.level() + depth;
    let (r0, c0) = (z.row() * side, z.col() * side);
    (0..side).flat_map(move |i| (0..side).map(move |j| DggrsZone::from(RhombicZone::new(level, r0 + i, c0 + j))))
  }
}

impl Grid for Isea9r {
  fn family(&self) -> GridFamily {
    GridFamily::Isea9r
  }

  fn refinement_ratio(&self) -> u32 {
    9
  }

  fn max_children(&self) -> usize {
    9
  }

  fn max_parents(&self) -> usize {
    1
  }

  fn max_neighbors(&self) -> usize {
    4
  }

  fn max_level(&self) -> i32 {
    I9R_MAX_LEVEL
  }

  fn depth_64k(&self) -> i32 {
    A9_64K_DEPTH
  }

  fn max_depth(&self) -> i32 {
    A9_MAX_DEPTH
  }

  fn index_max_depth(&self) -> i32 {
    A9_INDEX_MAX_DEPTH
  }

  fn count_zones(&self, level: i32) -> u64 {
    10u64.saturating_mul(9u64.saturating_pow(level.max(0) as u32))
  }

  fn root_zones(&self) -> Vec<DggrsZone> {
    (0..NUM_ROOT_RHOMBI)
      .map(|root| {
        let k = u64::from(root as u32 / 2);
        let row = if root % 2 == 0 { k } else { k + 1 };
        RhombicZone::new(0, row, k).into()
      })
      .collect()
  }

  fn is_valid(&self, zone: DggrsZone) -> bool {
    let z = RhombicZone::from(zone);
    if zone.is_null() || z.level() > I9R_MAX_LEVEL {
      return false;
    }
    let p = pow3(z.level());
    if z.row() >= 6 * p || z.col() >= 5 * p {
      return false;
    }
    let (cy, cx) = (z.row() / p, z.col() / p);
    cy == cx || cy == cx + 1
  }

  fn level(&self, zone: DggrsZone) -> i32 {
    RhombicZone::from(zone).level()
  }

  fn text_id(&self, zone: DggrsZone) -> String {
    RhombicZone::from(zone).to_text()
  }

  fn parse_text_id(&self, text: &str) -> Option<DggrsZone> {
    let zone = DggrsZone::from(RhombicZone::from_text(text)?);
    self.is_valid(zone).then_some(zone)
  }

  fn parents(&self, zone: DggrsZone) -> Vec<DggrsZone> {
    aperture9::parent(zone)
  }

  fn children(&self, zone: DggrsZone) -> Vec<DggrsZone> {
    aperture9::children(zone, I9R_MAX_LEVEL)
  }

  fn centroid_child(&self, zone: DggrsZone) -> DggrsZone {
    aperture9::centroid_child(zone, I9R_MAX_LEVEL)
  }

  fn is_centroid_child(&self, zone: DggrsZone) -> bool {
    aperture9::is_centroid_child(zone)
  }

  fn neighbors(&self, zone: DggrsZone) -> Vec<(DggrsZone, i32)> {
    let z = RhombicZone::from(zone);
    let level = z.level();
    let n = 2 * pow3(level) as i64;
    let root = Self::_root(z);
    let c = NetCoord::new(2 * z.col() as i64 + 1, 2 * z.row() as i64 + 1);
    let mut out = Vec::with_capacity(4);
    for (nb_type, d) in DIRS.iter().enumerate() {
      let b = c + d.scale(2);
      let wb = wrap(b, n);
      let dd = wb.y.div_euclid(n) - wb.x.div_euclid(n);
      let cell = if dd == 0 || dd == 1 {
        Some(wb)
      } else {
        // The edge midpoint is glued across the interruption, then the
        // step continues in the direction the edge now faces
        glue_across(c + *d, b, n, root).and_then(|(m, rot)| {
          let ld = rot.apply(*d);
          let e = if m.x.rem_euclid(2) == 0 {
            NetCoord::new(ld.x.signum(), 0)
          } else {
            NetCoord::new(0, ld.y.signum())
          };
          let w = wrap(m + e, n);
          let dd = w.y.div_euclid(n) - w.x.div_euclid(n);
          (dd == 0 || dd == 1).then_some(w)
        })
      };
      if let Some(w) = cell {
        out.push((RhombicZone::new(level, (w.y / 2) as u64, (w.x / 2) as u64).into(), nb_type as i32));
      }
    }
    out
  }

  fn edge_count(&self, _zone: DggrsZone) -> usize {
    4
  }

  fn projection(&self) -> &dyn Projection {
    &self.projection
  }

  fn plane_centroid(&self, zone: DggrsZone) -> (Vec2d, Option<i32>) {
    let z = RhombicZone::from(zone);
    let p = pow3(z.level()) as f64;
    (
      Vec2d {
        x: (z.col() as f64 + 0.5) / p,
        y: (z.row() as f64 + 0.5) / p,
      },
      Some(Self::_root(z)),
    )
  }

  fn plane_edges(&self, zone: DggrsZone) -> Vec<PlaneEdge> {
    let z = RhombicZone::from(zone);
    let p = pow3(z.level()) as f64;
    let (x0, y0) = (z.col() as f64 / p, z.row() as f64 / p);
    let step = 1.0 / p;
    // The net is mirrored with respect to the sphere: clockwise here
    let corners = [
      Vec2d { x: x0, y: y0 },
      Vec2d { x: x0, y: y0 + step },
      Vec2d {
        x: x0 + step,
        y: y0 + step,
      },
      Vec2d { x: x0 + step, y: y0 },
    ];
    let hint = Some(Self::_root(z));
    (0..4)
      .map(|i| PlaneEdge {
        from: corners[i],
        to: corners[(i + 1) % 4],
        hint,
      })
      .collect()
  }

  fn zone_from_point(&self, level: i32, point: &GeoPoint) -> DggrsZone {
    let r = self.projection.to_rhombus(point);
    let p = pow3(level);
    let pf = p as f64;
    let (cx, cy) = root_square(r.root);
    let col = ((r.u * pf).floor() as u64).min(p - 1);
    let row = ((r.v * pf).floor() as u64).min(p - 1);
    RhombicZone::new(level, cy as u64 * p + row, cx as u64 * p + col).into()
  }

  fn zone_area(&self, zone: DggrsZone) -> f64 {
    self.ref_zone_area(self.level(zone))
  }

  fn ref_zone_area(&self, level: i32) -> f64 {
    EARTH_AREA_M2 / (10.0 * 9f64.powi(level))
  }

  fn count_sub_zones(&self, _zone: DggrsZone, depth: i32) -> u64 {
    aperture9::count_sub_zones(depth)
  }

  fn sub_zone_at_index(&self, zone: DggrsZone, depth: i32, index: u64) -> DggrsZone {
    aperture9::sub_zone_at_index(zone, depth, index)
  }

  fn sub_zone_index(&self, zone: DggrsZone, sub_zone: DggrsZone) -> Option<u64> {
    aperture9::sub_zone_index(zone, sub_zone)
  }

  fn sub_zones<'a>(&'a self, zone: DggrsZone, depth: i32) -> Box<dyn Iterator<Item = DggrsZone> + 'a> {
    Box::new(aperture9::sub_zones(zone, depth))
  }

  fn contains(&self, a: DggrsZone, b: DggrsZone) -> bool {
    aperture9::contains(a, b)
  }

  fn overlaps(&self, a: DggrsZone, b: DggrsZone) -> bool {
    aperture9::contains(a, b) || aperture9::contains(b, a)
  }
}
