// src/grids/rhealpix.rs

//! rHEALPix: aperture 9 square zones on the rHEALPix projection.
//!
//! Level `L` zones form a `4s x 3s` array (`s = 3^L`) of which six `s x s`
//! blocks are used: the north square over face O, the equatorial faces
//! O, P, Q and R, and the south square under O. Rows grow southwards and
//! columns eastwards.

use crate::constants::{A9_64K_DEPTH, A9_INDEX_MAX_DEPTH, A9_MAX_DEPTH, EARTH_AREA_M2, M_PI, M_PI_2, NUM_RHP_FACES, RHP_MAX_LEVEL};
use crate::crs::{Projection, RhealpixProjection};
use crate::grids::isea9r::aperture9;
use crate::grids::{pow3, Grid, PlaneEdge};
use crate::types::{DggrsZone, GeoPoint, GridFamily, Vec2d};
use crate::zone::{rhp, RhombicZone};
use tracing::debug;

/// Plane `y` of the top edge of the north square.
const TOP_Y: f64 = 3.0 * M_PI / 4.0;

#[derive(Debug, Clone, Default)]
pub struct RHealpix {
  projection: RhealpixProjection,
}

impl RHealpix {
  #[must_use]
  pub fn new() -> Self {
    debug!(grid = "rHEALPix", "grid constructed");
    Self {
      projection: RhealpixProjection,
    }
  }

  /// Plane position of array corner `(row, col)` at side `s`.
  #[inline]
  fn _corner(row: f64, col: f64, s: f64) -> Vec2d {
    let h = M_PI_2 / s;
    Vec2d {
      x: -M_PI + col * h,
      y: TOP_Y - row * h,
    }
  }
}

/// Cell across edge `dir` of `(row, col)` at side `s`: 0 left, 1 top,
/// 2 right, 3 bottom.
///
/// Polar-square edges meet the outer edge of the polar triangles of the
/// equatorial faces, turned by a multiple of 90°.
fn _neighbor(row: u64, col: u64, s: u64, dir: i32) -> (u64, u64) {
  let last = s - 1;
  match row / s {
    0 => match dir {
      0 if col == 0 => (s, 3 * s + row),
      1 if row == 0 => (s, 2 * s + last - col),
      2 if col == last => (s, s + last - row),
      0 => (row, col - 1),
      1 => (row - 1, col),
      2 => (row, col + 1),
      _ => (row + 1, col),
    },
    2 => {
      let r = row - 2 * s;
      match dir {
        0 if col == 0 => (2 * s - 1, 3 * s + last - r),
        2 if col == last => (2 * s - 1, s + r),
        3 if r == last => (2 * s - 1, 2 * s + last - col),
        0 => (row, col - 1),
        1 => (row - 1, col),
        2 => (row, col + 1),
        _ => (row + 1, col),
      }
    }
    _ => {
      let (face, c) = (col / s, col % s);
      match dir {
        0 => (row, (col + 4 * s - 1) % (4 * s)),
        2 => (row, (col + 1) % (4 * s)),
        1 if row == s => match face {
          0 => (s - 1, col),
          1 => (last - c, last),
          2 => (0, last - c),
          _ => (c, 0),
        },
        3 if row == 2 * s - 1 => match face {
          0 => (2 * s, col),
          1 => (2 * s + c, last),
          2 => (3 * s - 1, last - c),
          _ => (2 * s + last - c, 0),
        },
        1 => (row - 1, col),
        _ => (row + 1, col),
      }
    }
  }
}

impl Grid for RHealpix {
  fn family(&self) -> GridFamily {
    GridFamily::RHealpix
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
    RHP_MAX_LEVEL
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
    (NUM_RHP_FACES as u64).saturating_mul(9u64.saturating_pow(level.max(0) as u32))
  }

  fn root_zones(&self) -> Vec<DggrsZone> {
    [(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (2, 0)]
      .into_iter()
      .map(|(row, col)| RhombicZone::new(0, row, col).into())
      .collect()
  }

  fn is_valid(&self, zone: DggrsZone) -> bool {
    let z = RhombicZone::from(zone);
    !zone.is_null() && z.level() <= RHP_MAX_LEVEL && rhp::face_of(z.row(), z.col(), pow3(z.level())).is_some()
  }

  fn level(&self, zone: DggrsZone) -> i32 {
    RhombicZone::from(zone).level()
  }

  fn text_id(&self, zone: DggrsZone) -> String {
    rhp::to_text(RhombicZone::from(zone)).unwrap_or_default()
  }

  fn parse_text_id(&self, text: &str) -> Option<DggrsZone> {
    rhp::from_text(text).map(DggrsZone::from)
  }

  fn parents(&self, zone: DggrsZone) -> Vec<DggrsZone> {
    aperture9::parent(zone)
  }

  fn children(&self, zone: DggrsZone) -> Vec<DggrsZone> {
    aperture9::children(zone, RHP_MAX_LEVEL)
  }

  fn centroid_child(&self, zone: DggrsZone) -> DggrsZone {
    aperture9::centroid_child(zone, RHP_MAX_LEVEL)
  }

  fn is_centroid_child(&self, zone: DggrsZone) -> bool {
    aperture9::is_centroid_child(zone)
  }

  fn neighbors(&self, zone: DggrsZone) -> Vec<(DggrsZone, i32)> {
    let z = RhombicZone::from(zone);
    let s = pow3(z.level());
    (0..4)
      .map(|dir| {
        let (row, col) = _neighbor(z.row(), z.col(), s, dir);
        (RhombicZone::new(z.level(), row, col).into(), dir)
      })
      .collect()
  }

  fn edge_count(&self, _zone: DggrsZone) -> usize {
    4
  }

  fn projection(&self) -> &dyn Projection {
    &self.projection
  }

  fn plane_centroid(&self, zone: DggrsZone) -> (Vec2d, Option<i32>) {
    let z = RhombicZone::from(zone);
    let s = pow3(z.level()) as f64;
    (Self::_corner(z.row() as f64 + 0.5, z.col() as f64 + 0.5, s), None)
  }

  fn plane_edges(&self, zone: DggrsZone) -> Vec<PlaneEdge> {
    let z = RhombicZone::from(zone);
    let s = pow3(z.level()) as f64;
    let (r, c) = (z.row() as f64, z.col() as f64);
    let corners = [
      Self::_corner(r + 1.0, c, s),
      Self::_corner(r + 1.0, c + 1.0, s),
      Self::_corner(r, c + 1.0, s),
      Self::_corner(r, c, s),
    ];
    (0..4)
      .map(|i| PlaneEdge {
        from: corners[i],
        to: corners[(i + 1) % 4],
        hint: None,
      })
      .collect()
  }

  fn zone_from_point(&self, level: i32, point: &GeoPoint) -> DggrsZone {
    let q = self.projection.forward(point);
    let s = pow3(level);
    let sf = s as f64;
    let col = (((q.x + M_PI) / M_PI_2 * sf).floor().max(0.0) as u64).min(4 * s - 1);
    let row = (((TOP_Y - q.y) / M_PI_2 * sf).floor().max(0.0) as u64).min(3 * s - 1);
    // Points on the polar squares' outer edges can round into an unused block
    let col = if row < s || row >= 2 * s { col.min(s - 1) } else { col };
    RhombicZone::new(level, row, col).into()
  }

  fn zone_area(&self, zone: DggrsZone) -> f64 {
    self.ref_zone_area(self.level(zone))
  }

  fn ref_zone_area(&self, level: i32) -> f64 {
    EARTH_AREA_M2 / (f64::from(NUM_RHP_FACES) * 9f64.powi(level))
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
