// src/grids/mod.rs

//! Grid variant strategies.
//!
//! Each family implements [`Grid`]; [`crate::Dggrs`] dispatches to them and
//! adds the family-independent geometry and bookkeeping on top.

pub mod hex_subzones;
pub mod isea3h;
pub mod isea9r;
pub mod rhealpix;

pub use isea3h::Isea3h;
pub use isea9r::Isea9r;
pub use rhealpix::RHealpix;

use crate::crs::Projection;
use crate::types::{DggrsZone, GeoPoint, GridFamily, Vec2d};
use std::fmt;

/// One edge of a zone outline in the grid's native plane.
///
/// Both ends are expressed in the same local frame, so points between them
/// are valid plane positions; `hint` is the root the frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneEdge {
  pub from: Vec2d,
  pub to: Vec2d,
  pub hint: Option<i32>,
}

/// A grid family.
///
/// Methods taking a zone expect a zone for which [`Grid::is_valid`] holds;
/// the façade checks this before dispatching.
pub trait Grid: Send + Sync + fmt::Debug {
  fn family(&self) -> GridFamily;

  /// Zones per parent per level step, counted in area.
  fn refinement_ratio(&self) -> u32;
  fn max_children(&self) -> usize;
  fn max_parents(&self) -> usize;
  fn max_neighbors(&self) -> usize;
  fn max_level(&self) -> i32;
  /// Relative depth yielding roughly 64K sub-zones.
  fn depth_64k(&self) -> i32;
  /// Deepest relative depth supported by sub-zone listing.
  fn max_depth(&self) -> i32;
  /// Deepest relative depth for which sub-zone indices fit in an `i64`.
  fn index_max_depth(&self) -> i32;

  fn count_zones(&self, level: i32) -> u64;
  /// All level 0 zones.
  fn root_zones(&self) -> Vec<DggrsZone>;

  fn is_valid(&self, zone: DggrsZone) -> bool;
  fn level(&self, zone: DggrsZone) -> i32;
  fn text_id(&self, zone: DggrsZone) -> String;
  fn parse_text_id(&self, text: &str) -> Option<DggrsZone>;

  fn parents(&self, zone: DggrsZone) -> Vec<DggrsZone>;
  /// Children, centroid child first. Empty at the maximum level.
  fn children(&self, zone: DggrsZone) -> Vec<DggrsZone>;
  /// The child sharing the zone's centre, or the null zone at the maximum
  /// level.
  fn centroid_child(&self, zone: DggrsZone) -> DggrsZone;
  fn is_centroid_child(&self, zone: DggrsZone) -> bool;
  /// Edge-sharing neighbours with their direction codes.
  fn neighbors(&self, zone: DggrsZone) -> Vec<(DggrsZone, i32)>;
  fn edge_count(&self, zone: DggrsZone) -> usize;

  fn projection(&self) -> &dyn Projection;
  /// Centre in the native plane and the root it lies in.
  fn plane_centroid(&self, zone: DggrsZone) -> (Vec2d, Option<i32>);
  /// Outline edges, counter-clockwise on the sphere.
  fn plane_edges(&self, zone: DggrsZone) -> Vec<PlaneEdge>;
  fn zone_from_point(&self, level: i32, point: &GeoPoint) -> DggrsZone;
  /// Area in square metres.
  fn zone_area(&self, zone: DggrsZone) -> f64;
  /// Area of a regular (non-singular) zone at `level`.
  fn ref_zone_area(&self, level: i32) -> f64;

  fn count_sub_zones(&self, zone: DggrsZone, depth: i32) -> u64;
  /// Sub-zone at `index` in the canonical order, or the null zone.
  fn sub_zone_at_index(&self, zone: DggrsZone, depth: i32, index: u64) -> DggrsZone;
  /// Position of `sub_zone` among the sub-zones of `zone` at their level
  /// difference.
  fn sub_zone_index(&self, zone: DggrsZone, sub_zone: DggrsZone) -> Option<u64>;
  /// All sub-zones in canonical order.
  fn sub_zones<'a>(&'a self, zone: DggrsZone, depth: i32) -> Box<dyn Iterator<Item = DggrsZone> + 'a>;

  /// Whether `b` lies entirely within `a`.
  fn contains(&self, a: DggrsZone, b: DggrsZone) -> bool;
  /// Whether the two zones share interior area.
  fn overlaps(&self, a: DggrsZone, b: DggrsZone) -> bool;
}

/// Integer `3^e`, saturating at `u64::MAX`. Negative exponents give 1.
#[inline]
pub(crate) fn pow3(e: i32) -> u64 {
  3u64.saturating_pow(e.max(0) as u32)
}
