// src/system.rs

//! The [`Dggrs`] façade: one API over every grid family.
//!
//! Zone arguments are checked before dispatch. The null zone and zones the
//! grid does not recognise fail with [`DggrsError::InvalidZone`]; levels and
//! depths outside the grid's limits fail with the matching range error.
//! Structurally absent relations (parents of a root, a centroid child at the
//! deepest level) are empty results, not errors.

use crate::bbox::extent_from_ring;
use crate::config::{DggrsConfig, DEFAULT_MM_PER_PIXEL};
use crate::constants::{DEFAULT_EDGE_REFINEMENT, EPSILON_RAD, SEARCH_EXTENT_PADDING};
use crate::crs::{crs_kind, crs_to_geo, plane_to_crs, CrsKind};
use crate::grids::{Grid, Isea3h, Isea9r, PlaneEdge, RHealpix};
use crate::hierarchy::{are_siblings, compact_zones, is_ancestor_of, is_immediate_child_of};
use crate::iterators::{ListZonesIter, SubZoneIter};
use crate::math::vec2d::{_v2d_lerp, _v2d_ring_area};
use crate::registry::family_from_name;
use crate::resolution;
use crate::types::{Crs, CrsExtent, CrsPoint, DggrsError, DggrsZone, GeoExtent, GeoPoint, GridFamily, Vec2d};
use tracing::debug;

#[derive(Debug, Clone)]
enum Strategy {
  /// Aperture 3 hexagons on the icosahedron.
  Isea3h(Isea3h),
  /// Aperture 9 rhombi on the icosahedron.
  Isea9r(Isea9r),
  /// Aperture 9 squares on the rHEALPix projection.
  RHealpix(RHealpix),
}

/// A discrete global grid reference system.
#[derive(Debug, Clone)]
pub struct Dggrs {
  strategy: Strategy,
  /// Pixel size for scale denominator calls that pass `None`.
  mm_per_pixel: f64,
  /// Segments per edge for refined vertex calls that pass 0.
  edge_refinement: u32,
}

impl Dggrs {
  fn _with(strategy: Strategy) -> Self {
    Self {
      strategy,
      mm_per_pixel: DEFAULT_MM_PER_PIXEL,
      edge_refinement: DEFAULT_EDGE_REFINEMENT,
    }
  }

  pub fn isea3h() -> Result<Self, DggrsError> {
    Ok(Self::_with(Strategy::Isea3h(Isea3h::new()?)))
  }

  pub fn isea9r() -> Result<Self, DggrsError> {
    Ok(Self::_with(Strategy::Isea9r(Isea9r::new()?)))
  }

  #[must_use]
  pub fn rhealpix() -> Self {
    Self::_with(Strategy::RHealpix(RHealpix::new()))
  }

  /// Builds the grid of `family`.
  pub fn new(family: GridFamily) -> Result<Self, DggrsError> {
    match family {
      GridFamily::Isea3h => Self::isea3h(),
      GridFamily::Isea9r => Self::isea9r(),
      GridFamily::RHealpix => Ok(Self::rhealpix()),
    }
  }

  /// Builds the grid named by `config.grid` with the config's pixel size
  /// and edge refinement as defaults. A pixel size that is not a positive
  /// number and an edge refinement of 0 keep the built-in defaults.
  pub fn from_config(config: &DggrsConfig) -> Result<Self, DggrsError> {
    let mut dggrs = Self::new(family_from_name(&config.grid)?)?;
    if config.mm_per_pixel.is_finite() && config.mm_per_pixel > 0.0 {
      dggrs.mm_per_pixel = config.mm_per_pixel;
    } else {
      debug!(mm_per_pixel = config.mm_per_pixel, "ignoring pixel size from config");
    }
    if config.edge_refinement > 0 {
      dggrs.edge_refinement = config.edge_refinement;
    }
    Ok(dggrs)
  }

  /// The underlying grid strategy.
  #[must_use]
  pub fn grid(&self) -> &dyn Grid {
    match &self.strategy {
      Strategy::Isea3h(g) => g,
      Strategy::Isea9r(g) => g,
      Strategy::RHealpix(g) => g,
    }
  }

  /// Pixel size in millimetres used when a scale call passes `None`.
  #[must_use]
  pub fn mm_per_pixel(&self) -> f64 {
    self.mm_per_pixel
  }

  /// Segments per edge used when a refined vertex call passes 0.
  #[must_use]
  pub fn edge_refinement(&self) -> u32 {
    self.edge_refinement
  }

  #[must_use]
  pub fn family(&self) -> GridFamily {
    self.grid().family()
  }

  // Argument checks

  fn _check(&self, zone: DggrsZone) -> Result<(), DggrsError> {
    if zone.is_null() || !self.grid().is_valid(zone) {
      return Err(DggrsError::InvalidZone(zone));
    }
    Ok(())
  }

  fn _check_level(&self, level: i32) -> Result<(), DggrsError> {
    let max = self.grid().max_level();
    if !(0..=max).contains(&level) {
      return Err(DggrsError::LevelOutOfRange { level, max });
    }
    Ok(())
  }

  /// Checks `zone` and a relative depth bounded by `max_depth`.
  fn _check_depth(&self, zone: DggrsZone, depth: i32, max_depth: i32) -> Result<(), DggrsError> {
    self._check(zone)?;
    if !(0..=max_depth).contains(&depth) {
      return Err(DggrsError::DepthOutOfRange { depth, max: max_depth });
    }
    self._check_level(self.grid().level(zone) + depth)
  }

  /// Checks a resolution depth: sub-zones `depth` levels down must exist
  /// below some level, or below `level` when given.
  fn _check_resolution_depth(&self, level: Option<i32>, depth: i32) -> Result<(), DggrsError> {
    let max = self.grid().max_level() - level.unwrap_or(0);
    if !(0..=max).contains(&depth) {
      return Err(DggrsError::DepthOutOfRange { depth, max });
    }
    Ok(())
  }

  #[inline]
  fn _segments(&self, requested: u32) -> u32 {
    if requested == 0 {
      self.edge_refinement
    } else {
      requested
    }
  }

  fn _crs_kind(&self, crs: Crs) -> Result<CrsKind, DggrsError> {
    crs_kind(crs, self.family())
  }

  // Limits

  #[must_use]
  pub fn get_refinement_ratio(&self) -> u32 {
    self.grid().refinement_ratio()
  }

  #[must_use]
  pub fn get_max_children(&self) -> usize {
    self.grid().max_children()
  }

  #[must_use]
  pub fn get_max_parents(&self) -> usize {
    self.grid().max_parents()
  }

  #[must_use]
  pub fn get_max_neighbors(&self) -> usize {
    self.grid().max_neighbors()
  }

  #[must_use]
  pub fn get_max_dggrs_zone_level(&self) -> i32 {
    self.grid().max_level()
  }

  /// Deepest relative depth accepted by sub-zone listings.
  #[must_use]
  pub fn get_max_depth(&self) -> i32 {
    self.grid().max_depth()
  }

  /// Deepest relative depth whose sub-zone indices fit in an `i64`.
  #[must_use]
  pub fn get_index_max_depth(&self) -> i32 {
    self.grid().index_max_depth()
  }

  /// Relative depth giving roughly 65 536 sub-zones.
  #[must_use]
  pub fn get_64k_depth(&self) -> i32 {
    self.grid().depth_64k()
  }

  // Zone queries

  pub fn get_zone_level(&self, zone: DggrsZone) -> Result<i32, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().level(zone))
  }

  /// Number of edges (and vertices) of the zone.
  pub fn count_zone_edges(&self, zone: DggrsZone) -> Result<usize, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().edge_count(zone))
  }

  pub fn is_zone_centroid_child(&self, zone: DggrsZone) -> Result<bool, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().is_centroid_child(zone))
  }

  /// The child sharing the zone's centre; `None` at the deepest level.
  pub fn get_zone_centroid_child(&self, zone: DggrsZone) -> Result<Option<DggrsZone>, DggrsError> {
    self._check(zone)?;
    let child = self.grid().centroid_child(zone);
    Ok((!child.is_null()).then_some(child))
  }

  /// The parent whose centroid child this zone is, if any.
  pub fn get_zone_centroid_parent(&self, zone: DggrsZone) -> Result<Option<DggrsZone>, DggrsError> {
    self._check(zone)?;
    let grid = self.grid();
    if !grid.is_centroid_child(zone) {
      return Ok(None);
    }
    Ok(grid.parents(zone).into_iter().find(|&p| grid.centroid_child(p) == zone))
  }

  pub fn get_zone_parents(&self, zone: DggrsZone) -> Result<Vec<DggrsZone>, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().parents(zone))
  }

  /// Children, the centroid child first.
  pub fn get_zone_children(&self, zone: DggrsZone) -> Result<Vec<DggrsZone>, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().children(zone))
  }

  /// Edge neighbours, each with its direction code in the zone's frame.
  pub fn get_zone_neighbors(&self, zone: DggrsZone) -> Result<Vec<(DggrsZone, i32)>, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().neighbors(zone))
  }

  pub fn get_zone_text_id(&self, zone: DggrsZone) -> Result<String, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().text_id(zone))
  }

  pub fn get_zone_from_text_id(&self, text: &str) -> Result<DggrsZone, DggrsError> {
    match self.grid().parse_text_id(text) {
      Some(zone) if self.grid().is_valid(zone) => Ok(zone),
      _ => {
        debug!(grid = ?self.family(), text, "unparseable zone text id");
        Err(DggrsError::MalformedTextId(text.to_string()))
      }
    }
  }

  // Point lookup

  /// The zone of `level` containing a WGS84 point.
  pub fn get_zone_from_wgs84_centroid(&self, level: i32, point: &GeoPoint) -> Result<DggrsZone, DggrsError> {
    self._check_level(level)?;
    let zone = self.grid().zone_from_point(level, point);
    if zone.is_null() {
      return Err(DggrsError::DegenerateGeometry);
    }
    Ok(zone)
  }

  /// The zone of `level` containing a point given in `crs`.
  pub fn get_zone_from_crs_centroid(&self, level: i32, crs: Crs, point: &CrsPoint) -> Result<DggrsZone, DggrsError> {
    let kind = self._crs_kind(crs)?;
    let geo = crs_to_geo(self.grid().projection(), kind, point)?;
    self.get_zone_from_wgs84_centroid(level, &geo)
  }

  // Geometry

  pub fn get_zone_wgs84_centroid(&self, zone: DggrsZone) -> Result<GeoPoint, DggrsError> {
    self._check(zone)?;
    self._centroid(zone)
  }

  fn _centroid(&self, zone: DggrsZone) -> Result<GeoPoint, DggrsError> {
    let grid = self.grid();
    let (q, hint) = grid.plane_centroid(zone);
    grid.projection().inverse(&q, hint).ok_or(DggrsError::DegenerateGeometry)
  }

  pub fn get_zone_crs_centroid(&self, zone: DggrsZone, crs: Crs) -> Result<CrsPoint, DggrsError> {
    let kind = self._crs_kind(crs)?;
    self._check(zone)?;
    let grid = self.grid();
    let (q, hint) = grid.plane_centroid(zone);
    plane_to_crs(grid.projection(), kind, &q, hint)
  }

  /// Plane outline, each edge split into `segments` pieces, as points with
  /// the root they were reached from.
  fn _plane_ring(&self, zone: DggrsZone, segments: u32) -> Vec<(Vec2d, Option<i32>)> {
    let edges: Vec<PlaneEdge> = self.grid().plane_edges(zone);
    let n = segments.max(1);
    let mut ring = Vec::with_capacity(edges.len() * n as usize);
    for e in &edges {
      for i in 0..n {
        let t = f64::from(i) / f64::from(n);
        ring.push((_v2d_lerp(&e.from, &e.to, t), e.hint));
      }
    }
    ring
  }

  fn _wgs84_ring(&self, zone: DggrsZone, segments: u32) -> Result<Vec<GeoPoint>, DggrsError> {
    let proj = self.grid().projection();
    self
      ._plane_ring(zone, segments)
      .iter()
      .map(|(q, hint)| proj.inverse(q, *hint).ok_or(DggrsError::DegenerateGeometry))
      .collect()
  }

  fn _crs_ring(&self, zone: DggrsZone, kind: CrsKind, segments: u32) -> Result<Vec<CrsPoint>, DggrsError> {
    let proj = self.grid().projection();
    self
      ._plane_ring(zone, segments)
      .iter()
      .map(|(q, hint)| plane_to_crs(proj, kind, q, *hint))
      .collect()
  }

  /// Zone corners counter-clockwise.
  pub fn get_zone_wgs84_vertices(&self, zone: DggrsZone) -> Result<Vec<GeoPoint>, DggrsError> {
    self._check(zone)?;
    self._wgs84_ring(zone, 1)
  }

  /// Zone outline with each edge split into `segments` pieces. 0 selects
  /// the configured edge refinement.
  pub fn get_zone_refined_wgs84_vertices(&self, zone: DggrsZone, segments: u32) -> Result<Vec<GeoPoint>, DggrsError> {
    self._check(zone)?;
    self._wgs84_ring(zone, self._segments(segments))
  }

  pub fn get_zone_crs_vertices(&self, zone: DggrsZone, crs: Crs) -> Result<Vec<CrsPoint>, DggrsError> {
    let kind = self._crs_kind(crs)?;
    self._check(zone)?;
    self._crs_ring(zone, kind, 1)
  }

  pub fn get_zone_refined_crs_vertices(
    &self,
    zone: DggrsZone,
    crs: Crs,
    segments: u32,
  ) -> Result<Vec<CrsPoint>, DggrsError> {
    let kind = self._crs_kind(crs)?;
    self._check(zone)?;
    self._crs_ring(zone, kind, self._segments(segments))
  }

  /// Bounding box of the refined outline. Zones around a pole reach it
  /// with the full longitude range.
  pub fn get_zone_wgs84_extent(&self, zone: DggrsZone) -> Result<GeoExtent, DggrsError> {
    self._check(zone)?;
    Ok(extent_from_ring(&self._wgs84_ring(zone, DEFAULT_EDGE_REFINEMENT)?))
  }

  /// Extent in `crs`. `tl` is the north-west corner for geographic CRSs; in
  /// the 5x6 net, whose `y` grows southwards, it holds the minimum `x` and
  /// `y`.
  pub fn get_zone_crs_extent(&self, zone: DggrsZone, crs: Crs) -> Result<CrsExtent, DggrsError> {
    let kind = self._crs_kind(crs)?;
    self._check(zone)?;
    let (tl, br) = match kind {
      CrsKind::LatLon | CrsKind::LonLat => {
        let e = extent_from_ring(&self._wgs84_ring(zone, DEFAULT_EDGE_REFINEMENT)?);
        let (n, s) = (e.ur.lat.to_degrees(), e.ll.lat.to_degrees());
        let (w, east) = (e.ll.lon.to_degrees(), e.ur.lon.to_degrees());
        if kind == CrsKind::LatLon {
          (CrsPoint { x: n, y: w }, CrsPoint { x: s, y: east })
        } else {
          (CrsPoint { x: w, y: n }, CrsPoint { x: east, y: s })
        }
      }
      _ => {
        let ring = self._crs_ring(zone, kind, DEFAULT_EDGE_REFINEMENT)?;
        let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for p in &ring {
          x0 = x0.min(p.x);
          x1 = x1.max(p.x);
          y0 = y0.min(p.y);
          y1 = y1.max(p.y);
        }
        if kind == CrsKind::IseaNet {
          (CrsPoint { x: x0, y: y0 }, CrsPoint { x: x1, y: y1 })
        } else {
          (CrsPoint { x: x0, y: y1 }, CrsPoint { x: x1, y: y0 })
        }
      }
    };
    Ok(CrsExtent { crs, tl, br })
  }

  /// Padded extent for listing broad-phase tests.
  pub(crate) fn _search_extent(&self, zone: DggrsZone) -> Option<GeoExtent> {
    let e = extent_from_ring(&self._wgs84_ring(zone, DEFAULT_EDGE_REFINEMENT).ok()?);
    Some(e.inflated(
      SEARCH_EXTENT_PADDING * e.height_rads() + EPSILON_RAD,
      SEARCH_EXTENT_PADDING * e.width_rads() + EPSILON_RAD,
    ))
  }

  /// Geodetic area in square metres.
  pub fn get_zone_area(&self, zone: DggrsZone) -> Result<f64, DggrsError> {
    self._check(zone)?;
    Ok(self.grid().zone_area(zone))
  }

  /// Area in `crs` units. Geographic CRSs give the geodetic area; planar
  /// ones the area enclosed by the refined outline.
  pub fn get_zone_crs_area(&self, zone: DggrsZone, crs: Crs) -> Result<f64, DggrsError> {
    let kind = self._crs_kind(crs)?;
    self._check(zone)?;
    if kind.is_geographic() {
      return Ok(self.grid().zone_area(zone));
    }
    let ring: Vec<Vec2d> = self
      ._crs_ring(zone, kind, DEFAULT_EDGE_REFINEMENT)?
      .into_iter()
      .map(|p| Vec2d { x: p.x, y: p.y })
      .collect();
    Ok(_v2d_ring_area(&ring).abs())
  }

  // Counting and sub-zones

  pub fn count_zones(&self, level: i32) -> Result<u64, DggrsError> {
    self._check_level(level)?;
    Ok(self.grid().count_zones(level))
  }

  /// Closed-form number of sub-zones at a relative depth.
  pub fn count_sub_zones(&self, zone: DggrsZone, depth: i32) -> Result<u64, DggrsError> {
    self._check_depth(zone, depth, self.grid().index_max_depth())?;
    Ok(self.grid().count_sub_zones(zone, depth))
  }

  pub fn get_first_sub_zone(&self, zone: DggrsZone, depth: i32) -> Result<DggrsZone, DggrsError> {
    self._check_depth(zone, depth, self.grid().index_max_depth())?;
    Ok(self.grid().sub_zone_at_index(zone, depth, 0))
  }

  /// Sub-zone at `index` in canonical order; `None` past the end.
  pub fn get_sub_zone_at_index(&self, zone: DggrsZone, depth: i32, index: u64) -> Result<Option<DggrsZone>, DggrsError> {
    self._check_depth(zone, depth, self.grid().index_max_depth())?;
    let sub = self.grid().sub_zone_at_index(zone, depth, index);
    Ok((!sub.is_null()).then_some(sub))
  }

  /// Canonical index of `sub_zone` among the sub-zones of `zone`; `None`
  /// when it is not one of them.
  pub fn get_sub_zone_index(&self, zone: DggrsZone, sub_zone: DggrsZone) -> Result<Option<u64>, DggrsError> {
    self._check(zone)?;
    self._check(sub_zone)?;
    let grid = self.grid();
    let depth = grid.level(sub_zone) - grid.level(zone);
    if !(0..=grid.index_max_depth()).contains(&depth) {
      return Ok(None);
    }
    Ok(grid.sub_zone_index(zone, sub_zone))
  }

  /// Lazy sub-zone sequence.
  pub fn get_sub_zones(&self, zone: DggrsZone, depth: i32) -> Result<SubZoneIter<'_>, DggrsError> {
    self._check_depth(zone, depth, self.grid().max_depth())?;
    Ok(SubZoneIter::new(self.grid(), zone, depth))
  }

  /// All sub-zones in canonical order.
  pub fn get_sub_zones_vec(&self, zone: DggrsZone, depth: i32) -> Result<Vec<DggrsZone>, DggrsError> {
    Ok(self.get_sub_zones(zone, depth)?.collect())
  }

  pub fn get_sub_zone_wgs84_centroids(&self, zone: DggrsZone, depth: i32) -> Result<Vec<GeoPoint>, DggrsError> {
    self.get_sub_zones(zone, depth)?.map(|z| self._centroid(z)).collect()
  }

  pub fn get_sub_zone_crs_centroids(&self, zone: DggrsZone, crs: Crs, depth: i32) -> Result<Vec<CrsPoint>, DggrsError> {
    let kind = self._crs_kind(crs)?;
    let grid = self.grid();
    self
      .get_sub_zones(zone, depth)?
      .map(|z| {
        let (q, hint) = grid.plane_centroid(z);
        plane_to_crs(grid.projection(), kind, &q, hint)
      })
      .collect()
  }

  // Listing and compaction

  /// Lazy listing of the zones of `level` meeting `bbox`, or of all zones.
  pub fn list_zones(&self, level: i32, bbox: Option<&GeoExtent>) -> Result<ListZonesIter<'_>, DggrsError> {
    self._check_level(level)?;
    debug!(grid = ?self.family(), level, bbox = ?bbox, "listing zones");
    Ok(ListZonesIter::new(self, level, bbox.copied()))
  }

  /// [`Dggrs::list_zones`] collected and sorted by handle.
  pub fn list_zones_vec(&self, level: i32, bbox: Option<&GeoExtent>) -> Result<Vec<DggrsZone>, DggrsError> {
    let mut zones: Vec<DggrsZone> = self.list_zones(level, bbox)?.collect();
    zones.sort_unstable();
    Ok(zones)
  }

  /// Minimal cover of `zones`, sorted by level then handle.
  pub fn compact_zones(&self, zones: &[DggrsZone]) -> Result<Vec<DggrsZone>, DggrsError> {
    for &z in zones {
      self._check(z)?;
    }
    Ok(compact_zones(self.grid(), zones))
  }

  // Relations

  pub fn are_zones_neighbors(&self, a: DggrsZone, b: DggrsZone) -> Result<bool, DggrsError> {
    self._check(a)?;
    self._check(b)?;
    Ok(self.grid().neighbors(a).iter().any(|&(n, _)| n == b))
  }

  pub fn are_zones_siblings(&self, a: DggrsZone, b: DggrsZone) -> Result<bool, DggrsError> {
    self._check(a)?;
    self._check(b)?;
    Ok(are_siblings(self.grid(), a, b))
  }

  /// Whether `b` lies entirely within `a`.
  pub fn does_zone_contain(&self, a: DggrsZone, b: DggrsZone) -> Result<bool, DggrsError> {
    self._check(a)?;
    self._check(b)?;
    Ok(self.grid().contains(a, b))
  }

  /// Whether `a` lies entirely within `b`.
  pub fn is_zone_contained_in(&self, a: DggrsZone, b: DggrsZone) -> Result<bool, DggrsError> {
    self.does_zone_contain(b, a)
  }

  /// Whether `sub_zone` is one of the sub-zones of `zone` at their level
  /// difference.
  pub fn zone_has_sub_zone(&self, zone: DggrsZone, sub_zone: DggrsZone) -> Result<bool, DggrsError> {
    Ok(self.get_sub_zone_index(zone, sub_zone)?.is_some())
  }

  /// Whether the two zones share interior area.
  pub fn do_zones_overlap(&self, a: DggrsZone, b: DggrsZone) -> Result<bool, DggrsError> {
    self._check(a)?;
    self._check(b)?;
    Ok(self.grid().overlaps(a, b))
  }

  /// Whether `ancestor` is reachable from `descendant` through at most
  /// `max_depth` parent steps (0 or less for no bound).
  pub fn is_zone_ancestor_of(&self, ancestor: DggrsZone, descendant: DggrsZone, max_depth: i32) -> Result<bool, DggrsError> {
    self._check(ancestor)?;
    self._check(descendant)?;
    Ok(is_ancestor_of(self.grid(), ancestor, descendant, max_depth))
  }

  pub fn is_zone_descendant_of(&self, descendant: DggrsZone, ancestor: DggrsZone, max_depth: i32) -> Result<bool, DggrsError> {
    self.is_zone_ancestor_of(ancestor, descendant, max_depth)
  }

  pub fn is_zone_immediate_child_of(&self, child: DggrsZone, parent: DggrsZone) -> Result<bool, DggrsError> {
    self._check(child)?;
    self._check(parent)?;
    Ok(is_immediate_child_of(self.grid(), child, parent))
  }

  pub fn is_zone_immediate_parent_of(&self, parent: DggrsZone, child: DggrsZone) -> Result<bool, DggrsError> {
    self.is_zone_immediate_child_of(child, parent)
  }

  // Resolution

  // The level-from-value inverses only consider levels whose sub-zones
  // `depth` levels down exist.

  /// Spacing in metres of the sub-zones `depth` levels below `level`.
  pub fn get_meters_per_sub_zone_from_level(&self, level: i32, depth: i32) -> Result<f64, DggrsError> {
    self._check_level(level)?;
    self._check_resolution_depth(Some(level), depth)?;
    Ok(resolution::meters_per_sub_zone(self.grid(), level, depth))
  }

  pub fn get_level_from_meters_per_sub_zone(&self, meters: f64, depth: i32) -> Result<i32, DggrsError> {
    self._check_resolution_depth(None, depth)?;
    Ok(resolution::level_from_meters_per_sub_zone(self.grid(), meters, depth))
  }

  /// Scale denominator at which one sub-zone spans one pixel. `None` uses
  /// the configured pixel size.
  pub fn get_scale_denominator_from_level(
    &self,
    level: i32,
    depth: i32,
    mm_per_pixel: Option<f64>,
  ) -> Result<f64, DggrsError> {
    self._check_level(level)?;
    self._check_resolution_depth(Some(level), depth)?;
    let mm = mm_per_pixel.unwrap_or(self.mm_per_pixel);
    Ok(resolution::scale_denominator(self.grid(), level, depth, mm))
  }

  pub fn get_level_from_scale_denominator(
    &self,
    denominator: f64,
    depth: i32,
    mm_per_pixel: Option<f64>,
  ) -> Result<i32, DggrsError> {
    self._check_resolution_depth(None, depth)?;
    let mm = mm_per_pixel.unwrap_or(self.mm_per_pixel);
    Ok(resolution::level_from_scale_denominator(self.grid(), denominator, depth, mm))
  }

  pub fn get_level_from_pixels_and_extent(
    &self,
    extent: &GeoExtent,
    width: u32,
    height: u32,
    depth: i32,
  ) -> Result<i32, DggrsError> {
    self._check_resolution_depth(None, depth)?;
    Ok(resolution::level_from_pixels_and_extent(self.grid(), extent, width, height, depth))
  }

  pub fn get_ref_zone_area(&self, level: i32) -> Result<f64, DggrsError> {
    self._check_level(level)?;
    Ok(resolution::ref_zone_area(self.grid(), level))
  }

  #[must_use]
  pub fn get_level_from_ref_zone_area(&self, area: f64) -> i32 {
    resolution::level_from_ref_zone_area(self.grid(), area)
  }
}
