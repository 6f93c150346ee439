// src/iterators.rs

//! Lazy zone sequences.
//!
//! Sub-zone and listing queries can describe more zones than fit in memory,
//! so both are exposed as iterators that compute one zone per step and can
//! be restarted from the beginning.

use crate::system::Dggrs;
use crate::grids::Grid;
use crate::types::{DggrsZone, GeoExtent};
use std::collections::HashMap;
use std::fmt;

/// Sub-zones of one zone at a relative depth, in canonical index order.
pub struct SubZoneIter<'a> {
  grid: &'a dyn Grid,
  zone: DggrsZone,
  depth: i32,
  total: u64,
  produced: u64,
  inner: Box<dyn Iterator<Item = DggrsZone> + 'a>,
}

impl<'a> SubZoneIter<'a> {
  pub(crate) fn new(grid: &'a dyn Grid, zone: DggrsZone, depth: i32) -> Self {
    Self {
      grid,
      zone,
      depth,
      total: grid.count_sub_zones(zone, depth),
      produced: 0,
      inner: grid.sub_zones(zone, depth),
    }
  }

  /// Number of sub-zones in the whole sequence, from the closed form.
  #[inline]
  pub fn total(&self) -> u64 {
    self.total
  }

  /// Number of sub-zones not yet produced.
  #[inline]
  pub fn remaining(&self) -> u64 {
    self.total - self.produced
  }

  /// Rewinds to the first sub-zone.
  pub fn restart(&mut self) {
    self.inner = self.grid.sub_zones(self.zone, self.depth);
    self.produced = 0;
  }
}

impl Iterator for SubZoneIter<'_> {
  type Item = DggrsZone;

  fn next(&mut self) -> Option<DggrsZone> {
    let z = self.inner.next()?;
    self.produced += 1;
    Some(z)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    match usize::try_from(self.remaining()) {
      Ok(n) => (n, Some(n)),
      Err(_) => (usize::MAX, None),
    }
  }
}

impl fmt::Debug for SubZoneIter<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SubZoneIter")
      .field("zone", &self.zone)
      .field("depth", &self.depth)
      .field("total", &self.total)
      .field("produced", &self.produced)
      .finish_non_exhaustive()
  }
}

/// All zones of one level, optionally restricted to those whose extent
/// meets a bounding box.
///
/// Walks the hierarchy depth first from the root zones, pruning every zone
/// whose padded extent misses the box. A zone with several parents is
/// produced only through the first of its parents the walk expands, so each
/// zone is produced once. The filter is a superset test: every zone
/// truly meeting the box is produced, some near misses may be too.
pub struct ListZonesIter<'a> {
  dggrs: &'a Dggrs,
  level: i32,
  bbox: Option<GeoExtent>,
  stack: Vec<DggrsZone>,
  reached: HashMap<DggrsZone, bool>,
}

impl<'a> ListZonesIter<'a> {
  pub(crate) fn new(dggrs: &'a Dggrs, level: i32, bbox: Option<GeoExtent>) -> Self {
    let mut it = Self {
      dggrs,
      level,
      bbox,
      stack: Vec::new(),
      reached: HashMap::new(),
    };
    it.restart();
    it
  }

  /// Rewinds to the first zone.
  pub fn restart(&mut self) {
    let mut roots = self.dggrs.grid().root_zones();
    roots.reverse();
    self.stack.clear();
    for z in roots {
      if self._reached(z) {
        self.stack.push(z);
      }
    }
  }

  fn _hit(&self, zone: DggrsZone) -> bool {
    self.bbox.map_or(true, |bbox| {
      self
        .dggrs
        ._search_extent(zone)
        .map_or(true, |extent| extent.intersects(&bbox))
    })
  }

  /// Whether the walk expands `zone`: it meets the box and so does a chain
  /// of ancestors up to a root.
  fn _reached(&mut self, zone: DggrsZone) -> bool {
    if self.bbox.is_none() {
      return true;
    }
    if let Some(&r) = self.reached.get(&zone) {
      return r;
    }
    let parents = self.dggrs.grid().parents(zone);
    let r = self._hit(zone) && (parents.is_empty() || parents.into_iter().any(|p| self._reached(p)));
    self.reached.insert(zone, r);
    r
  }

  fn _accept(&mut self, parent: DggrsZone, child: DggrsZone) -> bool {
    let parents = self.dggrs.grid().parents(child);
    if parents.len() > 1 && parents.into_iter().find(|&p| self._reached(p)) != Some(parent) {
      return false;
    }
    let hit = self._hit(child);
    // Only ancestors are looked up again
    if self.bbox.is_some() && self.dggrs.grid().level(child) < self.level {
      self.reached.insert(child, hit);
    }
    hit
  }
}

impl Iterator for ListZonesIter<'_> {
  type Item = DggrsZone;

  fn next(&mut self) -> Option<DggrsZone> {
    let dggrs = self.dggrs;
    let grid = dggrs.grid();
    while let Some(z) = self.stack.pop() {
      if grid.level(z) >= self.level {
        return Some(z);
      }
      let mut children = grid.children(z);
      children.reverse();
      for c in children {
        if self._accept(z, c) {
          self.stack.push(c);
        }
      }
    }
    None
  }
}

impl fmt::Debug for ListZonesIter<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ListZonesIter")
      .field("level", &self.level)
      .field("bbox", &self.bbox)
      .field("pending", &self.stack.len())
      .finish_non_exhaustive()
  }
}
