// src/grids/hex_subzones.rs

//! ISEA3H sub-zone enumeration.
//!
//! Every zone above level 0 has one owner among its parents. A centroid
//! child belongs to its centroid parent. A vertex child sits on a corner
//! shared by three parents and belongs to the one at vertex offset 0 from it,
//! or at the opposite offset 3 when offset 0 is not a parent, measured in
//! the child's own frame. The choice is consistent across the interruptions:
//! every hexagon and pentagon owns exactly two of its vertex children, and
//! the poles own none.
//!
//! The sub-zones of a zone at depth `d` are its descendants through owners.
//! The sets of all zones of one level partition the level `L + d` zones, a
//! non-polar zone has `3^d` of them and a pole only its own centroid chain.
//! Sub-zones are ordered depth first, with the centroid child before the
//! owned vertex children, so an index is a string of base 3 digits.

use crate::coords::net5x6::{canonicalize, net_position, NetCoord, NetPos};
use crate::grids::isea3h::{child_positions, HexKind, EVEN_VERTICES, ODD_VERTICES};
use crate::grids::pow3;
use crate::zone::i3h::lattice_scale;

/// Vertex offsets tried, in order, when a vertex child picks its owner.
const OWNER_OFFSETS: [usize; 2] = [0, 3];

/// The parent owning the level `level` zone at `pos`.
///
/// `level` must be at least 1.
pub(crate) fn owner(level: i32, pos: NetPos) -> Option<NetPos> {
  let NetPos::Rhombus { root, u, v } = pos else {
    return Some(pos);
  };
  let n = lattice_scale(level);
  let x = net_position(pos, n);
  if level % 2 == 1 {
    if u % 3 == 0 && v % 3 == 0 {
      return Some(pos);
    }
    OWNER_OFFSETS
      .iter()
      .map(|&i| x - EVEN_VERTICES[i])
      .find(|p| p.x.rem_euclid(3) == 0 && p.y.rem_euclid(3) == 0)
      .and_then(|p| canonicalize(p, n, Some(root)))
  } else {
    let (pu, pv) = (u / 3, v / 3);
    if (pu + pv) % 3 == 0 {
      return Some(NetPos::Rhombus { root, u: pu, v: pv });
    }
    let coarse = NetCoord::new(x.x / 3, x.y / 3);
    OWNER_OFFSETS
      .iter()
      .map(|&i| coarse - ODD_VERTICES[i])
      .find(|p| (p.x + p.y).rem_euclid(3) == 0)
      .and_then(|p| canonicalize(p, n / 3, Some(root)))
  }
}

/// Children owned by zone `(level, centre)`, centroid child first.
pub(crate) fn owned_children(level: i32, centre: NetPos) -> Vec<NetPos> {
  child_positions(level, centre)
    .into_iter()
    .enumerate()
    .filter(|&(i, c)| i == 0 || owner(level + 1, c) == Some(centre))
    .map(|(_, c)| c)
    .collect()
}

/// Sub-zone layout of one zone at one depth.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HexSubZones {
  level: i32,
  centre: NetPos,
  kind: HexKind,
  depth: i32,
}

impl HexSubZones {
  pub(crate) fn new(level: i32, centre: NetPos, depth: i32) -> Self {
    Self {
      level,
      centre,
      kind: HexKind::of(centre),
      depth,
    }
  }

  #[inline]
  pub(crate) fn fine_level(&self) -> i32 {
    self.level + self.depth
  }

  /// Descendants at `depth` below a zone of this layout's kind.
  #[inline]
  fn _subtree(&self, depth: i32) -> u64 {
    if self.kind.is_pole() {
      1
    } else {
      pow3(depth)
    }
  }

  /// Number of sub-zones.
  pub(crate) fn count(&self) -> u64 {
    if self.depth < 0 {
      return 0;
    }
    self._subtree(self.depth)
  }

  /// Centre of the sub-zone at `index`.
  pub(crate) fn at(&self, index: u64) -> Option<NetPos> {
    if index >= self.count() {
      return None;
    }
    let mut rest = index;
    let mut pos = self.centre;
    for (step, level) in (self.level..self.fine_level()).enumerate() {
      let size = self._subtree(self.depth - 1 - step as i32);
      let digit = (rest / size) as usize;
      rest %= size;
      pos = *owned_children(level, pos).get(digit)?;
    }
    Some(pos)
  }

  /// Index of the sub-zone centred on `pos` (a fine-level centre).
  pub(crate) fn index_of(&self, pos: NetPos) -> Option<u64> {
    if self.depth < 0 {
      return None;
    }
    let mut index = 0;
    let mut cur = pos;
    for step in 0..self.depth {
      let level = self.fine_level() - step;
      let parent = owner(level, cur)?;
      let digit = owned_children(level - 1, parent).iter().position(|&c| c == cur)?;
      index += digit as u64 * self._subtree(step);
      cur = parent;
    }
    (cur == self.centre).then_some(index)
  }

  /// All sub-zone centres in index order, computed lazily.
  pub(crate) fn iter(self) -> impl Iterator<Item = NetPos> {
    let fine = self.fine_level();
    let mut stack = if self.depth < 0 {
      Vec::new()
    } else {
      vec![(self.level, self.centre)]
    };
    std::iter::from_fn(move || {
      while let Some((level, pos)) = stack.pop() {
        if level == fine {
          return Some(pos);
        }
        stack.extend(owned_children(level, pos).into_iter().rev().map(|c| (level + 1, c)));
      }
      None
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  fn rh(root: i32, u: i64, v: i64) -> NetPos {
    NetPos::Rhombus { root, u, v }
  }

  fn level_positions(level: i32) -> HashSet<NetPos> {
    let mut out: HashSet<NetPos> = (0..10)
      .map(|root| rh(root, 0, 0))
      .chain([NetPos::North, NetPos::South])
      .collect();
    for l in 0..level {
      out = out.iter().flat_map(|&p| child_positions(l, p)).collect();
    }
    out
  }

  fn check_bijection(level: i32, centre: NetPos, depth: i32) {
    let layout = HexSubZones::new(level, centre, depth);
    let all: Vec<_> = layout.iter().collect();
    assert_eq!(all.len() as u64, layout.count(), "{level} {centre:?} {depth}");
    let distinct: HashSet<_> = all.iter().collect();
    assert_eq!(distinct.len(), all.len(), "{level} {centre:?} {depth}");
    for (i, &pos) in all.iter().enumerate() {
      assert_eq!(layout.at(i as u64), Some(pos));
      assert_eq!(layout.index_of(pos), Some(i as u64), "{level} {centre:?} {depth} {pos:?}");
    }
    assert_eq!(layout.at(layout.count()), None);
  }

  #[test]
  fn test_every_zone_owns_two_vertex_children() {
    for level in 0..6 {
      for pos in level_positions(level) {
        let expected = if HexKind::of(pos).is_pole() { 1 } else { 3 };
        assert_eq!(owned_children(level, pos).len(), expected, "{level} {pos:?}");
      }
    }
  }

  #[test]
  fn test_owner_is_a_parent() {
    for level in 1..5 {
      for pos in level_positions(level) {
        let parent = owner(level, pos).unwrap();
        assert!(child_positions(level - 1, parent).contains(&pos), "{level} {pos:?}");
      }
    }
  }

  #[test]
  fn test_sub_zones_partition_each_level() {
    for level in 0..=4 {
      let coarse = level_positions(level);
      for depth in 1..=3 {
        let mut seen = HashSet::new();
        for &pos in &coarse {
          for sub in HexSubZones::new(level, pos, depth).iter() {
            assert!(seen.insert(sub), "{sub:?} listed twice at {level}+{depth}");
          }
        }
        assert_eq!(seen, level_positions(level + depth), "{level}+{depth}");
      }
    }
  }

  #[test]
  fn test_counts() {
    for depth in 0..6 {
      let full = 3u64.pow(depth as u32);
      assert_eq!(HexSubZones::new(2, rh(3, 3, 6), depth).count(), full);
      assert_eq!(HexSubZones::new(3, rh(3, 2, 1), depth).count(), full);
      assert_eq!(HexSubZones::new(3, rh(0, 0, 0), depth).count(), full);
      assert_eq!(HexSubZones::new(2, NetPos::North, depth).count(), 1);
      assert_eq!(HexSubZones::new(3, NetPos::South, depth).iter().count(), 1);
    }
    assert_eq!(HexSubZones::new(2, rh(1, 0, 0), 4).iter().count(), 81);
    assert_eq!(HexSubZones::new(2, rh(1, 0, 0), -1).count(), 0);
  }

  #[test]
  fn test_index_bijection() {
    for depth in 0..4 {
      check_bijection(2, rh(5, 6, 3), depth);
      check_bijection(1, rh(8, 2, 1), depth);
      check_bijection(2, rh(4, 0, 0), depth);
      check_bijection(3, rh(7, 0, 0), depth);
      check_bijection(3, rh(0, 8, 4), depth);
      check_bijection(1, NetPos::North, depth);
      check_bijection(2, NetPos::South, depth);
    }
  }

  #[test]
  fn test_centre_comes_first() {
    let layout = HexSubZones::new(1, NetPos::South, 2);
    assert_eq!(layout.at(0), Some(NetPos::South));
    assert_eq!(layout.fine_level(), 3);
    assert_eq!(layout.index_of(NetPos::North), None);
    let layout = HexSubZones::new(2, rh(5, 6, 3), 2);
    assert_eq!(layout.at(0), Some(rh(5, 18, 9)));
    assert_eq!(layout.index_of(rh(6, 0, 0)), None);
  }
}
