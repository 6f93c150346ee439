// src/hierarchy/compaction.rs

use crate::grids::Grid;
use crate::types::DggrsZone;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Compacts a set of valid zones into a minimal cover.
///
/// A parent's sibling set is its depth 1 sub-zones. These are all its
/// children on square grids. On ISEA3H they are the children it owns, so a
/// vertex child shared with a parent outside the set is never absorbed. Each
/// pass collects every parent whose sibling set is complete, then replaces
/// those sets with their parents. Passes repeat until nothing changes, so
/// compacting the result again is a no-op, and expanding the result back
/// to the input levels gives the input.
///
/// # Arguments
/// * `grid` - The grid the zones belong to.
/// * `zones` - Zones in any order, duplicates allowed. All must be valid.
///
/// # Returns
/// The compacted zones, sorted by level then by handle.
pub fn compact_zones<G: Grid + ?Sized>(grid: &G, zones: &[DggrsZone]) -> Vec<DggrsZone> {
  let mut set: HashSet<DggrsZone> = zones.iter().copied().collect();
  let mut passes = 0;

  loop {
    let mut complete: BTreeSet<DggrsZone> = BTreeSet::new();
    for &z in &set {
      for p in grid.parents(z) {
        if set.contains(&p) || complete.contains(&p) {
          continue;
        }
        let mut siblings = grid.sub_zones(p, 1).peekable();
        if siblings.peek().is_some() && siblings.all(|c| set.contains(&c)) {
          complete.insert(p);
        }
      }
    }
    if complete.is_empty() {
      break;
    }
    passes += 1;
    for &p in &complete {
      for c in grid.sub_zones(p, 1) {
        set.remove(&c);
      }
    }
    set.extend(complete);
  }

  let mut out: Vec<DggrsZone> = set.into_iter().collect();
  out.sort_unstable_by_key(|&z| (grid.level(z), z.0));
  debug!(input = zones.len(), output = out.len(), passes, "compacted zones");
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grids::{Isea3h, Isea9r};

  #[test]
  fn test_compact_full_sibling_set() {
    let g = Isea9r::new().unwrap();
    let root = g.root_zones()[3];
    let mut input = g.children(root);
    input.reverse();
    assert_eq!(compact_zones(&g, &input), vec![root]);
  }

  #[test]
  fn test_compact_recursive() {
    let g = Isea9r::new().unwrap();
    let root = g.root_zones()[0];
    let grandchildren: Vec<_> = g.children(root).into_iter().flat_map(|c| g.children(c)).collect();
    assert_eq!(grandchildren.len(), 81);
    assert_eq!(compact_zones(&g, &grandchildren), vec![root]);
  }

  #[test]
  fn test_partial_set_is_kept() {
    let g = Isea9r::new().unwrap();
    let root = g.root_zones()[5];
    let mut input = g.children(root);
    input.pop();
    let extra = input[0];
    input.push(extra);
    let out = compact_zones(&g, &input);
    assert_eq!(out.len(), 8);
    assert!(out.windows(2).all(|w| w[0].0 < w[1].0));
  }

  #[test]
  fn test_compact_hexagon_keeps_shared_children() {
    let g = Isea3h::new().unwrap();
    let z = g.children(g.root_zones()[4])[2];
    let children = g.children(z);
    assert_eq!(children.len(), 7);
    let owned: Vec<_> = g.sub_zones(z, 1).collect();
    assert_eq!(compact_zones(&g, &owned), vec![z]);

    let out = compact_zones(&g, &children);
    assert_eq!(out.len(), 5);
    assert!(out.contains(&z));
    for c in children.iter().filter(|c| !owned.contains(c)) {
      assert!(out.contains(c), "{} shared with another parent", g.text_id(*c));
    }
    // Expanded back to the input level the output is the input again,
    // each child once.
    let level = g.level(children[0]);
    let expanded: Vec<_> = out.iter().flat_map(|&x| g.sub_zones(x, level - g.level(x))).collect();
    assert_eq!(expanded.len(), children.len());
    let expanded: HashSet<_> = expanded.into_iter().collect();
    assert_eq!(expanded, children.iter().copied().collect());
    let area = |zs: &HashSet<DggrsZone>| zs.iter().map(|&x| g.zone_area(x)).sum::<f64>();
    let input: HashSet<_> = children.iter().copied().collect();
    assert!((area(&expanded) - area(&input)).abs() < 1e-6 * area(&input));
  }

  #[test]
  fn test_compact_hexagons_idempotent() {
    let g = Isea3h::new().unwrap();
    let root = g.root_zones()[2];
    let mut input = g.children(root);
    let other = g.root_zones()[7];
    input.extend(g.children(other));
    let once = compact_zones(&g, &input);
    assert!(once.contains(&root));
    assert!(once.contains(&other));
    assert_eq!(compact_zones(&g, &once), once);
  }
}
