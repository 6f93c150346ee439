// src/hierarchy/ancestry.rs

use crate::grids::Grid;
use crate::types::DggrsZone;

/// Whether `parent` is one of `child`'s immediate parents.
pub fn is_immediate_child_of<G: Grid + ?Sized>(grid: &G, child: DggrsZone, parent: DggrsZone) -> bool {
  grid.level(child) == grid.level(parent) + 1 && grid.parents(child).contains(&parent)
}

/// Whether `ancestor` is reachable from `descendant` by stepping up parent
/// links.
///
/// `max_depth` bounds the level difference; 0 or a negative value means no
/// bound beyond the grid's levels. A zone is not its own ancestor.
pub fn is_ancestor_of<G: Grid + ?Sized>(grid: &G, ancestor: DggrsZone, descendant: DggrsZone, max_depth: i32) -> bool {
  let diff = grid.level(descendant) - grid.level(ancestor);
  if diff <= 0 || (max_depth > 0 && diff > max_depth) {
    return false;
  }
  let mut frontier = vec![descendant];
  for _ in 0..diff {
    let mut next: Vec<DggrsZone> = Vec::with_capacity(frontier.len() * grid.max_parents());
    for z in frontier {
      for p in grid.parents(z) {
        if !next.contains(&p) {
          next.push(p);
        }
      }
    }
    frontier = next;
  }
  frontier.contains(&ancestor)
}

/// Whether two distinct zones of one level share a parent.
pub fn are_siblings<G: Grid + ?Sized>(grid: &G, a: DggrsZone, b: DggrsZone) -> bool {
  if a == b || grid.level(a) != grid.level(b) {
    return false;
  }
  let pb = grid.parents(b);
  grid.parents(a).iter().any(|p| pb.contains(p))
}
