// src/coords/net5x6.rs

//! Integer lattice of the 5x6 rhombic net of the icosahedron.
//!
//! At scale `n` the ten root rhombi occupy the squares `(k, k)` (root `2k`,
//! northern) and `(k, k + 1)` (root `2k + 1`, southern) of an `n`-spaced
//! grid, `k` in `0..5`. The net repeats every `(5n, 5n)`. The squares
//! `(j + 1, j)` and `(j, j + 2)` are the interruption gaps around the north
//! vertex `N_j = (n(j + 1), nj)` and south vertex `S_j = (nj, n(j + 2))`.
//! All `N_j` are the same point of the sphere, as are all `S_j`; a gap is
//! glued onto its neighbouring rhombus by a 60° rotation about the vertex.
//!
//! The lattice axes are 120° apart on the sphere, so the squared length of
//! `(dx, dy)` is `dx² + dy² − dx·dy`.

use crate::types::Vec2d;
use std::ops::{Add, Sub};

/// Point of the net lattice at some scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NetCoord {
  pub x: i64,
  pub y: i64,
}

impl NetCoord {
  #[inline]
  #[must_use]
  pub const fn new(x: i64, y: i64) -> Self {
    Self { x, y }
  }

  #[inline]
  #[must_use]
  pub const fn scale(self, k: i64) -> Self {
    Self::new(self.x * k, self.y * k)
  }
}

impl Add for NetCoord {
  type Output = NetCoord;

  #[inline]
  fn add(self, o: NetCoord) -> NetCoord {
    NetCoord::new(self.x + o.x, self.y + o.y)
  }
}

impl Sub for NetCoord {
  type Output = NetCoord;

  #[inline]
  fn sub(self, o: NetCoord) -> NetCoord {
    NetCoord::new(self.x - o.x, self.y - o.y)
  }
}

/// A canonical lattice position: one of the two polar vertices, or a point
/// of a root rhombus with local coordinates in `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetPos {
  North,
  South,
  Rhombus { root: i32, u: i64, v: i64 },
}

/// A 60° rotation of lattice offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
  Cw,
  Ccw,
}

impl Rotation {
  #[inline]
  #[must_use]
  pub const fn apply(self, d: NetCoord) -> NetCoord {
    match self {
      Rotation::Cw => NetCoord::new(d.x - d.y, d.x),
      Rotation::Ccw => NetCoord::new(d.y, d.y - d.x),
    }
  }

  #[inline]
  #[must_use]
  pub fn apply_f64(self, d: Vec2d) -> Vec2d {
    match self {
      Rotation::Cw => Vec2d { x: d.x - d.y, y: d.x },
      Rotation::Ccw => Vec2d { x: d.y, y: d.y - d.x },
    }
  }
}

/// Gaps a point can cross before canonicalization gives up.
const MAX_GLUE_STEPS: usize = 4;

/// Squared lattice length of `(dx, dy)`.
#[inline]
#[must_use]
pub const fn lattice_dist2(dx: i64, dy: i64) -> i64 {
  dx * dx + dy * dy - dx * dy
}

/// Shifts `p` by whole periods so that `x` lies in `[0, 5n)`.
#[inline]
#[must_use]
pub fn wrap(p: NetCoord, n: i64) -> NetCoord {
  let k = p.x.div_euclid(5 * n);
  NetCoord::new(p.x - 5 * n * k, p.y - 5 * n * k)
}

/// Square `(cx, cy)` of a root rhombus, in units of the scale.
#[inline]
#[must_use]
pub const fn root_square(root: i32) -> (i64, i64) {
  let k = (root / 2) as i64;
  if root % 2 == 0 {
    (k, k)
  } else {
    (k, k + 1)
  }
}

/// Lattice position of the local origin of `root` at scale `n`.
#[inline]
#[must_use]
pub const fn root_origin(root: i32, n: i64) -> NetCoord {
  let (cx, cy) = root_square(root);
  NetCoord::new(cx * n, cy * n)
}

/// Copy `j` of the north vertex.
#[inline]
#[must_use]
pub const fn north_vertex(j: i64, n: i64) -> NetCoord {
  NetCoord::new(n * (j + 1), n * j)
}

/// Copy `j` of the south vertex.
#[inline]
#[must_use]
pub const fn south_vertex(j: i64, n: i64) -> NetCoord {
  NetCoord::new(n * j, n * (j + 2))
}

/// Lattice position of a canonical point. Polar vertices use copy 0.
#[must_use]
pub fn net_position(pos: NetPos, n: i64) -> NetCoord {
  match pos {
    NetPos::North => north_vertex(0, n),
    NetPos::South => south_vertex(0, n),
    NetPos::Rhombus { root, u, v } => root_origin(root, n) + NetCoord::new(u, v),
  }
}

/// Gluing of an interruption gap onto a rhombus: `to + rot(p - from)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GapMap {
  from: NetCoord,
  to: NetCoord,
  rot: Rotation,
  target_root: i32,
}

impl GapMap {
  #[inline]
  fn apply(&self, p: NetCoord) -> NetCoord {
    self.to + self.rot.apply(p - self.from)
  }

  /// Same map on a continuous point of the unit-scale net.
  #[inline]
  fn apply_unit(&self, p: Vec2d) -> Vec2d {
    let d = self.rot.apply_f64(Vec2d {
      x: p.x - self.from.x as f64,
      y: p.y - self.from.y as f64,
    });
    Vec2d {
      x: self.to.x as f64 + d.x,
      y: self.to.y as f64 + d.y,
    }
  }
}

/// Chooses the gluing for a point in gap square `(cx, cy)`. The point is
/// taken to come from rhombus `hint`; without a usable hint, points on the
/// gap's shared edge with the western (`u_zero`) or northern (`v_zero`)
/// rhombus are glued across that edge.
fn gap_map(cx: i64, cy: i64, u_zero: bool, v_zero: bool, n: i64, hint: Option<i32>) -> Option<GapMap> {
  match cy - cx {
    -1 => {
      let j = cx - 1;
      let src_j = (2 * j.rem_euclid(5)) as i32;
      let src_j1 = (2 * (j + 1).rem_euclid(5)) as i32;
      if hint == Some(src_j) || (hint != Some(src_j1) && u_zero) {
        Some(GapMap {
          from: north_vertex(j, n),
          to: north_vertex(j + 1, n),
          rot: Rotation::Cw,
          target_root: src_j1,
        })
      } else if hint == Some(src_j1) {
        Some(GapMap {
          from: north_vertex(j + 1, n),
          to: north_vertex(j, n),
          rot: Rotation::Ccw,
          target_root: src_j,
        })
      } else {
        None
      }
    }
    2 => {
      let j = cx;
      let src_j = (2 * j.rem_euclid(5) + 1) as i32;
      let src_j1 = (2 * (j + 1).rem_euclid(5) + 1) as i32;
      if hint == Some(src_j) || (hint != Some(src_j1) && v_zero) {
        Some(GapMap {
          from: south_vertex(j, n),
          to: south_vertex(j + 1, n),
          rot: Rotation::Ccw,
          target_root: src_j1,
        })
      } else if hint == Some(src_j1) {
        Some(GapMap {
          from: south_vertex(j + 1, n),
          to: south_vertex(j, n),
          rot: Rotation::Cw,
          target_root: src_j,
        })
      } else {
        None
      }
    }
    _ => None,
  }
}

/// Canonical form of lattice point `p` at scale `n`.
///
/// Points in an interruption gap are glued onto a rhombus; `hint` names the
/// root rhombus the point was reached from and decides between the two
/// rhombi sharing the gap. Returns `None` for points outside the net and for
/// gap points whose side cannot be decided.
#[must_use]
pub fn canonicalize(p: NetCoord, n: i64, hint: Option<i32>) -> Option<NetPos> {
  let mut p = p;
  let mut hint = hint;
  for _ in 0..=MAX_GLUE_STEPS {
    p = wrap(p, n);
    let cx = p.x.div_euclid(n);
    let cy = p.y.div_euclid(n);
    let u = p.x - cx * n;
    let v = p.y - cy * n;
    let dd = cy - cx;
    if u == 0 && v == 0 {
      if dd == -1 {
        return Some(NetPos::North);
      }
      if dd == 2 {
        return Some(NetPos::South);
      }
    }
    match dd {
      0 | 1 => {
        return Some(NetPos::Rhombus {
          root: (cx + cy) as i32,
          u,
          v,
        })
      }
      -1 if v < u => return None,
      2 if u < v => return None,
      -1 | 2 => {}
      _ => return None,
    }
    let map = gap_map(cx, cy, u == 0, v == 0, n, hint)?;
    p = map.apply(p);
    hint = Some(map.target_root);
  }
  None
}

/// Tolerance for continuous points on rhombus edges.
const UNIT_EDGE_EPS: f64 = 1e-9;

/// Canonical form of a continuous point `p` of the unit-scale net, as its
/// root rhombus and local coordinates in `[0, 1)`.
///
/// Gap points are glued as in [`canonicalize`]. The polar vertices are
/// returned as a corner of the rhombus they are reached from.
#[must_use]
pub fn canonicalize_point(p: Vec2d, hint: Option<i32>) -> Option<(i32, Vec2d)> {
  let mut p = p;
  let mut hint = hint;
  for _ in 0..=MAX_GLUE_STEPS {
    let k = (p.x / 5.0).floor();
    p.x -= 5.0 * k;
    p.y -= 5.0 * k;
    let cx = p.x.floor();
    let cy = p.y.floor();
    let u = p.x - cx;
    let v = p.y - cy;
    let dd = (cy - cx) as i64;
    let (icx, icy) = (cx as i64, cy as i64);
    let at_corner = u < UNIT_EDGE_EPS && v < UNIT_EDGE_EPS;
    match dd {
      0 | 1 => return Some(((icx + icy) as i32, Vec2d { x: u, y: v })),
      -1 if at_corner => return Some(((2 * (icx - 1).rem_euclid(5)) as i32, Vec2d { x: 1.0, y: 0.0 })),
      2 if at_corner => return Some(((2 * icx.rem_euclid(5) + 1) as i32, Vec2d { x: 0.0, y: 1.0 })),
      -1 if v < u - UNIT_EDGE_EPS => return None,
      2 if u < v - UNIT_EDGE_EPS => return None,
      -1 | 2 => {}
      _ => return None,
    }
    let map = gap_map(icx, icy, u < UNIT_EDGE_EPS, v < UNIT_EDGE_EPS, 1, hint)?;
    p = map.apply_unit(p);
    hint = Some(map.target_root);
  }
  None
}

/// Glues `p` across the gap containing `beyond`.
///
/// Used to step across an interruption from a rhombus edge: `beyond` is a
/// point just past the edge, `p` a point on it. Returns the image of `p` and
/// the rotation applied, or `None` when `beyond` is not in a gap.
#[must_use]
pub fn glue_across(p: NetCoord, beyond: NetCoord, n: i64, hint: i32) -> Option<(NetCoord, Rotation)> {
  let wp = wrap(beyond, n);
  let p = p - (beyond - wp);
  let cx = wp.x.div_euclid(n);
  let cy = wp.y.div_euclid(n);
  let map = gap_map(cx, cy, wp.x == cx * n, wp.y == cy * n, n, Some(hint))?;
  Some((map.apply(p), map.rot))
}

/// Lattice points that may canonicalize to the same position as `p`: its
/// neighbouring periods and their images under every gap gluing.
#[must_use]
pub fn preimages(p: NetCoord, n: i64) -> Vec<NetCoord> {
  let mut out = Vec::with_capacity(63);
  for w0 in -1..=1 {
    let q = p + NetCoord::new(5 * n * w0, 5 * n * w0);
    out.push(q);
    for j in 0..5 {
      let (nj, nj1) = (north_vertex(j, n), north_vertex(j + 1, n));
      let (sj, sj1) = (south_vertex(j, n), south_vertex(j + 1, n));
      out.push(nj + Rotation::Ccw.apply(q - nj1));
      out.push(nj1 + Rotation::Cw.apply(q - nj));
      out.push(sj + Rotation::Cw.apply(q - sj1));
      out.push(sj1 + Rotation::Ccw.apply(q - sj));
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rh(root: i32, u: i64, v: i64) -> Option<NetPos> {
    Some(NetPos::Rhombus { root, u, v })
  }

  #[test]
  fn test_rotations_are_inverse() {
    let d = NetCoord::new(5, -2);
    assert_eq!(Rotation::Cw.apply(Rotation::Ccw.apply(d)), d);
    let mut e = d;
    for _ in 0..6 {
      e = Rotation::Cw.apply(e);
    }
    assert_eq!(e, d, "six 60 degree turns");
    assert_eq!(lattice_dist2(d.x, d.y), lattice_dist2(Rotation::Cw.apply(d).x, Rotation::Cw.apply(d).y));
  }

  #[test]
  fn test_root_squares() {
    assert_eq!(root_square(0), (0, 0));
    assert_eq!(root_square(1), (0, 1));
    assert_eq!(root_square(8), (4, 4));
    assert_eq!(root_square(9), (4, 5));
    assert_eq!(root_origin(3, 9), NetCoord::new(9, 18));
  }

  #[test]
  fn test_canonicalize_inside() {
    assert_eq!(canonicalize(NetCoord::new(1, 1), 3, None), rh(0, 1, 1));
    assert_eq!(canonicalize(NetCoord::new(16, 16), 3, None), rh(0, 1, 1), "wraps");
    assert_eq!(canonicalize(NetCoord::new(15, 15), 3, None), rh(0, 0, 0));
    assert_eq!(canonicalize(NetCoord::new(2, 20), 3, None), None, "outside the net");
  }

  #[test]
  fn test_canonicalize_poles() {
    assert_eq!(canonicalize(NetCoord::new(3, 0), 3, None), Some(NetPos::North));
    assert_eq!(canonicalize(NetCoord::new(9, 6), 3, None), Some(NetPos::North));
    assert_eq!(canonicalize(NetCoord::new(0, 6), 3, None), Some(NetPos::South));
    assert_eq!(net_position(NetPos::South, 3), NetCoord::new(0, 6));
  }

  #[test]
  fn test_canonicalize_gaps() {
    // North gap between roots 0 and 2
    assert_eq!(canonicalize(NetCoord::new(4, 2), 3, None), None, "ambiguous without hint");
    assert_eq!(canonicalize(NetCoord::new(4, 2), 3, Some(0)), rh(2, 2, 1));
    assert_eq!(canonicalize(NetCoord::new(4, 2), 3, Some(2)), rh(0, 2, 1));
    assert_eq!(canonicalize(NetCoord::new(3, 1), 3, None), rh(2, 2, 0), "shared edge");
    // South gap between roots 1 and 3
    assert_eq!(canonicalize(NetCoord::new(1, 7), 3, Some(1)), rh(5, 0, 2));
    assert_eq!(canonicalize(NetCoord::new(2, 7), 3, Some(1)), rh(3, 1, 2));
    assert_eq!(canonicalize(NetCoord::new(1, 7), 3, None), None);
  }

  #[test]
  fn test_preimages_cover_gap_images() {
    let p = NetCoord::new(4, 2);
    let image = canonicalize(p, 3, Some(0));
    let target = net_position(image.unwrap(), 3);
    assert!(preimages(target, 3).contains(&p), "gap point is a preimage of its image");
    assert_eq!(preimages(target, 3).len(), 63);
  }

  #[test]
  fn test_canonicalize_point() {
    let (root, local) = canonicalize_point(Vec2d { x: 1.25, y: 1.5 }, None).unwrap();
    assert_eq!(root, 2);
    assert!((local.x - 0.25).abs() < 1e-15 && (local.y - 0.5).abs() < 1e-15);

    // Same gap point as the integer case (4, 2) at scale 3
    let (root, local) = canonicalize_point(Vec2d { x: 4.0 / 3.0, y: 2.0 / 3.0 }, Some(0)).unwrap();
    assert_eq!(root, 2);
    assert!((local.x - 2.0 / 3.0).abs() < 1e-12 && (local.y - 1.0 / 3.0).abs() < 1e-12);

    let (root, local) = canonicalize_point(Vec2d { x: 1.0, y: 0.0 }, None).unwrap();
    assert_eq!((root, local.x, local.y), (0, 1.0, 0.0), "north vertex as a corner of root 0");
    assert!(canonicalize_point(Vec2d { x: 1.8, y: 0.2 }, Some(0)).is_none(), "outside the net");
  }

  #[test]
  fn test_glue_across() {
    // From root 0 local (3, 1) (its eastern edge) into the north gap
    let (q, rot) = glue_across(NetCoord::new(3, 1), NetCoord::new(4, 1), 3, 0).unwrap();
    assert_eq!(rot, Rotation::Cw);
    assert_eq!(canonicalize(q, 3, Some(2)), rh(2, 2, 0));
    assert_eq!(glue_across(NetCoord::new(1, 1), NetCoord::new(2, 2), 3, 0), None, "not a gap");
  }
}
