// src/math/vec2d.rs

use crate::math::extensions::_lerp;
use crate::types::Vec2d;

/// Point at parameter `t` along the segment `p0`..`p1`.
#[inline]
#[must_use]
pub(crate) fn _v2d_lerp(p0: &Vec2d, p1: &Vec2d, t: f64) -> Vec2d {
  Vec2d {
    x: _lerp(p0.x, p1.x, t),
    y: _lerp(p0.y, p1.y, t),
  }
}

/// Signed area of a closed planar ring (shoelace formula), positive when
/// counter-clockwise in a y-up frame.
#[must_use]
pub(crate) fn _v2d_ring_area(ring: &[Vec2d]) -> f64 {
  if ring.len() < 3 {
    return 0.0;
  }
  let mut sum = 0.0;
  for (i, p) in ring.iter().enumerate() {
    let q = &ring[(i + 1) % ring.len()];
    sum += p.x * q.y - q.x * p.y;
  }
  sum / 2.0
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_v2d_lerp() {
    let p0 = Vec2d { x: 2.0, y: 2.0 };
    let p1 = Vec2d { x: 6.0, y: 4.0 };
    let mid = _v2d_lerp(&p0, &p1, 0.5);
    assert_eq!(mid, Vec2d { x: 4.0, y: 3.0 }, "midpoint");
    assert_eq!(_v2d_lerp(&p0, &p1, 1.0), p1, "end point");
  }

  #[test]
  fn test_v2d_ring_area() {
    let square = [
      Vec2d { x: 0.0, y: 0.0 },
      Vec2d { x: 2.0, y: 0.0 },
      Vec2d { x: 2.0, y: 2.0 },
      Vec2d { x: 0.0, y: 2.0 },
    ];
    assert!((_v2d_ring_area(&square) - 4.0).abs() < f64::EPSILON, "ccw square");
    let mut cw = square;
    cw.reverse();
    assert!((_v2d_ring_area(&cw) + 4.0).abs() < f64::EPSILON, "cw square is negative");
    assert!(_v2d_ring_area(&square[..2]).abs() < f64::EPSILON, "degenerate ring");
  }
}
