// src/math/extensions.rs

/// `base^exp` for counts that may exceed `u64`, saturating at `u64::MAX`.
#[inline]
pub(crate) fn _upow_saturating(base: u64, exp: u32) -> u64 {
  base.checked_pow(exp).unwrap_or(u64::MAX)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub(crate) fn _lerp(a: f64, b: f64, t: f64) -> f64 {
  a + (b - a) * t
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_upow_saturating() {
    assert_eq!(_upow_saturating(9, 19), 1_350_851_717_672_992_089);
    assert_eq!(_upow_saturating(9, 21), u64::MAX);
    assert_eq!(_upow_saturating(3, 0), 1);
  }

  #[test]
  fn test_lerp() {
    assert!((_lerp(2.0, 4.0, 0.5) - 3.0).abs() < f64::EPSILON);
    assert!((_lerp(2.0, 4.0, 0.0) - 2.0).abs() < f64::EPSILON);
    assert!((_lerp(2.0, 4.0, 1.0) - 4.0).abs() < f64::EPSILON);
  }
}
