// src/resolution.rs

//! Conversions between zone levels and physical resolutions.
//!
//! Every quantity here shrinks as the level grows. The level-from-value
//! inverses pick the finest level whose value is still not finer than the
//! request, treating values within [`TIE_TOLERANCE`] as exact matches, and
//! clamp to the levels whose sub-zones at the requested depth exist. A
//! negative depth counts as 0 here; the façade rejects it.

use crate::grids::Grid;
use crate::types::GeoExtent;

/// Relative tolerance under which a level's value matches a request exactly.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Millimetres per metre.
const MM_PER_M: f64 = 1000.0;

/// Area of a regular zone at `level`, in square metres.
pub fn ref_zone_area<G: Grid + ?Sized>(grid: &G, level: i32) -> f64 {
  grid.ref_zone_area(level)
}

/// Typical spacing in metres of the sub-zones `depth` levels below a zone of
/// `level`: the side of a square of the reference zone area.
pub fn meters_per_sub_zone<G: Grid + ?Sized>(grid: &G, level: i32, depth: i32) -> f64 {
  grid.ref_zone_area(level.saturating_add(depth)).sqrt()
}

/// Map scale denominator at which one sub-zone `depth` levels below `level`
/// spans one display pixel of `mm_per_pixel` millimetres.
pub fn scale_denominator<G: Grid + ?Sized>(grid: &G, level: i32, depth: i32, mm_per_pixel: f64) -> f64 {
  meters_per_sub_zone(grid, level, depth) * MM_PER_M / mm_per_pixel
}

/// Level for a requested sub-zone spacing.
pub fn level_from_meters_per_sub_zone<G: Grid + ?Sized>(grid: &G, meters: f64, depth: i32) -> i32 {
  _level_for(grid, depth, meters, |level| meters_per_sub_zone(grid, level, depth))
}

/// Level for a requested scale denominator.
pub fn level_from_scale_denominator<G: Grid + ?Sized>(grid: &G, denominator: f64, depth: i32, mm_per_pixel: f64) -> i32 {
  _level_for(grid, depth, denominator, |level| scale_denominator(grid, level, depth, mm_per_pixel))
}

/// Level for rendering `extent` onto a `width` by `height` pixel image,
/// with one sub-zone `depth` levels down per pixel.
pub fn level_from_pixels_and_extent<G: Grid + ?Sized>(
  grid: &G,
  extent: &GeoExtent,
  width: u32,
  height: u32,
  depth: i32,
) -> i32 {
  let pixels = f64::from(width) * f64::from(height);
  if pixels <= 0.0 || extent.is_null() {
    return 0;
  }
  let meters_per_pixel = (extent.geodetic_area() / pixels).sqrt();
  level_from_meters_per_sub_zone(grid, meters_per_pixel, depth)
}

/// Level whose reference zone area best matches `area` square metres.
pub fn level_from_ref_zone_area<G: Grid + ?Sized>(grid: &G, area: f64) -> i32 {
  _level_for(grid, 0, area, |level| grid.ref_zone_area(level))
}

/// Finest level, with `depth` more levels below it, whose value is not
/// below `target`.
fn _level_for<G: Grid + ?Sized>(grid: &G, depth: i32, target: f64, value_at: impl Fn(i32) -> f64) -> i32 {
  let floor = target * (1.0 - TIE_TOLERANCE);
  let last = (grid.max_level() - depth.clamp(0, grid.max_level())).max(0);
  let mut best = 0;
  for level in 0..=last {
    if value_at(level) < floor {
      break;
    }
    best = level;
  }
  best
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::EARTH_AREA_M2;
  use crate::grids::{Isea3h, Isea9r, RHealpix};

  #[test]
  fn test_ref_zone_area() {
    let g = Isea9r::new().unwrap();
    assert!((ref_zone_area(&g, 0) - EARTH_AREA_M2 / 10.0).abs() < 1.0);
    let r = RHealpix::new();
    assert!((ref_zone_area(&r, 1) * 54.0 - EARTH_AREA_M2).abs() < 1.0);
  }

  #[test]
  fn test_levels_invert_exactly() {
    let g = Isea3h::new().unwrap();
    for level in 0..=g.max_level() {
      let m = meters_per_sub_zone(&g, level, 0);
      assert_eq!(level_from_meters_per_sub_zone(&g, m, 0), level);
      let area = ref_zone_area(&g, level);
      assert_eq!(level_from_ref_zone_area(&g, area), level);
      let s = scale_denominator(&g, level, 0, 0.28);
      assert_eq!(level_from_scale_denominator(&g, s, 0, 0.28), level);
    }
  }

  #[test]
  fn test_rounds_toward_coarser_level() {
    let g = Isea9r::new().unwrap();
    let m4 = meters_per_sub_zone(&g, 4, 0);
    let m5 = meters_per_sub_zone(&g, 5, 0);
    assert_eq!(level_from_meters_per_sub_zone(&g, (m4 + m5) / 2.0, 0), 4);
    assert_eq!(level_from_meters_per_sub_zone(&g, m5 * 1.01, 0), 4);
    assert_eq!(level_from_meters_per_sub_zone(&g, 1e12, 0), 0, "clamped at the coarsest level");
    assert_eq!(level_from_meters_per_sub_zone(&g, 1e-6, 0), g.max_level());
  }

  #[test]
  fn test_depth_shifts_level() {
    let g = RHealpix::new();
    let m = meters_per_sub_zone(&g, 7, 0);
    assert_eq!(level_from_meters_per_sub_zone(&g, m, 3), 4);
    assert!((meters_per_sub_zone(&g, 4, 3) - m).abs() < 1e-9);
  }

  #[test]
  fn test_deep_requests_stay_in_range() {
    let g = Isea9r::new().unwrap();
    let max = g.max_level();
    assert_eq!(level_from_meters_per_sub_zone(&g, 1e-3, 5), max - 5);
    assert_eq!(level_from_meters_per_sub_zone(&g, 1e-3, max + 4), 0);
    assert!(meters_per_sub_zone(&g, max, i32::MAX).is_finite());
    let h = Isea3h::new().unwrap();
    assert_eq!(level_from_scale_denominator(&h, 1e-3, 10, 0.28), h.max_level() - 10);
    assert_eq!(level_from_ref_zone_area(&h, 0.0), h.max_level());
    assert!(ref_zone_area(&h, 60) > 0.0);
  }

  #[test]
  fn test_pixels_and_extent() {
    let g = Isea9r::new().unwrap();
    let world = GeoExtent::WHOLE_WORLD;
    // One pixel per level 2 zone.
    let side = (g.count_zones(2) as f64).sqrt().ceil() as u32;
    let level = level_from_pixels_and_extent(&g, &world, side, side, 0);
    assert_eq!(level, 2);
    assert_eq!(level_from_pixels_and_extent(&g, &world, 0, 10, 0), 0);
  }
}
