// src/config.rs

//! Construction options for a [`crate::Dggrs`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options used by [`crate::Dggrs::from_config`].
///
/// With the `serde` feature enabled this can be embedded in an
/// application's own configuration file; missing fields fall back to
/// [`DggrsConfig::default`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DggrsConfig {
  /// Grid name or short name, resolved case-insensitively by the registry.
  pub grid: String,
  /// Physical size of a display pixel in millimetres, used by scale
  /// denominator conversions.
  pub mm_per_pixel: f64,
  /// Number of segments each zone edge is split into by the refined vertex
  /// queries. 0 selects the grid's default.
  pub edge_refinement: u32,
}

/// OGC standardized rendering pixel size (0.28 mm).
pub const DEFAULT_MM_PER_PIXEL: f64 = 0.28;

impl Default for DggrsConfig {
  fn default() -> Self {
    Self {
      grid: "ISEA3H".to_string(),
      mm_per_pixel: DEFAULT_MM_PER_PIXEL,
      edge_refinement: 0,
    }
  }
}

impl DggrsConfig {
  /// Config selecting `grid` with all other options defaulted.
  #[must_use]
  pub fn for_grid(grid: &str) -> Self {
    Self {
      grid: grid.to_string(),
      ..Self::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let c = DggrsConfig::default();
    assert_eq!(c.grid, "ISEA3H");
    assert!((c.mm_per_pixel - 0.28).abs() < f64::EPSILON);
    assert_eq!(c.edge_refinement, 0);
  }

  #[test]
  fn test_for_grid() {
    let c = DggrsConfig::for_grid("rhp");
    assert_eq!(c.grid, "rhp");
    assert_eq!(c.edge_refinement, 0);
  }
}
