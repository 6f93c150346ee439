// src/zone/i9r.rs

use crate::constants::{
  RHOMBIC_COL_MASK, RHOMBIC_COL_OFFSET, RHOMBIC_LEVEL_MASK, RHOMBIC_LEVEL_OFFSET, RHOMBIC_ROW_MASK, RHOMBIC_ROW_OFFSET,
};
use crate::types::DggrsZone;
use crate::zone::{level_char, level_from_char, parse_hex_token};
use std::fmt::Write as _;

/// Handle of an aperture-9 grid with square or rhombic zones (ISEA9R and
/// rHEALPix): a level and the zone's row and column in the grid's global
/// cell array at that level.
///
/// The codec only packs fields; range checks against the grid's shape
/// belong to the grid.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RhombicZone(pub u64);

impl RhombicZone {
  /// Packs a zone. Returns the null handle when a field overflows.
  #[must_use]
  pub fn new(level: i32, row: u64, col: u64) -> Self {
    if !(0..32).contains(&level)
      || row > (RHOMBIC_ROW_MASK >> RHOMBIC_ROW_OFFSET)
      || col > (RHOMBIC_COL_MASK >> RHOMBIC_COL_OFFSET)
    {
      return RhombicZone(u64::MAX);
    }
    RhombicZone(((level as u64) << RHOMBIC_LEVEL_OFFSET) | (row << RHOMBIC_ROW_OFFSET) | (col << RHOMBIC_COL_OFFSET))
  }

  #[inline]
  #[must_use]
  pub const fn level(self) -> i32 {
    ((self.0 & RHOMBIC_LEVEL_MASK) >> RHOMBIC_LEVEL_OFFSET) as i32
  }

  #[inline]
  #[must_use]
  pub const fn row(self) -> u64 {
    (self.0 & RHOMBIC_ROW_MASK) >> RHOMBIC_ROW_OFFSET
  }

  #[inline]
  #[must_use]
  pub const fn col(self) -> u64 {
    (self.0 & RHOMBIC_COL_MASK) >> RHOMBIC_COL_OFFSET
  }

  #[inline]
  #[must_use]
  pub const fn is_null(self) -> bool {
    self.0 == u64::MAX
  }

  /// ISEA9R text id: level character, row and column in hexadecimal.
  #[must_use]
  pub fn to_text(self) -> String {
    let mut s = String::with_capacity(16);
    if let Some(c) = level_char(self.level()) {
      s.push(c);
    }
    let _ = write!(s, "{:X}-{:X}", self.row(), self.col());
    s
  }

  /// Parses [`RhombicZone::to_text`] output.
  #[must_use]
  pub fn from_text(text: &str) -> Option<Self> {
    let mut chars = text.chars();
    let level = level_from_char(chars.next()?)?;
    let (row, col) = chars.as_str().split_once('-')?;
    let z = Self::new(level, parse_hex_token(row)?, parse_hex_token(col)?);
    (!z.is_null()).then_some(z)
  }
}

impl From<RhombicZone> for DggrsZone {
  fn from(z: RhombicZone) -> Self {
    DggrsZone(z.0)
  }
}

impl From<DggrsZone> for RhombicZone {
  fn from(z: DggrsZone) -> Self {
    RhombicZone(z.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pack_fields() {
    let z = RhombicZone::new(3, 40, 27);
    assert_eq!(z.level(), 3);
    assert_eq!(z.row(), 40);
    assert_eq!(z.col(), 27);
    assert_eq!(z.0, (3u64 << 59) | (40u64 << 30) | 27);
    assert!(RhombicZone::new(32, 0, 0).is_null());
    assert!(RhombicZone::new(1, 1 << 29, 0).is_null());
  }

  #[test]
  fn test_text_ids() {
    let z = RhombicZone::new(2, 26, 11);
    assert_eq!(z.to_text(), "C1A-B");
    assert_eq!(RhombicZone::from_text("C1A-B"), Some(z));
    assert_eq!(RhombicZone::from_text("C1a-B"), None);
    assert_eq!(RhombicZone::from_text("C1A"), None);
    assert_eq!(RhombicZone::from_text(""), None);
    assert_eq!(RhombicZone::from_text("#1-1"), None);
  }
}
