// src/zone/i3h.rs

//! ISEA3H handles.
//!
//! An ISEA3H zone of level `L` is identified through the ISEA9R rhombus of
//! level `k = L / 2` that holds its centre: the handle stores `k`, the root
//! rhombus, the rhombus index `row * 3^k + col` and a sub-hex code telling
//! which point of that rhombus is the centre.
//!
//! | sub-hex | level  | centre at local `(u, v)` on the `3^(k+1)` lattice |
//! |---------|--------|----------------------------------------------------|
//! | 0       | even   | `(3col, 3row)`                                     |
//! | 1       | odd    | `(3col, 3row)`                                     |
//! | 2       | odd    | `(3col + 2, 3row + 1)`                             |
//! | 3       | odd    | `(3col + 1, 3row + 2)`                             |
//!
//! The two polar vertices use roots 10 (north) and 11 (south) with index 0.

use crate::constants::{
  I3H_INDEX_MASK, I3H_INDEX_OFFSET, I3H_LEVEL_MASK, I3H_LEVEL_OFFSET, I3H_MAX_LEVEL, I3H_ROOT_MASK, I3H_ROOT_OFFSET,
  I3H_SUBHEX_MASK, NUM_ROOT_RHOMBI, ROOT_NORTH_POLE, ROOT_SOUTH_POLE,
};
use crate::coords::net5x6::NetPos;
use crate::math::extensions::_upow_saturating;
use crate::types::DggrsZone;
use crate::zone::{level_char, level_from_char, parse_hex_token};
use std::fmt::Write as _;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct I3hZone(pub u64);

/// Scale of the lattice holding the centres of level `level`.
#[inline]
#[must_use]
pub fn lattice_scale(level: i32) -> i64 {
  3i64.pow((level / 2 + 1) as u32)
}

impl I3hZone {
  /// Packs raw fields without checking them against each other.
  #[must_use]
  pub const fn from_fields(rhombus_level: i32, root: u64, index: u64, subhex: u64) -> Self {
    I3hZone(
      (((rhombus_level as u64) << I3H_LEVEL_OFFSET) & I3H_LEVEL_MASK)
        | ((root << I3H_ROOT_OFFSET) & I3H_ROOT_MASK)
        | ((index << I3H_INDEX_OFFSET) & I3H_INDEX_MASK)
        | (subhex & I3H_SUBHEX_MASK),
    )
  }

  #[inline]
  #[must_use]
  pub const fn rhombus_level(self) -> i32 {
    ((self.0 & I3H_LEVEL_MASK) >> I3H_LEVEL_OFFSET) as i32
  }

  #[inline]
  #[must_use]
  pub const fn root(self) -> u64 {
    (self.0 & I3H_ROOT_MASK) >> I3H_ROOT_OFFSET
  }

  #[inline]
  #[must_use]
  pub const fn index(self) -> u64 {
    (self.0 & I3H_INDEX_MASK) >> I3H_INDEX_OFFSET
  }

  #[inline]
  #[must_use]
  pub const fn subhex(self) -> u64 {
    self.0 & I3H_SUBHEX_MASK
  }

  /// ISEA3H level.
  #[inline]
  #[must_use]
  pub const fn level(self) -> i32 {
    2 * self.rhombus_level() + if self.subhex() > 0 { 1 } else { 0 }
  }

  /// Encodes the zone of `level` centred on lattice position `pos`, at
  /// [`lattice_scale`]. Returns `None` for a position that is not a centre
  /// at that level.
  #[must_use]
  pub fn from_pos(level: i32, pos: NetPos) -> Option<Self> {
    if !(0..=I3H_MAX_LEVEL).contains(&level) {
      return None;
    }
    let k = level / 2;
    let odd = level % 2 == 1;
    let (root, u, v) = match pos {
      NetPos::North => return Some(Self::from_fields(k, ROOT_NORTH_POLE, 0, u64::from(odd))),
      NetPos::South => return Some(Self::from_fields(k, ROOT_SOUTH_POLE, 0, u64::from(odd))),
      NetPos::Rhombus { root, u, v } => (root, u, v),
    };
    let p = 3i64.pow(k as u32);
    let (col, row, subhex) = match (u.rem_euclid(3), v.rem_euclid(3), odd) {
      (0, 0, false) => (u / 3, v / 3, 0),
      (0, 0, true) => (u / 3, v / 3, 1),
      (2, 1, true) => ((u - 2) / 3, (v - 1) / 3, 2),
      (1, 2, true) => ((u - 1) / 3, (v - 2) / 3, 3),
      _ => return None,
    };
    if !(0..NUM_ROOT_RHOMBI).contains(&root) || !(0..p).contains(&col) || !(0..p).contains(&row) {
      return None;
    }
    Some(Self::from_fields(k, root as u64, (row * p + col) as u64, subhex))
  }

  /// Level and lattice position of the zone's centre, or `None` when the
  /// fields are inconsistent.
  #[must_use]
  pub fn pos(self) -> Option<(i32, NetPos)> {
    let k = self.rhombus_level();
    let subhex = self.subhex();
    let level = self.level();
    if level > I3H_MAX_LEVEL || subhex > 3 {
      return None;
    }
    match self.root() {
      ROOT_NORTH_POLE | ROOT_SOUTH_POLE => {
        if self.index() != 0 || subhex > 1 {
          return None;
        }
        let pos = if self.root() == ROOT_NORTH_POLE {
          NetPos::North
        } else {
          NetPos::South
        };
        Some((level, pos))
      }
      root if root < NUM_ROOT_RHOMBI as u64 => {
        let p = _upow_saturating(3, k as u32);
        let index = self.index();
        if index >= p.saturating_mul(p) {
          return None;
        }
        let (row, col) = ((index / p) as i64, (index % p) as i64);
        let (du, dv) = match subhex {
          0 | 1 => (0, 0),
          2 => (2, 1),
          _ => (1, 2),
        };
        Some((
          level,
          NetPos::Rhombus {
            root: root as i32,
            u: 3 * col + du,
            v: 3 * row + dv,
          },
        ))
      }
      _ => None,
    }
  }

  /// Text id: level character, root and index in hexadecimal, and for odd
  /// levels a sub-hex letter `A`, `B` or `C`.
  #[must_use]
  pub fn to_text(self) -> String {
    let mut s = String::with_capacity(20);
    if let Some(c) = level_char(self.level()) {
      s.push(c);
    }
    let _ = write!(s, "{:X}-{:X}", self.root(), self.index());
    if self.subhex() > 0 {
      s.push('-');
      s.push(char::from(b'A' + (self.subhex() - 1) as u8));
    }
    s
  }

  /// Parses [`I3hZone::to_text`] output. The result still needs a
  /// [`I3hZone::pos`] check.
  #[must_use]
  pub fn from_text(text: &str) -> Option<Self> {
    let mut chars = text.chars();
    let level = level_from_char(chars.next()?)?;
    let mut parts = chars.as_str().split('-');
    let root = parse_hex_token(parts.next()?)?;
    let index = parse_hex_token(parts.next()?)?;
    let subhex = match (parts.next(), level % 2) {
      (None, 0) => 0,
      (Some("A"), 1) => 1,
      (Some("B"), 1) => 2,
      (Some("C"), 1) => 3,
      _ => return None,
    };
    if parts.next().is_some() || root > 15 || index > (I3H_INDEX_MASK >> I3H_INDEX_OFFSET) {
      return None;
    }
    let z = Self::from_fields(level / 2, root, index, subhex);
    (z.level() == level).then_some(z)
  }
}

impl From<I3hZone> for DggrsZone {
  fn from(z: I3hZone) -> Self {
    DggrsZone(z.0)
  }
}

impl From<DggrsZone> for I3hZone {
  fn from(z: DggrsZone) -> Self {
    I3hZone(z.0)
  }
}
