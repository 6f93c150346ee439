// src/zone/rhp.rs

//! rHEALPix text identifiers: a face letter followed by one base-9 digit
//! per level, `3 * row_digit + col_digit`, most significant first.

use crate::constants::RHP_MAX_LEVEL;
use crate::zone::i9r::RhombicZone;

const FACE_LETTERS: [char; 6] = ['N', 'O', 'P', 'Q', 'R', 'S'];

/// Face index (0 = N .. 5 = S) and face-local row and column of a cell of
/// the `4s x 3s` rHEALPix array, `s = 3^level`.
#[must_use]
pub fn face_of(row: u64, col: u64, side: u64) -> Option<(usize, u64, u64)> {
  let (frow, fcol) = (row / side, col / side);
  let face = match (frow, fcol) {
    (0, 0) => 0,
    (1, 0..=3) => 1 + fcol as usize,
    (2, 0) => 5,
    _ => return None,
  };
  Some((face, row % side, col % side))
}

/// Text id of an rHEALPix zone, or `None` outside the six faces.
#[must_use]
pub fn to_text(z: RhombicZone) -> Option<String> {
  let level = z.level();
  if level > RHP_MAX_LEVEL {
    return None;
  }
  let side = 3u64.pow(level as u32);
  let (face, r, c) = face_of(z.row(), z.col(), side)?;
  let mut s = String::with_capacity(1 + level as usize);
  s.push(FACE_LETTERS[face]);
  let mut div = side / 3;
  for _ in 0..level {
    let digit = 3 * ((r / div) % 3) + (c / div) % 3;
    s.push(char::from(b'0' + digit as u8));
    div = (div / 3).max(1);
  }
  Some(s)
}

/// Parses [`to_text`] output.
#[must_use]
pub fn from_text(text: &str) -> Option<RhombicZone> {
  let mut chars = text.chars();
  let first = chars.next()?;
  let face = FACE_LETTERS.iter().position(|&f| f == first)?;
  let digits = chars.as_str();
  let level = i32::try_from(digits.len()).ok()?;
  if level > RHP_MAX_LEVEL {
    return None;
  }
  let (mut r, mut c) = (0u64, 0u64);
  for b in digits.bytes() {
    if !(b'0'..=b'8').contains(&b) {
      return None;
    }
    let d = u64::from(b - b'0');
    r = 3 * r + d / 3;
    c = 3 * c + d % 3;
  }
  let side = 3u64.pow(level as u32);
  let (frow, fcol) = match face {
    0 => (0, 0),
    5 => (2, 0),
    f => (1, f as u64 - 1),
  };
  Some(RhombicZone::new(level, frow * side + r, fcol * side + c))
}
