// src/zone/mod.rs

//! Zone identifier codecs: named views over the packed 64-bit handle of
//! each grid family, and their textual identifiers.

pub mod i3h;
pub mod i9r;
pub mod rhp;

pub use i3h::I3hZone;
pub use i9r::RhombicZone;

/// Character encoding a level in textual identifiers: `A..Z` for levels
/// 0 to 25, then `a..z`.
#[must_use]
pub(crate) fn level_char(level: i32) -> Option<char> {
  match level {
    0..=25 => Some(char::from(b'A' + level as u8)),
    26..=51 => Some(char::from(b'a' + (level - 26) as u8)),
    _ => None,
  }
}

#[must_use]
pub(crate) fn level_from_char(c: char) -> Option<i32> {
  match c {
    'A'..='Z' => Some(c as i32 - 'A' as i32),
    'a'..='z' => Some(c as i32 - 'a' as i32 + 26),
    _ => None,
  }
}

/// Parses an upper-case hexadecimal token. Lower case, signs and empty
/// tokens are rejected so that every value has exactly one spelling.
pub(crate) fn parse_hex_token(s: &str) -> Option<u64> {
  if s.is_empty() || s.len() > 16 || !s.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b)) {
    return None;
  }
  if s.len() > 1 && s.starts_with('0') {
    return None;
  }
  u64::from_str_radix(s, 16).ok()
}
