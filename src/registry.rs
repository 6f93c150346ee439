// src/registry.rs

//! Lookup of grid families by name.
//!
//! [`DggrsRegistry`] is an immutable table built once by the application
//! and passed to whoever needs to resolve grids by name.

use crate::system::Dggrs;
use crate::types::{DggrsError, GridFamily};
use tracing::debug;

/// Family, canonical name and short name.
const GRID_NAMES: [(GridFamily, &str, &str); 3] = [
  (GridFamily::Isea3h, "ISEA3H", "i3h"),
  (GridFamily::Isea9r, "ISEA9R", "i9r"),
  (GridFamily::RHealpix, "rHEALPix", "rhp"),
];

impl GridFamily {
  /// Canonical name, e.g. `"rHEALPix"`.
  #[must_use]
  pub fn name(self) -> &'static str {
    GRID_NAMES[self as usize].1
  }

  /// Short name, e.g. `"rhp"`.
  #[must_use]
  pub fn short_name(self) -> &'static str {
    GRID_NAMES[self as usize].2
  }
}

/// Resolves a canonical or short grid name, ignoring case.
pub fn family_from_name(name: &str) -> Result<GridFamily, DggrsError> {
  let name = name.trim();
  GRID_NAMES
    .iter()
    .find(|(_, long, short)| long.eq_ignore_ascii_case(name) || short.eq_ignore_ascii_case(name))
    .map(|&(family, _, _)| family)
    .ok_or_else(|| DggrsError::UnknownGrid(name.to_string()))
}

/// One instance of every supported grid.
#[derive(Debug, Clone)]
pub struct DggrsRegistry {
  grids: Vec<Dggrs>,
}

impl DggrsRegistry {
  pub fn new() -> Result<Self, DggrsError> {
    let grids = GRID_NAMES
      .iter()
      .map(|&(family, _, _)| Dggrs::new(family))
      .collect::<Result<Vec<_>, _>>()?;
    debug!(count = grids.len(), "grid registry built");
    Ok(Self { grids })
  }

  /// The grid named `name`; see [`family_from_name`].
  pub fn get(&self, name: &str) -> Result<&Dggrs, DggrsError> {
    let family = family_from_name(name)?;
    Ok(self.by_family(family))
  }

  #[must_use]
  pub fn by_family(&self, family: GridFamily) -> &Dggrs {
    &self.grids[family as usize]
  }

  pub fn iter(&self) -> impl Iterator<Item = &Dggrs> {
    self.grids.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_family_from_name() {
    assert_eq!(family_from_name("ISEA3H"), Ok(GridFamily::Isea3h));
    assert_eq!(family_from_name("isea3h"), Ok(GridFamily::Isea3h));
    assert_eq!(family_from_name("I9R"), Ok(GridFamily::Isea9r));
    assert_eq!(family_from_name(" rhealpix "), Ok(GridFamily::RHealpix));
    assert_eq!(family_from_name("RHP"), Ok(GridFamily::RHealpix));
    assert_eq!(family_from_name("gnosis"), Err(DggrsError::UnknownGrid("gnosis".to_string())));
  }

  #[test]
  fn test_names() {
    for (family, long, short) in GRID_NAMES {
      assert_eq!(family.name(), long);
      assert_eq!(family.short_name(), short);
      assert_eq!(family_from_name(short), Ok(family));
    }
  }

  #[test]
  fn test_registry() {
    let registry = DggrsRegistry::new().unwrap();
    assert_eq!(registry.iter().count(), 3);
    for family in [GridFamily::Isea3h, GridFamily::Isea9r, GridFamily::RHealpix] {
      assert_eq!(registry.by_family(family).family(), family);
    }
    assert_eq!(registry.get("rhp").unwrap().family(), GridFamily::RHealpix);
    assert!(registry.get("dodecahedral").is_err());
  }
}
