//! Core dggrs data structures.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// A packed 64-bit zone handle.
///
/// The bit layout depends on the grid family that produced it; see the
/// codecs in [`crate::zone`]. Handles are plain values and carry no
/// reference to their grid.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DggrsZone(pub u64);

/// The null zone (all bits set). Never returned as a valid zone.
pub const NULL_ZONE: DggrsZone = DggrsZone(u64::MAX);

impl DggrsZone {
  /// Returns `true` for the null zone sentinel.
  #[inline]
  #[must_use]
  pub const fn is_null(self) -> bool {
    self.0 == u64::MAX
  }
}

impl Default for DggrsZone {
  fn default() -> Self {
    NULL_ZONE
  }
}

/// Geographic (WGS84) coordinates in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
  /// Geodetic latitude in radians.
  pub lat: f64,
  /// Longitude in radians.
  pub lon: f64,
}

/// Axis-aligned geographic extent.
///
/// `ur.lon < ll.lon` signals an extent wrapping the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoExtent {
  /// Lower-left (south-west) corner.
  pub ll: GeoPoint,
  /// Upper-right (north-east) corner.
  pub ur: GeoPoint,
}

/// Registry part of a CRS identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum CrsRegistry {
  /// EPSG registry.
  Epsg = 0,
  /// OGC registry.
  Ogc = 1,
}

/// Packed CRS identifier: registry, code and a dimensionality flag.
///
/// `Crs(0)` stands for the native CRS of the grid in use.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Crs(pub u64);

/// A point in a planar (projected) CRS.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrsPoint {
  /// First axis.
  pub x: f64,
  /// Second axis.
  pub y: f64,
}

/// Extent in a given CRS, as top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrsExtent {
  /// CRS the corners are expressed in.
  pub crs: Crs,
  /// Top-left corner.
  pub tl: CrsPoint,
  /// Bottom-right corner.
  pub br: CrsPoint,
}

/// 2D floating-point vector.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2d {
  /// X component.
  pub x: f64,
  /// Y component.
  pub y: f64,
}

/// 3D floating-point vector.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3d {
  /// X component.
  pub x: f64,
  /// Y component.
  pub y: f64,
  /// Z component.
  pub z: f64,
}

/// Plane `a·x + b·y + c·z + d = 0` with unit normal `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
  /// Normal x component.
  pub a: f64,
  /// Normal y component.
  pub b: f64,
  /// Normal z component.
  pub c: f64,
  /// Offset.
  pub d: f64,
}

/// The grid families this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum GridFamily {
  /// Aperture 3 hexagonal grid on the ISEA projection.
  Isea3h = 0,
  /// Aperture 9 rhombic grid on the ISEA projection.
  Isea9r = 1,
  /// Aperture 9 square grid on the rHEALPix projection.
  RHealpix = 2,
}

impl TryFrom<u8> for GridFamily {
  type Error = DggrsError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(GridFamily::Isea3h),
      1 => Ok(GridFamily::Isea9r),
      2 => Ok(GridFamily::RHealpix),
      _ => Err(DggrsError::UnknownGrid(value.to_string())),
    }
  }
}

/// Errors surfaced by fallible dggrs operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DggrsError {
  /// The zone is the null sentinel or not a valid zone of the grid.
  #[error("invalid zone: {0:?}")]
  InvalidZone(DggrsZone),
  /// A level argument outside `[0, max]`.
  #[error("level {level} out of range [0, {max}]")]
  LevelOutOfRange {
    /// Requested level.
    level: i32,
    /// Maximum level of the grid.
    max: i32,
  },
  /// A relative depth argument outside `[0, max]`.
  #[error("depth {depth} out of range [0, {max}]")]
  DepthOutOfRange {
    /// Requested depth.
    depth: i32,
    /// Maximum supported depth.
    max: i32,
  },
  /// Transform requested to or from a CRS the grid does not support.
  #[error("unsupported CRS: {0:?}")]
  UnsupportedCrs(Crs),
  /// Zero-length normalization or coincident points in a construction.
  #[error("degenerate geometry")]
  DegenerateGeometry,
  /// A textual zone identifier that does not parse for the grid.
  #[error("malformed zone text id: {0:?}")]
  MalformedTextId(String),
  /// A grid name the registry does not know.
  #[error("unknown grid: {0:?}")]
  UnknownGrid(String),
}
