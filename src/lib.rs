#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)] // Level and index arithmetic mixes i32, i64 and u64
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)] // Projection constants are copied digit for digit
#![allow(clippy::similar_names)] // Common in math-heavy code
#![allow(clippy::wildcard_imports)]

//! `dggrs` implements discrete global grid reference systems: hierarchical,
//! near equal-area tessellations of the Earth addressed by 64-bit zone
//! handles.
//!
//! Three grid families are provided:
//!
//! * ISEA3H: aperture 3 hexagons on the icosahedral Snyder equal-area
//!   projection.
//! * ISEA9R: aperture 9 rhombi on the same projection.
//! * rHEALPix: aperture 9 squares on the rHEALPix projection.
//!
//! Everything goes through the [`Dggrs`] façade:
//!
//! ```
//! use dggrs::{Dggrs, GeoPoint};
//!
//! let grid = Dggrs::isea3h()?;
//! let zone = grid.get_zone_from_wgs84_centroid(5, &GeoPoint::from_degrees(45.5, -73.6))?;
//! let text = grid.get_zone_text_id(zone)?;
//! assert_eq!(grid.get_zone_from_text_id(&text)?, zone);
//! assert_eq!(grid.get_zone_children(zone)?.len(), 7);
//! # Ok::<(), dggrs::DggrsError>(())
//! ```

// Declare modules
pub mod bbox;
pub mod config;
pub mod constants;
pub mod coords;
pub mod crs;
pub mod grids;
pub mod hierarchy;
pub mod iterators;
pub mod latlng;
pub mod math;
pub mod measures;
pub mod registry;
pub mod resolution;
pub mod system;
pub mod types;
pub mod zone;

// Re-export the public surface
pub use crate::system::Dggrs;
pub use bbox::extent_from_ring;
pub use config::DggrsConfig;
pub use crs::{EPSG_4326, OGC_CRS84, OGC_ISEA_5X6, OGC_ISEA_PLANAR};
pub use grids::Grid;
pub use iterators::{ListZonesIter, SubZoneIter};
pub use latlng::{degs_to_rads, great_circle_distance_m, great_circle_distance_rads, rads_to_degs};
pub use measures::{ring_area_m2, ring_area_rads2};
pub use registry::{family_from_name, DggrsRegistry};
pub use types::{
  Crs, CrsExtent, CrsPoint, CrsRegistry, DggrsError, DggrsZone, GeoExtent, GeoPoint, GridFamily, Plane, Vec2d, Vec3d,
  NULL_ZONE,
};
