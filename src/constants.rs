//! dggrs core library constants.

use std::f64::consts;

// Mathematical constants
/// pi
pub const M_PI: f64 = consts::PI;
/// pi / 2.0
pub const M_PI_2: f64 = consts::FRAC_PI_2;
/// pi / 4.0
pub const M_PI_4: f64 = consts::FRAC_PI_4;
/// 2.0 * PI
pub const M_2PI: f64 = 2.0 * consts::PI;
/// pi / 180
pub const M_PI_180: f64 = consts::PI / 180.0;
/// 180 / pi
pub const M_180_PI: f64 = 180.0 / consts::PI;

/// Square root of 3.
pub const M_SQRT3: f64 = 1.732_050_807_568_877_2;
/// sqrt(3) / 2.0, also known as sin(60 degrees)
pub const M_SQRT3_2: f64 = 0.866_025_403_784_438_6;

/// Epsilon for floating point comparisons. ~0.1mm in degrees.
pub const EPSILON_DEG: f64 = 0.000_000_001;
/// Epsilon for floating point comparisons. ~0.1mm in radians.
pub const EPSILON_RAD: f64 = EPSILON_DEG * M_PI_180;

// WGS84 ellipsoid

/// Semi-major axis in metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// Inverse flattening.
pub const WGS84_INV_FLATTENING: f64 = 298.257_223_563;
/// Flattening.
pub const WGS84_F: f64 = 1.0 / WGS84_INV_FLATTENING;
/// Semi-minor axis in metres.
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// First eccentricity squared, f(2 - f).
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// First eccentricity.
pub const WGS84_E: f64 = 0.081_819_190_842_621_49;
/// Authalic q at the pole, q(pi/2).
pub const WGS84_QP: f64 = 1.995_531_087_502_837_6;
/// Authalic sphere radius in metres, a·sqrt(qp/2).
pub const AUTHALIC_RADIUS_M: f64 = 6_371_007.180_918_476;
/// Surface of the authalic sphere (equal to the ellipsoid surface) in m².
pub const EARTH_AREA_M2: f64 = 510_065_621_724_088.75;

// Icosahedral Snyder equal-area (ISEA) projection

/// Latitude (degrees) of the icosahedron vertex placed in the northern hemisphere.
pub const ISEA_VERTEX_LAT_DEG: f64 = 58.282_525_588_538_994_675_786;
/// Longitude (degrees) of that vertex.
pub const ISEA_VERTEX_LON_DEG: f64 = 11.25;
/// Latitude of the two non-polar vertex rings in the icosahedron frame, atan(1/2).
pub const ISEA_RING_LAT: f64 = 0.463_647_609_000_806_1;
/// Half the face angle at a vertex seen from the face centre (pi/5).
pub const ISEA_G: f64 = consts::PI / 5.0;
/// Spherical distance from a face centre to its vertices.
pub const ISEA_SMALL_G: f64 = 0.652_358_139_784_368_2;
/// tan(ISEA_SMALL_G)
pub const ISEA_TAN_G: f64 = 0.763_932_022_500_210_3;
/// cos(ISEA_SMALL_G)
pub const ISEA_COS_G: f64 = 0.794_654_472_291_766_1;
/// Planar circumradius of a face on the unit-area-normalised net.
pub const ISEA_RV: f64 = 0.695_470_941_493_933_3;
/// ISEA_RV squared.
pub const ISEA_RV2: f64 = 0.483_679_830_462_458_05;
/// Edge length in metres of the OGC:1534 planar triangle.
pub const ISEA_PLANAR_EDGE_M: f64 = 7_674_457.948_373_637;

/// Number of rhombi in the 5x6 net.
pub const NUM_ROOT_RHOMBI: i32 = 10;
/// Number of faces on an icosahedron.
pub const NUM_ICOSA_FACES: usize = 20;
/// Number of pentagons (icosahedron vertices) of an ISEA3H level.
pub const NUM_PENTAGONS: usize = 12;
/// Root identifier of the north polar zone.
pub const ROOT_NORTH_POLE: u64 = 10;
/// Root identifier of the south polar zone.
pub const ROOT_SOUTH_POLE: u64 = 11;

// rHEALPix

/// Number of faces of the rHEALPix cube.
pub const NUM_RHP_FACES: i32 = 6;

// ISEA9R and rHEALPix zone handle bit layout

/// Level field offset.
pub const RHOMBIC_LEVEL_OFFSET: u8 = 59;
/// Row field offset.
pub const RHOMBIC_ROW_OFFSET: u8 = 30;
/// Column field offset.
pub const RHOMBIC_COL_OFFSET: u8 = 0;
/// Level field mask (5 bits).
pub const RHOMBIC_LEVEL_MASK: u64 = 0b1_1111u64 << RHOMBIC_LEVEL_OFFSET;
/// Row field mask (29 bits).
pub const RHOMBIC_ROW_MASK: u64 = ((1u64 << 29) - 1) << RHOMBIC_ROW_OFFSET;
/// Column field mask (30 bits).
pub const RHOMBIC_COL_MASK: u64 = (1u64 << 30) - 1;

// ISEA3H zone handle bit layout

/// Rhombic level (level / 2) field offset.
pub const I3H_LEVEL_OFFSET: u8 = 58;
/// Root rhombus field offset.
pub const I3H_ROOT_OFFSET: u8 = 54;
/// Rhombus index field offset.
pub const I3H_INDEX_OFFSET: u8 = 3;
/// Rhombic level field mask (5 bits).
pub const I3H_LEVEL_MASK: u64 = 0b1_1111u64 << I3H_LEVEL_OFFSET;
/// Root rhombus field mask (4 bits).
pub const I3H_ROOT_MASK: u64 = 0b1111u64 << I3H_ROOT_OFFSET;
/// Rhombus index field mask (51 bits).
pub const I3H_INDEX_MASK: u64 = ((1u64 << 51) - 1) << I3H_INDEX_OFFSET;
/// Sub-hex field mask (3 bits).
pub const I3H_SUBHEX_MASK: u64 = 0b111u64;

// CRS identifier bit layout

/// Registry field mask (bits 0..30).
pub const CRS_REGISTRY_MASK: u64 = (1u64 << 30) - 1;
/// Code field offset.
pub const CRS_CODE_OFFSET: u8 = 30;
/// Code field mask (32 bits).
pub const CRS_CODE_MASK: u64 = 0xFFFF_FFFFu64 << CRS_CODE_OFFSET;
/// Dimensionality flag.
pub const CRS_H_FLAG: u64 = 1u64 << 62;

// Grid family limits

/// Deepest ISEA3H level.
pub const I3H_MAX_LEVEL: i32 = 33;
/// Deepest ISEA9R level.
pub const I9R_MAX_LEVEL: i32 = 16;
/// Deepest rHEALPix level.
pub const RHP_MAX_LEVEL: i32 = 16;

/// ISEA3H relative depth giving about 64K sub-zones.
pub const I3H_64K_DEPTH: i32 = 10;
/// Aperture 9 relative depth giving about 64K sub-zones.
pub const A9_64K_DEPTH: i32 = 5;
/// ISEA3H deepest relative depth for sub-zone listings.
pub const I3H_MAX_DEPTH: i32 = 20;
/// Aperture 9 deepest relative depth for sub-zone listings.
pub const A9_MAX_DEPTH: i32 = 10;
/// ISEA3H deepest relative depth whose sub-zone indices fit in `i64`.
pub const I3H_INDEX_MAX_DEPTH: i32 = 39;
/// Aperture 9 deepest relative depth whose sub-zone indices fit in `i64`.
pub const A9_INDEX_MAX_DEPTH: i32 = 19;

/// Segments per zone edge for refined outlines when no count is given.
pub const DEFAULT_EDGE_REFINEMENT: u32 = 8;
/// Fraction of a zone extent's size added on each side for listing
/// broad-phase tests.
pub const SEARCH_EXTENT_PADDING: f64 = 0.05;
