// tests/properties_tests.rs

//! Property-based tests over random points and zones.

use dggrs::*;
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = GeoPoint> {
  (-89.9..89.9f64, -180.0..180.0f64).prop_map(|(lat, lon)| GeoPoint::from_degrees(lat, lon))
}

fn arb_family() -> impl Strategy<Value = GridFamily> {
  prop_oneof![
    Just(GridFamily::Isea3h),
    Just(GridFamily::Isea9r),
    Just(GridFamily::RHealpix),
  ]
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn prop_point_lands_near_centroid(family in arb_family(), p in arb_point(), level in 0..8i32) {
    let d = Dggrs::new(family).unwrap();
    let z = d.get_zone_from_wgs84_centroid(level, &p).unwrap();
    let c = d.get_zone_wgs84_centroid(z).unwrap();
    let radius = (d.get_zone_area(z).unwrap() / std::f64::consts::PI).sqrt();
    prop_assert!(great_circle_distance_m(&p, &c) < 2.5 * radius);
    prop_assert_eq!(d.get_zone_from_wgs84_centroid(level, &c).unwrap(), z);
  }

  #[test]
  fn prop_text_id_round_trip(family in arb_family(), p in arb_point(), level in 0..12i32) {
    let d = Dggrs::new(family).unwrap();
    let z = d.get_zone_from_wgs84_centroid(level, &p).unwrap();
    let text = d.get_zone_text_id(z).unwrap();
    prop_assert_eq!(d.get_zone_from_text_id(&text).unwrap(), z);
  }

  #[test]
  fn prop_neighbors_are_mutual(family in arb_family(), p in arb_point(), level in 0..8i32) {
    let d = Dggrs::new(family).unwrap();
    let z = d.get_zone_from_wgs84_centroid(level, &p).unwrap();
    let neighbors = d.get_zone_neighbors(z).unwrap();
    prop_assert_eq!(neighbors.len(), d.count_zone_edges(z).unwrap());
    for (n, _) in neighbors {
      prop_assert!(d.are_zones_neighbors(n, z).unwrap());
      prop_assert!(!d.do_zones_overlap(n, z).unwrap());
    }
  }

  #[test]
  fn prop_parent_contains_point_zone(family in arb_family(), p in arb_point(), level in 1..8i32) {
    let d = Dggrs::new(family).unwrap();
    let z = d.get_zone_from_wgs84_centroid(level, &p).unwrap();
    let coarse = d.get_zone_from_wgs84_centroid(level - 1, &p).unwrap();
    prop_assert!(d.do_zones_overlap(coarse, z).unwrap());
    prop_assert!(d.is_zone_ancestor_of(coarse, z, 1).unwrap());
  }

  #[test]
  fn prop_sub_zone_index_bijection(family in arb_family(), p in arb_point(), level in 0..5i32, depth in 0..3i32) {
    let d = Dggrs::new(family).unwrap();
    let z = d.get_zone_from_wgs84_centroid(level, &p).unwrap();
    let count = d.count_sub_zones(z, depth).unwrap();
    for i in (0..count).step_by(5) {
      let s = d.get_sub_zone_at_index(z, depth, i).unwrap().unwrap();
      prop_assert_eq!(d.get_sub_zone_index(z, s).unwrap(), Some(i));
    }
  }
}
