// tests/geometry_tests.rs

use approx::assert_relative_eq;
use dggrs::*;

fn grids() -> Vec<Dggrs> {
  vec![Dggrs::isea3h().unwrap(), Dggrs::isea9r().unwrap(), Dggrs::rhealpix()]
}

#[test]
fn test_children_conserve_area() {
  for d in grids() {
    for level in 0..4 {
      let z = d.get_zone_from_wgs84_centroid(level, &GeoPoint::from_degrees(20.0, 40.0)).unwrap();
      // A child shared by several parents counts for each in equal parts
      let sum: f64 = d
        .get_zone_children(z)
        .unwrap()
        .into_iter()
        .map(|c| d.get_zone_area(c).unwrap() / d.get_zone_parents(c).unwrap().len() as f64)
        .sum();
      assert_relative_eq!(sum, d.get_zone_area(z).unwrap(), max_relative = 1e-6);
    }
  }
}

#[test]
fn test_zone_areas_cover_the_earth() {
  for d in grids() {
    let total: f64 = d.list_zones(2, None).unwrap().map(|z| d.get_zone_area(z).unwrap()).sum();
    assert_relative_eq!(total, constants::EARTH_AREA_M2, max_relative = 1e-9);
  }
}

#[test]
fn test_outline_area_matches_zone_area() {
  for d in grids() {
    for z in d.list_zones(2, None).unwrap().step_by(7) {
      let outline = d.get_zone_refined_wgs84_vertices(z, 16).unwrap();
      let measured = ring_area_m2(&outline);
      let expected = d.get_zone_area(z).unwrap();
      assert_relative_eq!(measured, expected, max_relative = 1e-2);
    }
  }
}

#[test]
fn test_ref_zone_area_is_regular_zone_area() {
  let d = Dggrs::isea3h().unwrap();
  let z = d.get_zone_from_wgs84_centroid(6, &GeoPoint::from_degrees(-12.0, -50.0)).unwrap();
  assert_eq!(d.count_zone_edges(z), Ok(6));
  assert_relative_eq!(d.get_zone_area(z).unwrap(), d.get_ref_zone_area(6).unwrap());
}

#[test]
fn test_extents_contain_vertices() {
  for d in grids() {
    for z in d.list_zones(1, None).unwrap() {
      let extent = d.get_zone_wgs84_extent(z).unwrap();
      // A pole has no meaningful longitude
      for v in d.get_zone_refined_wgs84_vertices(z, 0).unwrap() {
        if v.lat.abs() > std::f64::consts::FRAC_PI_2 - 1e-6 {
          continue;
        }
        assert!(extent.contains_point(&v));
      }
    }
  }
}

#[test]
fn test_antimeridian_zone_extent() {
  let d = Dggrs::rhealpix();
  let z = d.get_zone_from_wgs84_centroid(3, &GeoPoint::from_degrees(0.5, 179.9)).unwrap();
  let e = d.get_zone_wgs84_extent(z).unwrap();
  assert!(e.width_rads() < 0.5);
  assert!(e.contains_point(&GeoPoint::from_degrees(0.5, 179.9)));
}

#[test]
fn test_list_zones_covers_bbox() {
  let bbox = GeoExtent {
    ll: GeoPoint::from_degrees(-10.0, 170.0),
    ur: GeoPoint::from_degrees(5.0, -175.0),
  };
  for d in grids() {
    let listed = d.list_zones_vec(3, Some(&bbox)).unwrap();
    assert!(listed.windows(2).all(|w| w[0] < w[1]), "sorted and distinct");
    for lat in [-9.5, -2.0, 4.5] {
      for lon in [170.5, 178.0, -179.0, -175.5] {
        let z = d.get_zone_from_wgs84_centroid(3, &GeoPoint::from_degrees(lat, lon)).unwrap();
        assert!(listed.binary_search(&z).is_ok(), "{d:?} misses ({lat}, {lon})");
      }
    }
    for &z in &listed {
      assert!(d.get_zone_wgs84_extent(z).unwrap().inflated(0.1, 0.1).intersects(&bbox));
    }
  }
}

#[test]
fn test_resolution_conversions() {
  for d in grids() {
    for level in 0..8 {
      let m = d.get_meters_per_sub_zone_from_level(level, 0).unwrap();
      assert_eq!(d.get_level_from_meters_per_sub_zone(m, 0), Ok(level));
      let s = d.get_scale_denominator_from_level(level, 3, Some(0.28)).unwrap();
      assert_eq!(d.get_level_from_scale_denominator(s, 3, Some(0.28)), Ok(level));
      let a = d.get_ref_zone_area(level).unwrap();
      assert_eq!(d.get_level_from_ref_zone_area(a), level);
    }
    // Between two levels the coarser one wins
    let m3 = d.get_meters_per_sub_zone_from_level(3, 0).unwrap();
    let m4 = d.get_meters_per_sub_zone_from_level(4, 0).unwrap();
    assert_eq!(d.get_level_from_meters_per_sub_zone(0.5 * (m3 + m4), 0), Ok(3));
    // A 100 by 100 pixel view of the whole world needs at most 10^4 zones
    let level = d.get_level_from_pixels_and_extent(&GeoExtent::WHOLE_WORLD, 100, 100, 0).unwrap();
    assert!((0..=6).contains(&level));
    assert!(d.count_zones(level).unwrap() <= 10_000);
    assert!(d.get_level_from_pixels_and_extent(&GeoExtent::WHOLE_WORLD, 100, 100, 2).unwrap() <= level);
  }
}

#[test]
fn test_resolution_depth_limits() {
  for d in grids() {
    let max = d.get_max_dggrs_zone_level();
    // Depth below a fine level may not pass the deepest level
    assert!(d.get_meters_per_sub_zone_from_level(max - 3, 3).unwrap() > 0.0);
    assert_eq!(
      d.get_meters_per_sub_zone_from_level(max, 10),
      Err(DggrsError::DepthOutOfRange { depth: 10, max: 0 })
    );
    assert_eq!(
      d.get_meters_per_sub_zone_from_level(0, -1),
      Err(DggrsError::DepthOutOfRange { depth: -1, max })
    );
    assert!(matches!(
      d.get_scale_denominator_from_level(2, -3, None),
      Err(DggrsError::DepthOutOfRange { .. })
    ));
    assert!(matches!(
      d.get_level_from_meters_per_sub_zone(1.0, max + 1),
      Err(DggrsError::DepthOutOfRange { .. })
    ));
    // Tiny targets clamp to the finest level that still has the sub-zones
    assert_eq!(d.get_level_from_meters_per_sub_zone(1e-3, 5), Ok(max - 5));
    assert_eq!(d.get_level_from_scale_denominator(1e-3, 10, Some(0.28)), Ok(max - 10));
    assert_eq!(d.get_level_from_scale_denominator(1e-3, 0, None), Ok(max));
    assert_eq!(d.get_level_from_ref_zone_area(0.0), max);
    assert_eq!(d.get_level_from_pixels_and_extent(&GeoExtent::WHOLE_WORLD, 1, 1, max), Ok(0));
    assert!(d.count_zones(max).unwrap() > d.count_zones(max - 1).unwrap());
  }
}

#[test]
fn test_crs_vertices() {
  let d = Dggrs::isea3h().unwrap();
  let z = d.get_zone_from_wgs84_centroid(4, &GeoPoint::from_degrees(30.0, 60.0)).unwrap();
  let geo = d.get_zone_wgs84_vertices(z).unwrap();
  let latlon = d.get_zone_crs_vertices(z, EPSG_4326).unwrap();
  for (g, p) in geo.iter().zip(&latlon) {
    assert_relative_eq!(g.lat_degrees(), p.x, epsilon = 1e-9);
    assert_relative_eq!(g.lon_degrees(), p.y, epsilon = 1e-9);
  }
  let planar = d.get_zone_refined_crs_vertices(z, OGC_ISEA_PLANAR, 2).unwrap();
  assert_eq!(planar.len(), 2 * geo.len());
  let area = d.get_zone_crs_area(z, OGC_ISEA_PLANAR).unwrap();
  assert!(area > 0.0);
  let e = d.get_zone_crs_extent(z, OGC_ISEA_PLANAR).unwrap();
  assert!(e.tl.x < e.br.x && e.tl.y > e.br.y);
}
