// tests/indexing_tests.rs

use dggrs::*;

fn grids() -> Vec<Dggrs> {
  vec![Dggrs::isea3h().unwrap(), Dggrs::isea9r().unwrap(), Dggrs::rhealpix()]
}

#[test]
fn test_zone_counts() {
  let i3h = Dggrs::isea3h().unwrap();
  assert_eq!(i3h.count_zones(1), Ok(32));
  assert_eq!(i3h.count_zones(5), Ok(2432));
  let i9r = Dggrs::isea9r().unwrap();
  assert_eq!(i9r.count_zones(2), Ok(810));
  let rhp = Dggrs::rhealpix();
  assert_eq!(rhp.count_zones(0), Ok(6));
  assert_eq!(rhp.count_zones(3), Ok(4374));
}

#[test]
fn test_equator_point_round_trip() {
  let origin = GeoPoint::from_degrees(0.0, 0.0);
  for d in grids() {
    let zone = d.get_zone_from_wgs84_centroid(5, &origin).unwrap();
    let centroid = d.get_zone_wgs84_centroid(zone).unwrap();
    // Within a zone radius of the point
    let radius = (d.get_zone_area(zone).unwrap() / std::f64::consts::PI).sqrt();
    assert!(great_circle_distance_m(&origin, &centroid) < 1.5 * radius, "{d:?}");
    assert_eq!(d.get_zone_from_wgs84_centroid(5, &centroid), Ok(zone));
  }
}

#[test]
fn test_text_ids_round_trip() {
  for d in grids() {
    for level in 0..4 {
      for z in d.list_zones(level, None).unwrap() {
        let text = d.get_zone_text_id(z).unwrap();
        assert_eq!(d.get_zone_from_text_id(&text), Ok(z), "{text}");
      }
    }
  }
}

#[test]
fn test_text_id_shapes() {
  let rhp = Dggrs::rhealpix();
  let z = rhp.get_zone_from_text_id("N").unwrap();
  assert_eq!(rhp.get_zone_level(z), Ok(0));
  let z = rhp.get_zone_from_text_id("Q048").unwrap();
  assert_eq!(rhp.get_zone_level(z), Ok(3));
  assert!(rhp.get_zone_from_text_id("Q9").is_err(), "base 9 digits only");
  assert!(rhp.get_zone_from_text_id("T0").is_err());

  let i9r = Dggrs::isea9r().unwrap();
  let z = i9r.get_zone_from_text_id("C4-7").unwrap();
  assert_eq!(i9r.get_zone_level(z), Ok(2));
  assert_eq!(i9r.get_zone_text_id(z).unwrap(), "C4-7");
  assert!(i9r.get_zone_from_text_id("A0-1").is_err(), "north gap");
}

#[test]
fn test_sub_zone_indexing() {
  for d in grids() {
    // A regular zone: the two points are too far apart to both fall in pentagons
    let z = [(48.9, 2.3), (10.0, -30.0)]
      .into_iter()
      .map(|(lat, lon)| d.get_zone_from_wgs84_centroid(2, &GeoPoint::from_degrees(lat, lon)).unwrap())
      .find(|&z| d.count_zone_edges(z).unwrap() != 5)
      .unwrap();
    for depth in 0..4 {
      let count = d.count_sub_zones(z, depth).unwrap();
      assert_eq!(count, u64::from(d.get_refinement_ratio()).pow(depth as u32));
      let subs = d.get_sub_zones_vec(z, depth).unwrap();
      assert_eq!(subs.len() as u64, count);
      for (i, &s) in subs.iter().enumerate() {
        assert_eq!(d.get_sub_zone_index(z, s), Ok(Some(i as u64)));
        assert_eq!(d.get_zone_level(s), Ok(2 + depth));
      }
    }
  }
}

#[test]
fn test_pentagon_sub_zone_counts() {
  let d = Dggrs::isea3h().unwrap();
  for root in d.list_zones_vec(0, None).unwrap() {
    for depth in 0..5 {
      let subs = d.get_sub_zones_vec(root, depth).unwrap();
      assert_eq!(subs.len() as u64, d.count_sub_zones(root, depth).unwrap());
    }
  }
  // Every level 4 zone is a sub-zone of exactly one root
  let total: u64 = d
    .list_zones_vec(0, None)
    .unwrap()
    .into_iter()
    .map(|r| d.count_sub_zones(r, 4).unwrap())
    .sum();
  assert_eq!(total, d.count_zones(4).unwrap());
}

#[test]
fn test_deep_counts_are_closed_form() {
  let d = Dggrs::isea9r().unwrap();
  let z = d.get_zone_from_text_id("A0-0").unwrap();
  let deep = d.get_index_max_depth().min(d.get_max_dggrs_zone_level());
  assert_eq!(d.count_sub_zones(z, deep), Ok(9u64.pow(deep as u32)));
  let last = d.get_sub_zone_at_index(z, deep, 9u64.pow(deep as u32) - 1).unwrap().unwrap();
  assert_eq!(d.get_sub_zone_index(z, last), Ok(Some(9u64.pow(deep as u32) - 1)));
}

#[test]
fn test_limits() {
  let i3h = Dggrs::isea3h().unwrap();
  assert_eq!(i3h.get_refinement_ratio(), 3);
  assert_eq!(i3h.get_max_children(), 7);
  assert_eq!(i3h.get_max_parents(), 3);
  assert_eq!(i3h.get_max_neighbors(), 6);
  assert_eq!(i3h.get_64k_depth(), 10);
  let rhp = Dggrs::rhealpix();
  assert_eq!(rhp.get_refinement_ratio(), 9);
  assert_eq!(rhp.get_max_children(), 9);
  assert_eq!(rhp.get_max_parents(), 1);
  assert_eq!(rhp.get_max_neighbors(), 4);
  assert_eq!(rhp.get_64k_depth(), 5);
}
