use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dggrs::*;

// --- Fixtures for benchmarks ---
fn fixed_point() -> GeoPoint {
  GeoPoint::from_degrees(37.7749, -122.4194) // San Francisco
}

fn all_grids() -> Vec<Dggrs> {
  vec![Dggrs::isea3h().unwrap(), Dggrs::isea9r().unwrap(), Dggrs::rhealpix()]
}

// --- Benchmark Functions ---

fn bench_point_to_zone(c: &mut Criterion) {
  let p = fixed_point();
  let mut group = c.benchmark_group("point_to_zone");
  for d in all_grids() {
    for level in [0, 5, 10, 15] {
      group.bench_function(format!("{}_level_{level}", d.family().short_name()), |b| {
        b.iter(|| d.get_zone_from_wgs84_centroid(black_box(level), black_box(&p)));
      });
    }
  }
  group.finish();
}

fn bench_zone_centroid(c: &mut Criterion) {
  let p = fixed_point();
  let mut group = c.benchmark_group("zone_centroid");
  for d in all_grids() {
    let z = d.get_zone_from_wgs84_centroid(10, &p).unwrap();
    group.bench_function(d.family().short_name(), |b| b.iter(|| d.get_zone_wgs84_centroid(black_box(z))));
  }
  group.finish();
}

fn bench_zone_vertices(c: &mut Criterion) {
  let p = fixed_point();
  let mut group = c.benchmark_group("zone_vertices");
  for d in all_grids() {
    let z = d.get_zone_from_wgs84_centroid(10, &p).unwrap();
    group.bench_function(format!("{}_plain", d.family().short_name()), |b| {
      b.iter(|| d.get_zone_wgs84_vertices(black_box(z)));
    });
    group.bench_function(format!("{}_refined", d.family().short_name()), |b| {
      b.iter(|| d.get_zone_refined_wgs84_vertices(black_box(z), 0));
    });
  }
  group.finish();
}

fn bench_text_id(c: &mut Criterion) {
  let p = fixed_point();
  let mut group = c.benchmark_group("text_id");
  for d in all_grids() {
    let z = d.get_zone_from_wgs84_centroid(12, &p).unwrap();
    let text = d.get_zone_text_id(z).unwrap();
    group.bench_function(format!("{}_format", d.family().short_name()), |b| {
      b.iter(|| d.get_zone_text_id(black_box(z)));
    });
    group.bench_function(format!("{}_parse", d.family().short_name()), |b| {
      b.iter(|| d.get_zone_from_text_id(black_box(&text)));
    });
  }
  group.finish();
}

fn bench_hierarchy(c: &mut Criterion) {
  let p = fixed_point();
  let mut group = c.benchmark_group("hierarchy");
  for d in all_grids() {
    let z = d.get_zone_from_wgs84_centroid(10, &p).unwrap();
    let name = d.family().short_name();
    group.bench_function(format!("{name}_parents"), |b| b.iter(|| d.get_zone_parents(black_box(z))));
    group.bench_function(format!("{name}_children"), |b| b.iter(|| d.get_zone_children(black_box(z))));
    group.bench_function(format!("{name}_neighbors"), |b| b.iter(|| d.get_zone_neighbors(black_box(z))));
  }
  group.finish();
}

// Register benchmark groups
criterion_group!(
  indexing_benches,
  bench_point_to_zone,
  bench_zone_centroid,
  bench_zone_vertices,
  bench_text_id,
  bench_hierarchy
);
criterion_main!(indexing_benches);
