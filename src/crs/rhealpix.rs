// src/crs/rhealpix.rs

//! rHEALPix projection of the authalic sphere.
//!
//! The HEALPix plane has an equatorial band `|y| <= π/4` and four polar
//! triangles above and below it. rHEALPix keeps the triangles over the
//! first equatorial face in place and rotates the other three about the
//! pole into one square, giving six `π/2` squares:
//!
//! ```text
//!  N
//!  O P Q R
//!  S
//! ```
//!
//! Plane coordinates are radians on the unit sphere, `x` in `[-π, π)`.

use crate::constants::{M_PI, M_PI_2, M_PI_4};
use crate::crs::Projection;
use crate::latlng::{authalic_latitude, constrain_lon, geodetic_latitude};
use crate::types::{GeoPoint, Vec2d};

/// Centre `x` of the polar squares.
const POLE_SQUARE_X: f64 = -3.0 * M_PI_4;

/// The rHEALPix projection with both polar squares over face O.
#[derive(Debug, Clone, Copy, Default)]
pub struct RhealpixProjection;

/// Rotates `(x, y)` counter-clockwise by `quarters` right angles.
fn _rotate_quarters(x: f64, y: f64, quarters: i32) -> (f64, f64) {
  match quarters.rem_euclid(4) {
    0 => (x, y),
    1 => (-y, x),
    2 => (-x, -y),
    _ => (y, -x),
  }
}

/// Centre `x` of the polar cap over equatorial face `cap`.
#[inline]
fn _cap_x(cap: i32) -> f64 {
  -M_PI + (f64::from(cap) + 0.5) * M_PI_2
}

fn _cap_of(x: f64) -> i32 {
  (((x + M_PI) / M_PI_2).floor() as i32).clamp(0, 3)
}

impl RhealpixProjection {
  /// HEALPix plane position of an authalic latitude and longitude.
  fn _healpix(beta: f64, lon: f64) -> (f64, f64) {
    let sb = beta.sin();
    if sb.abs() <= 2.0 / 3.0 {
      return (lon, 3.0 * M_PI / 8.0 * sb);
    }
    let sigma = (3.0 * (1.0 - sb.abs())).sqrt();
    let xc = _cap_x(_cap_of(lon));
    let x = xc + (lon - xc) * sigma;
    let y = sb.signum() * M_PI_4 * (2.0 - sigma);
    (x, y)
  }

  /// Authalic latitude and longitude of a HEALPix plane position.
  fn _healpix_inverse(x: f64, y: f64) -> (f64, f64) {
    if y.abs() <= M_PI_4 {
      return ((8.0 * y / (3.0 * M_PI)).clamp(-1.0, 1.0).asin(), x);
    }
    let sigma = 2.0 - 4.0 * y.abs() / M_PI;
    let xc = _cap_x(_cap_of(x));
    let lon = if sigma > 1e-15 { xc + (x - xc) / sigma } else { xc };
    let sb = y.signum() * (1.0 - sigma * sigma / 3.0);
    (sb.clamp(-1.0, 1.0).asin(), lon)
  }

  /// rHEALPix plane position of a point given in HEALPix coordinates.
  fn _combine(x: f64, y: f64) -> (f64, f64) {
    if y.abs() <= M_PI_4 {
      return (x, y);
    }
    let cap = _cap_of(x);
    let pole_y = M_PI_2 * y.signum();
    let turns = if y > 0.0 { cap } else { -cap };
    let (dx, dy) = _rotate_quarters(x - _cap_x(cap), y - pole_y, turns);
    (POLE_SQUARE_X + dx, pole_y + dy)
  }

  /// HEALPix position of an rHEALPix plane position, or `None` outside the
  /// six squares.
  fn _split(x: f64, y: f64) -> Option<(f64, f64)> {
    if !(-M_PI..=M_PI).contains(&x) || y.abs() > 3.0 * M_PI_4 {
      return None;
    }
    if y.abs() <= M_PI_4 {
      return Some((x, y));
    }
    if x > -M_PI_2 {
      return None;
    }
    let pole_y = M_PI_2 * y.signum();
    let dx = x - POLE_SQUARE_X;
    let dy = y - pole_y;
    // Quarter of the polar square the point falls in, counting from the
    // side next to face O towards the east
    let toward_o = -dy * y.signum();
    let east = dx;
    let quarter = if toward_o >= east.abs() {
      0
    } else if east > 0.0 && east >= toward_o.abs() {
      1
    } else if -toward_o >= east.abs() {
      2
    } else {
      3
    };
    let turns = if y > 0.0 { -quarter } else { quarter };
    let (hx, hy) = _rotate_quarters(dx, dy, turns);
    Some((_cap_x(quarter) + hx, pole_y + hy))
  }
}

impl Projection for RhealpixProjection {
  fn forward(&self, p: &GeoPoint) -> Vec2d {
    let (hx, hy) = Self::_healpix(authalic_latitude(p.lat), constrain_lon(p.lon));
    let (x, y) = Self::_combine(hx, hy);
    Vec2d { x, y }
  }

  fn inverse(&self, q: &Vec2d, _hint: Option<i32>) -> Option<GeoPoint> {
    let (hx, hy) = Self::_split(q.x, q.y)?;
    let (beta, lon) = Self::_healpix_inverse(hx, hy);
    Some(GeoPoint::new(geodetic_latitude(beta), lon))
  }
}
