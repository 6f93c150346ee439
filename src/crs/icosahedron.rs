// src/crs/icosahedron.rs

//! Icosahedral Snyder equal-area (ISEA) projection onto the 5x6 net.
//!
//! The icosahedron is set up in its own frame with one vertex at the frame
//! pole and two rings of five vertices at latitude ±atan(1/2). The frame is
//! rotated so that the polar vertex sits at 58.282525588539°N 11.25°E with
//! the next vertex due north of it. Each root rhombus of the net is made of
//! two faces; the forward projection maps a face onto its triangle of the
//! net with Snyder's equal-area triangle projection.

use crate::constants::{
  ISEA_COS_G, ISEA_G, ISEA_RING_LAT, ISEA_RV, ISEA_RV2, ISEA_TAN_G, ISEA_VERTEX_LAT_DEG, ISEA_VERTEX_LON_DEG,
  M_PI, M_SQRT3, NUM_ICOSA_FACES,
};
use crate::coords::net5x6::{canonicalize_point, root_square};
use crate::crs::Projection;
use crate::latlng::{authalic_latitude, geodetic_latitude};
use crate::math::plane::{_plane_normal, plane_from_points};
use crate::math::vec3d::{
  _geo_to_vec3d, _tangent, _vec3d_to_geo, v3d_add, v3d_angle, v3d_cross, v3d_dot, v3d_normalize, v3d_scale, v3d_sub,
};
use crate::types::{DggrsError, GeoPoint, Vec2d, Vec3d};
use std::f64::consts::{FRAC_PI_3, FRAC_PI_6};
use tracing::trace;

/// Newton iterations allowed when inverting the azimuth equation.
const MAX_NEWTON_STEPS: usize = 20;

/// A point of the unit-scale 5x6 net, located in a root rhombus.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RhombusPoint {
  /// Root rhombus, 0..10.
  pub root: i32,
  /// Local coordinate along the rhombus x axis, in `[0, 1]`.
  pub u: f64,
  /// Local coordinate along the rhombus y axis, in `[0, 1]`.
  pub v: f64,
}

impl RhombusPoint {
  /// Position in the 5x6 net.
  #[must_use]
  pub fn to_net(&self) -> Vec2d {
    let (cx, cy) = root_square(self.root);
    Vec2d {
      x: cx as f64 + self.u,
      y: cy as f64 + self.v,
    }
  }
}

#[derive(Debug, Clone)]
struct IcoFace {
  /// Unit tangents at the face centre towards each vertex.
  tangents: [Vec3d; 3],
  /// Net positions of the vertices.
  corners: [Vec2d; 3],
  center: Vec3d,
}

/// The ISEA projection in standard orientation.
#[derive(Debug, Clone)]
pub struct IseaProjection {
  rx: Vec3d,
  ry: Vec3d,
  rz: Vec3d,
  faces: Vec<IcoFace>,
}

fn _frame_vertices() -> (Vec3d, Vec3d, [Vec3d; 5], [Vec3d; 5]) {
  let north = Vec3d { x: 0.0, y: 0.0, z: 1.0 };
  let south = Vec3d { x: 0.0, y: 0.0, z: -1.0 };
  let ring = |lat: f64, lon0: f64| -> [Vec3d; 5] {
    let mut out = [Vec3d::default(); 5];
    for (k, v) in out.iter_mut().enumerate() {
      *v = _geo_to_vec3d(&GeoPoint {
        lat,
        lon: (lon0 + 72.0 * k as f64).to_radians(),
      });
    }
    out
  };
  (north, south, ring(ISEA_RING_LAT, 0.0), ring(-ISEA_RING_LAT, 36.0))
}

impl IseaProjection {
  /// Builds the rotated icosahedron and its 20 faces.
  pub fn new() -> Result<Self, DggrsError> {
    let rz = _geo_to_vec3d(&GeoPoint {
      lat: ISEA_VERTEX_LAT_DEG.to_radians(),
      lon: ISEA_VERTEX_LON_DEG.to_radians(),
    });
    let north = Vec3d { x: 0.0, y: 0.0, z: 1.0 };
    let rx = v3d_normalize(&v3d_sub(&north, &v3d_scale(&rz, v3d_dot(&north, &rz))))?;
    let ry = v3d_cross(&rz, &rx);

    let (n, s, up, lo) = _frame_vertices();
    let mut faces = Vec::with_capacity(NUM_ICOSA_FACES);
    for root in 0..10 {
      let k = (root / 2) as usize;
      let (a, b, c, d) = if root % 2 == 0 {
        (up[k], n, up[(k + 1) % 5], lo[k])
      } else {
        (lo[k], up[(k + 1) % 5], lo[(k + 1) % 5], s)
      };
      let (cx, cy) = root_square(root);
      let (cx, cy) = (cx as f64, cy as f64);
      let pa = Vec2d { x: cx, y: cy };
      let pb = Vec2d { x: cx + 1.0, y: cy };
      let pc = Vec2d { x: cx + 1.0, y: cy + 1.0 };
      let pd = Vec2d { x: cx, y: cy + 1.0 };
      faces.push(Self::_make_face([a, b, c], [pa, pb, pc])?);
      faces.push(Self::_make_face([a, c, d], [pa, pc, pd])?);
    }
    Ok(Self { rx, ry, rz, faces })
  }

  fn _make_face(verts: [Vec3d; 3], corners: [Vec2d; 3]) -> Result<IcoFace, DggrsError> {
    let plane = plane_from_points(&verts[0], &verts[1], &verts[2])?;
    let mut center = _plane_normal(&plane);
    // Outward normal: the origin lies behind every face
    if plane.d > 0.0 {
      center = v3d_scale(&center, -1.0);
    }
    let tangents = [
      _tangent(&center, &verts[0]),
      _tangent(&center, &verts[1]),
      _tangent(&center, &verts[2]),
    ];
    Ok(IcoFace {
      tangents,
      corners,
      center,
    })
  }

  #[inline]
  fn _geo_to_frame(&self, v: &Vec3d) -> Vec3d {
    Vec3d {
      x: v3d_dot(v, &self.rx),
      y: v3d_dot(v, &self.ry),
      z: v3d_dot(v, &self.rz),
    }
  }

  #[inline]
  fn _frame_to_geo(&self, v: &Vec3d) -> Vec3d {
    v3d_add(
      &v3d_add(&v3d_scale(&self.rx, v.x), &v3d_scale(&self.ry, v.y)),
      &v3d_scale(&self.rz, v.z),
    )
  }

  fn _find_face(&self, p: &Vec3d) -> usize {
    let mut best = f64::NEG_INFINITY;
    let mut best_face = 0;
    for (i, f) in self.faces.iter().enumerate() {
      let d = v3d_dot(p, &f.center);
      if d > best {
        best = d;
        best_face = i;
      }
    }
    best_face
  }

  /// Vertex indices of `face` ordered by how close their direction from the
  /// face centre is to `tp`.
  fn _sector(face: &IcoFace, tp: &Vec3d) -> [usize; 3] {
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| v3d_dot(tp, &face.tangents[b]).total_cmp(&v3d_dot(tp, &face.tangents[a])));
    order
  }

  fn _forward_face(&self, p: &Vec3d, face_index: usize) -> Vec2d {
    let face = &self.faces[face_index];
    let c = &face.center;
    let z = v3d_angle(c, p);
    if z < 1e-15 {
      return Vec2d {
        x: (face.corners[0].x + face.corners[1].x + face.corners[2].x) / 3.0,
        y: (face.corners[0].y + face.corners[1].y + face.corners[2].y) / 3.0,
      };
    }
    let tp = _tangent(c, p);
    let [i, j, k] = Self::_sector(face, &tp);
    let ti = &face.tangents[i];
    let w = _tangent(ti, &face.tangents[j]);
    let az = v3d_dot(&tp, &w).atan2(v3d_dot(&tp, ti)).max(0.0);

    let (sin_az, cos_az) = az.sin_cos();
    let (sin_g, cos_g) = ISEA_G.sin_cos();
    let h = (sin_az * sin_g * ISEA_COS_G - cos_az * cos_g).clamp(-1.0, 1.0).acos();
    let ag = az + ISEA_G + h - M_PI;
    let az_p = (2.0 * ag).atan2(ISEA_RV2 - 2.0 * M_SQRT3 * ag);
    let q = (ISEA_TAN_G / (cos_az + M_SQRT3 * sin_az)).atan();
    let d_p = (ISEA_RV / 2.0) / (FRAC_PI_3 - az_p).cos();
    let rho = d_p * (z / 2.0).sin() / (q / 2.0).sin();
    let s = rho / ISEA_RV;
    let a = s * (az_p.cos() + az_p.sin() / M_SQRT3);
    let b = s * (2.0 * az_p.sin() / M_SQRT3);

    let bk = (1.0 - a - b) / 3.0;
    let mut bary = [0.0; 3];
    bary[i] = bk + a;
    bary[j] = bk + b;
    bary[k] = bk;
    Vec2d {
      x: bary[0] * face.corners[0].x + bary[1] * face.corners[1].x + bary[2] * face.corners[2].x,
      y: bary[0] * face.corners[0].y + bary[1] * face.corners[1].y + bary[2] * face.corners[2].y,
    }
  }

  fn _inverse_face(&self, q: &Vec2d, face_index: usize) -> Vec3d {
    let face = &self.faces[face_index];
    let [p0, p1, p2] = face.corners;
    let det = (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y);
    let l1 = ((q.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (q.y - p0.y)) / det;
    let l2 = ((p1.x - p0.x) * (q.y - p0.y) - (q.x - p0.x) * (p1.y - p0.y)) / det;
    let bary = [1.0 - l1 - l2, l1, l2];

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| bary[b].total_cmp(&bary[a]));
    let [i, j, k] = order;
    let a = bary[i] - bary[k];
    let b = bary[j] - bary[k];
    let sy = b * M_SQRT3 / 2.0;
    let sx = a - b / 2.0;
    let s = sx.hypot(sy);
    if s < 1e-15 {
      return face.center;
    }
    let az_p = sy.atan2(sx);
    let rho = ISEA_RV * s;
    let ag = ISEA_RV2 * az_p.sin() / (4.0 * (az_p + FRAC_PI_6).sin());

    let (sin_g, cos_g) = ISEA_G.sin_cos();
    let mut az = az_p;
    for _ in 0..MAX_NEWTON_STEPS {
      let (sin_az, cos_az) = az.sin_cos();
      let h = (sin_az * sin_g * ISEA_COS_G - cos_az * cos_g).clamp(-1.0, 1.0).acos();
      let f = az + ISEA_G + h - M_PI - ag;
      let fd = 1.0 - (cos_az * sin_g * ISEA_COS_G + sin_az * cos_g) / h.sin();
      let step = f / fd;
      az -= step;
      if step.abs() < 1e-15 {
        break;
      }
    }
    let q_ang = (ISEA_TAN_G / (az.cos() + M_SQRT3 * az.sin())).atan();
    let d_p = (ISEA_RV / 2.0) / (FRAC_PI_3 - az_p).cos();
    let z = 2.0 * (rho * (q_ang / 2.0).sin() / d_p).clamp(-1.0, 1.0).asin();

    let ti = &face.tangents[i];
    let w = _tangent(ti, &face.tangents[j]);
    let dir = v3d_add(&v3d_scale(ti, az.cos()), &v3d_scale(&w, az.sin()));
    v3d_add(&v3d_scale(&face.center, z.cos()), &v3d_scale(&dir, z.sin()))
  }

  /// Projects a WGS84 point onto the net.
  #[must_use]
  pub fn to_rhombus(&self, p: &GeoPoint) -> RhombusPoint {
    let beta = authalic_latitude(p.lat);
    let v = self._geo_to_frame(&_geo_to_vec3d(&GeoPoint { lat: beta, lon: p.lon }));
    let face = self._find_face(&v);
    let q = self._forward_face(&v, face);
    let root = (face / 2) as i32;
    let (cx, cy) = root_square(root);
    RhombusPoint {
      root,
      u: (q.x - cx as f64).clamp(0.0, 1.0),
      v: (q.y - cy as f64).clamp(0.0, 1.0),
    }
  }

  /// WGS84 point of a net position.
  #[must_use]
  pub fn from_rhombus(&self, r: &RhombusPoint) -> GeoPoint {
    let face = 2 * r.root.clamp(0, 9) as usize + usize::from(r.u < r.v);
    let (cx, cy) = root_square(r.root);
    let q = Vec2d {
      x: cx as f64 + r.u,
      y: cy as f64 + r.v,
    };
    let p = self._frame_to_geo(&self._inverse_face(&q, face));
    let g = _vec3d_to_geo(&p);
    trace!(root = r.root, u = r.u, v = r.v, "isea inverse");
    GeoPoint {
      lat: geodetic_latitude(g.lat),
      lon: g.lon,
    }
  }
}

impl Projection for IseaProjection {
  fn forward(&self, p: &GeoPoint) -> Vec2d {
    self.to_rhombus(p).to_net()
  }

  fn inverse(&self, q: &Vec2d, hint: Option<i32>) -> Option<GeoPoint> {
    let (root, uv) = canonicalize_point(*q, hint)?;
    Some(self.from_rhombus(&RhombusPoint {
      root,
      u: uv.x,
      v: uv.y,
    }))
  }
}
