// src/math/mod.rs
#![allow(clippy::module_name_repetitions)] // Common in math modules

pub mod extensions;
pub mod plane;
pub mod vec2d;
pub mod vec3d;

pub use plane::{plane_from_points, plane_signed_distance};
pub use vec3d::{v3d_add, v3d_angle, v3d_cross, v3d_dot, v3d_length, v3d_normalize, v3d_scale, v3d_sub};
