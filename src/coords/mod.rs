// src/coords/mod.rs

pub mod net5x6;

pub use net5x6::{canonicalize, net_position, NetCoord, NetPos, Rotation};
