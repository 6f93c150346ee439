// src/hierarchy/mod.rs

//! Family-independent hierarchy algorithms built on [`crate::grids::Grid`].

pub mod ancestry;
pub mod compaction;

pub use ancestry::{are_siblings, is_ancestor_of, is_immediate_child_of};
pub use compaction::compact_zones;
