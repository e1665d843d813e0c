//! Physics type re-exports from glam
//!
//! Core mathematical types used throughout the locomotion system,
//! re-exported from the glam library.

pub use glam::{Quat, Vec3};
