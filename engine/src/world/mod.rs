//! World Module
//!
//! Level-space helpers the locomotion controller consumes but does not own.
//!
//! # Components
//!
//! - [`Anchor`] / [`AnchorPair`] - Named world transforms forming a portal
//! - [`portal::map_through`] / [`portal::exit_yaw`] - Frame transfer math

pub mod portal;

pub use portal::{Anchor, AnchorPair, exit_yaw, map_through};
