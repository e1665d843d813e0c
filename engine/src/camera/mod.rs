//! Camera Module
//!
//! First-person view orientation for the locomotion controller.
//!
//! # Components
//!
//! - [`ViewCamera`] - Yaw/pitch camera with basis vectors and look-at math

pub mod view;

pub use view::{ViewCamera, shortest_arc, wrap_angle, PITCH_LIMIT};
