//! Physics Module
//!
//! The seam between the locomotion controller and the physics engine. The
//! controller never owns a body; it drives one through the [`RigidBody`]
//! handle trait each tick. [`KinematicBody`] is a minimal implementation for
//! tests and headless simulation.

pub mod body;
pub mod types;

pub use body::{KinematicBody, RigidBody};
pub use types::{Quat, Vec3};
