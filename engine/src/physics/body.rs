//! Rigid Body Handle
//!
//! The locomotion controller commands a character body it does not own:
//! gravity, collision response and constraint solving live entirely in the
//! physics engine. The controller only reads position and velocity, writes
//! horizontal velocity, and writes position during a teleport.

use glam::Vec3;

/// Non-owning handle to a character's rigid body.
///
/// Implemented by the physics integration layer; the controller borrows a
/// `&mut dyn RigidBody` for the duration of one tick.
pub trait RigidBody {
    /// Current world position of the body's reference point (capsule center).
    fn position(&self) -> Vec3;

    /// Set the world position directly. Only used for teleports.
    fn set_position(&mut self, position: Vec3);

    /// Current linear velocity in world space.
    fn linear_velocity(&self) -> Vec3;

    /// Command the linear velocity. The controller preserves the vertical
    /// component it read, so gravity remains the physics engine's concern.
    fn set_linear_velocity(&mut self, velocity: Vec3);
}

/// Trivial kinematic body: position integrates commanded velocity.
///
/// Stands in for the physics engine in tests and headless simulation. There
/// is no gravity or collision here; whatever velocity is commanded is what
/// the body does.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicBody {
    position: Vec3,
    velocity: Vec3,
}

impl KinematicBody {
    /// Create a body at rest at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body at rest at a given position.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }

    /// Advance the body by one tick: `position += velocity * dt`.
    pub fn integrate(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.position += self.velocity * dt;
    }
}

impl RigidBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }
}
