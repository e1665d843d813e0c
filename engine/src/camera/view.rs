//! First-Person View Camera
//!
//! Yaw/pitch orientation plus a world position, with the direction-vector
//! math the locomotion controller needs every tick. Rotation input is applied
//! in radians; sensitivity conversion from pixels belongs to the controller
//! configuration, not here.
//!
//! # Coordinate System
//!
//! - +X = right, +Y = up, -Z = forward
//! - Yaw 0, pitch 0 looks toward -Z; yaw increases turning right
//! - Pitch is clamped to just under ±90° so the view never flips

use glam::Vec3;

/// Pitch limit in radians: 89 degrees, keeping the view short of vertical.
pub const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// First-person camera with free yaw and clamped pitch.
#[derive(Debug, Clone)]
pub struct ViewCamera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Horizontal angle in radians, unrestricted.
    yaw: f32,
    /// Vertical angle in radians, clamped to ±[`PITCH_LIMIT`].
    pitch: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl ViewCamera {
    /// Create a camera at the origin looking toward -Z.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at a given position, default orientation.
    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Current yaw in radians.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Set yaw directly (radians).
    #[inline]
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Current pitch in radians.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set pitch directly (radians, clamped to ±[`PITCH_LIMIT`]).
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Apply a rotation in radians: positive `dyaw` turns right, positive
    /// `dpitch` looks up. Pitch stays clamped. Non-finite input is ignored.
    pub fn apply_look(&mut self, dyaw: f32, dpitch: f32) {
        if dyaw.is_finite() {
            self.yaw += dyaw;
        }
        if dpitch.is_finite() {
            self.pitch = (self.pitch + dpitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Full look direction derived from yaw and pitch, normalized.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Look direction flattened to the horizontal plane, normalized.
    ///
    /// Derived from yaw alone, so it stays well-defined even at the pitch
    /// limits where the projected forward would be near zero length.
    #[inline]
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Right vector on the horizontal plane: `flat_forward × world_up`.
    #[inline]
    pub fn flat_right(&self) -> Vec3 {
        let f = self.flat_forward();
        Vec3::new(-f.z, 0.0, f.x)
    }

    /// Up vector completing the basis.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.flat_right().cross(self.forward()).normalize()
    }

    /// Yaw and pitch that would aim the camera at `target` from its current
    /// position, pitch clamped. Returns `None` when the target coincides
    /// with the eye (no defined direction).
    pub fn angles_to(&self, target: Vec3) -> Option<(f32, f32)> {
        let to_target = target - self.position;
        let distance = to_target.length();
        if distance < 1e-4 {
            return None;
        }
        let yaw = to_target.x.atan2(-to_target.z);
        let pitch = (to_target.y / distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Some((yaw, pitch))
    }

    /// Aim the camera directly at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some((yaw, pitch)) = self.angles_to(target) {
            self.yaw = yaw;
            self.pitch = pitch;
        }
    }
}

/// Wrap an angle to `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Signed shortest rotation taking `from` to `to`, in `(-π, π]`.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}
