//! Movement Axes
//!
//! Normalized 2D movement intent: `y` is forward/backward, `x` is strafe.
//! Whatever produces the values (key state, a gamepad stick, a replay) is the
//! platform layer's business; by the time they land here they are plain
//! floats in `[-1, 1]`.

/// Normalized movement intent for one character.
///
/// Values outside `[-1, 1]` are clamped on write and non-finite values snap
/// to zero, so a misbehaving input source can never push the controller past
/// full speed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementAxes {
    /// Strafe axis: positive = right.
    x: f32,
    /// Forward axis: positive = forward.
    y: f32,
}

impl MovementAxes {
    /// Create axes at rest (no intent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create axes from raw values, sanitized.
    pub fn from_raw(x: f32, y: f32) -> Self {
        let mut axes = Self::default();
        axes.set(x, y);
        axes
    }

    /// Set both axes, clamping to `[-1, 1]` and zeroing non-finite input.
    pub fn set(&mut self, x: f32, y: f32) {
        self.x = sanitize(x);
        self.y = sanitize(y);
    }

    /// Strafe axis in `[-1, 1]`, positive = right.
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Forward axis in `[-1, 1]`, positive = forward.
    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Whether any movement is being requested.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }

    /// Clear both axes to zero.
    pub fn clear(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}
