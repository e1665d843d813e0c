//! Look Delta Queue
//!
//! Accumulates raw look deltas (pixels) between ticks and hands them over
//! exactly once. Unlike the movement axes, look input is a stream of relative
//! motion, so it must accumulate rather than overwrite: two mouse events in
//! one frame are one larger rotation, not the last event winning.

/// One-shot accumulator for look input.
///
/// The platform layer calls [`accumulate`](Self::accumulate) for every raw
/// motion event; the locomotion controller calls
/// [`consume`](Self::consume) once per tick and gets everything since the
/// previous tick, after which the queue reads zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookDeltaQueue {
    dx: f32,
    dy: f32,
}

impl LookDeltaQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw look delta in pixels.
    ///
    /// Non-finite contributions are discarded; a single bad event from a
    /// device driver must not poison the whole frame's rotation.
    #[inline]
    pub fn accumulate(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() {
            self.dx += dx;
        }
        if dy.is_finite() {
            self.dy += dy;
        }
    }

    /// Take the accumulated delta, resetting the queue to zero.
    #[inline]
    pub fn consume(&mut self) -> (f32, f32) {
        let delta = (self.dx, self.dy);
        self.dx = 0.0;
        self.dy = 0.0;
        delta
    }

    /// Read the pending delta without consuming it.
    #[inline]
    pub fn peek(&self) -> (f32, f32) {
        (self.dx, self.dy)
    }

    /// Drop any pending delta.
    ///
    /// Used when look input must not apply, e.g. right after a teleport or
    /// while a cutscene holds the camera, so stale motion does not cause a
    /// view jump when control returns.
    pub fn discard(&mut self) {
        self.dx = 0.0;
        self.dy = 0.0;
    }
}
