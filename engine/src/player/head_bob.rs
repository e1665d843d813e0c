//! Procedural Head Bob
//!
//! Converts the character's actual horizontal speed into smoothed vertical
//! and lateral camera offsets, and fires a footstep event on each half-cycle
//! of the gait. Everything is driven by the velocity the controller really
//! commanded, never by input intent, so walking into a wall damps the bob
//! the way a stalled body should.
//!
//! # Waveform
//!
//! The vertical track is `sin(2φ) + w·sin(4φ)`: two bounces per stride with
//! a weighted second harmonic sharpening the impact. The lateral track is
//! `sin(φ)`, one sway per stride, faded down while strafing. A step fires
//! when the phase crosses 0 (right foot) or π (left foot).

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Threshold below which intensity and cadence are treated as stopped.
const BOB_EPSILON: f32 = 1e-3;

/// Which foot landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foot {
    Left,
    Right,
}

/// Tuning for the bob animator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BobConfig {
    /// Speed in m/s that counts as a full-intensity gait.
    pub reference_speed: f32,
    /// Exponential rate for intensity smoothing, per second.
    pub bob_smoothing: f32,
    /// Exponential rate for cadence smoothing, per second.
    pub step_smoothing: f32,
    /// Stride frequency at a crawl, in Hz.
    pub min_cadence_hz: f32,
    /// Stride frequency at full speed, in Hz.
    pub max_cadence_hz: f32,
    /// Peak vertical offset in meters at full intensity.
    pub vertical_amplitude: f32,
    /// Peak lateral offset in meters at full intensity.
    pub lateral_amplitude: f32,
    /// Weight of the second harmonic in the vertical track.
    pub harmonic_weight: f32,
    /// How much amplitude scales with speed: 0 = constant, 1 = proportional.
    pub speed_influence: f32,
    /// Lateral weight when moving fully sideways; blends to 1 when moving
    /// along the view direction.
    pub strafe_factor: f32,
    /// Exponential rate pulling offsets toward the gait while moving.
    pub follow_rate: f32,
    /// Exponential rate easing offsets back to zero when stopping.
    pub idle_return_rate: f32,
}

impl Default for BobConfig {
    fn default() -> Self {
        Self {
            reference_speed: 2.0,
            bob_smoothing: 8.0,
            step_smoothing: 6.0,
            min_cadence_hz: 1.4,
            max_cadence_hz: 2.2,
            vertical_amplitude: 0.035,
            lateral_amplitude: 0.02,
            harmonic_weight: 0.3,
            speed_influence: 0.6,
            strafe_factor: 0.7,
            follow_rate: 12.0,
            idle_return_rate: 5.0,
        }
    }
}

/// Bob animator state. Owned exclusively by one locomotion controller.
#[derive(Debug, Clone)]
pub struct HeadBob {
    config: BobConfig,
    /// Gait phase in `[0, 2π)`.
    phase: f32,
    /// Smoothed gait intensity in `[0, 1]`.
    intensity: f32,
    /// Smoothed stride frequency in Hz.
    cadence_hz: f32,
    /// Smoothed vertical camera offset in meters.
    vertical_offset: f32,
    /// Smoothed lateral camera offset in meters.
    lateral_offset: f32,
}

impl Default for HeadBob {
    fn default() -> Self {
        Self::with_config(BobConfig::default())
    }
}

impl HeadBob {
    /// Create an animator with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an animator with custom tuning.
    pub fn with_config(config: BobConfig) -> Self {
        Self {
            config,
            phase: 0.0,
            intensity: 0.0,
            cadence_hz: 0.0,
            vertical_offset: 0.0,
            lateral_offset: 0.0,
        }
    }

    /// Current gait phase in `[0, 2π)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Current smoothed intensity in `[0, 1]`.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Current smoothed cadence in Hz.
    pub fn cadence_hz(&self) -> f32 {
        self.cadence_hz
    }

    /// Current `(vertical, lateral)` camera offsets in meters.
    pub fn offsets(&self) -> (f32, f32) {
        (self.vertical_offset, self.lateral_offset)
    }

    /// Tuning in use.
    pub fn config(&self) -> &BobConfig {
        &self.config
    }

    /// Advance the animator by one tick.
    ///
    /// # Arguments
    /// * `dt` - Delta time in seconds
    /// * `speed` - Actual horizontal speed magnitude in m/s
    /// * `moving` - Whether the character counts as moving (free input
    ///   present, or a scripted sequence past its delay)
    /// * `velocity` - Actual horizontal velocity, for strafe detection
    /// * `forward` - View forward flattened to the horizontal plane
    ///
    /// # Returns
    /// A footstep event when the gait phase crossed a footfall point this
    /// tick, at most one per tick.
    pub fn update(
        &mut self,
        dt: f32,
        speed: f32,
        moving: bool,
        velocity: Vec3,
        forward: Vec3,
    ) -> Option<Foot> {
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };

        let normalized = (speed / self.config.reference_speed.max(BOB_EPSILON)).clamp(0.0, 1.0);

        self.intensity += (normalized - self.intensity) * smoothing(self.config.bob_smoothing, dt);
        self.intensity = self.intensity.clamp(0.0, 1.0);

        let target_cadence = lerp(
            self.config.min_cadence_hz,
            self.config.max_cadence_hz,
            normalized,
        );
        self.cadence_hz +=
            (target_cadence - self.cadence_hz) * smoothing(self.config.step_smoothing, dt);

        let step = if self.intensity > BOB_EPSILON && self.cadence_hz > BOB_EPSILON {
            let prev = self.phase;
            self.phase = (self.phase + self.cadence_hz * TAU * dt).rem_euclid(TAU);
            detect_step(prev, self.phase)
        } else {
            None
        };

        let amp_scale =
            1.0 - self.config.speed_influence + self.config.speed_influence * normalized;

        // |velocity . forward| on the plane: 1 when walking along the view,
        // 0 when strafing square across it.
        let alignment = if velocity.length_squared() > 1e-6 {
            let flat = Vec3::new(velocity.x, 0.0, velocity.z).normalize_or_zero();
            flat.dot(forward).abs().clamp(0.0, 1.0)
        } else {
            1.0
        };
        let lateral_weight = lerp(self.config.strafe_factor, 1.0, alignment);

        let (target_vertical, target_lateral) = if moving {
            let vertical = ((2.0 * self.phase).sin()
                + self.config.harmonic_weight * (4.0 * self.phase).sin())
                * self.config.vertical_amplitude
                * self.intensity
                * amp_scale;
            let lateral = self.phase.sin()
                * self.config.lateral_amplitude
                * lateral_weight
                * self.intensity
                * amp_scale;
            (vertical, lateral)
        } else {
            (0.0, 0.0)
        };

        // Snap into gait quickly, ease out gently when stopping.
        let rate = if moving {
            self.config.follow_rate
        } else {
            self.config.idle_return_rate
        };
        let factor = smoothing(rate, dt);
        self.vertical_offset += (target_vertical - self.vertical_offset) * factor;
        self.lateral_offset += (target_lateral - self.lateral_offset) * factor;

        step
    }

    /// Clear all state, as if the character had been standing forever.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.intensity = 0.0;
        self.cadence_hz = 0.0;
        self.vertical_offset = 0.0;
        self.lateral_offset = 0.0;
    }
}

/// Footfall edge detection, wrap-aware.
///
/// The right foot lands when the phase crosses 0 (i.e. wraps past 2π), the
/// left when it crosses π. At normal cadences at most one crossing happens
/// per tick; the wrap case is checked first so both never fire together.
fn detect_step(prev: f32, current: f32) -> Option<Foot> {
    if current < prev {
        Some(Foot::Right)
    } else if prev < PI && current >= PI {
        Some(Foot::Left)
    } else {
        None
    }
}

/// Frame-rate independent exponential smoothing factor for `rate` per second.
fn smoothing(rate: f32, dt: f32) -> f32 {
    let rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    1.0 - (-rate * dt).exp()
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
