//! Scripted Sequence Engine
//!
//! Time-bounded forced movement: "turn to face, then walk" cutscene motion.
//! A sequence optionally starts with a delay during which the character is
//! frozen and the view eases toward a look-at target; after the delay the
//! character walks in the direction it faced when the sequence began, at
//! `distance / duration`, until the total duration elapses.
//!
//! At most one sequence is active per controller. A new `begin` replaces the
//! current sequence immediately; there is no queueing. This last-write-wins
//! behavior is deliberate and matches how the surrounding game issues these
//! requests.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{shortest_arc, ViewCamera};

/// Floor for the requested duration, so `distance / duration` stays finite.
const MIN_DURATION: f32 = 1e-3;

/// Parameters of one scripted movement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedMoveRequest {
    /// Total sequence length in seconds, including the move delay.
    pub duration: f32,
    /// Distance to cover in meters. Speed is `distance / duration`.
    pub distance: f32,
    /// Suppress free look for the whole sequence.
    pub lock_look: bool,
    /// World point the view turns toward during the delay phase.
    pub look_at: Option<Vec3>,
    /// Look easing rate per second, per-tick factor clamped to `[0, 1]`.
    pub look_slerp_rate: f32,
    /// Seconds to stand still before movement starts.
    pub move_delay: f32,
}

impl Default for ScriptedMoveRequest {
    fn default() -> Self {
        Self {
            duration: 1.0,
            distance: 1.0,
            lock_look: false,
            look_at: None,
            look_slerp_rate: 2.0,
            move_delay: 0.0,
        }
    }
}

/// Phase of the sequence state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptedPhase {
    /// No sequence active; free input controls the character.
    #[default]
    Idle,
    /// Sequence started but movement has not; view may be turning.
    Delaying,
    /// Walking in the captured direction.
    Moving,
}

/// State machine driving one scripted movement sequence.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMove {
    phase: ScriptedPhase,
    /// Seconds until the whole sequence expires. Runs from `begin`.
    time_remaining: f32,
    /// Seconds until movement starts.
    delay_remaining: f32,
    speed: f32,
    /// Unit movement direction on the horizontal plane.
    direction: Vec3,
    lock_look: bool,
    look_at: Option<Vec3>,
    look_slerp_rate: f32,
}

impl ScriptedMove {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sequence, replacing any active one.
    ///
    /// `view_forward_flat` is the current view direction flattened to the
    /// horizontal plane; it becomes the movement direction for the whole
    /// sequence. A degenerate forward falls back to -Z.
    pub fn begin(&mut self, request: &ScriptedMoveRequest, view_forward_flat: Vec3) {
        let duration = sanitize(request.duration).max(MIN_DURATION);
        let distance = sanitize(request.distance).max(0.0);
        let delay = sanitize(request.move_delay).clamp(0.0, duration);

        let mut direction = Vec3::new(view_forward_flat.x, 0.0, view_forward_flat.z);
        direction = if direction.length_squared() > 1e-8 {
            direction.normalize()
        } else {
            Vec3::NEG_Z
        };

        self.phase = if delay > 0.0 {
            ScriptedPhase::Delaying
        } else {
            ScriptedPhase::Moving
        };
        self.time_remaining = duration;
        self.delay_remaining = delay;
        self.speed = distance / duration;
        self.direction = direction;
        self.lock_look = request.lock_look;
        self.look_at = request.look_at;
        self.look_slerp_rate = sanitize(request.look_slerp_rate).max(0.0);

        log::debug!(
            "scripted move begin: speed={:.2} m/s, delay={:.2}s, duration={:.2}s, lock_look={}",
            self.speed,
            delay,
            duration,
            self.lock_look
        );
    }

    /// Advance the sequence by one tick.
    ///
    /// During the delay, with look lock and a target set, the camera yaw and
    /// pitch ease toward facing the target. The rotation happens only in the
    /// delay phase; once walking starts the view holds.
    pub fn tick(&mut self, dt: f32, camera: &mut ViewCamera) {
        if self.phase == ScriptedPhase::Idle {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.time_remaining -= dt;

        if self.phase == ScriptedPhase::Delaying {
            if self.lock_look {
                if let Some(target) = self.look_at {
                    self.turn_toward(dt, camera, target);
                }
            }
            self.delay_remaining -= dt;
            if self.delay_remaining <= 0.0 {
                self.phase = ScriptedPhase::Moving;
                log::debug!("scripted move: delay elapsed, walking");
            }
        }

        if self.time_remaining <= 0.0 {
            self.phase = ScriptedPhase::Idle;
            self.lock_look = false;
            log::debug!("scripted move complete");
        }
    }

    /// Abort the sequence immediately. Used by teleports.
    pub fn cancel(&mut self) {
        if self.phase != ScriptedPhase::Idle {
            self.phase = ScriptedPhase::Idle;
            self.lock_look = false;
            log::debug!("scripted move cancelled");
        }
    }

    fn turn_toward(&self, dt: f32, camera: &mut ViewCamera, target: Vec3) {
        let Some((target_yaw, target_pitch)) = camera.angles_to(target) else {
            return;
        };
        let t = (self.look_slerp_rate * dt).clamp(0.0, 1.0);
        let yaw = camera.yaw() + shortest_arc(camera.yaw(), target_yaw) * t;
        let pitch = camera.pitch() + (target_pitch - camera.pitch()) * t;
        camera.set_yaw(yaw);
        camera.set_pitch(pitch);
    }

    /// Current phase.
    pub fn phase(&self) -> ScriptedPhase {
        self.phase
    }

    /// Whether a sequence is running (delaying or moving).
    pub fn is_active(&self) -> bool {
        self.phase != ScriptedPhase::Idle
    }

    /// Whether scripted movement is in effect this tick. False while the
    /// sequence is still delaying.
    pub fn can_move(&self) -> bool {
        self.phase == ScriptedPhase::Moving
    }

    /// Velocity the sequence wants this tick: `direction * speed` while
    /// moving, zero otherwise.
    pub fn desired_velocity(&self) -> Vec3 {
        if self.phase == ScriptedPhase::Moving {
            self.direction * self.speed
        } else {
            Vec3::ZERO
        }
    }

    /// Whether free look is currently suppressed by this sequence.
    pub fn is_look_locked(&self) -> bool {
        self.is_active() && self.lock_look
    }

    /// Seconds until the sequence expires.
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Movement speed of the sequence in m/s.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Captured movement direction (unit, horizontal).
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
