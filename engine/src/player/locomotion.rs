//! Locomotion Controller
//!
//! The per-tick orchestrator for one first-person character. Each simulation
//! tick it resolves desired horizontal velocity from free input or an active
//! scripted sequence, blends toward it with asymmetric rate limiting,
//! commands the rigid body, advances the scripted sequence and head bob, and
//! re-derives the camera transform from the body.
//!
//! External events (teleport, scripted move, lock changes) are written into
//! request slots and observed at the start of the next tick: one writer runs
//! per tick, requests are last-write-wins, and a new scripted request
//! unconditionally replaces an in-flight one. The controller owns all of its
//! per-character state, so multiple characters are just multiple controllers.
//!
//! # Tick order
//!
//! 1. Apply pending teleport, then pending scripted-move request
//! 2. Resolve desired horizontal velocity (scripted direction, or
//!    camera-relative input)
//! 3. Rate-limit toward it (acceleration up, deceleration down, per axis)
//! 4. Command the body; the vertical velocity component is never touched
//! 5. Advance the scripted sequence (delay countdown, look turn, expiry)
//! 6. Feed the head bob with the velocity actually commanded
//! 7. Place the camera and apply the one-shot look delta

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::ViewCamera;
use crate::input::{LookDeltaQueue, MovementAxes};
use crate::physics::RigidBody;
use crate::player::head_bob::{BobConfig, Foot, HeadBob};
use crate::player::scripted::{ScriptedMove, ScriptedMoveRequest};

/// Walk speed in meters per second
pub const WALK_SPEED: f32 = 2.0;

/// Acceleration toward the desired velocity in m/s^2
pub const ACCELERATION: f32 = 18.0;

/// Deceleration toward the desired velocity in m/s^2
pub const DECELERATION: f32 = 12.0;

/// Eye height above the capsule base in meters
pub const EYE_HEIGHT: f32 = 1.62;

/// Half height of the character capsule in meters
pub const CAPSULE_HALF_HEIGHT: f32 = 0.9;

/// Look sensitivity in radians per pixel
pub const LOOK_SENSITIVITY: f32 = 0.002;

/// Tuning for one locomotion controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Free-movement speed in m/s.
    pub walk_speed: f32,
    /// Rate limit when the desired speed exceeds the current one, m/s^2.
    pub acceleration: f32,
    /// Rate limit when slowing down, m/s^2.
    pub deceleration: f32,
    /// Eye height above the capsule base in meters.
    pub eye_height: f32,
    /// Half height of the character capsule in meters.
    pub capsule_half_height: f32,
    /// Look sensitivity in radians per pixel.
    pub look_sensitivity: f32,
    /// Head bob tuning.
    pub bob: BobConfig,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            acceleration: ACCELERATION,
            deceleration: DECELERATION,
            eye_height: EYE_HEIGHT,
            capsule_half_height: CAPSULE_HALF_HEIGHT,
            look_sensitivity: LOOK_SENSITIVITY,
            bob: BobConfig::default(),
        }
    }
}

impl LocomotionConfig {
    /// Parse a tuning profile from the application's JSON config format.
    ///
    /// Missing fields fall back to defaults, so profiles only spell out what
    /// they change.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// A teleport to be applied at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeleportRequest {
    /// Destination position in world space.
    pub target: Vec3,
    /// Keep the body's current vertical coordinate instead of the target's.
    pub preserve_height: bool,
    /// New camera yaw in radians, or `None` to keep the current yaw.
    pub yaw: Option<f32>,
}

/// Events the controller emits toward collaborators.
///
/// Drained per tick via [`LocomotionController::drain_events`]; each
/// collaborator that cares holds a reference to the controller rather than
/// listening on a global broadcast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// A foot landed this tick.
    Footstep(Foot),
    /// The external control lock toggled.
    LockChanged(bool),
}

/// Per-character locomotion controller.
///
/// Owns the camera, input state, scripted sequence engine and bob animator
/// for one character. Borrows the rigid body per tick; the physics engine
/// keeps ownership of the body itself.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    camera: ViewCamera,
    axes: MovementAxes,
    look: LookDeltaQueue,
    scripted: ScriptedMove,
    bob: HeadBob,
    /// External control lock: free movement and free look suppressed.
    locked: bool,
    pending_teleport: Option<TeleportRequest>,
    pending_scripted: Option<ScriptedMoveRequest>,
    events: Vec<ControllerEvent>,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::with_config(LocomotionConfig::default())
    }
}

impl LocomotionController {
    /// Create a controller with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with custom tuning.
    pub fn with_config(config: LocomotionConfig) -> Self {
        Self {
            bob: HeadBob::with_config(config.bob),
            config,
            camera: ViewCamera::new(),
            axes: MovementAxes::new(),
            look: LookDeltaQueue::new(),
            scripted: ScriptedMove::new(),
            locked: false,
            pending_teleport: None,
            pending_scripted: None,
            events: Vec::new(),
        }
    }

    /// The controller's camera.
    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    /// Mutable camera access, for initial placement and orientation.
    pub fn camera_mut(&mut self) -> &mut ViewCamera {
        &mut self.camera
    }

    /// The bob animator, for reading offsets or phase.
    pub fn bob(&self) -> &HeadBob {
        &self.bob
    }

    /// The scripted sequence engine, read-only.
    pub fn scripted(&self) -> &ScriptedMove {
        &self.scripted
    }

    /// The tuning in use.
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Write the movement axes the next tick will read.
    pub fn set_movement_axes(&mut self, x: f32, y: f32) {
        self.axes.set(x, y);
    }

    /// Accumulate raw look delta in pixels for the next tick.
    pub fn add_look_delta(&mut self, dx: f32, dy: f32) {
        self.look.accumulate(dx, dy);
    }

    /// Whether the character can move this tick. False only while a
    /// scripted sequence is in its delay phase.
    pub fn can_move(&self) -> bool {
        !self.scripted.is_active() || self.scripted.can_move()
    }

    /// Whether a scripted sequence is running.
    pub fn is_scripted_active(&self) -> bool {
        self.scripted.is_active()
    }

    /// Whether the external control lock is engaged.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Engage or release the external control lock.
    ///
    /// While locked, free movement input reads as zero and free look is
    /// suppressed; scripted sequences still run, which is what cutscenes
    /// want. A `LockChanged` event is emitted on each toggle.
    pub fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            self.locked = locked;
            self.events.push(ControllerEvent::LockChanged(locked));
            log::debug!("control lock {}", if locked { "engaged" } else { "released" });
        }
    }

    /// Request a scripted movement sequence, replacing any pending request.
    /// Observed at the start of the next tick.
    pub fn request_scripted_move(&mut self, request: ScriptedMoveRequest) {
        self.pending_scripted = Some(request);
    }

    /// Request a teleport, replacing any pending one. Observed at the start
    /// of the next tick; cancels any scripted sequence, zeroes velocity and
    /// leaves the controller free to move.
    pub fn request_teleport(&mut self, request: TeleportRequest) {
        self.pending_teleport = Some(request);
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one simulation tick.
    ///
    /// `body` is the character's rigid body, borrowed from the physics
    /// engine for the duration of the call.
    pub fn update(&mut self, dt: f32, body: &mut dyn RigidBody) {
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };

        self.apply_pending_requests(body);

        let forward = self.camera.flat_forward();
        let right = self.camera.flat_right();

        let override_active = self.scripted.is_active();
        let override_moving = self.scripted.can_move();

        // Exactly one of free input / scripted override feeds the desired
        // velocity; while an override delays, the character is frozen.
        let desired = if override_active {
            self.scripted.desired_velocity()
        } else if !self.locked && self.axes.is_active() {
            let direction =
                (forward * self.axes.y() + right * self.axes.x()).normalize_or_zero();
            direction * self.config.walk_speed
        } else {
            Vec3::ZERO
        };

        let current = body.linear_velocity();
        let current_h = Vec3::new(current.x, 0.0, current.z);

        let commanded = if override_active && !override_moving {
            Vec3::ZERO
        } else {
            self.rate_limit(current_h, desired, dt)
        };

        body.set_linear_velocity(Vec3::new(commanded.x, current.y, commanded.z));

        self.scripted.tick(dt, &mut self.camera);

        // Bob follows the velocity actually commanded, not the intent, so a
        // body stalled against geometry reads as stalled here too.
        let moving = (override_active && override_moving)
            || (!override_active && !self.locked && self.axes.is_active());
        if let Some(foot) = self.bob.update(dt, commanded.length(), moving, commanded, forward) {
            self.events.push(ControllerEvent::Footstep(foot));
        }

        self.place_camera(body);

        let (dx, dy) = self.look.consume();
        if !self.locked && !self.scripted.is_look_locked() {
            // Screen-down drags the view down: negative pitch delta.
            self.camera.apply_look(
                dx * self.config.look_sensitivity,
                -dy * self.config.look_sensitivity,
            );
        }
    }

    /// Asymmetric per-axis rate limiting toward the desired velocity.
    ///
    /// Accelerating uses the acceleration constant, everything else the
    /// deceleration constant; each axis moves at most `rate * dt` per tick,
    /// so the approach never overshoots.
    fn rate_limit(&self, current: Vec3, desired: Vec3, dt: f32) -> Vec3 {
        let rate = if desired.length_squared() > current.length_squared() {
            self.config.acceleration
        } else {
            self.config.deceleration
        };
        let max_step = rate * dt;
        Vec3::new(
            current.x + (desired.x - current.x).clamp(-max_step, max_step),
            0.0,
            current.z + (desired.z - current.z).clamp(-max_step, max_step),
        )
    }

    fn apply_pending_requests(&mut self, body: &mut dyn RigidBody) {
        if let Some(request) = self.pending_teleport.take() {
            // Teleport supersedes any scripted request from the same
            // inter-tick window: control must resume free on this tick.
            self.pending_scripted = None;
            self.scripted.cancel();

            body.set_linear_velocity(Vec3::ZERO);
            let mut target = request.target;
            if request.preserve_height {
                target.y = body.position().y;
            }
            body.set_position(target);
            if let Some(yaw) = request.yaw {
                self.camera.set_yaw(yaw);
            }
            // Stale look input from before the jump must not swing the view.
            self.look.discard();
            self.bob.reset();

            log::debug!(
                "teleport applied: target=({:.2}, {:.2}, {:.2}), yaw={:?}",
                target.x,
                target.y,
                target.z,
                request.yaw
            );
        }

        if let Some(request) = self.pending_scripted.take() {
            self.scripted.begin(&request, self.camera.flat_forward());
        }
    }

    fn place_camera(&mut self, body: &mut dyn RigidBody) {
        let (vertical, lateral) = self.bob.offsets();
        let base = body.position();
        self.camera.position = base
            + Vec3::Y * (self.config.eye_height - self.config.capsule_half_height + vertical)
            + self.camera.flat_right() * lateral;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::KinematicBody;

    const DT: f32 = 0.016;
    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn run(controller: &mut LocomotionController, body: &mut KinematicBody, ticks: usize) {
        for _ in 0..ticks {
            controller.update(DT, body);
            body.integrate(DT);
        }
    }

    #[test]
    fn test_idle_controller_stays_put() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        run(&mut controller, &mut body, 60);
        assert_eq!(body.position(), Vec3::ZERO);
        assert_eq!(body.linear_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_forward_input_reaches_walk_speed() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_movement_axes(0.0, 1.0);
        run(&mut controller, &mut body, 100);

        let velocity = body.linear_velocity();
        // Yaw 0 faces -Z.
        assert!(approx_eq(velocity.z, -WALK_SPEED));
        assert!(velocity.x.abs() < EPSILON);
    }

    #[test]
    fn test_strafe_is_camera_relative() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.camera_mut().set_yaw(std::f32::consts::FRAC_PI_2);
        controller.set_movement_axes(1.0, 0.0);
        run(&mut controller, &mut body, 100);

        // Facing +X, strafing right moves +Z.
        let velocity = body.linear_velocity();
        assert!(approx_eq(velocity.z, WALK_SPEED));
        assert!(velocity.x.abs() < EPSILON);
    }

    #[test]
    fn test_velocity_never_overshoots() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_movement_axes(0.0, 1.0);

        for _ in 0..200 {
            controller.update(DT, &mut body);
            assert!(body.linear_velocity().length() <= WALK_SPEED + EPSILON);
            body.integrate(DT);
        }
    }

    #[test]
    fn test_release_decelerates_to_rest() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_movement_axes(0.0, 1.0);
        run(&mut controller, &mut body, 100);

        controller.set_movement_axes(0.0, 0.0);
        run(&mut controller, &mut body, 100);
        assert!(body.linear_velocity().length() < EPSILON);
    }

    #[test]
    fn test_vertical_velocity_untouched() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        body.set_linear_velocity(Vec3::new(0.0, -3.0, 0.0));
        controller.set_movement_axes(0.0, 1.0);
        controller.update(DT, &mut body);
        assert!(approx_eq(body.linear_velocity().y, -3.0));
    }

    #[test]
    fn test_look_delta_consumed_once() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.add_look_delta(100.0, 0.0);

        controller.update(DT, &mut body);
        let yaw_after_first = controller.camera().yaw();
        assert!(approx_eq(yaw_after_first, 100.0 * LOOK_SENSITIVITY));

        controller.update(DT, &mut body);
        assert!(approx_eq(controller.camera().yaw(), yaw_after_first));
    }

    #[test]
    fn test_lock_suppresses_movement_and_look() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_locked(true);
        controller.set_movement_axes(0.0, 1.0);
        controller.add_look_delta(100.0, 50.0);
        run(&mut controller, &mut body, 30);

        assert_eq!(body.linear_velocity(), Vec3::ZERO);
        assert!(approx_eq(controller.camera().yaw(), 0.0));
        assert!(approx_eq(controller.camera().pitch(), 0.0));
    }

    #[test]
    fn test_lock_toggle_emits_events() {
        let mut controller = LocomotionController::new();
        controller.set_locked(true);
        controller.set_locked(true); // no-op, no second event
        controller.set_locked(false);

        let events = controller.drain_events();
        assert_eq!(
            events,
            vec![
                ControllerEvent::LockChanged(true),
                ControllerEvent::LockChanged(false)
            ]
        );
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_scripted_request_observed_next_tick() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.request_scripted_move(ScriptedMoveRequest {
            duration: 1.0,
            distance: 1.0,
            ..Default::default()
        });
        assert!(!controller.is_scripted_active());

        controller.update(DT, &mut body);
        assert!(controller.is_scripted_active());
    }

    #[test]
    fn test_scripted_overrides_input() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        // Input pushes right; the script walks forward (-Z).
        controller.set_movement_axes(1.0, 0.0);
        controller.request_scripted_move(ScriptedMoveRequest {
            duration: 5.0,
            distance: 10.0,
            ..Default::default()
        });
        run(&mut controller, &mut body, 60);

        let velocity = body.linear_velocity();
        assert!(velocity.z < -1.9);
        assert!(velocity.x.abs() < EPSILON);
    }

    #[test]
    fn test_delay_freezes_body() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_movement_axes(0.0, 1.0);
        run(&mut controller, &mut body, 50);
        assert!(body.linear_velocity().length() > 1.9);

        controller.request_scripted_move(ScriptedMoveRequest {
            duration: 2.0,
            distance: 2.0,
            move_delay: 1.0,
            ..Default::default()
        });
        controller.update(DT, &mut body);

        // Frozen instantly, not decelerated.
        assert_eq!(
            Vec3::new(body.linear_velocity().x, 0.0, body.linear_velocity().z),
            Vec3::ZERO
        );
        assert!(!controller.can_move());
    }

    #[test]
    fn test_teleport_next_tick_is_free_and_still() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_movement_axes(0.0, 1.0);
        run(&mut controller, &mut body, 50);
        controller.request_scripted_move(ScriptedMoveRequest {
            duration: 5.0,
            distance: 5.0,
            move_delay: 2.0,
            ..Default::default()
        });
        controller.update(DT, &mut body);
        assert!(!controller.can_move());

        controller.set_movement_axes(0.0, 0.0);
        controller.request_teleport(TeleportRequest {
            target: Vec3::new(10.0, 0.0, 5.0),
            preserve_height: false,
            yaw: None,
        });
        controller.update(DT, &mut body);

        assert_eq!(body.linear_velocity(), Vec3::ZERO);
        assert_eq!(body.position(), Vec3::new(10.0, 0.0, 5.0));
        assert!(controller.can_move());
        assert!(!controller.is_scripted_active());
    }

    #[test]
    fn test_teleport_preserves_height() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::at(Vec3::new(0.0, 3.5, 0.0));
        controller.request_teleport(TeleportRequest {
            target: Vec3::new(10.0, 99.0, 5.0),
            preserve_height: true,
            yaw: Some(std::f32::consts::FRAC_PI_2),
        });
        controller.update(DT, &mut body);

        assert_eq!(body.position(), Vec3::new(10.0, 3.5, 5.0));
        assert!(approx_eq(
            controller.camera().yaw(),
            std::f32::consts::FRAC_PI_2
        ));
    }

    #[test]
    fn test_teleport_discards_pending_scripted_request() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.request_scripted_move(ScriptedMoveRequest::default());
        controller.request_teleport(TeleportRequest {
            target: Vec3::ZERO,
            preserve_height: false,
            yaw: None,
        });
        controller.update(DT, &mut body);
        assert!(!controller.is_scripted_active());
    }

    #[test]
    fn test_scripted_request_last_write_wins() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.request_scripted_move(ScriptedMoveRequest {
            duration: 1.0,
            distance: 1.0,
            ..Default::default()
        });
        controller.request_scripted_move(ScriptedMoveRequest {
            duration: 10.0,
            distance: 1.0,
            ..Default::default()
        });
        controller.update(DT, &mut body);

        assert!(approx_eq(controller.scripted().speed(), 0.1));
    }

    #[test]
    fn test_camera_follows_body_at_eye_height() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::at(Vec3::new(2.0, 1.0, -3.0));
        controller.update(DT, &mut body);

        let expected_y = 1.0 + EYE_HEIGHT - CAPSULE_HALF_HEIGHT;
        let camera_pos = controller.camera().position;
        assert!(approx_eq(camera_pos.x, 2.0));
        assert!(approx_eq(camera_pos.y, expected_y));
        assert!(approx_eq(camera_pos.z, -3.0));
    }

    #[test]
    fn test_footsteps_reach_event_queue() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_movement_axes(0.0, 1.0);

        let mut footsteps = 0;
        for _ in 0..400 {
            controller.update(DT, &mut body);
            body.integrate(DT);
            for event in controller.drain_events() {
                if matches!(event, ControllerEvent::Footstep(_)) {
                    footsteps += 1;
                }
            }
        }
        assert!(footsteps >= 4, "expected steps while walking, got {footsteps}");
    }

    #[test]
    fn test_config_json_profile() {
        let config = LocomotionConfig::from_json(
            r#"{ "walk_speed": 3.5, "bob": { "min_cadence_hz": 1.0 } }"#,
        )
        .unwrap();
        assert!(approx_eq(config.walk_speed, 3.5));
        assert!(approx_eq(config.bob.min_cadence_hz, 1.0));
        // Unspecified fields keep their defaults.
        assert!(approx_eq(config.acceleration, ACCELERATION));
        assert!(approx_eq(config.bob.max_cadence_hz, 2.2));
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut controller = LocomotionController::new();
        let mut body = KinematicBody::new();
        controller.set_movement_axes(0.0, 1.0);
        controller.update(f32::NAN, &mut body);
        assert!(body.linear_velocity().length() < EPSILON);
        assert!(controller.camera().position.x.is_finite());
    }
}
