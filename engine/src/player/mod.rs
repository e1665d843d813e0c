//! Player Module
//!
//! Per-character locomotion: the tick orchestrator plus its two helper
//! state machines.
//!
//! # Components
//!
//! - [`LocomotionController`] - Per-tick orchestrator merging free input and
//!   scripted overrides into body velocity and camera placement
//! - [`ScriptedMove`] - Time-bounded forced movement with optional look lock
//! - [`HeadBob`] - Speed-driven procedural camera bob with footstep events

pub mod head_bob;
pub mod locomotion;
pub mod scripted;

pub use head_bob::{BobConfig, Foot, HeadBob};
pub use locomotion::{
    ControllerEvent, LocomotionConfig, LocomotionController, TeleportRequest, ACCELERATION,
    CAPSULE_HALF_HEIGHT, DECELERATION, EYE_HEIGHT, LOOK_SENSITIVITY, WALK_SPEED,
};
pub use scripted::{ScriptedMove, ScriptedMoveRequest, ScriptedPhase};
