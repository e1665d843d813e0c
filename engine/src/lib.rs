//! Duskhall Locomotion Library
//!
//! Per-frame first-person locomotion for the Duskhall environment: free
//! movement with smoothed acceleration, scripted "turn to face, then walk"
//! sequences, procedural head bob with footstep events, and coordinate-frame
//! transfer for portal teleports. Rendering, device input decoding, audio
//! and the physics simulation itself are collaborator responsibilities; this
//! crate is the pure simulation core between them.
//!
//! # Modules
//!
//! - [`player`] - Locomotion controller, scripted sequence engine, head bob
//! - [`camera`] - First-person view orientation and basis math
//! - [`input`] - Movement axes and one-shot look-delta queue
//! - [`physics`] - The rigid body handle seam and a kinematic test body
//! - [`world`] - Portal anchors and frame-transfer math
//!
//! # Example
//!
//! ```ignore
//! use duskhall_engine::player::{LocomotionController, TeleportRequest};
//! use duskhall_engine::physics::{KinematicBody, RigidBody};
//! use glam::Vec3;
//!
//! let mut controller = LocomotionController::new();
//! let mut body = KinematicBody::new();
//!
//! // Each frame: feed input, tick, let the physics engine integrate.
//! controller.set_movement_axes(0.0, 1.0);
//! controller.add_look_delta(mouse_dx, mouse_dy);
//! controller.update(delta_time, &mut body);
//! body.integrate(delta_time);
//!
//! // React to events.
//! for event in controller.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Re-export the common per-character types at crate level for convenience
pub use camera::ViewCamera;
pub use input::{LookDeltaQueue, MovementAxes};
pub use physics::{KinematicBody, RigidBody};
pub use player::{
    ControllerEvent, Foot, HeadBob, LocomotionConfig, LocomotionController, ScriptedMove,
    ScriptedMoveRequest, TeleportRequest,
};
pub use world::{Anchor, AnchorPair};
