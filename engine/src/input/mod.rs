//! Input Module
//!
//! Controller-facing input state, decoupled from any windowing system.
//! Collaborators (the platform layer, an AI driver, a test) write into these
//! structs asynchronously; the locomotion controller reads them once per tick.
//!
//! # Components
//!
//! - [`MovementAxes`] - Normalized forward/strafe intent in `[-1, 1]^2`
//! - [`LookDeltaQueue`] - One-shot accumulated look delta (pixels)

pub mod axes;
pub mod look;

pub use axes::MovementAxes;
pub use look::LookDeltaQueue;
