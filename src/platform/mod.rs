//! Platform abstraction layer
//!
//! Handles the pieces that sit between the host and the simulation:
//! - Input events (held keys -> per-frame intent)
//! - Time (timestamps -> elapsed seconds)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Key, KeyboardState};
