//! Deterministic session simulation
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Caller-supplied frame timestep
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod overlap;
pub mod session;
pub mod state;
pub mod tick;
pub mod vision;

pub use overlap::{Rect, first_overlap};
pub use session::{ResetOutcome, SessionController, choose_alternate_spawn};
pub use state::{Collectible, Player, SessionEvent, SessionPhase, SessionState, SpawnPoint};
pub use tick::{TickInput, World, autopilot_input, input_velocity, tick};
pub use vision::{Camera, DarknessOverlay, VisionMask, compute_vision_mask};
