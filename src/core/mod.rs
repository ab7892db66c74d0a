//! Core module - pure game logic with no I/O
//!
//! Everything in here is a deterministic function of explicit inputs:
//! board geometry and collision, piece geometry and rotation, the seeded
//! queue, physics, and the per-tick step pipeline.

pub mod board;
pub mod game_state;
pub mod physics;
pub mod pieces;
pub mod rng;
pub mod snapshot;
pub mod step;

// Re-export commonly used types
pub use board::Board;
pub use game_state::{GameState, HoldState, SpawnOutcome};
pub use physics::{LockState, PhysicsState};
pub use pieces::{rotate, ActivePiece, RotationOutcome};
pub use rng::BagRng;
pub use snapshot::GameSnapshot;
pub use step::StepResult;
