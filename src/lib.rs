//! blockfall-core - deterministic falling-block game core
//!
//! A pure, tick-driven state machine: one [`GameState::step`] call takes a
//! batch of player commands, advances the game by exactly one tick, and
//! returns the successor state plus an ordered list of domain events. It
//! is the logical core of a falling-block game and nothing else:
//!
//! - **Deterministic**: same config, seed and per-tick command batches
//!   reproduce identical event sequences and final states
//! - **Pure**: no I/O, no clocks, no hidden mutable state; the RNG is an
//!   explicit value threaded through the state
//! - **Testable**: every rule is a function of explicit inputs
//!
//! # Module Structure
//!
//! - [`core::board`]: flat-grid playfield with a hidden, collidable vanish
//!   zone; collision, locking, line detection and clearing, garbage shifts
//! - [`core::pieces`]: piece shape tables and SRS-style rotation with
//!   prioritized kick resolution
//! - [`core::rng`]: seeded 7-bag generator with value semantics
//! - [`core::physics`]: Q16.16 gravity integration and the reset-capped
//!   lock-delay machine
//! - [`core::game_state`]: the complete game value, spawning and hold
//! - [`core::step`]: the three-phase per-tick pipeline and event ordering
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Command, EngineConfig, GameState};
//!
//! let cfg = EngineConfig::default();
//! let state = GameState::new(&cfg);
//!
//! let result = state.step(&cfg, &[Command::RotateCw, Command::HardDrop]);
//! assert_eq!(result.state.tick, 1);
//! assert!(!result.events.is_empty());
//! ```
//!
//! Input handling (DAS/ARR), rendering and persistence are external
//! collaborators: they produce [`Command`] batches and consume
//! [`DomainEvent`]s, but live outside this crate.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::{fixed_from_cells, EngineConfig, Fixed32, FIXED_ONE};
pub use core::{
    ActivePiece, BagRng, Board, GameSnapshot, GameState, HoldState, LockState, PhysicsState,
    StepResult,
};
pub use error::EngineError;
pub use types::{
    Command, DomainEvent, KickClass, LockResetReason, LockSource, MoveSource, PieceKind, Rotation,
    RotationDir, Tick,
};
