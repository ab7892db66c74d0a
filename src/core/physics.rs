//! Physics module - gravity integration and the lock-delay machine
//!
//! Gravity is integrated in Q16.16 fixed point: the per-tick rate is added
//! to an accumulator and the whole-cell part, once it reaches one, is spent
//! attempting single-cell descents. The lock-delay machine tracks a
//! tick-deadline with a capped number of resets.

use serde::{Deserialize, Serialize};

use crate::config::{fixed_whole, EngineConfig, Fixed32, FIXED_FRAC_MASK};
use crate::core::board::Board;
use crate::core::pieces::ActivePiece;
use crate::types::{LockResetReason, Tick};

/// Lock-delay state: `deadline_tick` is None while airborne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockState {
    pub deadline_tick: Option<Tick>,
    pub reset_count: u8,
}

impl LockState {
    pub fn airborne() -> Self {
        Self {
            deadline_tick: None,
            reset_count: 0,
        }
    }
}

/// Per-piece physics state carried inside the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsState {
    /// Q16.16 gravity accumulator; fractional remainder only after any tick
    /// in which a descent was attempted.
    pub gravity_accum32: Fixed32,
    pub lock: LockState,
    pub soft_drop_on: bool,
}

impl PhysicsState {
    pub fn new() -> Self {
        Self {
            gravity_accum32: 0,
            lock: LockState::airborne(),
            soft_drop_on: false,
        }
    }
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-tick inputs to the lock-delay machine, derived from the command
/// phase and the post-gravity piece position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockInputs {
    pub grounded: bool,
    pub reset_eligible: bool,
    pub reset_reason: Option<LockResetReason>,
    pub hard_dropped: bool,
}

/// What the lock-delay machine decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockUpdate {
    pub started: bool,
    pub reset: bool,
    pub reset_reason: Option<LockResetReason>,
    pub lock_now: bool,
    pub lock: LockState,
}

impl LockUpdate {
    fn quiet(lock: LockState) -> Self {
        Self {
            started: false,
            reset: false,
            reset_reason: None,
            lock_now: false,
            lock,
        }
    }
}

/// Advance the lock-delay machine by one tick.
///
/// Deadline expiry is checked before reset logic, so a reset arriving on
/// the expiry tick does not save the piece. A hard drop forces `lock_now`
/// unconditionally; when the piece had no deadline yet, `started` is still
/// reported for state-transition bookkeeping.
pub fn update_lock(
    lock: LockState,
    now: Tick,
    cfg: &EngineConfig,
    inputs: &LockInputs,
) -> LockUpdate {
    if inputs.hard_dropped {
        return LockUpdate {
            started: lock.deadline_tick.is_none(),
            reset: false,
            reset_reason: None,
            lock_now: true,
            lock,
        };
    }

    if !inputs.grounded {
        // Leaving the ground clears the deadline but keeps the reset count.
        return LockUpdate::quiet(LockState {
            deadline_tick: None,
            reset_count: lock.reset_count,
        });
    }

    match lock.deadline_tick {
        Some(deadline) if now >= deadline => LockUpdate {
            started: false,
            reset: false,
            reset_reason: None,
            lock_now: true,
            lock,
        },
        Some(_) => {
            if inputs.reset_eligible && lock.reset_count < cfg.max_lock_resets {
                LockUpdate {
                    started: false,
                    reset: true,
                    reset_reason: inputs.reset_reason,
                    lock_now: false,
                    lock: LockState {
                        deadline_tick: Some(now + cfg.lock_delay_ticks as Tick),
                        reset_count: lock.reset_count + 1,
                    },
                }
            } else {
                LockUpdate::quiet(lock)
            }
        }
        None => LockUpdate {
            started: true,
            reset: false,
            reset_reason: None,
            lock_now: false,
            lock: LockState {
                deadline_tick: Some(now + cfg.lock_delay_ticks as Tick),
                reset_count: lock.reset_count,
            },
        },
    }
}

/// Result of one gravity integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityResult {
    pub piece: ActivePiece,
    pub accum32: Fixed32,
}

/// Integrate gravity for one tick.
///
/// Adds `rate32` to the accumulator and attempts to descend by the whole-
/// cell part, one cell at a time, stopping at the first collision. Whenever
/// at least one cell was attempted the integer part is consumed regardless
/// of the distance actually achieved; otherwise the full sum is kept.
pub fn apply_gravity(
    board: &Board,
    piece: &ActivePiece,
    accum32: Fixed32,
    rate32: Fixed32,
) -> GravityResult {
    let sum = accum32.saturating_add(rate32);
    let cells = fixed_whole(sum);

    if cells == 0 {
        return GravityResult {
            piece: *piece,
            accum32: sum,
        };
    }

    let mut current = *piece;
    for _ in 0..cells {
        match board.try_move(&current, 0, 1) {
            Some(moved) => current = moved,
            None => break,
        }
    }

    GravityResult {
        piece: current,
        accum32: sum & FIXED_FRAC_MASK,
    }
}
