//! Engine configuration and Q16.16 fixed-point helpers
//!
//! Gravity rates are expressed in cells-per-tick as unsigned Q16.16 values:
//! the high 16 bits are whole cells, the low 16 bits the fraction. All
//! descent arithmetic is exact integer arithmetic on these values.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Unsigned Q16.16 fixed-point quantity (cells, cells-per-tick).
pub type Fixed32 = u32;

/// One whole cell in Q16.16.
pub const FIXED_ONE: Fixed32 = 1 << 16;

/// Mask selecting the fractional part of a Q16.16 value.
pub const FIXED_FRAC_MASK: Fixed32 = FIXED_ONE - 1;

/// Whole-cell count to Q16.16.
pub const fn fixed_from_cells(cells: u16) -> Fixed32 {
    (cells as u32) << 16
}

/// Integer (whole-cell) part of a Q16.16 value.
pub const fn fixed_whole(v: Fixed32) -> u32 {
    v >> 16
}

/// Immutable engine configuration.
///
/// A config value is shared by reference across every `step` call; nothing
/// in the core ever mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Visible playfield width in cells.
    pub width: u8,
    /// Visible playfield height in cells (the vanish zone sits above this).
    pub height: u8,
    /// Gravity rate in Q16.16 cells per tick.
    pub gravity32: Fixed32,
    /// Soft-drop rate in Q16.16 cells per tick; falls back to `gravity32`
    /// when absent.
    pub soft_drop32: Option<Fixed32>,
    /// Grace period, in ticks, between grounding and forced lock.
    pub lock_delay_ticks: Tick32,
    /// Cap on lock-delay resets per piece.
    pub max_lock_resets: u8,
    /// Number of upcoming pieces the queue keeps visible.
    pub preview_count: u8,
    /// Seed for the piece generator.
    pub rng_seed: u32,
}

/// Tick duration type used by config fields (small, non-negative spans).
pub type Tick32 = u32;

impl EngineConfig {
    /// Soft-drop rate with the gravity fallback applied.
    pub fn soft_drop_rate(&self) -> Fixed32 {
        self.soft_drop32.unwrap_or(self.gravity32)
    }

    /// Check the config for contract violations.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "board dimensions must be non-zero",
            });
        }
        if self.width < 4 {
            return Err(EngineError::InvalidConfig {
                reason: "board width must fit a 4-wide piece",
            });
        }
        if self.preview_count == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "preview count must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            gravity32: FIXED_ONE / 60,
            soft_drop32: Some(FIXED_ONE),
            lock_delay_ticks: 30,
            max_lock_resets: 15,
            preview_count: 5,
            rng_seed: 1,
        }
    }
}
