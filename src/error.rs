//! Typed errors for contract violations
//!
//! Ordinary gameplay never produces an error: blocked moves, refused holds
//! and top-outs are all expressed through return values and events. Errors
//! are reserved for caller contract violations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("garbage hole column {hole_x} out of range for board width {width}")]
    GarbageHoleOutOfRange { hole_x: u8, width: u8 },

    #[error("invalid engine config: {reason}")]
    InvalidConfig { reason: &'static str },
}
