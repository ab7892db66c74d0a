//! Core types shared across the crate
//!
//! Pure data types with no behavior beyond small helpers: piece kinds,
//! rotation states, the command and event vocabulary of the engine.

use serde::{Deserialize, Serialize};

/// Default board dimensions (visible playfield)
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden rows above the visible playfield. Pieces spawn here; the rows are
/// collidable but never participate in line-completion checks.
pub const VANISH_ROWS: u8 = 4;

/// Tick counter type. Ticks are the only notion of time in the core.
pub type Tick = u64;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in canonical bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Non-zero cell code used in flat board snapshots (0 = empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotated(&self, dir: RotationDir) -> Self {
        match dir {
            RotationDir::Cw => self.rotate_cw(),
            RotationDir::Ccw => self.rotate_ccw(),
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDir {
    Cw,
    Ccw,
}

/// Which kind of kick offset made a rotation legal.
///
/// The zero offset classifies as `None`; a purely horizontal offset as
/// `Wall`; any offset with a vertical component as `Floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KickClass {
    None,
    Wall,
    Floor,
}

/// Why a lock-delay reset was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockResetReason {
    Move,
    Rotate,
}

/// How a lock came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockSource {
    Ground,
    HardDrop,
}

/// Provenance of a movement command (initial press vs auto-repeat).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    #[default]
    Tap,
    Repeat,
}

/// Discrete player commands, one batch per tick.
///
/// Produced by the input/DAS layer; the core handles every variant
/// unconditionally whenever received. Inapplicable commands (moving into a
/// wall, a second hold in one turn) are silent no-ops, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    MoveLeft {
        #[serde(default)]
        source: MoveSource,
    },
    MoveRight {
        #[serde(default)]
        source: MoveSource,
    },
    ShiftToWallLeft,
    ShiftToWallRight,
    RotateCw,
    RotateCcw,
    SoftDropOn,
    SoftDropOff,
    HardDrop,
    Hold,
}

/// Domain events emitted by [`step`](crate::core::GameState::step), in
/// canonical intra-tick order: command events first (in command order), then
/// `LockStarted`/`LockReset`, then `Locked`, `LinesCleared`, and finally
/// `PieceSpawned` or `TopOut`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomainEvent {
    PieceSpawned {
        piece: PieceKind,
        tick: Tick,
    },
    MovedLeft {
        from_x: i8,
        to_x: i8,
        tick: Tick,
    },
    MovedRight {
        from_x: i8,
        to_x: i8,
        tick: Tick,
    },
    Rotated {
        dir: RotationDir,
        kick: KickClass,
        tick: Tick,
    },
    SoftDropToggled {
        on: bool,
        tick: Tick,
    },
    LockStarted {
        tick: Tick,
    },
    LockReset {
        reason: LockResetReason,
        tick: Tick,
    },
    Locked {
        piece: PieceKind,
        source: LockSource,
        tick: Tick,
    },
    LinesCleared {
        rows: Vec<u8>,
        tick: Tick,
    },
    Held {
        swapped: bool,
        tick: Tick,
    },
    TopOut {
        tick: Tick,
    },
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;
