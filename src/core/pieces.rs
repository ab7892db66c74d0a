//! Piece geometry and rotation system
//!
//! Per-piece, per-rotation mino offset tables and SRS-style wall kick
//! tables. Rotation is resolved by trying the ordered kick candidates for a
//! transition against the board; the first legal candidate wins, so table
//! order is the sole tie-break.
//!
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::types::{KickClass, PieceKind, Rotation, RotationDir};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// The active falling piece, as an immutable value.
///
/// `y` may be negative: the anchor (and any mino) is allowed inside the
/// vanish zone above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at spawn rotation at the given anchor.
    pub fn spawn(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let shape = self.shape();
        shape.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// A copy of this piece translated by (dx, dy).
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// True when every mino sits above the visible field (y < 0).
    pub fn entirely_hidden(&self) -> bool {
        self.cells().iter().all(|&(_, y)| y < 0)
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal, centered on row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical, right-aligned
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal, centered on row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical, left-aligned
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

/// T piece shapes
fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// S piece shapes
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// Z piece shapes
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

/// J piece shapes
fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

/// L piece shapes
fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Wall kick data: ordered candidate offsets per rotation transition.
/// The first candidate that yields a legal placement wins.
pub type KickTable = [[(i8, i8); 5]; 8];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// O piece has no kicks (always rotates in place)
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Get the kick index for a rotation transition
fn get_kick_index(from: Rotation, dir: RotationDir) -> usize {
    match (from, dir) {
        (Rotation::North, RotationDir::Cw) => 0,  // N->E
        (Rotation::North, RotationDir::Ccw) => 1, // N->W
        (Rotation::East, RotationDir::Ccw) => 2,  // E->N
        (Rotation::East, RotationDir::Cw) => 3,   // E->S
        (Rotation::South, RotationDir::Ccw) => 4, // S->E
        (Rotation::South, RotationDir::Cw) => 5,  // S->W
        (Rotation::West, RotationDir::Ccw) => 6,  // W->S
        (Rotation::West, RotationDir::Cw) => 7,   // W->N
    }
}

/// Classify the kick offset that made a rotation legal.
///
/// Zero offset is no kick; a purely horizontal offset is a wall kick; any
/// offset with a vertical component counts as a floor kick.
pub fn classify_kick(offset: (i8, i8)) -> KickClass {
    match offset {
        (0, 0) => KickClass::None,
        (_, 0) => KickClass::Wall,
        _ => KickClass::Floor,
    }
}

/// Outcome of a rotation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    /// Whether any kick candidate produced a legal placement.
    pub rotated: bool,
    /// The resulting piece; unchanged from the input when `rotated` is false.
    pub piece: ActivePiece,
    /// Classification of the winning kick candidate (`None` on failure).
    pub kick: KickClass,
}

/// Try to rotate a piece against the board, resolving kicks in table order.
pub fn rotate(board: &Board, piece: &ActivePiece, dir: RotationDir) -> RotationOutcome {
    let new_rotation = piece.rotation.rotated(dir);
    let kicks = &get_kick_table(piece.kind)[get_kick_index(piece.rotation, dir)];

    for &(dx, dy) in kicks.iter() {
        let candidate = ActivePiece {
            rotation: new_rotation,
            x: piece.x + dx,
            y: piece.y + dy,
            ..*piece
        };

        if board.can_place(&candidate) {
            return RotationOutcome {
                rotated: true,
                piece: candidate,
                kick: classify_kick((dx, dy)),
            };
        }
    }

    RotationOutcome {
        rotated: false,
        piece: *piece,
        kick: KickClass::None,
    }
}
