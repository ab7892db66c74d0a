//! Read-only projection of a game state for rendering and training layers.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::game_state::GameState;
use crate::core::pieces::ActivePiece;
use crate::types::{PieceKind, Rotation, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for PieceSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Flat view of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Visible rows only, top to bottom; 0 = empty, else piece-class code.
    pub board: Vec<Vec<u8>>,
    pub piece: Option<PieceSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub preview: Vec<PieceKind>,
    pub can_hold: bool,
    pub soft_drop_on: bool,
    pub topped_out: bool,
    pub tick: Tick,
}

impl GameState {
    /// Capture a render-facing snapshot of this state.
    pub fn snapshot(&self, cfg: &EngineConfig) -> GameSnapshot {
        let width = self.board.width() as i8;
        let height = self.board.height() as i8;

        let board = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        self.board
                            .get(x, y)
                            .flatten()
                            .map_or(0, |kind| kind.code())
                    })
                    .collect()
            })
            .collect();

        GameSnapshot {
            board,
            piece: self.piece.map(PieceSnapshot::from),
            ghost_y: self.ghost_y(),
            hold: self.hold.piece,
            preview: self
                .queue
                .iter()
                .copied()
                .take(cfg.preview_count as usize)
                .collect(),
            can_hold: !self.hold.used_this_turn,
            soft_drop_on: self.physics.soft_drop_on,
            topped_out: self.topped_out,
            tick: self.tick,
        }
    }
}
