//! Game state module - the complete per-game value
//!
//! Ties together board, queue, hold and physics into one immutable-style
//! value. Every operation returns a new state; nothing is mutated behind
//! the caller's back, which is what makes replays byte-reproducible.
//!
//! The step pipeline itself lives in [`crate::core::step`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::core::board::Board;
use crate::core::physics::{LockState, PhysicsState};
use crate::core::pieces::ActivePiece;
use crate::core::rng::BagRng;
use crate::error::EngineError;
use crate::types::{Cell, PieceKind, Tick};

/// Spawn anchor row: two rows into the vanish zone, which keeps every
/// spawn-rotation shape fully hidden.
pub const SPAWN_Y: i8 = -2;

/// Spawn anchor column for a given board width (centers the 4-wide box).
pub fn spawn_x(width: u8) -> i8 {
    ((width - 4) / 2) as i8
}

/// Kind used to fill externally inserted garbage rows.
const GARBAGE_KIND: PieceKind = PieceKind::I;

/// Hold slot state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldState {
    pub piece: Option<PieceKind>,
    pub used_this_turn: bool,
}

impl HoldState {
    fn empty() -> Self {
        Self {
            piece: None,
            used_this_turn: false,
        }
    }
}

/// Result of a spawn attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// The kind that was placed, None on top-out.
    pub spawned: Option<PieceKind>,
    pub top_out: bool,
}

/// Complete game state.
///
/// `piece` is None only transiently inside a step (between a lock or hold
/// and the following spawn) and permanently after a top-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub piece: Option<ActivePiece>,
    pub hold: HoldState,
    /// Upcoming pieces, front = next to spawn.
    pub queue: VecDeque<PieceKind>,
    pub rng: BagRng,
    pub physics: PhysicsState,
    pub tick: Tick,
    /// Latched once `TopOut` is emitted; no piece is assigned afterwards
    /// until an external reset (a fresh state).
    pub topped_out: bool,
}

impl GameState {
    /// Create a new game with the first piece already spawned.
    pub fn new(cfg: &EngineConfig) -> Self {
        let mut state = Self {
            board: Board::new(cfg.width, cfg.height),
            piece: None,
            hold: HoldState::empty(),
            queue: VecDeque::new(),
            rng: BagRng::new(cfg.rng_seed),
            physics: PhysicsState::new(),
            tick: 0,
            topped_out: false,
        };
        state.refill_queue(cfg);
        state.spawn_piece(cfg, None);
        state
    }

    /// Top up the queue from the generator until the preview is covered.
    fn refill_queue(&mut self, cfg: &EngineConfig) {
        while self.queue.len() < cfg.preview_count as usize {
            let (rng, bag) = self.rng.next_bag();
            self.rng = rng;
            self.queue.extend(bag);
        }
    }

    /// Spawn the next piece at the fixed spawn position.
    ///
    /// `spawn_override` is the hold-swap path and leaves the queue
    /// untouched. On placement failure the state is unchanged apart from
    /// the latched top-out; no piece is assigned and the queue keeps its
    /// front entry.
    ///
    /// Resets the gravity accumulator and lock state; `soft_drop_on` and
    /// `hold.used_this_turn` are left to the caller's bookkeeping.
    pub(crate) fn spawn_piece(
        &mut self,
        cfg: &EngineConfig,
        spawn_override: Option<PieceKind>,
    ) -> SpawnOutcome {
        let kind = match spawn_override {
            Some(kind) => kind,
            None => match self.queue.front() {
                Some(&kind) => kind,
                None => {
                    // Queue exhausted below preview depth should not happen,
                    // but an empty queue is still a refill, not a panic.
                    self.refill_queue(cfg);
                    match self.queue.front() {
                        Some(&kind) => kind,
                        None => return SpawnOutcome {
                            spawned: None,
                            top_out: true,
                        },
                    }
                }
            },
        };

        let candidate = ActivePiece::spawn(kind, spawn_x(cfg.width), SPAWN_Y);
        if !self.board.can_place(&candidate) {
            debug!(kind = kind.as_str(), "spawn blocked, topping out");
            self.topped_out = true;
            return SpawnOutcome {
                spawned: None,
                top_out: true,
            };
        }

        if spawn_override.is_none() {
            self.queue.pop_front();
            self.refill_queue(cfg);
        }

        self.piece = Some(candidate);
        self.physics.gravity_accum32 = 0;
        self.physics.lock = LockState::airborne();

        SpawnOutcome {
            spawned: Some(kind),
            top_out: false,
        }
    }

    /// Check if the active piece is resting on the stack or floor.
    pub fn is_grounded(&self) -> bool {
        match self.piece {
            Some(ref piece) => self.board.is_at_bottom(piece),
            None => false,
        }
    }

    /// Anchor row where the active piece would land (hard-drop preview).
    pub fn ghost_y(&self) -> Option<i8> {
        self.piece
            .as_ref()
            .map(|piece| self.board.ghost_position(piece).y)
    }

    pub fn is_topped_out(&self) -> bool {
        self.topped_out
    }

    /// Insert `count` garbage rows from below, each fully filled except for
    /// a hole at `hole_x`. A hole column outside the board is a caller
    /// contract violation, not a gameplay no-op.
    pub fn insert_garbage(mut self, count: u8, hole_x: u8) -> Result<GameState, EngineError> {
        let width = self.board.width();
        if hole_x >= width {
            return Err(EngineError::GarbageHoleOutOfRange { hole_x, width });
        }

        let mut row: Vec<Cell> = vec![Some(GARBAGE_KIND); width as usize];
        row[hole_x as usize] = None;

        for _ in 0..count {
            self.board = self.board.shift_up_and_insert_row(&row);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VANISH_ROWS;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_new_game_spawns_hidden_piece() {
        let cfg = cfg();
        let state = GameState::new(&cfg);

        let piece = state.piece.expect("first piece spawned");
        assert!(piece.entirely_hidden());
        assert_eq!(piece.x, spawn_x(cfg.width));
        assert_eq!(piece.y, SPAWN_Y);
        assert!(!state.topped_out);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_queue_keeps_preview_depth() {
        let cfg = cfg();
        let mut state = GameState::new(&cfg);
        assert!(state.queue.len() >= cfg.preview_count as usize);

        for _ in 0..10 {
            state.piece = None;
            state.spawn_piece(&cfg, None);
            assert!(state.queue.len() >= cfg.preview_count as usize);
        }
    }

    #[test]
    fn test_spawn_override_leaves_queue_untouched() {
        let cfg = cfg();
        let mut state = GameState::new(&cfg);
        let queue_before: Vec<_> = state.queue.iter().copied().collect();

        let outcome = state.spawn_piece(&cfg, Some(PieceKind::T));
        assert_eq!(outcome.spawned, Some(PieceKind::T));
        let queue_after: Vec<_> = state.queue.iter().copied().collect();
        assert_eq!(queue_before, queue_after);
    }

    #[test]
    fn test_spawn_resets_physics() {
        let cfg = cfg();
        let mut state = GameState::new(&cfg);
        state.physics.gravity_accum32 = 1234;
        state.physics.lock = LockState {
            deadline_tick: Some(55),
            reset_count: 3,
        };
        state.physics.soft_drop_on = true;

        state.spawn_piece(&cfg, None);
        assert_eq!(state.physics.gravity_accum32, 0);
        assert_eq!(state.physics.lock, LockState::airborne());
        // Soft drop is an input-layer latch, preserved across spawns.
        assert!(state.physics.soft_drop_on);
    }

    #[test]
    fn test_blocked_spawn_tops_out_without_consuming_queue() {
        let cfg = cfg();
        let mut state = GameState::new(&cfg);
        state.piece = None;

        // Wall off the whole spawn region, vanish zone included.
        for y in -(VANISH_ROWS as i8)..0 {
            for x in 0..cfg.width as i8 {
                state.board.set(x, y, Some(PieceKind::J));
            }
        }

        let front = *state.queue.front().unwrap();
        let outcome = state.spawn_piece(&cfg, None);
        assert!(outcome.top_out);
        assert_eq!(outcome.spawned, None);
        assert!(state.piece.is_none());
        assert!(state.topped_out);
        assert_eq!(*state.queue.front().unwrap(), front);
    }

    #[test]
    fn test_ghost_matches_drop() {
        let cfg = cfg();
        let state = GameState::new(&cfg);
        let piece = state.piece.unwrap();
        assert_eq!(
            state.ghost_y(),
            Some(state.board.drop_to_bottom(&piece).y)
        );
    }

    #[test]
    fn test_insert_garbage_shifts_and_validates() {
        let cfg = cfg();
        let state = GameState::new(&cfg);

        let state = state.insert_garbage(2, 4).expect("valid hole");
        for y in [18i8, 19] {
            for x in 0..cfg.width as i8 {
                let expect_hole = x == 4;
                assert_eq!(state.board.get(x, y).unwrap().is_none(), expect_hole);
            }
        }

        let err = state.insert_garbage(1, cfg.width).unwrap_err();
        assert_eq!(
            err,
            EngineError::GarbageHoleOutOfRange {
                hole_x: cfg.width,
                width: cfg.width
            }
        );
    }
}
