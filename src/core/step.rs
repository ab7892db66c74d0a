//! Step module - the three-phase per-tick pipeline
//!
//! One call to [`GameState::step`] advances the game by exactly one tick:
//!
//! 1. **apply commands** - fold the tick's command batch, in order, over
//!    the active piece;
//! 2. **advance physics** - gravity integration, then the lock-delay
//!    machine fed with the command phase's side effects;
//! 3. **resolve transitions** - lock, clear lines, spawn (or top out).
//!
//! Events are emitted in canonical order: command events first (in command
//! order), then `LockStarted`/`LockReset`, then `Locked`, `LinesCleared`,
//! and finally `PieceSpawned` or `TopOut`. Replays depend on this order
//! never changing.

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::core::game_state::GameState;
use crate::core::physics::{apply_gravity, update_lock, LockInputs};
use crate::core::pieces::rotate;
use crate::types::{
    Command, DomainEvent, LockResetReason, LockSource, PieceKind, RotationDir, Tick,
};

/// New state plus the tick's events, in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub state: GameState,
    pub events: Vec<DomainEvent>,
}

/// Side effects the command phase hands to the later phases.
#[derive(Debug, Clone, Copy, Default)]
struct CommandSideEffects {
    hard_dropped: bool,
    reset_eligible: bool,
    reset_reason: Option<LockResetReason>,
    spawn_override: Option<PieceKind>,
    held: bool,
}

impl GameState {
    /// Advance the game by one tick.
    ///
    /// Pure: consumes the state and returns the successor plus events; no
    /// I/O, no hidden mutation. `tick` increments by exactly one regardless
    /// of outcome.
    pub fn step(mut self, cfg: &EngineConfig, commands: &[Command]) -> StepResult {
        let now = self.tick;
        trace!(tick = now, commands = commands.len(), "step");

        let mut events = Vec::new();
        let mut fx = CommandSideEffects::default();

        // Phase 1: apply commands in batch order.
        for &command in commands {
            self.apply_command(cfg, command, now, &mut events, &mut fx);
        }

        // Phase 2: gravity, then the lock-delay machine.
        let mut lock_now = false;
        if let Some(mut piece) = self.piece {
            if !fx.hard_dropped {
                let rate = if self.physics.soft_drop_on {
                    cfg.soft_drop_rate()
                } else {
                    cfg.gravity32
                };
                let result = apply_gravity(&self.board, &piece, self.physics.gravity_accum32, rate);
                piece = result.piece;
                self.physics.gravity_accum32 = result.accum32;
                self.piece = Some(piece);
            }

            let inputs = LockInputs {
                grounded: self.board.is_at_bottom(&piece),
                reset_eligible: fx.reset_eligible,
                reset_reason: fx.reset_reason,
                hard_dropped: fx.hard_dropped,
            };
            let update = update_lock(self.physics.lock, now, cfg, &inputs);
            self.physics.lock = update.lock;

            if update.started {
                events.push(DomainEvent::LockStarted { tick: now });
            }
            if update.reset {
                events.push(DomainEvent::LockReset {
                    reason: update.reset_reason.unwrap_or(LockResetReason::Move),
                    tick: now,
                });
            }
            lock_now = update.lock_now;
        }

        // Phase 3: resolve transitions.
        if lock_now && self.piece.is_some() {
            self.resolve_lock(cfg, now, fx.hard_dropped, &mut events);
        } else if fx.held {
            // Hold emptied the active slot this tick; bring in the swap
            // target (or the queue front on a first-ever hold).
            self.resolve_spawn(cfg, now, fx.spawn_override, &mut events);
        }

        self.tick = now + 1;
        StepResult {
            state: self,
            events,
        }
    }

    fn apply_command(
        &mut self,
        cfg: &EngineConfig,
        command: Command,
        now: Tick,
        events: &mut Vec<DomainEvent>,
        fx: &mut CommandSideEffects,
    ) {
        match command {
            Command::MoveLeft { .. } => self.try_shift(-1, now, events, fx),
            Command::MoveRight { .. } => self.try_shift(1, now, events, fx),
            Command::ShiftToWallLeft => self.shift_to_wall(-1, now, events, fx),
            Command::ShiftToWallRight => self.shift_to_wall(1, now, events, fx),
            Command::RotateCw => self.try_rotate(RotationDir::Cw, now, events, fx),
            Command::RotateCcw => self.try_rotate(RotationDir::Ccw, now, events, fx),
            Command::SoftDropOn => self.toggle_soft_drop(true, now, events),
            Command::SoftDropOff => self.toggle_soft_drop(false, now, events),
            Command::HardDrop => {
                if let Some(piece) = self.piece {
                    self.piece = Some(self.board.drop_to_bottom(&piece));
                    fx.hard_dropped = true;
                }
            }
            Command::Hold => self.try_hold(cfg, now, events, fx),
        }
    }

    fn try_shift(
        &mut self,
        dx: i8,
        now: Tick,
        events: &mut Vec<DomainEvent>,
        fx: &mut CommandSideEffects,
    ) {
        let Some(piece) = self.piece else {
            return;
        };
        let grounded_before = self.board.is_at_bottom(&piece);

        if let Some(moved) = self.board.try_move(&piece, dx, 0) {
            self.piece = Some(moved);
            events.push(moved_event(dx, piece.x, moved.x, now));
            if grounded_before {
                fx.reset_eligible = true;
                fx.reset_reason = Some(LockResetReason::Move);
            }
        }
    }

    fn shift_to_wall(
        &mut self,
        dir: i8,
        now: Tick,
        events: &mut Vec<DomainEvent>,
        fx: &mut CommandSideEffects,
    ) {
        let Some(piece) = self.piece else {
            return;
        };
        let grounded_before = self.board.is_at_bottom(&piece);

        let walled = self.board.move_to_wall(&piece, dir);
        if walled.x != piece.x {
            self.piece = Some(walled);
            events.push(moved_event(dir, piece.x, walled.x, now));
            if grounded_before {
                fx.reset_eligible = true;
                fx.reset_reason = Some(LockResetReason::Move);
            }
        }
    }

    fn try_rotate(
        &mut self,
        dir: RotationDir,
        now: Tick,
        events: &mut Vec<DomainEvent>,
        fx: &mut CommandSideEffects,
    ) {
        let Some(piece) = self.piece else {
            return;
        };
        let grounded_before = self.board.is_at_bottom(&piece);

        let outcome = rotate(&self.board, &piece, dir);
        if outcome.rotated {
            self.piece = Some(outcome.piece);
            events.push(DomainEvent::Rotated {
                dir,
                kick: outcome.kick,
                tick: now,
            });
            if grounded_before {
                fx.reset_eligible = true;
                fx.reset_reason = Some(LockResetReason::Rotate);
            }
        }
    }

    fn toggle_soft_drop(&mut self, on: bool, now: Tick, events: &mut Vec<DomainEvent>) {
        if self.physics.soft_drop_on != on {
            self.physics.soft_drop_on = on;
            events.push(DomainEvent::SoftDropToggled { on, tick: now });
        }
    }

    fn try_hold(
        &mut self,
        _cfg: &EngineConfig,
        now: Tick,
        events: &mut Vec<DomainEvent>,
        fx: &mut CommandSideEffects,
    ) {
        let Some(piece) = self.piece else {
            return;
        };
        if self.hold.used_this_turn {
            return;
        }

        let swapped = self.hold.piece.is_some();
        if let Some(held) = self.hold.piece {
            fx.spawn_override = Some(held);
        }
        self.hold.piece = Some(piece.kind);
        self.hold.used_this_turn = true;
        self.piece = None;
        fx.held = true;

        events.push(DomainEvent::Held { swapped, tick: now });
    }

    /// Lock the active piece, clear lines, then spawn or top out.
    fn resolve_lock(
        &mut self,
        cfg: &EngineConfig,
        now: Tick,
        hard_dropped: bool,
        events: &mut Vec<DomainEvent>,
    ) {
        let Some(piece) = self.piece.take() else {
            return;
        };

        let source = if hard_dropped {
            LockSource::HardDrop
        } else {
            LockSource::Ground
        };
        let locked_hidden = piece.entirely_hidden();

        let board = std::mem::replace(&mut self.board, placeholder_board());
        let board = board.lock_piece(&piece);
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "piece locked");
        events.push(DomainEvent::Locked {
            piece: piece.kind,
            source,
            tick: now,
        });

        let completed = board.completed_lines();
        let cleared_any = !completed.is_empty();
        self.board = board.clear_lines(&completed);
        if cleared_any {
            debug!(rows = ?completed, "lines cleared");
            events.push(DomainEvent::LinesCleared {
                rows: completed,
                tick: now,
            });
        }

        // A piece that locked entirely inside the vanish zone without
        // clearing anything is a top-out, even though it did lock.
        if locked_hidden && !cleared_any {
            debug!("lock entirely in vanish zone, topping out");
            self.topped_out = true;
            events.push(DomainEvent::TopOut { tick: now });
            return;
        }

        // A natural post-lock spawn opens a fresh hold turn.
        self.hold.used_this_turn = false;
        self.resolve_spawn(cfg, now, None, events);
    }

    fn resolve_spawn(
        &mut self,
        cfg: &EngineConfig,
        now: Tick,
        spawn_override: Option<PieceKind>,
        events: &mut Vec<DomainEvent>,
    ) {
        let outcome = self.spawn_piece(cfg, spawn_override);
        match outcome.spawned {
            Some(kind) => events.push(DomainEvent::PieceSpawned {
                piece: kind,
                tick: now,
            }),
            None => events.push(DomainEvent::TopOut { tick: now }),
        }
    }
}

fn moved_event(dir: i8, from_x: i8, to_x: i8, tick: Tick) -> DomainEvent {
    if dir < 0 {
        DomainEvent::MovedLeft { from_x, to_x, tick }
    } else {
        DomainEvent::MovedRight { from_x, to_x, tick }
    }
}

/// Cheap stand-in used while a board value is temporarily moved out of the
/// state for a consuming operation.
fn placeholder_board() -> crate::core::board::Board {
    crate::core::board::Board::new(4, 1)
}
