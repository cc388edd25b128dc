//! Game state module - the idle/playing/gameover state machine
//!
//! This module ties together the board, the piece catalog, the collision
//! checker and the RNG. It owns all mutable game data; callers drive it with
//! [`GameState::apply_action`] for input and [`GameState::advance`] for time.
//!
//! Line clears are two-phase: the tick that locks a piece records the full
//! rows as pending and hands out a [`ClearToken`]; the rows are removed later
//! by [`GameState::finish_clear`]. Every start and restart opens a new epoch,
//! so a token from an earlier game can never touch the current board.

use arrayvec::ArrayVec;
use log::debug;

use crate::board::{Board, RowList};
use crate::collision::can_place;
use crate::pieces::{pick_random, Piece};
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::{
    GameAction, GameStatus, PieceKind, Position, BOARD_WIDTH, GRAVITY_MS, LINE_CLEAR_DELAY_MS,
};

/// Falling piece: a catalog piece plus its anchor on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub position: Position,
}

impl ActivePiece {
    pub fn new(piece: Piece, position: Position) -> Self {
        Self { piece, position }
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    /// Absolute board coordinates of the 4 blocks
    pub fn blocks(&self) -> impl Iterator<Item = Position> + '_ {
        self.piece.blocks_at(self.position)
    }

    /// Does this piece cover board cell (x, y)?
    pub fn covers(&self, x: i8, y: i8) -> bool {
        self.blocks().any(|p| p.x == x && p.y == y)
    }
}

/// Identifies one pending line clear within one game epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearToken {
    epoch: u32,
    serial: u32,
}

impl ClearToken {
    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}

/// Rows waiting for the clear delay to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingClear {
    pub rows: RowList,
    pub token: ClearToken,
}

/// Timer periods used by [`GameState::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub gravity_ms: u32,
    pub clear_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_MS,
            clear_delay_ms: LINE_CLEAR_DELAY_MS,
        }
    }
}

/// Result of a single gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, no active piece, or a clear is pending
    Skipped,
    /// The piece moved down one row
    Fell,
    /// The piece locked without completing a row; the next spawn was attempted
    Locked,
    /// The piece locked and completed rows; call `finish_clear` with the token
    Clearing(ClearToken),
}

/// Lifecycle events, drained by the runner for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started { epoch: u32 },
    Spawned { kind: PieceKind, x: i8 },
    Locked { kind: PieceKind, full_rows: u8 },
    LinesCleared { count: u8 },
    GameOver,
    Reset { epoch: u32 },
}

const EVENT_CAPACITY: usize = 8;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    status: GameStatus,
    board: Board,
    active: Option<ActivePiece>,
    pending_clear: Option<PendingClear>,
    /// Increments on every start and restart.
    epoch: u32,
    clear_serial: u32,
    rng: SimpleRng,
    timing: Timing,
    gravity_timer_ms: u32,
    clear_timer_ms: u32,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create an idle game with the given RNG seed and default timing
    pub fn new(seed: u32) -> Self {
        Self::with_timing(seed, Timing::default())
    }

    pub fn with_timing(seed: u32, timing: Timing) -> Self {
        Self {
            status: GameStatus::Idle,
            board: Board::new(),
            active: None,
            pending_clear: None,
            epoch: 0,
            clear_serial: 0,
            rng: SimpleRng::new(seed),
            timing,
            gravity_timer_ms: 0,
            clear_timer_ms: 0,
            events: ArrayVec::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn pending_clear(&self) -> Option<&PendingClear> {
        self.pending_clear.as_ref()
    }

    /// Rows currently shown as clearing (empty when no clear is pending)
    pub fn clearing_rows(&self) -> &[usize] {
        self.pending_clear
            .as_ref()
            .map(|p| p.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn set_active(&mut self, active: Option<ActivePiece>) {
        self.active = active;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            status: self.status,
            board: self.board,
            active: self.active,
            clearing: self
                .pending_clear
                .as_ref()
                .map(|p| p.rows.clone())
                .unwrap_or_default(),
            epoch: self.epoch,
        }
    }

    /// Take all events emitted since the last call
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        debug!("game event: {:?}", event);
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Reset board, piece, pending clear and timers, and open a new epoch
    fn reset(&mut self) {
        self.board = Board::new();
        self.active = None;
        self.pending_clear = None;
        self.gravity_timer_ms = 0;
        self.clear_timer_ms = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// idle -> playing. Returns false from any other status.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Idle {
            return false;
        }
        self.reset();
        self.status = GameStatus::Playing;
        self.emit(GameEvent::Started { epoch: self.epoch });
        self.spawn_piece();
        true
    }

    /// playing/gameover -> idle. Returns false when already idle.
    pub fn restart(&mut self) -> bool {
        if self.status == GameStatus::Idle {
            return false;
        }
        self.reset();
        self.status = GameStatus::Idle;
        self.emit(GameEvent::Reset { epoch: self.epoch });
        true
    }

    /// Spawn a random piece on row 0 at a random column where it fits.
    ///
    /// A blocked spawn ends the game. Returns whether a piece was placed.
    pub fn spawn_piece(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        let piece = pick_random(&mut self.rng);
        let columns = (BOARD_WIDTH as i8 - piece.width() + 1) as u32;
        let x = self.rng.next_range(columns) as i8;
        let position = Position::new(x, 0);

        if !can_place(&self.board, &piece, position) {
            self.status = GameStatus::GameOver;
            self.active = None;
            self.gravity_timer_ms = 0;
            self.emit(GameEvent::GameOver);
            return false;
        }

        self.active = Some(ActivePiece::new(piece, position));
        self.emit(GameEvent::Spawned {
            kind: piece.kind,
            x,
        });
        true
    }

    /// Shift the active piece by (dx, dy) if the result is legal.
    ///
    /// Illegal moves, and moves with no active piece, are silent no-ops.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let Some(candidate) = active.position.checked_offset(dx, dy) else {
            return false;
        };
        if !can_place(&self.board, &active.piece, candidate) {
            return false;
        }

        self.active = Some(ActivePiece {
            position: candidate,
            ..active
        });
        true
    }

    /// One gravity step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing || self.pending_clear.is_some() {
            return TickOutcome::Skipped;
        }
        let Some(active) = self.active else {
            return TickOutcome::Skipped;
        };

        if self.try_move(0, 1) {
            return TickOutcome::Fell;
        }

        self.board = self.board.lock(&active);
        self.active = None;

        let rows = self.board.full_rows();
        self.emit(GameEvent::Locked {
            kind: active.kind(),
            full_rows: rows.len() as u8,
        });

        if rows.is_empty() {
            self.spawn_piece();
            return TickOutcome::Locked;
        }

        self.clear_serial = self.clear_serial.wrapping_add(1);
        let token = ClearToken {
            epoch: self.epoch,
            serial: self.clear_serial,
        };
        self.pending_clear = Some(PendingClear { rows, token });
        self.clear_timer_ms = 0;
        TickOutcome::Clearing(token)
    }

    /// The delayed half of a line clear.
    ///
    /// Applies only if `token` names the clear pending in the current epoch
    /// while still playing; a stale token (e.g. from before a restart) is
    /// ignored and `false` is returned.
    pub fn finish_clear(&mut self, token: ClearToken) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        match &self.pending_clear {
            Some(pending) if pending.token == token && token.epoch == self.epoch => {}
            _ => return false,
        }

        let count = self.clearing_rows().len() as u8;
        self.board = self.board.clear_rows();
        self.pending_clear = None;
        self.clear_timer_ms = 0;
        self.emit(GameEvent::LinesCleared { count });
        self.spawn_piece();
        true
    }

    /// Apply an input or control intent
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::Restart => self.restart(),
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown => {
                let (dx, dy) = action.delta().unwrap_or((0, 0));
                self.try_move(dx, dy)
            }
        }
    }

    /// Advance the built-in timers by `elapsed_ms`.
    ///
    /// While playing, gravity fires [`tick`](Self::tick) once per full period;
    /// while a clear is pending, gravity is paused and the clear delay counts
    /// down to [`finish_clear`](Self::finish_clear). Outside playing both
    /// timers are held at zero. Returns whether anything visible changed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Playing {
            self.gravity_timer_ms = 0;
            self.clear_timer_ms = 0;
            return false;
        }

        if let Some(token) = self.pending_clear.as_ref().map(|p| p.token) {
            self.clear_timer_ms = self.clear_timer_ms.saturating_add(elapsed_ms);
            if self.clear_timer_ms >= self.timing.clear_delay_ms {
                return self.finish_clear(token);
            }
            return false;
        }

        let period = self.timing.gravity_ms.max(1);
        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);

        let mut changed = false;
        while self.gravity_timer_ms >= period
            && self.status == GameStatus::Playing
            && self.pending_clear.is_none()
        {
            self.gravity_timer_ms -= period;
            changed |= self.tick() != TickOutcome::Skipped;
        }
        changed
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
