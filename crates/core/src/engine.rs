//! Game engine: the turn controller.
//!
//! Owns the board, the active falling piece, the lookahead queue, the hold
//! slot, and the score state, and drives the
//! falling -> locking -> clearing -> respawning cycle. All operations are
//! synchronous and run to completion; the engine assumes a single writer
//! (callers embedding it in a concurrent host must synchronize externally).

use arrayvec::ArrayVec;

use gridfall_types::{GameAction, GameConfig, PieceKind, BASE_DROP_MS, MAX_PREVIEW_DEPTH};

use crate::bag::SevenBag;
use crate::board::Board;
use crate::matrix::Shape;
use crate::scoring;
use crate::snapshot::{ActiveSnapshot, ClearFlash, GameSnapshot};

/// The active falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Top-left corner of the shape's bounding box in board coordinates.
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A fresh piece at its spawn position: horizontally centered (bounding
    /// box included), top row.
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let shape = Shape::of(kind);
        Self {
            kind,
            shape,
            x: (board_width / 2) as i8 - (shape.width() / 2) as i8,
            y: 0,
        }
    }
}

/// Complete game state and the operations that advance it.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    bag: SevenBag,
    active: ActivePiece,
    next: ArrayVec<PieceKind, MAX_PREVIEW_DEPTH>,
    hold: Option<PieceKind>,
    hold_used: bool,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    flash: Option<ClearFlash>,
}

impl GameEngine {
    /// Create a new game with the given configuration and RNG seed. The
    /// first piece is spawned immediately.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let mut bag = SevenBag::new(seed);
        let first = bag.next();
        let mut engine = Self {
            config,
            board: Board::new(config.width, config.height),
            bag,
            active: ActivePiece::spawn(first, config.width),
            next: ArrayVec::new(),
            hold: None,
            hold_used: false,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
            drop_counter_ms: 0,
            flash: None,
        };
        engine.refill_queue();
        engine
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Seed reproducing the generator's remaining sequence.
    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    /// Take and clear the one-shot line-clear event.
    pub fn take_flash(&mut self) -> Option<ClearFlash> {
        self.flash.take()
    }

    /// Overwrite the bottom rows of the board with preset garbage
    /// (top-to-bottom order). Intended for practice setups.
    pub fn load_garbage_rows(&mut self, rows: &[&[u8]]) {
        self.board.preload_rows(rows);
    }

    /// Advance timers by `elapsed_ms`; applies one gravity step once the
    /// accumulated time exceeds the current drop interval. Returns whether a
    /// step happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.drop_counter_ms += elapsed_ms;
        if self.drop_counter_ms > self.drop_interval_ms {
            self.gravity_step();
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    /// One gravity step forced immediately.
    pub fn soft_drop(&mut self) {
        self.gravity_step();
    }

    /// Drop the piece to the lowest collision-free position and lock it.
    pub fn hard_drop(&mut self) {
        while !self.board.collides(&self.active.shape, self.active.x, self.active.y + 1) {
            self.active.y += 1;
        }
        self.lock_active();
        self.drop_counter_ms = 0;
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Stash the active piece, at most once per piece lifetime.
    ///
    /// With an empty hold slot this discards the active piece into the slot
    /// and spawns the next one; otherwise the slot and the active piece swap
    /// kinds and the swapped-in piece restarts from its spawn position. A
    /// swapped-in piece that collides at spawn triggers the same stack-out
    /// reset as a normal spawn.
    pub fn hold(&mut self) -> bool {
        if self.hold_used {
            return false;
        }

        match self.hold {
            Some(held) => {
                self.hold = Some(self.active.kind);
                self.active = ActivePiece::spawn(held, self.config.width);
                if self.board.collides(&self.active.shape, self.active.x, self.active.y) {
                    self.stack_out();
                }
            }
            None => {
                self.hold = Some(self.active.kind);
                self.spawn_next();
            }
        }

        self.hold_used = true;
        true
    }

    /// Full restart: empty board, initial score state, cleared hold slot,
    /// and a fresh bag cycle.
    pub fn restart(&mut self) {
        self.board.clear_all();
        self.reset_progress();
        self.hold = None;
        self.hold_used = false;
        self.flash = None;
        self.drop_counter_ms = 0;

        self.bag.reset();
        self.next.clear();
        let first = self.bag.next();
        self.active = ActivePiece::spawn(first, self.config.width);
        self.refill_queue();
    }

    /// Apply a player action. Returns whether it changed any state.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Fill a caller-owned snapshot (allocation-reusing hot path).
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.config.width;
        out.height = self.config.height;
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());

        out.active = ActiveSnapshot {
            kind: self.active.kind,
            shape: self.active.shape,
            x: self.active.x,
            y: self.active.y,
        };
        out.next.clear();
        out.next.extend(self.next.iter().copied());
        out.hold = self.hold;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    /// Convenience snapshot that allocates.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::empty(self.config);
        self.snapshot_into(&mut snap);
        snap
    }

    /// Translate the active piece horizontally, reverting on collision.
    fn try_shift(&mut self, dx: i8) -> bool {
        self.active.x += dx;
        if self.board.collides(&self.active.shape, self.active.x, self.active.y) {
            self.active.x -= dx;
            return false;
        }
        true
    }

    /// Rotate the active piece, resolving collisions with an alternating
    /// expanding horizontal kick search (+1, -2, +3, -4, ...).
    ///
    /// On failure the shape and x position are fully restored, so the
    /// attempt is all-or-nothing.
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let start_x = self.active.x;
        let limit = self.active.shape.width() as i8;

        self.active.shape.rotate(clockwise);
        let mut offset: i8 = 1;
        while self.board.collides(&self.active.shape, self.active.x, self.active.y) {
            self.active.x += offset;
            offset = -(offset + offset.signum());
            if offset.abs() > limit {
                self.active.shape.rotate(!clockwise);
                self.active.x = start_x;
                return false;
            }
        }
        true
    }

    /// One gravity step: move down, or lock if the step collides.
    fn gravity_step(&mut self) {
        self.active.y += 1;
        if self.board.collides(&self.active.shape, self.active.x, self.active.y) {
            self.active.y -= 1;
            self.lock_active();
        }
        self.drop_counter_ms = 0;
    }

    /// Lock the active piece: classify T-spin, merge, sweep, score, respawn.
    fn lock_active(&mut self) {
        let t_spin = self.is_t_spin_lock();
        self.board.merge(&self.active.shape, self.active.x, self.active.y);

        let rows = self.board.sweep_full_rows();
        if rows > 0 {
            self.lines += rows;
            self.score += scoring::points_for_clear(rows, t_spin, self.level);
            self.level = scoring::level_for_lines(self.lines);
            self.drop_interval_ms = scoring::drop_interval_ms(self.level);
            self.flash = Some(ClearFlash { rows, t_spin });
        }

        self.spawn_next();
    }

    /// T-spin predicate, evaluated before the merge: a T lock with at least
    /// three of the four corners of its 3x3 footprint blocked.
    fn is_t_spin_lock(&self) -> bool {
        if self.active.kind != PieceKind::T {
            return false;
        }
        let (x, y) = (self.active.x, self.active.y);
        let corners = [(x, y), (x + 2, y), (x, y + 2), (x + 2, y + 2)];
        let blocked = corners
            .iter()
            .filter(|&&(cx, cy)| self.corner_blocked(cx, cy))
            .count();
        blocked >= 3
    }

    /// A corner is blocked when below the board, horizontally outside, or
    /// occupied. Corners above row 0 are open.
    fn corner_blocked(&self, cx: i8, cy: i8) -> bool {
        if cy >= self.board.height() as i8 || cx < 0 || cx >= self.board.width() as i8 {
            return true;
        }
        if cy < 0 {
            return false;
        }
        self.board.get(cx, cy).is_some_and(|cell| cell != 0)
    }

    /// Spawn the next piece from the queue, refill the lookahead, and reset
    /// the per-piece hold flag. A spawn collision is a stack-out.
    fn spawn_next(&mut self) {
        let kind = self.next.remove(0);
        self.active = ActivePiece::spawn(kind, self.config.width);
        self.refill_queue();
        self.hold_used = false;

        if self.board.collides(&self.active.shape, self.active.x, self.active.y) {
            self.stack_out();
        }
    }

    fn refill_queue(&mut self) {
        while self.next.len() < self.config.preview_depth {
            self.next.push(self.bag.next());
        }
    }

    /// Stack-out: soft restart in place. The board and score state reset;
    /// the freshly spawned piece, the bag state, and the hold slot survive.
    fn stack_out(&mut self) {
        self.board.clear_all();
        self.reset_progress();
    }

    fn reset_progress(&mut self) {
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = BASE_DROP_MS;
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}
