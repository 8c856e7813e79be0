//! DAS/ARR input handler for terminal environments.
//!
//! Terminals frequently deliver only key-press events, so held keys are
//! inferred and auto-released after a timeout. Each repeatable input
//! (horizontal movement, soft drop) runs its own delayed-auto-shift /
//! auto-repeat-rate timers.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use gridfall_types::{
    GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

// A short timeout prevents a single tap from turning into a sustained "held"
// state in terminals without key-release events.
const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    fn action(self) -> GameAction {
        match self {
            Horizontal::Left => GameAction::MoveLeft,
            Horizontal::Right => GameAction::MoveRight,
        }
    }
}

/// DAS/ARR timers for one repeatable input.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatAxis {
    das_timer: u32,
    arr_accumulator: u32,
}

impl RepeatAxis {
    fn press(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats fired.
    fn update(&mut self, elapsed_ms: u32, das_delay: u32, arr_rate: u32) -> u32 {
        let prev = self.das_timer;
        self.das_timer += elapsed_ms;
        if self.das_timer < das_delay {
            return 0;
        }

        // Only the time past the DAS threshold counts toward repeats.
        let excess = if prev < das_delay {
            self.das_timer - das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator += excess;

        let repeats = self.arr_accumulator / arr_rate.max(1);
        self.arr_accumulator %= arr_rate.max(1);
        repeats
    }
}

/// Tracks held keys and produces repeat actions per tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<Horizontal>,
    horizontal_axis: RepeatAxis,
    down_held: bool,
    down_axis: RepeatAxis,
    last_key_time: std::time::Instant,
    das_delay: u32,
    arr_rate: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: None,
            horizontal_axis: RepeatAxis::default(),
            down_held: false,
            down_axis: RepeatAxis::default(),
            last_key_time: std::time::Instant::now(),
            das_delay,
            arr_rate,
        }
    }

    /// Register a key press. Returns the immediate action for newly pressed
    /// keys; repeats come from [`InputHandler::update`].
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let direction = match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Horizontal::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Horizontal::Right),
            _ => None,
        };

        if let Some(direction) = direction {
            self.last_key_time = std::time::Instant::now();
            if self.horizontal == Some(direction) {
                return None;
            }
            self.horizontal = Some(direction);
            self.horizontal_axis.press();
            return Some(direction.action());
        }

        if matches!(code, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')) {
            self.last_key_time = std::time::Instant::now();
            if self.down_held {
                return None;
            }
            self.down_held = true;
            self.down_axis.press();
            return Some(GameAction::SoftDrop);
        }

        None
    }

    /// Register a key release (terminals that support it).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                if self.horizontal == Some(Horizontal::Left) {
                    self.horizontal = None;
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                if self.horizontal == Some(Horizontal::Right) {
                    self.horizontal = None;
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.down_held = false;
            }
            _ => {}
        }
    }

    /// Advance timers and collect repeat actions for this tick.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::new();

        // Auto-release when the terminal never sends release events.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > KEY_RELEASE_TIMEOUT_MS {
            self.horizontal = None;
            self.down_held = false;
        }

        if let Some(direction) = self.horizontal {
            let repeats = self
                .horizontal_axis
                .update(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..repeats {
                let _ = actions.try_push(direction.action());
            }
        } else {
            self.horizontal_axis.press();
        }

        if self.down_held {
            let repeats = self
                .down_axis
                .update(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
            for _ in 0..repeats {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        } else {
            self.down_axis.press();
        }

        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = None;
        self.down_held = false;
        self.horizontal_axis.press();
        self.down_axis.press();
        self.last_key_time = std::time::Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
