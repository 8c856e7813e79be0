//! Terminal gameplay entrypoint.
//!
//! Runs the engine on a fixed tick, feeding it key events and DAS/ARR
//! repeats, and draws each frame through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::core::{GameEngine, GameSnapshot};
use gridfall::input::{map_key_event, should_quit, InputHandler};
use gridfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gridfall::types::{GameAction, GameConfig, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let config = GameConfig::default().with_preview_depth(3);
    let mut engine = GameEngine::new(config, seed_from_clock());
    let mut input = InputHandler::new();

    let view = GameView::default();
    let mut snapshot = GameSnapshot::empty(config);
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let flash = engine.take_flash();
        engine.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, flash, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = input.handle_key_press(key.code) {
                            engine.apply_action(action);
                        } else if let Some(action) = map_key_event(key) {
                            // Non-repeating actions bypass the DAS handler.
                            if !matches!(
                                action,
                                GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
                            ) {
                                engine.apply_action(action);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input.update(TICK_MS) {
                engine.apply_action(action);
            }
            engine.tick(TICK_MS);
        }
    }
}

fn seed_from_clock() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
