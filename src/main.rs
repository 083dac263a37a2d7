//! Terminal blockfall runner.
//!
//! Drives the core state machine at a fixed step interval, polling crossterm
//! events in between. Holding the fast-fall key shortens the step interval
//! for as long as key repeats keep refreshing the grace window.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::Game;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::{Direction, GameAction, FAST_FALL_GRACE_MS, FAST_STEP_MS, STEP_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut game = Game::new(seed);

    let view = GameView;
    let mut last_step = Instant::now();
    let mut fast_fall_ms: i32 = 0;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, Viewport::new(w, h));
        term.draw(&fb)?;

        let step_ms = if fast_fall_ms > 0 { FAST_STEP_MS } else { STEP_MS };
        let step_duration = Duration::from_millis(step_ms as u64);
        let timeout = step_duration
            .checked_sub(last_step.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(GameAction::MoveLeft) => {
                            game.request_move(Direction::Left);
                        }
                        Some(GameAction::MoveRight) => {
                            game.request_move(Direction::Right);
                        }
                        Some(GameAction::Rotate) => {
                            game.request_rotate();
                        }
                        Some(GameAction::FastFall) => {
                            fast_fall_ms = FAST_FALL_GRACE_MS as i32;
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_step.elapsed() >= step_duration {
            last_step = Instant::now();
            game.tick();
            if fast_fall_ms > 0 {
                fast_fall_ms -= step_ms as i32;
            }
        }
    }
}
