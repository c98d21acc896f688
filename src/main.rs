//! Terminal Tetrix runner.
//!
//! One frame per fixed 16ms tick: pending key events map to intents first,
//! then the gravity tick runs, then the frame's events feed the effects and
//! the screen redraws. The engine itself never sees the terminal.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tetrix::core::{Engine, GameEvent};
use tetrix::input::{map_key, should_quit, InputHandler};
use tetrix::scores::{HighScores, SCORE_FILE};
use tetrix::term::{Effects, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetrix::types::{GamePhase, Intent, TICK_MS};

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
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1);

    let mut engine = Engine::new(seed);
    let mut scores = HighScores::load(SCORE_FILE);
    let mut effects = Effects::new(seed ^ 0x9e37_79b9);
    let mut input_handler = InputHandler::new();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&engine, &mut effects, scores.entries(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        // Held movement keys go through the DAS handler so a
                        // tap moves once and a hold repeats.
                        if engine.phase() == GamePhase::Playing {
                            if let Some(intent) = input_handler.handle_key_press(key.code) {
                                engine.apply(intent);
                            }
                        }

                        if let Some(intent) = map_key(engine.phase(), key) {
                            match intent {
                                Intent::Quit => return Ok(()),
                                Intent::MoveLeft | Intent::MoveRight | Intent::SoftDrop => {
                                    // Already applied via the DAS handler.
                                }
                                _ => {
                                    engine.apply(intent);
                                }
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR repeats internally.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if engine.phase() == GamePhase::Playing {
                for intent in input_handler.update(TICK_MS) {
                    engine.apply(intent);
                }
            } else {
                input_handler.reset();
            }

            engine.tick(TICK_MS);

            let events = engine.take_events();
            for event in &events {
                if let GameEvent::GameOver { score, .. } = event {
                    scores.record(*score);
                    let _ = scores.save(SCORE_FILE);
                }
            }
            effects.observe(&events);
            effects.update();
        }
    }
}
