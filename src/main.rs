//! Terminal Tetris runner (default binary).
//!
//! Drives the core with a fixed-timestep loop: render, wait for input until
//! the next frame is due, then advance the game clock by the real elapsed
//! time. Uses crossterm for input and the framebuffer renderer for output.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::{debug, error, info, warn};

use mini_tetris::config::AppConfig;
use mini_tetris::core::{GameEvent, GameState};
use mini_tetris::input::{handle_key_event, is_actionable, should_quit};
use mini_tetris::logging;
use mini_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use mini_tetris::types::TICK_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let _log_handle = logging::init(&config)?;
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    info!(
        "starting: seed={} gravity_ms={} clear_delay_ms={}",
        config.seed, config.timing.gravity_ms, config.timing.clear_delay_ms
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        error!("terminal restore failed: {:#}", e);
    }
    if let Err(e) = &result {
        error!("runner failed: {:#}", e);
    }
    info!("exit");
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game = GameState::with_timing(config.seed, config.timing);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut drawn: Option<(u64, (u16, u16))> = None;

    loop {
        // Render only when the picture or the terminal size changed.
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = game.snapshot();
        let key = (snap.fingerprint(), size);
        if drawn != Some(key) {
            view.render_into(&snap, Viewport::new(size.0, size.1), &mut fb);
            term.draw(&fb)?;
            drawn = Some(key);
        }

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_actionable(key.kind) => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let applied = game.apply_action(action);
                        debug!("action {} applied={}", action.as_str(), applied);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    drawn = None;
                }
                _ => {}
            }
        }

        // Clock.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.advance(ms);
        }

        for event in game.take_events() {
            log_event(event);
        }
    }
}

fn log_event(event: GameEvent) {
    match event {
        GameEvent::Started { epoch } => info!("game {} started", epoch),
        GameEvent::Reset { epoch } => info!("reset to idle (epoch {})", epoch),
        GameEvent::LinesCleared { count } => info!("cleared {} line(s)", count),
        GameEvent::GameOver => info!("game over"),
        GameEvent::Spawned { .. } | GameEvent::Locked { .. } => {}
    }
}
