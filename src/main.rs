use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use bullet_dodge::clock::MonotonicClock;
use bullet_dodge::config::GameConfig;
use bullet_dodge::display::{self, Screen};
use bullet_dodge::engine::{Collaborators, Engine};
use bullet_dodge::entities::{Direction, GameStatus};
use bullet_dodge::scheduler::PendingFrame;
use bullet_dodge::scores::FileHighScoreStore;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events:
/// OS key repeat (≥ 15 Hz) refreshes it before it expires.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_tick: &HashMap<KeyCode, u64>, key: &KeyCode, tick: u64) -> bool {
    key_tick
        .get(key)
        .map(|&last| tick.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_tick: &HashMap<KeyCode, u64>, keys: &[KeyCode], tick: u64) -> bool {
    keys.iter().any(|k| is_held(key_tick, k, tick))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal owns stdout/stderr while the game runs, so log lines only go
/// to `log_file`. Without one, logging stays off unless `RUST_LOG` is set.
fn init_logging(config: &GameConfig) {
    let mut builder = env_logger::Builder::from_default_env();
    let explicit = std::env::var("RUST_LOG").is_ok();

    match config.log_file.as_ref().map(File::create) {
        Some(Ok(file)) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            if !explicit {
                builder.filter_level(LevelFilter::Info);
            }
        }
        Some(Err(_)) => {
            builder.filter_level(LevelFilter::Off);
        }
        None if !explicit => {
            builder.filter_level(LevelFilter::Off);
        }
        None => {}
    }

    builder.init();
}

// ── Key actions ───────────────────────────────────────────────────────────────

/// Enter / Space: start a run, or move on from a cleared stage.
fn confirm(engine: &mut Engine) {
    match engine.state().status {
        GameStatus::Menu | GameStatus::GameOver | GameStatus::Victory => engine.start_game(),
        GameStatus::StageComplete => engine.next_stage(),
        GameStatus::Playing | GameStatus::Paused => {}
    }
}

fn toggle_pause(engine: &mut Engine) {
    match engine.state().status {
        GameStatus::Playing => engine.pause(),
        GameStatus::Paused => engine.resume(),
        _ => {}
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive the engine until the player quits.
///
/// Input model: rather than acting on each key event individually, a
/// `key_tick` map records the tick of the last press/repeat event for every
/// key, and the held directions are pushed into the engine once per tick.
fn game_loop<W: Write>(
    out: &mut W,
    engine: &mut Engine,
    frames: &PendingFrame,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> std::io::Result<()> {
    let mut key_tick: HashMap<KeyCode, u64> = HashMap::new();
    let mut tick: u64 = 0;

    loop {
        let tick_start = Instant::now();
        tick += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_tick.insert(code, tick);
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    if modifiers.intersects(
                        KeyModifiers::ALT | KeyModifiers::CONTROL | KeyModifiers::SUPER,
                    ) {
                        continue;
                    }
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Enter | KeyCode::Char(' ') => confirm(engine),
                        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                            toggle_pause(engine)
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_tick.insert(code, tick);
                }
                KeyEventKind::Release => {
                    key_tick.remove(&code);
                }
            }
        }

        engine.set_direction(Direction::Left, any_held(&key_tick, &LEFT_KEYS, tick));
        engine.set_direction(Direction::Right, any_held(&key_tick, &RIGHT_KEYS, tick));

        if frames.take() {
            engine.frame();
        }

        display::render(out, engine, Screen::current()?)?;

        let elapsed = tick_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let config = GameConfig::load_from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    init_logging(&config);

    let frames = PendingFrame::new();
    let mut engine = Engine::new(
        config.stage_table(),
        Collaborators {
            clock: Box::new(MonotonicClock::new()),
            scheduler: Box::new(frames.clone()),
            high_scores: Box::new(FileHighScoreStore::new(config.high_score_path())),
            rng: Box::new(StdRng::from_entropy()),
        },
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them (kitty protocol);
    // others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    log::info!("terminal host started, frame time {} ms", config.frame_ms);
    let frame_time = Duration::from_millis(config.frame_ms.max(1));
    let result = game_loop(&mut out, &mut engine, &frames, &rx, frame_time);
    engine.destroy();

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
