/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// engine.  No game logic is performed; this module only translates the
/// engine's snapshots into terminal commands, scaling the 400×600 logical
/// field onto whatever terminal size is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::bullet::Bullet;
use crate::engine::Engine;
use crate::entities::{GameState, GameStatus, PlayerState, Rgb, Vec2, CANVAS_HEIGHT, CANVAS_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_STAGE: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Rgb { r: 0x1e, g: 0x90, b: 0xff };
const C_PLAYER_INVINCIBLE: Color = Color::Rgb { r: 0x00, g: 0xd4, b: 0xff };
const C_PROGRESS: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Terminal area available for drawing, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

impl Screen {
    pub fn current() -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }

    /// Map a logical position to a cell inside the border (rows 2..h-2,
    /// columns 1..w-1). `None` when it falls outside the play field.
    pub fn to_cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        let cols = self.width.saturating_sub(2) as f32;
        let rows = self.height.saturating_sub(4) as f32;
        if cols < 1.0 || rows < 1.0 {
            return None;
        }
        if pos.x < 0.0 || pos.x >= CANVAS_WIDTH || pos.y < 0.0 || pos.y >= CANVAS_HEIGHT {
            return None;
        }
        let col = 1 + (pos.x / CANVAS_WIDTH * cols) as u16;
        let row = 2 + (pos.y / CANVAS_HEIGHT * rows) as u16;
        Some((col, row))
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, engine: &Engine, screen: Screen) -> std::io::Result<()> {
    let state = engine.state();
    let player = engine.player_state();

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, screen)?;
    draw_hud(out, engine, &state, &player, screen)?;

    if state.status != GameStatus::Menu {
        for bullet in engine.bullets() {
            draw_bullet(out, bullet, screen)?;
        }
        draw_player(out, &player, screen)?;
    }

    draw_footer(out, engine.progress(), &state, screen)?;

    match state.status {
        GameStatus::Menu => draw_menu(out, &state, screen)?,
        GameStatus::Paused => draw_overlay(
            out,
            screen,
            "PAUSED",
            Color::Cyan,
            &[("Esc / P - Resume   Q - Quit".to_string(), Color::White)],
        )?,
        GameStatus::GameOver => draw_game_over(out, &state, screen)?,
        GameStatus::StageComplete => {
            let stage = engine.current_stage();
            draw_overlay(
                out,
                screen,
                "STAGE CLEAR",
                Color::Green,
                &[
                    (stage.name.clone(), Color::Cyan),
                    (format!("Score: {:>7}", state.score), Color::Yellow),
                    ("ENTER - Next Stage".to_string(), Color::White),
                ],
            )?
        }
        GameStatus::Victory => draw_overlay(
            out,
            screen,
            "HAPPY NEW YEAR",
            Color::Magenta,
            &[
                (format!("Final Score: {:>7}", state.score), Color::Yellow),
                (format!("Best Score:  {:>7}", state.high_score), Color::DarkGrey),
                ("ENTER - Play Again  Q - Quit".to_string(), Color::White),
            ],
        )?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let w = screen.width as usize;
    let h = screen.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    engine: &Engine,
    state: &GameState,
    player: &PlayerState,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>7}  Hi:{:>7}",
        state.score, state.high_score
    )))?;

    let stage = engine.current_stage();
    let stage_str = format!(
        "[ Dec {} · {}/{} ]",
        stage.day,
        state.current_stage + 1,
        engine.stages().len()
    );
    let sx = (screen.width / 2).saturating_sub(stage_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STAGE))?;
    out.queue(Print(&stage_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(player.lives as usize));
    let rx = screen
        .width
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, player: &PlayerState, screen: Screen) -> std::io::Result<()> {
    // Blink every 100 ms while invincible.
    if player.is_invincible && (player.invincible_timer / 100.0) as u64 % 2 == 0 {
        return Ok(());
    }

    let e = &player.entity;
    let Some((col, row)) = screen.to_cell(Vec2::new(e.center_x(), e.position.y)) else {
        return Ok(());
    };

    let color = if player.is_invincible {
        C_PLAYER_INVINCIBLE
    } else {
        C_PLAYER
    };
    out.queue(style::SetForegroundColor(color))?;

    //   ▲      ← tip
    //  /█\     ← fuselage + wings
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;
    if row + 1 < screen.height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, screen: Screen) -> std::io::Result<()> {
    let e = &bullet.entity;
    let center = Vec2::new(e.center_x(), e.position.y + e.size.height / 2.0);
    if let Some((col, row)) = screen.to_cell(center) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(rgb(bullet.color())))?;
        out.queue(Print("●"))?;
    }
    Ok(())
}

// ── Footer (last row): progress + controls ────────────────────────────────────

fn draw_footer<W: Write>(
    out: &mut W,
    progress: f64,
    state: &GameState,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.height.saturating_sub(1)))?;

    if matches!(state.status, GameStatus::Playing | GameStatus::Paused) {
        const BAR: usize = 20;
        let filled = (progress * BAR as f64).round() as usize;
        out.queue(style::SetForegroundColor(C_PROGRESS))?;
        out.queue(Print(format!(
            "[{}{}] {:>3}%  ",
            "█".repeat(filled),
            "·".repeat(BAR - filled.min(BAR)),
            (progress * 100.0).round() as u32
        )))?;
    }

    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ESC : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, state: &GameState, screen: Screen) -> std::io::Result<()> {
    let mut lines = vec![
        ("Dodge until the new year.".to_string(), Color::White),
        ("ENTER / SPACE - Start".to_string(), Color::White),
    ];
    if state.high_score > 0 {
        lines.insert(0, (format!("Best Score: {}", state.high_score), Color::Yellow));
    }
    draw_overlay(out, screen, "TILL NEW YEAR", Color::Cyan, &lines)
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, screen: Screen) -> std::io::Result<()> {
    let new_best = state.score >= state.high_score && state.score > 0;
    let best_line = if new_best {
        (format!("★ NEW BEST: {:>7} ★", state.high_score), Color::Yellow)
    } else {
        (format!("Best Score:  {:>7}", state.high_score), Color::DarkGrey)
    };
    draw_overlay(
        out,
        screen,
        "GAME  OVER",
        Color::Red,
        &[
            (format!("Final Score: {:>7}", state.score), Color::Yellow),
            best_line,
            ("ENTER - Play Again  Q - Quit".to_string(), Color::White),
        ],
    )
}

/// Boxed title centred on screen, followed by one line per entry.
fn draw_overlay<W: Write>(
    out: &mut W,
    screen: Screen,
    title: &str,
    title_color: Color,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let inner = 20usize.max(title.chars().count() + 4);
    let pad = inner - title.chars().count();
    let boxed = [
        format!("╔{}╗", "═".repeat(inner)),
        format!("║{}{}{}║", " ".repeat(pad / 2), title, " ".repeat(pad - pad / 2)),
        format!("╚{}╝", "═".repeat(inner)),
    ];

    let cx = screen.width / 2;
    let total_rows = boxed.len() + lines.len();
    let start_row = (screen.height / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(title_color))?;
    for (i, line) in boxed.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + (boxed.len() + i) as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
