//! Game scene rendering.
//!
//! Uses half-block pixel rendering for smooth visuals. Each grid cell
//! maps to a colored pixel; pairs of vertical pixels are packed into one
//! terminal row using the `▀` (upper half block) character with fg=top,
//! bg=bottom colors.

use super::{create_game_layout, render_info_panel_frame, render_modal, render_status_bar};
use crate::core::session::{GamePhase, GameSession};
use crate::core::types::{FoodType, PowerUpKind};
use crate::scores::ScoreEntry;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BorderType, Paragraph},
    Frame,
};

/// Per-frame presentation options owned by the shell, not the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    /// Red border flash mapped from strong vibrate decisions.
    pub border_flash: bool,
    /// Rounded play-area corners (settings flag).
    pub round_edges: bool,
}

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀ — fg fills top half, bg fills bottom half
const FULL_BLOCK: char = '\u{2588}'; // █

// ── Snake gradient colors ────────────────────────────────────────────
const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const POISONED_BG: Color = Color::Rgb(52, 10, 14);

/// Render the full game screen.
pub fn render_game_scene(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    scores: Option<&[ScoreEntry]>,
    options: SceneOptions,
) {
    // Strong vibrate decisions surface as a red border flash
    let border_color = if options.border_flash {
        Color::Red
    } else {
        Color::LightGreen
    };
    let border_type = if options.round_edges {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };
    let title = format!(" Viper {} ", crate::build_info::BUILD_COMMIT);
    let layout = create_game_layout(frame, area, &title, border_color, border_type, 24);

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session);
    render_info_panel(frame, layout.info_panel, session);

    if session.combo_hot() && session.phase == GamePhase::Running {
        render_combo_indicator(frame, layout.content, session.combo.count);
    }

    if session.is_paused() {
        render_center_prompt(frame, layout.content, "[ Paused: Space to resume ]");
    }

    if let Some(entries) = scores {
        render_score_modal(frame, area, entries, session.high_score);
    } else if session.is_game_over() {
        render_game_over_modal(frame, area, session);
    }
}

/// Interpolated RGB color for a snake body segment.
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Food color by type; Normal pulses, Rainbow cycles on the session clock.
fn food_color(food_type: FoodType, clock_ms: u64) -> Color {
    match food_type {
        FoodType::Normal => {
            let pulse = ((clock_ms % 1100) as f64 / 1100.0 * std::f64::consts::PI * 2.0).sin();
            Color::Rgb(255, (80.0 + pulse * 30.0) as u8, (40.0 + pulse * 20.0) as u8)
        }
        FoodType::Golden => Color::Rgb(255, 215, 0),
        FoodType::Rainbow => {
            const CYCLE: [Color; 6] = [
                Color::Rgb(255, 60, 60),
                Color::Rgb(255, 180, 40),
                Color::Rgb(240, 240, 60),
                Color::Rgb(60, 230, 60),
                Color::Rgb(70, 120, 255),
                Color::Rgb(190, 70, 230),
            ];
            CYCLE[((clock_ms / 180) % 6) as usize]
        }
        FoodType::Poison => Color::Rgb(160, 60, 220),
    }
}

/// Render the play field using half-block pixel rendering.
fn render_play_field(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let grid_w = session.bounds.width().max(1) as usize;
    let grid_h = session.bounds.height().max(1) as usize;
    let border_color = Color::Rgb(80, 80, 80);
    // Poison tint darkens the whole field while the window is open
    let empty_bg = if session.poison_effect_active() {
        POISONED_BG
    } else {
        EMPTY_BG
    };

    // ── Build color grid (game coordinates) ─────────────────────
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; grid_w]; grid_h];

    let fx = (session.food.x - session.bounds.x_min) as isize;
    let fy = (session.food.y - session.bounds.y_min) as isize;
    if fx >= 0 && (fx as usize) < grid_w && fy >= 0 && (fy as usize) < grid_h {
        pixels[fy as usize][fx as usize] =
            Some(food_color(session.food_type, session.clock_ms));
    }

    let snake_len = session.snake.len();
    for (i, seg) in session.snake.iter().enumerate() {
        let sx = (seg.x - session.bounds.x_min) as isize;
        let sy = (seg.y - session.bounds.y_min) as isize;
        if sx >= 0 && (sx as usize) < grid_w && sy >= 0 && (sy as usize) < grid_h {
            pixels[sy as usize][sx as usize] = Some(if i == 0 {
                HEAD_COLOR
            } else {
                body_color(i, snake_len)
            });
        }
    }

    // ── Layout dimensions ───────────────────────────────────────
    let content_rows = grid_h.div_ceil(2); // 2 game rows per terminal row
    let render_w = ((grid_w + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;

    // ── Row 0: Top border with score ────────────────────────────
    {
        let score_val = session.score.to_string();
        let label = "Score: ";
        let score_full_len = label.len() + score_val.len();
        let pad_before = inner_w.saturating_sub(score_full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + score_full_len);

        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled(
            BORDER_TL.to_string(),
            Style::default().fg(border_color),
        ));
        if pad_before > 0 {
            let s: String = std::iter::repeat(BORDER_H).take(pad_before).collect();
            spans.push(Span::styled(s, Style::default().fg(border_color)));
        }
        spans.push(Span::styled(label, Style::default().fg(border_color)));
        spans.push(Span::styled(score_val, Style::default().fg(Color::White)));
        if pad_after > 0 {
            let s: String = std::iter::repeat(BORDER_H).take(pad_after).collect();
            spans.push(Span::styled(s, Style::default().fg(border_color)));
        }
        spans.push(Span::styled(
            BORDER_TR.to_string(),
            Style::default().fg(border_color),
        ));

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(line, Rect::new(x_off, y_off, render_w, 1));
    }

    // ── Game content rows (half-block pixel rendering) ──────────
    let empty_row: Vec<Option<Color>> = vec![None; grid_w];
    for term_row in 0..content_rows {
        let top_gy = term_row * 2;
        let bot_gy = term_row * 2 + 1;
        let top_row = if top_gy < grid_h {
            &pixels[top_gy]
        } else {
            &empty_row
        };
        let bot_row = if bot_gy < grid_h {
            &pixels[bot_gy]
        } else {
            &empty_row
        };

        let mut spans: Vec<Span> = Vec::new();

        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));

        // Batch consecutive cells with the same style
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()) {
            // ▀ uses fg for the top half, bg for the bottom half
            let fg = top_c.unwrap_or(empty_bg);
            let bg = bot_c.unwrap_or(empty_bg);

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            let line = Paragraph::new(Line::from(spans));
            frame.render_widget(line, Rect::new(x_off, row_y, render_w, 1));
        }
    }

    // ── Bottom border ───────────────────────────────────────────
    {
        let bot_y = y_off + 1 + content_rows as u16;
        if bot_y < area.y + area.height {
            let mut s = String::new();
            s.push(BORDER_BL);
            for _ in 0..inner_w {
                s.push(BORDER_H);
            }
            s.push(BORDER_BR);
            let line = Paragraph::new(Line::from(Span::styled(
                s,
                Style::default().fg(border_color),
            )));
            frame.render_widget(line, Rect::new(x_off, bot_y, render_w, 1));
        }
    }
}

/// Status bar below the play field.
fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &GameSession) {
    match session.phase {
        GamePhase::Paused => render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[Space]", "Resume"), ("[q]", "Quit")],
        ),
        GamePhase::GameOver => render_status_bar(
            frame,
            area,
            "Game Over",
            Color::Red,
            &[("[r]", "New Game"), ("[q]", "Quit")],
        ),
        GamePhase::Running => render_status_bar(
            frame,
            area,
            "Slither!",
            Color::Green,
            &[
                ("[Arrows]", "Move"),
                ("[Space]", "Pause"),
                ("[h]", "Scores"),
                ("[q]", "Quit"),
            ],
        ),
    }
}

/// Info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession) {
    let inner = render_info_panel_frame(frame, area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.difficulty_level().to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}ms", session.effective_interval_ms()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
    ];

    // Combo readout turns bold once the multiplier is live
    let combo_style = if session.combo_hot() {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    lines.push(Line::from(vec![
        Span::styled("Combo: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}x", session.combo.count), combo_style),
    ]));

    if let Some(kind) = session.power_up.kind() {
        let secs = session.power_up_remaining_ms() as f64 / 1000.0;
        lines.push(Line::from(vec![
            Span::styled("Power: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} {:.1}s", kind.name(), secs),
                Style::default().fg(power_up_color(kind)),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Food:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for food_type in FoodType::ALL {
        let label = match food_type {
            FoodType::Normal => "Normal  +1",
            FoodType::Golden => "Golden  +3",
            FoodType::Rainbow => "Rainbow +5",
            FoodType::Poison => "Poison  -5",
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {FULL_BLOCK} "),
                Style::default().fg(food_color(food_type, 0)),
            ),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]));
    }

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Speed => Color::LightRed,
        PowerUpKind::Slow => Color::LightBlue,
        PowerUpKind::DoublePoints => Color::LightYellow,
    }
}

/// Centered "Nx COMBO!" pulse over the play field.
fn render_combo_indicator(frame: &mut Frame, area: Rect, combo: u32) {
    let text = format!("{}x COMBO!", combo);
    let x = area.x + area.width.saturating_sub(text.len() as u16) / 2;
    let y = area.y + area.height / 3;
    if y >= area.y + area.height {
        return;
    }

    let line = Paragraph::new(Line::from(Span::styled(
        text.clone(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, y, text.len() as u16, 1));
}

/// Centered one-line prompt over the play field.
fn render_center_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    if area.height < 3 || (area.width as usize) < prompt.len() {
        return;
    }
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;
    let y = area.y + area.height / 2;

    let line = Paragraph::new(Line::from(Span::styled(
        prompt.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, y, prompt.len() as u16, 1));
}

/// Game over modal: final score, best score, restart hint.
fn render_game_over_modal(frame: &mut Frame, area: Rect, session: &GameSession) {
    let inner = render_modal(frame, area, " Game Over ", Color::Red, 36, 9);

    let record = session.score >= session.high_score && session.score > 0;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", session.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            if record {
                "New high score!".to_string()
            } else {
                format!("Best: {}", session.high_score)
            },
            Style::default().fg(if record { Color::Green } else { Color::Cyan }),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Play again   [q] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

/// Recent scores modal.
fn render_score_modal(frame: &mut Frame, area: Rect, entries: &[ScoreEntry], high_score: u32) {
    let inner = render_modal(frame, area, " High Scores ", Color::Cyan, 40, 16);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Best: {}", high_score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "No games played yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for entry in entries.iter().take(inner.height.saturating_sub(4) as usize) {
        // "2026-08-24T12:34:56+00:00" -> "2026-08-24"
        let date = entry.date.get(..10).unwrap_or(&entry.date);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>5}  ", entry.score),
                Style::default().fg(Color::White),
            ),
            Span::styled(date.to_string(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[h] Close   [c] Clear",
        Style::default().fg(Color::DarkGray),
    )));

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}
