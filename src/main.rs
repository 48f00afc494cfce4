mod build_info;
mod constants;
mod core;
mod input;
mod persistence;
mod scores;
mod settings;
mod ui;

use crate::core::session::{GameSession, SessionConfig};
use crate::core::types::GameBounds;
use crate::scores::JsonScoreLedger;
use crate::settings::Settings;
use crate::ui::game_scene::{render_game_scene, SceneOptions};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Width reserved for the info panel, matching the game layout.
const INFO_PANEL_WIDTH: u16 = 24;

/// Poll interval for input between ticks.
const POLL_INTERVAL_MS: u64 = 15;

/// Derive the playable grid from the terminal size, mirroring the scene
/// layout: outer border + info panel horizontally, status bar + field
/// border vertically. Half-block rendering doubles the vertical cells.
fn grid_bounds(size: Rect) -> GameBounds {
    let content_w = size.width.saturating_sub(2 + INFO_PANEL_WIDTH).max(10);
    let content_h = size.height.saturating_sub(2 + 2).max(6);

    let grid_w = (content_w.saturating_sub(2)).max(8) as i32;
    let grid_h = ((content_h.saturating_sub(2)) as i32 * 2).max(8);
    GameBounds::from_grid(grid_w, grid_h)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("viper {}", build_info::version_string());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Viper - Terminal Snake Arcade\n");
                println!("Usage: viper [--version | --help]\n");
                println!("Controls:");
                println!("  Arrows/WASD  Steer");
                println!("  Space        Pause/resume");
                println!("  h            High scores");
                println!("  v            Toggle vibration setting");
                println!("  r            New game");
                println!("  q / Esc      Quit");
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'viper --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let mut settings = Settings::load();
    let mut ledger = JsonScoreLedger::load();
    let mut rng = rand::thread_rng();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let make_config = |settings: &Settings| SessionConfig {
        vibration_enabled: settings.vibration,
        ..SessionConfig::default()
    };

    let mut bounds = grid_bounds(terminal.size()?);
    let mut session = GameSession::new(bounds, make_config(&settings), &ledger);

    let mut scores_open = false;
    let mut resume_on_close = false;
    let mut last_tick = Instant::now();
    let mut flash_until: Option<Instant> = None;

    loop {
        let flashing = flash_until.is_some_and(|t| Instant::now() < t);
        if !flashing {
            flash_until = None;
        }

        let options = SceneOptions {
            border_flash: flashing,
            round_edges: settings.round_edges,
        };
        terminal.draw(|f| {
            let area = f.size();
            let entries = scores_open.then(|| ledger.scores());
            render_game_scene(f, area, &session, entries, options);
        })?;

        // Handle input
        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }

                    if scores_open {
                        match key.code {
                            KeyCode::Char('h') | KeyCode::Esc | KeyCode::Enter => {
                                scores_open = false;
                                if resume_on_close {
                                    session.resume();
                                    resume_on_close = false;
                                    last_tick = Instant::now();
                                }
                            }
                            KeyCode::Char('c') => {
                                ledger.clear();
                                session.high_score = 0;
                            }
                            KeyCode::Char('q') => break,
                            _ => {}
                        }
                        continue;
                    }

                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') => {
                            session.toggle_pause();
                            last_tick = Instant::now();
                        }
                        KeyCode::Char('r') => {
                            session = GameSession::new(bounds, make_config(&settings), &ledger);
                            last_tick = Instant::now();
                        }
                        KeyCode::Char('h') => {
                            // Viewing scores pauses a running game
                            scores_open = true;
                            if !session.is_paused() && !session.is_game_over() {
                                session.toggle_pause();
                                resume_on_close = true;
                            }
                        }
                        KeyCode::Char('v') => {
                            settings.toggle_vibration();
                            session.config.vibration_enabled = settings.vibration;
                        }
                        code => {
                            if let Some(dir) = input::direction_for_key(code) {
                                session.request_direction(dir);
                            }
                        }
                    }
                }
                Event::Resize(_, _) => {
                    bounds = grid_bounds(terminal.size()?);
                    session.set_bounds(bounds);
                }
                _ => {}
            }
        }

        // Advance the simulation by real elapsed time
        let dt_ms = last_tick.elapsed().as_millis() as u64;
        last_tick = Instant::now();
        let signals = session.tick(dt_ms, &mut rng, &mut ledger);

        // Poison and game-over vibrations flash the border for their
        // pattern duration
        if let Some(ms) = signals.vibrate_ms {
            if ms >= 100 {
                flash_until = Some(Instant::now() + Duration::from_millis(ms as u64));
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    Ok(())
}
