pub mod action;
pub mod state;
pub mod view;

use crate::color_utils::parse_hex;
use crate::config::Config;
use crate::logging;
use crate::model::Sentiment;
use crate::storage::LocalStorage;
use crate::studio::Studio;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, InputMode, Panel};
use crate::tui::view::draw;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing::warn;

const APP_NAME: &str = "hueloom";

async fn publish(studio: &Studio, event_tx: &mpsc::Sender<AppEvent>) {
    let _ = event_tx
        .send(AppEvent::PaletteChanged(
            studio.palette().to_vec(),
            studio.history().clone(),
        ))
        .await;
    let _ = event_tx.send(AppEvent::Stats(studio.stats())).await;
}

async fn status(event_tx: &mpsc::Sender<AppEvent>, msg: &str) {
    let _ = event_tx.send(AppEvent::Status(msg.to_string())).await;
}

async fn rate(studio: &mut Studio, event_tx: &mpsc::Sender<AppEvent>, sentiment: Sentiment) -> bool {
    if !studio.rate(sentiment) {
        let _ = event_tx
            .send(AppEvent::Error("Nothing to rate yet".to_string()))
            .await;
        return false;
    }
    let _ = event_tx.send(AppEvent::Stats(studio.stats())).await;
    let msg = match sentiment {
        Sentiment::Liked => "Liked. Learning your taste...",
        Sentiment::Disliked => "Disliked. Noted.",
    };
    status(event_tx, msg).await;
    true
}

/// Owns the studio and applies actions until `Quit` or the channel closes.
/// Every change is persisted before the next action is read.
pub async fn run_actor(
    mut studio: Studio,
    mut action_rx: mpsc::Receiver<Action>,
    event_tx: mpsc::Sender<AppEvent>,
) -> Studio {
    let _ = event_tx
        .send(AppEvent::SessionLoaded(
            studio.palette().to_vec(),
            studio.history().clone(),
            studio.color_format(),
        ))
        .await;
    let _ = event_tx.send(AppEvent::Stats(studio.stats())).await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,

            Action::Generate(mode, creativity) => {
                studio.generate(mode, creativity);
                publish(&studio, &event_tx).await;
                status(&event_tx, &format!("New {} palette.", mode)).await;
            }

            Action::Like => {
                if !rate(&mut studio, &event_tx, Sentiment::Liked).await {
                    continue;
                }
            }
            Action::Dislike => {
                if !rate(&mut studio, &event_tx, Sentiment::Disliked).await {
                    continue;
                }
            }

            Action::ApplyPreset(preset) => {
                studio.apply_preset(preset);
                let _ = event_tx.send(AppEvent::Stats(studio.stats())).await;
                status(&event_tx, &format!("Preset '{}' applied.", preset)).await;
            }

            Action::Train => {
                status(&event_tx, "Training...").await;
                let mut steps = Vec::new();
                studio.train(|percent| steps.push(percent));
                for percent in steps {
                    let _ = event_tx.send(AppEvent::TrainingProgress(percent)).await;
                }
                let _ = event_tx.send(AppEvent::Stats(studio.stats())).await;
                status(&event_tx, "Training complete.").await;
            }

            Action::ResetAi => {
                studio.reset_ai();
                let _ = event_tx.send(AppEvent::Stats(studio.stats())).await;
                status(&event_tx, "Learning data cleared.").await;
            }

            Action::SelectHistory(index) => {
                if studio.select_history(index).is_none() {
                    let _ = event_tx
                        .send(AppEvent::Error(format!("No history entry {}", index + 1)))
                        .await;
                    continue;
                }
                publish(&studio, &event_tx).await;
                status(&event_tx, "Restored from history.").await;
            }

            Action::Import(text) => match studio.import(&text) {
                Ok(count) => {
                    publish(&studio, &event_tx).await;
                    status(&event_tx, &format!("Imported {} colors.", count)).await;
                }
                Err(e) => {
                    let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                    continue;
                }
            },

            Action::EditColor(index, color) => {
                if !studio.edit_color(index, color) {
                    continue;
                }
                publish(&studio, &event_tx).await;
                status(&event_tx, &format!("Color {} set to {}.", index + 1, color)).await;
            }

            Action::SetColorFormat(format) => {
                studio.set_color_format(format);
            }
        }
        studio.persist();
    }

    studio.persist();
    studio
}

pub async fn run() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}. Using defaults.", e);
        Config::default()
    });
    let data_dir = config
        .data_dir
        .clone()
        .or_else(LocalStorage::default_dir)
        .context("Could not determine a data directory")?;

    logging::init_file(&data_dir, APP_NAME);
    logging::install_panic_hook(&data_dir, APP_NAME);

    let studio = Studio::open(&config, LocalStorage::new(&data_dir))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(config.mode, config.creativity);
    if let Some(preset) = config.preset {
        app_state.preset = preset;
    }
    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(32);

    let actor = tokio::spawn(run_actor(studio, action_rx, event_tx));

    loop {
        terminal.draw(|f| draw(f, &app_state))?;

        while let Ok(event) = event_rx.try_recv() {
            match event {
                AppEvent::SessionLoaded(palette, history, format) => {
                    app_state.set_palette(palette);
                    app_state.history = history;
                    app_state.color_format = format;
                    app_state.loading = false;
                }
                AppEvent::PaletteChanged(palette, history) => {
                    app_state.set_palette(palette);
                    app_state.history = history;
                }
                AppEvent::Stats(stats) => app_state.stats = stats,
                AppEvent::TrainingProgress(percent) => {
                    app_state.training = (percent < 100).then_some(percent);
                }
                AppEvent::Error(msg) => {
                    app_state.message = format!("Error: {}", msg);
                }
                AppEvent::Status(msg) => {
                    app_state.message = msg;
                }
            }
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            let event = event::read()?;

            match event {
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },

                Event::Key(key) => {
                    if app_state.input_mode != InputMode::Normal {
                        match key.code {
                            KeyCode::Enter => {
                                let text = app_state.input_buffer.clone();
                                match app_state.input_mode {
                                    InputMode::Importing if !text.trim().is_empty() => {
                                        let _ = action_tx.send(Action::Import(text)).await;
                                    }
                                    InputMode::EditingColor => match parse_hex(&text) {
                                        Ok(color) => {
                                            let _ = action_tx
                                                .send(Action::EditColor(app_state.selected, color))
                                                .await;
                                        }
                                        Err(e) => app_state.message = format!("Error: {}", e),
                                    },
                                    _ => {}
                                }
                                app_state.reset_input();
                            }
                            KeyCode::Esc => app_state.reset_input(),
                            KeyCode::Char(c) => app_state.enter_char(c),
                            KeyCode::Backspace => app_state.delete_char(),
                            KeyCode::Left => app_state.move_cursor_left(),
                            KeyCode::Right => app_state.move_cursor_right(),
                            _ => {}
                        }
                    } else {
                        match key.code {
                            KeyCode::Char('q') => {
                                let _ = action_tx.send(Action::Quit).await;
                                break;
                            }
                            KeyCode::Char(' ') | KeyCode::Char('g') => {
                                let _ = action_tx
                                    .send(Action::Generate(app_state.mode, app_state.creativity))
                                    .await;
                            }
                            KeyCode::Char('l') => {
                                let _ = action_tx.send(Action::Like).await;
                            }
                            KeyCode::Char('d') => {
                                let _ = action_tx.send(Action::Dislike).await;
                            }
                            KeyCode::Char('m') => {
                                app_state.mode = app_state.mode.next();
                                app_state.message = format!("Mode: {}", app_state.mode);
                            }
                            KeyCode::Char('f') => {
                                app_state.color_format = app_state.color_format.next();
                                let _ = action_tx
                                    .send(Action::SetColorFormat(app_state.color_format))
                                    .await;
                            }
                            KeyCode::Right => app_state.next(),
                            KeyCode::Left => app_state.previous(),
                            KeyCode::Char('+') | KeyCode::Char('=') => {
                                app_state.adjust_creativity(0.1)
                            }
                            KeyCode::Char('-') => app_state.adjust_creativity(-0.1),
                            KeyCode::Char('p') => {
                                app_state.preset = app_state.preset.next();
                                let _ = action_tx.send(Action::ApplyPreset(app_state.preset)).await;
                            }
                            KeyCode::Char('t') => {
                                app_state.training = Some(0);
                                let _ = action_tx.send(Action::Train).await;
                            }
                            KeyCode::Char('R') => {
                                let _ = action_tx.send(Action::ResetAi).await;
                            }
                            KeyCode::Char('H') => app_state.toggle_panel(Panel::History),
                            KeyCode::Char('x') => app_state.toggle_panel(Panel::Export),
                            KeyCode::Char('X') => {
                                app_state.export_format = app_state.export_format.next();
                                app_state.panel = Panel::Export;
                            }
                            KeyCode::Char(c @ '1'..='5') if app_state.panel == Panel::History => {
                                let index = c as usize - '1' as usize;
                                let _ = action_tx.send(Action::SelectHistory(index)).await;
                            }
                            KeyCode::Char('i') => {
                                app_state.start_input(InputMode::Importing, String::new());
                                app_state.message =
                                    "Paste hex codes or CSS, Enter to import".to_string();
                            }
                            KeyCode::Char('e') => {
                                if let Some(color) = app_state.selected_color() {
                                    let hex = color.to_hex();
                                    let initial = hex.trim_start_matches('#').to_string();
                                    app_state.start_input(InputMode::EditingColor, initial);
                                }
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = actor.await {
        warn!("Actor task failed: {}", e);
    }
    Ok(())
}
