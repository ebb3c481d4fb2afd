pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::LoadKind;
use crate::session::SearchSession;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &ctx, &config).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = ctx.session.record_visit() {
        tracing::error!("Failed to record last visit: {}", e);
    }
    ctx.session.close().await;

    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext, config: &Config) -> Result<()> {
    let session = ctx.session.clone();
    let mut updates = session.subscribe();
    let mut tui_app = TuiApp::new(updates.borrow_and_update().clone());
    let event_handler = EventHandler::new(Duration::from_millis(100));

    spawn_search(&session, session.default_term().to_string(), LoadKind::InitialLoad);

    loop {
        if updates.has_changed().unwrap_or(false) {
            let state = updates.borrow_and_update().clone();
            tui_app.apply_state(state);
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                tui_app.clear_status();

                if tui_app.search_input.is_some() {
                    handle_search_input(&mut tui_app, &session, key);
                    continue;
                }

                match config.keybindings.get_action(&key) {
                    Action::Quit => tui_app.should_quit = true,
                    Action::MoveUp => tui_app.move_up(),
                    Action::MoveDown => tui_app.move_down(),
                    Action::NextPage => tui_app.next_page(),
                    Action::PrevPage => tui_app.prev_page(),
                    Action::NextPane => tui_app.active_pane = tui_app.active_pane.next(),
                    Action::PrevPane => tui_app.active_pane = tui_app.active_pane.prev(),
                    Action::Select | Action::ToggleMaximize => tui_app.toggle_maximize(),
                    Action::Search => tui_app.open_search(),
                    Action::ToggleFavorite => {
                        if let Some(id) = tui_app.selected_movie().map(|m| m.id) {
                            if let Some(movie) = session.toggle_favorite(id) {
                                let verb = if movie.is_favorite { "Added" } else { "Removed" };
                                tui_app.set_status(format!(
                                    "{} favorite: {}",
                                    verb,
                                    movie.display_title()
                                ));
                            }
                        }
                    }
                    Action::OpenArtwork => {
                        if let Some(url) = tui_app.selected_movie().map(|m| m.artwork_url.clone()) {
                            if url.is_empty() {
                                tui_app.set_status("No artwork for this movie".to_string());
                            } else if let Err(e) = open::that(&url) {
                                tui_app.set_status(format!("Failed to open browser: {}", e));
                            }
                        }
                    }
                    Action::Refresh => {
                        let session = session.clone();
                        tokio::spawn(async move {
                            if let Err(e) = session.refresh().await {
                                tracing::error!("Refresh failed: {}", e);
                            }
                        });
                    }
                    Action::None => {}
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_search_input(tui_app: &mut TuiApp, session: &Arc<SearchSession>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if tui_app.cancel_search(session.default_term()) {
                spawn_search(
                    session,
                    session.default_term().to_string(),
                    LoadKind::InitialLoad,
                );
            }
        }
        KeyCode::Enter => {
            if let Some(term) = tui_app.submit_search() {
                spawn_search(session, term, LoadKind::UserSearch);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = tui_app.search_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            if let Some(input) = tui_app.search_input.as_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
}

/// Run a search in the background; the result arrives through the session's watch channel.
fn spawn_search(session: &Arc<SearchSession>, term: String, kind: LoadKind) {
    let session = session.clone();
    tokio::spawn(async move {
        if let Err(e) = session.search(&term, kind).await {
            tracing::error!("Search for {:?} failed: {}", term, e);
        }
    });
}
