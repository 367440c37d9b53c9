use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::budget::FlowState;
use crate::store::{EntryStore, SqliteStore};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long the event loop waits for a key before redrawing. Keeps the
/// session clock moving without pegging a core.
const TICK_RATE: Duration = Duration::from_millis(250);

pub(crate) fn as_tui(store: &mut SqliteStore, user_id: String) -> Result<()> {
    let mut app = App::new(user_id);
    app.refresh_all(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut SqliteStore,
) -> Result<()> {
    while app.running {
        app.timer.tick();

        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if !event::poll(TICK_RATE)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Editing => handle_editing_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut SqliteStore) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Entries),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Session),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, store, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Enter => handle_enter(app),
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('e') if app.screen == Screen::Dashboard => {
            commands::handle_command("edit", app, store)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Entries => {
            commands::handle_command("delete-entry", app, store)?;
        }
        KeyCode::Char('n') if app.screen == Screen::Entries => {
            if let Some(entry) = app.selected_entry() {
                app.command_input = entry.notes.clone();
                app.input_mode = InputMode::Editing;
            } else {
                app.set_status("No entry selected");
            }
        }
        KeyCode::Char(' ') if app.screen == Screen::Session => {
            if app.timer.is_running() {
                app.timer.pause();
                app.set_status(format!("Paused at {}", app.timer.formatted()));
            } else {
                app.timer.start();
                app.set_status("Session timer started");
            }
        }
        KeyCode::Char('r') if app.screen == Screen::Session => {
            app.timer.reset();
            app.set_status("Session timer reset");
        }
        _ => {}
    }
    Ok(())
}

/// Enter on the dashboard opens the limit editor when the budget needs
/// setup or is already being edited.
fn handle_enter(app: &mut App) {
    if app.screen != Screen::Dashboard {
        return;
    }
    match app.flow.state() {
        FlowState::NeedsSetup => {
            app.command_input.clear();
            app.input_mode = InputMode::Editing;
        }
        FlowState::Active => {
            app.flow.begin_edit();
            app.command_input = app
                .flow
                .config()
                .map(|c| c.monthly_limit.to_string())
                .unwrap_or_default();
            app.input_mode = InputMode::Editing;
        }
        FlowState::Editing => {
            app.input_mode = InputMode::Editing;
        }
        FlowState::Loading => {}
    }
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut SqliteStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut SqliteStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            match app.screen {
                Screen::Entries => save_notes(app, store, &input),
                _ => save_limit(app, store, &input),
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            if app.screen == Screen::Dashboard {
                app.flow.cancel_edit();
            }
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn save_limit(app: &mut App, store: &mut SqliteStore, input: &str) {
    let user_id = app.user_id.clone();
    match app.flow.save(store, store, &user_id, input, app.today) {
        Ok(()) => {
            let limit = app
                .flow
                .config()
                .map(|c| crate::ui::util::format_amount(c.monthly_limit))
                .unwrap_or_default();
            app.set_status(format!("Monthly limit set to {limit}"));
        }
        Err(e) => app.set_status(format!("{e}")),
    }
}

fn save_notes(app: &mut App, store: &mut SqliteStore, input: &str) {
    let Some(entry) = app.selected_entry().cloned() else {
        return;
    };
    let Some(id) = entry.id else {
        return;
    };
    let mut edited = entry;
    edited.notes = input.trim().to_string();
    match store.update(id, &app.user_id.clone(), &edited) {
        Ok(()) => {
            app.refresh_entries(store);
            app.set_status("Notes updated");
        }
        Err(e) => app.set_status(format!("Could not update notes: {e}")),
    }
}

fn handle_confirm_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut SqliteStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteEntry { id, game_type } => {
                        match store.delete(id, &app.user_id.clone()) {
                            Ok(()) => {
                                app.refresh_all(store);
                                if app.entry_index > 0 && app.entry_index >= app.entries.len() {
                                    app.entry_index = app.entries.len().saturating_sub(1);
                                }
                                app.set_status(format!("Deleted {game_type} entry"));
                            }
                            Err(e) => app.set_status(format!("Could not delete entry: {e}")),
                        }
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, store: &mut SqliteStore, screen: Screen) {
    app.screen = screen;
    match screen {
        Screen::Dashboard => app.refresh_all(store),
        Screen::Entries => app.refresh_entries(store),
        Screen::Session => {}
    }
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    if app.screen == Screen::Entries {
        let page = app.visible_rows;
        scroll_down(
            &mut app.entry_index,
            &mut app.entry_scroll,
            app.entries.len(),
            page,
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Entries {
        scroll_up(&mut app.entry_index, &mut app.entry_scroll);
    }
}

fn handle_goto_top(app: &mut App) {
    if app.screen == Screen::Entries {
        scroll_to_top(&mut app.entry_index, &mut app.entry_scroll);
    }
}

fn handle_goto_bottom(app: &mut App) {
    if app.screen == Screen::Entries {
        let page = app.visible_rows;
        scroll_to_bottom(
            &mut app.entry_index,
            &mut app.entry_scroll,
            app.entries.len(),
            page,
        );
    }
}
