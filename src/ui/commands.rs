use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::{coerce_amount, Entry};
use crate::store::{EntryStore, SqliteStore};
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut SqliteStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit WagerLog", cmd_quit, r);
    register_command!("quit", "Quit WagerLog", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Entries", cmd_entries, r);
    register_command!("entries", "Go to Entries", cmd_entries, r);
    register_command!("session", "Go to Session timer", cmd_session, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "limit",
        "Set monthly budget limit (e.g. :limit 500)",
        cmd_limit,
        r
    );
    register_command!("edit", "Edit the monthly budget limit", cmd_edit, r);
    register_command!(
        "add",
        "Add entry (e.g. :add 50 20 Poker cash game)",
        cmd_add,
        r
    );
    register_command!(
        "amend",
        "Amend selected entry amounts (e.g. :amend 60 35)",
        cmd_amend,
        r
    );
    register_command!("delete-entry", "Delete selected entry", cmd_delete_entry, r);
    register_command!("start", "Start the session timer", cmd_start, r);
    register_command!("pause", "Pause the session timer", cmd_pause, r);
    register_command!("reset", "Reset the session timer", cmd_reset, r);
    register_command!("reload", "Reload budget and entries", cmd_reload, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut SqliteStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut SqliteStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_all(store);
    Ok(())
}

fn cmd_entries(_args: &str, app: &mut App, store: &mut SqliteStore) -> anyhow::Result<()> {
    app.screen = Screen::Entries;
    app.refresh_entries(store);
    Ok(())
}

fn cmd_session(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    app.screen = Screen::Session;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, store: &mut SqliteStore) -> anyhow::Result<()> {
    app.refresh_all(store);
    app.set_status("Reloaded");
    Ok(())
}

fn cmd_limit(args: &str, app: &mut App, store: &mut SqliteStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :limit <amount>. Example: :limit 500");
        return Ok(());
    }

    let user_id = app.user_id.clone();
    match app.flow.save(store, store, &user_id, args, app.today) {
        Ok(()) => {
            let limit = app
                .flow
                .config()
                .map(|c| format_amount(c.monthly_limit))
                .unwrap_or_default();
            app.set_status(format!("Monthly limit set to {limit}"));
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn cmd_edit(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.flow.begin_edit();
    app.command_input = app
        .flow
        .config()
        .map(|c| c.monthly_limit.to_string())
        .unwrap_or_default();
    app.input_mode = InputMode::Editing;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut SqliteStore) -> anyhow::Result<()> {
    let mut parts = args.splitn(4, ' ');
    let spent = parts.next().unwrap_or("");
    let pulled = parts.next().unwrap_or("");
    let game_type = parts.next().unwrap_or("").trim();
    let notes = parts.next().unwrap_or("").trim();

    if game_type.is_empty() {
        app.set_status("Usage: :add <spent> <pulled-out> <game> [notes]. Example: :add 50 20 Poker");
        return Ok(());
    }

    // Amounts coerce (blank or garbage becomes zero); the game label is the
    // only hard requirement.
    let entry = Entry::new(
        app.user_id.clone(),
        coerce_amount(spent),
        coerce_amount(pulled),
        game_type.to_string(),
        notes.to_string(),
        app.today,
    );

    match store.create(&entry) {
        Ok(stored) => {
            app.refresh_all(store);
            app.set_status(format!(
                "Added {} entry ({} in, {} out)",
                stored.game_type,
                format_amount(stored.money_spent_in),
                format_amount(stored.money_pulled_out),
            ));
        }
        Err(e) => app.set_status(format!("Could not add entry: {e}")),
    }
    Ok(())
}

fn cmd_amend(args: &str, app: &mut App, store: &mut SqliteStore) -> anyhow::Result<()> {
    let Some(entry) = app.selected_entry().cloned() else {
        app.set_status("No entry selected");
        return Ok(());
    };
    let Some(id) = entry.id else {
        app.set_status("Selected entry has no id");
        return Ok(());
    };

    if args.is_empty() {
        app.set_status("Usage: :amend <spent> <pulled-out> [game]");
        return Ok(());
    }

    let mut parts = args.splitn(3, ' ');
    let spent = parts.next().unwrap_or("");
    let pulled = parts.next().unwrap_or("");
    let game = parts.next().unwrap_or("").trim();

    let mut edited = entry;
    edited.money_spent_in = coerce_amount(spent);
    edited.money_pulled_out = coerce_amount(pulled);
    if !game.is_empty() {
        edited.game_type = game.to_string();
    }

    match store.update(id, &app.user_id.clone(), &edited) {
        Ok(()) => {
            app.refresh_all(store);
            app.set_status("Entry updated");
        }
        Err(e) => app.set_status(format!("Could not update entry: {e}")),
    }
    Ok(())
}

fn cmd_delete_entry(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    let Some(entry) = app.selected_entry().cloned() else {
        app.set_status("No entry selected");
        return Ok(());
    };
    let Some(id) = entry.id else {
        app.set_status("Selected entry has no id");
        return Ok(());
    };

    app.confirm_message = format!("Delete {} entry from {}?", entry.game_type, entry.entry_date);
    app.pending_action = Some(PendingAction::DeleteEntry {
        id,
        game_type: entry.game_type,
    });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_start(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    app.timer.start();
    app.screen = Screen::Session;
    app.set_status("Session timer started");
    Ok(())
}

fn cmd_pause(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    app.timer.pause();
    app.set_status(format!("Session timer paused at {}", app.timer.formatted()));
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _store: &mut SqliteStore) -> anyhow::Result<()> {
    app.timer.reset();
    app.set_status("Session timer reset");
    Ok(())
}
