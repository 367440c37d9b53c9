use anyhow::Result;
use chrono::Local;

use crate::budget::{BudgetSetupFlow, FlowState};
use crate::models::{coerce_amount, Entry};
use crate::store::{EntryStore, SqliteStore};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], store: &mut SqliteStore, user_id: &str) -> Result<()> {
    match args[1].as_str() {
        "status" | "s" => cli_status(store, user_id),
        "add" => cli_add(&args[2..], store, user_id),
        "list" | "ls" => cli_list(store, user_id),
        "limit" => cli_limit(&args[2..], store, user_id),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("wagerlog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("WagerLog — local-only gambling session and budget tracker");
    println!();
    println!("Usage: wagerlog [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  status                        Print budget status for the current month");
    println!("  add <spent> <out> <game> [n]  Record an entry for today");
    println!("  list                          List all entries");
    println!("  limit <amount>                Set the monthly budget limit");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Set WAGERLOG_USER to track more than one person (default: \"default\").");
}

fn cli_status(store: &mut SqliteStore, user_id: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let mut flow = BudgetSetupFlow::new();
    flow.load(store, store, user_id, today)?;

    match flow.state() {
        FlowState::NeedsSetup => {
            println!("No budget set. Run: wagerlog limit <amount>");
            return Ok(());
        }
        FlowState::Active => {}
        FlowState::Loading | FlowState::Editing => {
            anyhow::bail!("Budget could not be loaded");
        }
    }

    let (Some(config), Some(status)) = (flow.config(), flow.status()) else {
        anyhow::bail!("Budget could not be loaded");
    };

    println!("WagerLog — {}", today.format("%B %Y"));
    println!("{}", "─".repeat(40));
    println!("  Status:     {}", status.state.label());
    println!("  Limit:      {}", format_amount(config.monthly_limit));
    println!("  Spent:      {}", format_amount(status.month_spent));
    println!("  Used:       {:.1}%", status.percent_used);
    if status.remaining >= rust_decimal::Decimal::ZERO {
        println!("  Remaining:  {}", format_amount(status.remaining));
    } else {
        println!("  Over by:    {}", format_amount(status.overage()));
    }
    Ok(())
}

fn cli_add(args: &[String], store: &mut SqliteStore, user_id: &str) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: wagerlog add <spent> <pulled-out> <game> [notes]");
    }

    let spent = coerce_amount(&args[0]);
    let pulled = coerce_amount(&args[1]);
    let game_type = args[2].clone();
    let notes = args[3..].join(" ");
    let today = Local::now().date_naive();

    let entry = Entry::new(user_id.to_string(), spent, pulled, game_type, notes, today);
    let stored = store.create(&entry)?;
    println!(
        "Recorded {} entry: {} in, {} out",
        stored.game_type,
        format_amount(stored.money_spent_in),
        format_amount(stored.money_pulled_out),
    );
    Ok(())
}

fn cli_list(store: &mut SqliteStore, user_id: &str) -> Result<()> {
    let entries = store.list_all(user_id)?;
    if entries.is_empty() {
        println!("No entries");
        return Ok(());
    }

    println!(
        "{:<12} {:<20} {:>12} {:>12} {:>12}  Notes",
        "Date", "Game", "In", "Out", "Net"
    );
    println!("{}", "─".repeat(80));
    for entry in &entries {
        let net = entry.net();
        let sign = if entry.is_win() { "+" } else { "" };
        println!(
            "{:<12} {:<20} {:>12} {:>12} {:>12}  {}",
            entry.entry_date.to_string(),
            entry.game_type,
            format_amount(entry.money_spent_in),
            format_amount(entry.money_pulled_out),
            format!("{sign}{}", format_amount(net)),
            entry.notes,
        );
    }
    Ok(())
}

fn cli_limit(args: &[String], store: &mut SqliteStore, user_id: &str) -> Result<()> {
    let Some(input) = args.first() else {
        anyhow::bail!("Usage: wagerlog limit <amount>");
    };

    let today = Local::now().date_naive();
    let mut flow = BudgetSetupFlow::new();
    flow.load(store, store, user_id, today)?;
    flow.save(store, store, user_id, input, today)?;

    if let Some(config) = flow.config() {
        println!("Monthly limit set to {}", format_amount(config.monthly_limit));
    }
    Ok(())
}
