mod budget;
mod models;
mod run;
mod store;
mod timer;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    let mut store = store::SqliteStore::open(&db_path)?;
    let user_id = std::env::var("WAGERLOG_USER").unwrap_or_else(|_| "default".into());

    match args.len() {
        1 => run::as_tui(&mut store, user_id),
        2.. => run::as_cli(&args, &mut store, &user_id),
        _ => {
            eprintln!("Usage: wagerlog [command]");
            Ok(())
        }
    }
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "wagerlog", "WagerLog")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("wagerlog.db"))
}
