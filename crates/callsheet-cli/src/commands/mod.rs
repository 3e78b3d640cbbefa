use anyhow::{Context as _, Result};
use callsheet_config::AppConfig;
use callsheet_core::RosterStore;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

pub mod calls;
pub mod completions;
pub mod status;
pub mod tui;

pub struct Context<'a> {
    pub store: &'a RosterStore,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn load_roster(config: &AppConfig, seed_override: Option<&Path>) -> Result<RosterStore> {
    let store = callsheet_config::load_roster(config, seed_override).with_context(|| {
        match seed_override.or(config.seed_path.as_deref()) {
            Some(path) => format!("load seed roster {}", path.display()),
            None => "load sample roster".to_string(),
        }
    })?;
    Ok(store)
}
