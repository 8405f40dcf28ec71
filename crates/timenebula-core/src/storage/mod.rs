mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, EngineSettings, PollerSettings, TagSettings};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/timenebula[-dev]/` based on TIMENEBULA_ENV.
///
/// Set TIMENEBULA_ENV=dev to use development data directory, or
/// TIMENEBULA_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("TIMENEBULA_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TIMENEBULA_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timenebula-dev")
            } else {
                base_dir.join("timenebula")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
