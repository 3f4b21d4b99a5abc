mod config;
pub mod snapshot;

pub use config::{CapacityConfig, Config, ThresholdsConfig};
pub use snapshot::{ProfileRecord, Snapshot};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `JAR_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/the-jar[-dev]/`, with `JAR_ENV=dev` selecting the development
/// directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("JAR_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("JAR_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("the-jar-dev")
            } else {
                base_dir.join("the-jar")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
