mod config;

pub use config::{Config, DisplayConfig, PlannerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the PawPal config directory, creating it if needed.
///
/// Resolution order:
/// - `PAWPAL_CONFIG_DIR` if set
/// - `~/.config/pawpal-dev/` when `PAWPAL_ENV=dev`
/// - `~/.config/pawpal/`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("PAWPAL_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("PAWPAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pawpal-dev")
            } else {
                base_dir.join("pawpal")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| {
        ConfigError::NoConfigDir(format!("cannot create {}: {e}", dir.display()))
    })?;
    Ok(dir)
}
