mod settings;

pub use settings::{LogSettings, OutputSettings, ServerSettings, Settings};

use crate::error::{ReceiptError, Result};
use directories::{BaseDirs, ProjectDirs};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.toml";
pub const SAMPLE_REQUEST_FILE: &str = "receipt.json";

/// Platform config directory for rent-receipt (`~/.config/rent-receipt` on Linux).
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "rent-receipt")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            ReceiptError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine home directory",
            ))
        })
}

fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Resolve a leading `~` against the home directory. Settings values such
/// as `output.dir = "~/receipts"` go through here.
pub fn expand_path(path: &str) -> PathBuf {
    let rest = match path {
        "~" => "",
        _ => match path.strip_prefix("~/") {
            Some(rest) => rest,
            None => return PathBuf::from(path),
        },
    };
    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Load settings.toml (defaults if the directory or file is missing)
pub fn load_settings(config_dir: &Path) -> Result<Settings> {
    let path = config_dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReceiptError::ConfigParse { path, source: e })
}

/// Create the config directory with a settings file and a sample request.
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.exists() {
        return Err(ReceiptError::AlreadyInitialized(config_dir.to_path_buf()));
    }

    fs::create_dir_all(config_dir)?;
    fs::write(config_dir.join(SETTINGS_FILE), SETTINGS_TEMPLATE)?;
    fs::write(
        config_dir.join(SAMPLE_REQUEST_FILE),
        crate::receipt::REQUEST_TEMPLATE,
    )?;
    Ok(())
}

/// Template content for settings.toml
pub const SETTINGS_TEMPLATE: &str = r#"[output]
dir = "."            # where `receipt generate` writes PDFs

[logs]
dir = "logs"         # audit records for form submissions

[server]
bind = "127.0.0.1:8501"
"#;
