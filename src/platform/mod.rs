// Shelfmark platform paths
// Config and data directories for Linux, macOS and Windows, selected with `cfg(target_os)`.

use std::env;
use std::path::PathBuf;

/// Overrides the data directory (and therefore the database location).
pub const DATA_DIR_ENV: &str = "SHELFMARK_DATA_DIR";

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "shelfmark.db";

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/shelfmark` or `~/.config/shelfmark`
/// - **macOS**: `~/Library/Application Support/Shelfmark`
/// - **Windows**: `%APPDATA%/Shelfmark`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("Shelfmark")
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join("Shelfmark")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("shelfmark"),
            Err(_) => home_dir().join(".config").join("shelfmark"),
        }
    }
}

/// Returns the data directory. `SHELFMARK_DATA_DIR` wins on every platform.
///
/// - **Linux**: `$XDG_DATA_HOME/shelfmark` or `~/.local/share/shelfmark`
/// - **macOS**: `~/Library/Application Support/Shelfmark`
/// - **Windows**: `%APPDATA%/Shelfmark`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("Shelfmark")
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join("Shelfmark")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("shelfmark"),
            Err(_) => home_dir().join(".local").join("share").join("shelfmark"),
        }
    }
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

/// Default location of the SQLite database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE)
}
