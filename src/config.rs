// Invocation configuration. Built once from the parsed command line and
// handed to each command by reference; nothing here is mutated afterwards.

use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://slotify.pythonanywhere.com";
pub const DEFAULT_TOKEN_FILE: &str = ".slotify_api_token";
pub const DEFAULT_OUTPUT_DIR: &str = "backups";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub token_file: PathBuf,
}

impl Config {
    pub fn new(base_url: impl Into<String>, token_file: impl AsRef<Path>) -> Self {
        let base_url = base_url.into();
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_file: expand_home(token_file.as_ref()),
        }
    }
}

/// Expand a leading `~` to the user's home directory. Paths without one,
/// or when no home directory is known, come back unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
