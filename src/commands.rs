// Command layer: the export and import flows. Each one loads the token,
// checks local inputs, performs exactly one request and reports back.
// The final result is printed by the caller.

use crate::api::{ApiClient, ImportResponse};
use crate::archive::save_archive;
use crate::config::{expand_home, Config};
use crate::error::{Result, SlotifyError};
use crate::token::{load_token, ApiToken};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Download a backup and store it in `output_dir`. Returns the saved path.
pub fn export(config: &Config, output_dir: &Path) -> Result<PathBuf> {
    let token = resolve_token(config)?;
    let client = ApiClient::new(&config.base_url, &token)?;

    let bytes = with_spinner("Exporting...", || client.export())?;

    let output_dir = expand_home(output_dir);
    save_archive(&output_dir, chrono::Local::now().naive_local(), &bytes)
}

/// Upload the archive at `zip_file`. The server may refuse imports; its
/// answer is returned as an ordinary `Api` error.
pub fn import(config: &Config, zip_file: &Path) -> Result<ImportResponse> {
    let token = resolve_token(config)?;
    let (archive, file_name) = open_archive(&expand_home(zip_file))?;

    let client = ApiClient::new(&config.base_url, &token)?;
    with_spinner("Importing...", || client.import(archive, &file_name))
}

fn resolve_token(config: &Config) -> Result<ApiToken> {
    let token = load_token(&config.token_file)?;
    println!("{}", loaded_token_line(&config.token_file));
    Ok(token)
}

fn loaded_token_line(path: &Path) -> String {
    format!("[✓] Loaded token from {}", path.display())
}

/// Open the archive up front so a missing or unreadable file is reported
/// as a configuration problem, before any request.
fn open_archive(path: &Path) -> Result<(File, String)> {
    if !path.is_file() {
        return Err(SlotifyError::ArchiveNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| SlotifyError::ArchiveUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("slotify_export.zip")
        .to_string();
    Ok((file, file_name))
}

/// Show a spinner on stderr while `f` runs. indicatif hides it when
/// stderr is not a terminal, e.g. under cron.
fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn token_status_line_names_the_file() {
        assert_eq!(
            loaded_token_line(Path::new("/home/me/.slotify_api_token")),
            "[✓] Loaded token from /home/me/.slotify_api_token"
        );
    }

    #[test]
    fn archive_is_opened_with_its_base_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("slotify_export_20250601_090507.zip");
        std::fs::write(&path, b"PK\x03\x04").expect("write archive");

        let (_file, name) = open_archive(&path).expect("archive opens");
        assert_eq!(name, "slotify_export_20250601_090507.zip");
    }

    #[test]
    fn directory_is_not_an_archive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = open_archive(dir.path()).expect_err("directory must fail");
        assert!(matches!(err, SlotifyError::ArchiveNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_archive_is_a_configuration_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("locked.zip");
        std::fs::write(&path, b"PK").expect("write archive");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000))
            .expect("chmod");
        // Root ignores file modes; nothing to observe then.
        if File::open(&path).is_ok() {
            return;
        }

        let err = open_archive(&path).expect_err("unreadable file must fail");
        assert!(matches!(err, SlotifyError::ArchiveUnreadable { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.exit_code(), 2);
    }
}
