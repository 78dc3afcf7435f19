// Bearer token loading. The token lives in a plain text file and is read
// fresh on every invocation.

use crate::error::{Result, SlotifyError};
use std::fmt;
use std::path::Path;

/// Opaque API credential. `Debug` is redacted so it can't leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Read the token file, trimming surrounding whitespace.
pub fn load_token(path: &Path) -> Result<ApiToken> {
    if !path.is_file() {
        return Err(SlotifyError::TokenFileNotFound(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| SlotifyError::io(format!("Failed to read token file {}", path.display()), e))?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(SlotifyError::EmptyToken(path.to_path_buf()));
    }
    tracing::debug!(path = %path.display(), "loaded API token");
    Ok(ApiToken(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn token_file(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".slotify_api_token");
        std::fs::write(&path, contents).expect("write token");
        (dir, path)
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let (_dir, path) = token_file("  abc123  \n");
        let token = load_token(&path).expect("token loads");
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope");
        let err = load_token(&path).expect_err("missing file must fail");
        assert!(matches!(err, SlotifyError::TokenFileNotFound(ref p) if p == &path));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn directory_is_not_a_token_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_token(dir.path()).expect_err("directory must fail");
        assert!(matches!(err, SlotifyError::TokenFileNotFound(_)));
    }

    #[test]
    fn whitespace_only_file_is_empty() {
        let (_dir, path) = token_file(" \n\t\n");
        let err = load_token(&path).expect_err("blank token must fail");
        assert!(matches!(err, SlotifyError::EmptyToken(_)));
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let (_dir, path) = token_file("s3cret");
        let token = load_token(&path).expect("token loads");
        assert!(!format!("{token:?}").contains("s3cret"));
    }
}
