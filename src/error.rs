// Error types shared by the token loader, the HTTP client and the commands.
// Every failure is terminal for the invocation; the binary maps the error
// class to a process exit code.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, SlotifyError>;

/// Coarse classification of a failure, used for exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or empty token, missing archive, unusable token.
    Configuration,
    /// DNS, connect, timeout or body read failure.
    Network,
    /// The server answered with a non-2xx status.
    Api,
    /// Local filesystem failure.
    Io,
}

#[derive(Debug, Error)]
pub enum SlotifyError {
    #[error("Token file not found: {}", .0.display())]
    TokenFileNotFound(PathBuf),

    #[error("Token file is empty: {}", .0.display())]
    EmptyToken(PathBuf),

    #[error("Token contains characters that cannot be sent in an HTTP header")]
    InvalidToken,

    #[error("File not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("File is not readable: {}", .path.display())]
    ArchiveUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. `body` is the server's text, unmodified.
    #[error("{operation} failed: {status} - {body}")]
    Api {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl SlotifyError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TokenFileNotFound(_)
            | Self::EmptyToken(_)
            | Self::InvalidToken
            | Self::ArchiveNotFound(_)
            | Self::ArchiveUnreadable { .. } => ErrorKind::Configuration,
            Self::HttpClient(_) | Self::Network { .. } => ErrorKind::Network,
            Self::Api { .. } => ErrorKind::Api,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Process exit code for this failure. Never zero.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Io => 1,
            ErrorKind::Configuration => 2,
            ErrorKind::Network => 3,
            ErrorKind::Api => 4,
        }
    }

    /// HTTP status of an API rejection, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_server_body_verbatim() {
        let err = SlotifyError::Api {
            operation: "Import",
            status: StatusCode::FORBIDDEN,
            body: r#"{"error": "Import is currently disabled"}"#.into(),
        };
        assert_eq!(
            err.to_string(),
            r#"Import failed: 403 Forbidden - {"error": "Import is currently disabled"}"#
        );
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn exit_codes_are_distinct_and_non_zero() {
        let config = SlotifyError::EmptyToken(PathBuf::from("t"));
        let io = SlotifyError::io("write", std::io::Error::other("boom"));
        let api = SlotifyError::Api {
            operation: "Export",
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert_eq!(config.exit_code(), 2);
        assert_eq!(io.exit_code(), 1);
        assert_eq!(api.exit_code(), 4);
        assert_eq!(config.status(), None);
    }

    #[test]
    fn display_leaves_the_cause_to_the_source_chain() {
        let err = SlotifyError::io("Failed to write out.zip", std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "Failed to write out.zip");

        let chained = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chained, "Failed to write out.zip: disk full");
        assert_eq!(chained.matches("disk full").count(), 1);
    }
}
