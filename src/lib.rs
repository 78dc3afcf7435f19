// Library root
// ------------
// Client for Slotify's export/import API. The binary (`main.rs`) only
// calls `cli::run`; everything else is usable as a library.
//
// Module responsibilities:
// - `config`: invocation settings and their defaults.
// - `token`: loading the bearer token from disk.
// - `api`: the blocking HTTP client for /api/export and /api/import.
// - `archive`: naming and atomically writing exported ZIP files.
// - `commands`: the export and import flows.
// - `cli`: argument parsing, logging setup and exit codes.
// - `error`: the shared error type.
pub mod api;
pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod token;

pub use error::{ErrorKind, Result, SlotifyError};
