// Entrypoint for the CLI application. Kept small: parsing, dispatch and
// exit codes all live in `cli::run`.

use std::process::ExitCode;

fn main() -> ExitCode {
    slotify_client::cli::run()
}
