//! `nydus`: encode and decode protocol frames from the command line.

use std::process::ExitCode;

use clap::Parser;
use nydus::cli::{run, Cli};
use nydus::logging::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    match run(cli, stdin, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "nydus failed");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
