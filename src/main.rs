use clap::Parser;
use regsort::cli::{Cli, Output, exit_status};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose > 0, cli.quiet);

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            output.error_chain(&error);
            ExitCode::from(exit_status(&error))
        }
    }
}
