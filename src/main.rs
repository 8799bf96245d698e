use std::process::ExitCode;

use clap::Parser;
use keyloom::cli::Arguments;

fn main() -> ExitCode {
    let args = Arguments::parse();

    match keyloom::cli::run_cli(args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
