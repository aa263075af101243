//! `avatar-lint` - validator for avatar overlay configuration bundles

use clap::Parser;

use avatar_lint::cli::args::Cli;
use avatar_lint::cli::commands;
use avatar_lint::error::ExitCode;
use avatar_lint::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format(), cli.verbose, cli.color);
    }

    match commands::dispatch(&cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
