use clap::Parser;
use crossterm::style::Stylize;
use std::io;
use std::process::ExitCode;

use passport_cli::app;
use passport_cli::cli::Cli;
use passport_cli::utils::logging::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.generate_config {
        let path = app::generate_config(cli)?;
        println!("Configuration file created at: {}", path.display());
        println!("Edit this file to customize passport-cli.");
        return Ok(());
    }

    let config = app::resolve_config(cli)?;

    if let Some(log_path) = init_tracing(cli.verbose, &config.logging)? {
        eprintln!("📝 Logs will be written to {}", log_path.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(cli, &config, &mut out)
}

fn report(err: &anyhow::Error) {
    let message = app::error_message(err);
    if app::is_lookup_miss(err) {
        eprintln!("{}", message.yellow());
    } else {
        eprintln!("{}", message.red());
    }
}
