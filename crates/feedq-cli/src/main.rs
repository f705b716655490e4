use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;

fn main() {
    // Log lines go to stderr; stdout carries only the JSON result.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    if let Err(err) = commands::run_command(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
