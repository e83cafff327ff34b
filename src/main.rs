//! e-Shift - transport job and load management CLI

use clap::Parser;
use eshift::cli::Cli;
use eshift::commands;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
