use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wggen::cli::{self, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the peer stanza
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate { client, ip } => cli::commands::cmd_generate(client, ip),
        Commands::Genkey => {
            cli::commands::cmd_genkey();
            Ok(())
        }
        Commands::Pubkey => cli::commands::cmd_pubkey(),
        Commands::Genpsk => {
            cli::commands::cmd_genpsk();
            Ok(())
        }
    };

    if let Err(e) = result {
        if e.is_already_exists() {
            println!("[!] Files already exist! Exiting.");
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
