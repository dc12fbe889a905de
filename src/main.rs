use clap::Parser;
use tildo::cli::commands::Cli;
use tildo::cli::handlers;
use tildo::io::config_io;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand: launch the TUI
            let cwd = match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            let config = match config_io::load_config(cli.config.as_deref(), &cwd) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = tildo::tui::run(config, cli.file) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            if let Err(e) = handlers::dispatch(command) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
