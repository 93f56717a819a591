use clap::Parser;
use darkroom::cli::commands::{Cli, Commands};
use darkroom::cli::handlers;
use darkroom::io::log;

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it logs to a file
    if matches!(cli.command, None | Some(Commands::Open(_))) {
        log::init_file();
    } else {
        log::init_stderr();
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
