use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use landmark_overlay::cli::{self, Args, Command};
use landmark_overlay::config::Config;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = dispatch(args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(args: Args) -> landmark_overlay::Result<()> {
    match args.command {
        Command::Run(run) => {
            let mut config = Config::load(args.config.as_deref())?;
            cli::apply_run_overrides(&mut config, &run);

            let stop = Arc::new(AtomicBool::new(false));
            let handler_stop = Arc::clone(&stop);
            ctrlc::set_handler(move || {
                handler_stop.store(true, Ordering::SeqCst);
                eprintln!("\nReceived Ctrl+C, shutting down...");
            })?;

            let stats = cli::run(&config, &run, stop)?;
            log::info!("Done: {}", stats);
            Ok(())
        }
        Command::Map(map) => {
            cli::map_group(&map);
            Ok(())
        }
        Command::Config { action } => cli::handle_config_action(action, args.config.as_deref()),
    }
}
