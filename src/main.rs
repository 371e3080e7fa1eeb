use std::fs::File;
use std::io::{self, BufReader};

use dotenv::dotenv;
use rickbot::config::Config;
use rickbot::infra::{CompositeObserver, DefaultObserver, Game, GameObserver, StatsObserver};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging(ansi: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rickbot=debug,info"));

    // stdout carries the move commands, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let config = Config::from_env();
    init_logging(config.ansi);

    tracing::debug!("Configuration: {:?}", config);

    let observers: Vec<Box<dyn GameObserver>> = vec![
        Box::new(DefaultObserver::new(config.show_map)),
        Box::new(StatsObserver::new()),
    ];
    let observer = CompositeObserver::new(observers);

    let stdout = io::stdout().lock();
    let turns = match &config.input_path {
        Some(path) => {
            tracing::info!("Reading session from {}", path);
            let reader = BufReader::new(File::open(path)?);
            Game::new(reader, stdout, observer)
                .with_replays_folder(config.replays_folder.clone())
                .run()?
        }
        None => Game::new(io::stdin().lock(), stdout, observer)
            .with_replays_folder(config.replays_folder.clone())
            .run()?,
    };

    tracing::debug!("Exiting after {} turns", turns);
    Ok(())
}
