use log::{error, info};
use std::env;
use tokio::sync::oneshot;

use snakebattle_client::client;
use snakebattle_client::config::Config;
use snakebattle_client::debug_logger::DebugLogger;
use snakebattle_client::handler::ControlLoop;
use snakebattle_client::rng::SeededRandom;

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Snake Battle client...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let player_url =
        env::var("SNAKEBATTLE_URL").unwrap_or_else(|_| config.connection.server_url.clone());

    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let mut control = ControlLoop::new(config, Box::new(SeededRandom::from_time()), debug_logger);

    // Any line on stdin (or EOF) asks the client to leave
    let (exit_tx, exit_rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = exit_tx.send(());
    });

    if let Err(e) = client::run(&player_url, &mut control, exit_rx).await {
        error!("{}", e);
    }
    info!("Session over after {} ticks", control.ticks());
    control.close().await;

    // The stdin reader may still be blocked; don't wait for it
    std::process::exit(0);
}
