mod config;
mod error;
mod farm;
mod logging;
mod rest;

use farm::observer::SimulationSettings;
use farm::{seed, ConcurrentObserver};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{error, info};

static TERMINATED: AtomicU32 = AtomicU32::new(0);

#[tokio::main]
pub async fn main() -> std::io::Result<()> {
    logging::init();
    info!("Starting fieldsim, core version {}", fieldsim_core::CORE_VERSION);

    let settings = SimulationSettings::from_config();
    let observer = ConcurrentObserver::new(seed::initial_state(), settings);
    register_sigint_handler(observer.clone());

    let simulation_loop = ConcurrentObserver::dispatch_simulation_loop(observer.clone());
    let server_daemon = rest::dispatch_server_daemon(observer.clone());

    let _ = tokio::join!(simulation_loop, server_daemon);
    info!("Shutdown complete");
    Ok(())
}

/// First SIGINT shuts down gracefully, the second one kills the process
fn register_sigint_handler(observer: Arc<ConcurrentObserver>) {
    let res = ctrlc::set_handler(move || {
        let count = TERMINATED.fetch_add(1, Ordering::Relaxed);
        if count >= 1 {
            info!("Force killing");
            std::process::exit(0);
        }
        info!("Received SIGINT, shutting down");
        observer.shutdown();
    });
    if let Err(e) = res {
        error!("Failed registering SIGINT handler: {}", e);
    }
}
