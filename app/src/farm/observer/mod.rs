use super::state::FarmState;
use crate::config::CONFIG;
use crate::error::{ApiError, ObserverError};

use fieldsim_core::SettlementPolicy;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

pub mod account;
pub mod market;
pub mod sensor;

pub use account::AccountObserver;
pub use market::MarketObserver;
pub use sensor::SensorObserver;

#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    pub tick_interval: Duration,
    pub irrigation_duration: Duration,
    pub water_drain_per_tick: f64,
    pub settlement_policy: SettlementPolicy,
}

impl SimulationSettings {
    pub fn from_config() -> Self {
        SimulationSettings {
            tick_interval: CONFIG.tick_interval(),
            irrigation_duration: CONFIG.irrigation_duration(),
            water_drain_per_tick: CONFIG.water_drain_per_tick(),
            settlement_policy: CONFIG.settlement_policy(),
        }
    }
}

/// Owner of the farm state and of every timer that mutates it.
pub struct ConcurrentObserver {
    pub(crate) state: RwLock<FarmState>,
    pub(crate) settings: SimulationSettings,
    irrigation_task: parking_lot::Mutex<Option<JoinHandle<()>>>,
    shutdown: watch::Sender<bool>,
}

impl Debug for ConcurrentObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentObserver").finish()
    }
}

impl ConcurrentObserver {
    pub fn new(state: FarmState, settings: SimulationSettings) -> Arc<Self> {
        let (shutdown, _) = watch::channel(false);
        let observer = ConcurrentObserver {
            state: RwLock::new(state),
            settings,
            irrigation_task: parking_lot::Mutex::new(None),
            shutdown,
        };
        Arc::new(observer)
    }

    /// Perturbs the sensor data once per tick interval
    /// The first tick fires one interval after the start
    /// Blocks caller until `shutdown()` is called
    #[tracing::instrument(skip(self))]
    pub async fn dispatch_simulation_loop(self: Arc<ConcurrentObserver>) {
        let mut shutdown = self.shutdown.subscribe();
        if *shutdown.borrow() {
            return;
        }

        let period = self.settings.tick_interval;
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Start simulating sensor data every {:?}", period);
        loop {
            tokio::select! {
                _ = interval.tick() => self.tick().await,
                _ = shutdown.changed() => break,
            }
        }
        info!("Stopped sensor simulation");
    }

    /// Resolves once `shutdown()` got called
    pub async fn wait_for_shutdown(&self) {
        let mut shutdown = self.shutdown.subscribe();
        while !*shutdown.borrow() {
            if shutdown.changed().await.is_err() {
                return;
            }
        }
    }

    /// Stops the simulation loop and cancels a pending irrigation timer
    #[tracing::instrument]
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
        if let Some(task) = self.irrigation_task.lock().take() {
            task.abort();
            debug!("Cancelled irrigation timer");
        }
        info!("Shutdown requested");
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    async fn tick(&self) {
        let mut state = self.state.write().await;
        state.tick(self.settings.water_drain_per_tick, &mut rand::thread_rng());
        debug!(
            tick = state.tick_count(),
            soil = state.data().soil_moisture,
            water = state.data().water_tank_level,
            "Simulated sensor data"
        );
    }

    #[tracing::instrument(skip(self))]
    pub(crate) async fn activate_irrigation(self: &Arc<Self>) -> Result<(), ObserverError> {
        let duration = self.settings.irrigation_duration;
        let mut state = self.state.write().await;
        // held until the handle is stored, shutdown() takes it under the same lock
        let mut irrigation_task = self.irrigation_task.lock();
        if self.is_shut_down() {
            return Err(ApiError::ShuttingDown.into());
        }
        state.start_irrigation(duration)?;

        let observer = Arc::clone(self);
        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            observer.deactivate_irrigation().await;
        });
        if let Some(stale) = irrigation_task.replace(task) {
            stale.abort();
        }

        info!("Irrigation activated for {:?}", duration);
        Ok(())
    }

    async fn deactivate_irrigation(&self) {
        let mut state = self.state.write().await;
        // cleared under the state lock, so a new activation can't be dropped
        self.irrigation_task.lock().take();
        if state.stop_irrigation() {
            info!("Irrigation deactivated");
        }
    }
}
