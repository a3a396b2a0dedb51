use fieldsim_core::SettlementPolicy;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub struct Config {
    inner: RwLock<InnerConfig>,
}

struct InnerConfig {
    server_port: u16,
    tick_interval_ms: u64,
    irrigation_duration_ms: u64,
    water_drain_per_tick: f64,
    settlement_policy: SettlementPolicy,
    log_level: String,
}

impl Config {
    pub fn server_port(&self) -> u16 {
        self.inner.read().server_port
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.inner.read().tick_interval_ms)
    }

    pub fn irrigation_duration(&self) -> Duration {
        Duration::from_millis(self.inner.read().irrigation_duration_ms)
    }

    pub fn water_drain_per_tick(&self) -> f64 {
        self.inner.read().water_drain_per_tick
    }

    pub fn settlement_policy(&self) -> SettlementPolicy {
        self.inner.read().settlement_policy
    }

    pub fn log_level(&self) -> String {
        let inner = self.inner.read();
        inner.log_level.clone()
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{} is invalid: {:?}", key, e)),
        Err(_) => default,
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv::dotenv().ok();

    let server_port = env_or("SERVER_PORT", 8000);
    let tick_interval_ms = env_or("SIM_TICK_MS", 3000);
    let irrigation_duration_ms = env_or("IRRIGATION_DURATION_MS", 10_000);
    let water_drain_per_tick = env_or("WATER_DRAIN_PER_TICK", 0.5);
    let settlement_policy = env_or("SETTLEMENT_POLICY", SettlementPolicy::Fifo);
    let log_level = env_or("LOG_LEVEL", "info".to_owned());

    if tick_interval_ms == 0 {
        panic!("SIM_TICK_MS must be greater than zero");
    }

    Config {
        inner: RwLock::new(InnerConfig {
            server_port,
            tick_interval_ms,
            irrigation_duration_ms,
            water_drain_per_tick,
            settlement_policy,
            log_level,
        }),
    }
});
