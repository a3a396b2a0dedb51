use crate::sensor::SensorData;
use chrono::Utc;
use rand::Rng;

/// Half-width of the symmetric random step applied per tick
const SOIL_STEP: f64 = 1.0;
const TEMPERATURE_STEP: f64 = 0.5;
const HUMIDITY_STEP: f64 = 1.5;
const CO2_STEP: f64 = 5.0;
const LIGHT_STEP: f64 = 2.5;

pub const SOIL_FLOOR: f64 = 20.0;
pub const TEMPERATURE_RANGE: (f64, f64) = (15.0, 35.0);
pub const HUMIDITY_RANGE: (f64, f64) = (30.0, 90.0);
pub const CO2_RANGE: (f64, f64) = (300.0, 600.0);
pub const LIGHT_RANGE: (f64, f64) = (0.0, 100.0);

fn jitter<R: Rng>(rng: &mut R, step: f64) -> f64 {
    rng.gen_range(-step..=step)
}

/// One simulation tick.
///
/// The ambient fields random-walk inside their ranges. The water tank only
/// changes while `irrigating`, draining by `drain` and never below zero.
pub fn advance<R: Rng>(prev: &SensorData, irrigating: bool, drain: f64, rng: &mut R) -> SensorData {
    let (t_min, t_max) = TEMPERATURE_RANGE;
    let (h_min, h_max) = HUMIDITY_RANGE;
    let (c_min, c_max) = CO2_RANGE;
    let (l_min, l_max) = LIGHT_RANGE;

    let water_tank_level = if irrigating {
        (prev.water_tank_level - drain).max(0.0)
    } else {
        prev.water_tank_level
    };

    SensorData {
        timestamp: Utc::now(),
        soil_moisture: (prev.soil_moisture + jitter(rng, SOIL_STEP)).max(SOIL_FLOOR),
        temperature: (prev.temperature + jitter(rng, TEMPERATURE_STEP)).clamp(t_min, t_max),
        humidity: (prev.humidity + jitter(rng, HUMIDITY_STEP)).clamp(h_min, h_max),
        co2: (prev.co2 + jitter(rng, CO2_STEP)).clamp(c_min, c_max),
        light_intensity: (prev.light_intensity + jitter(rng, LIGHT_STEP)).clamp(l_min, l_max),
        water_tank_level,
    }
}
