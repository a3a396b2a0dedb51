use super::ConcurrentObserver;
use crate::error::ObserverError;
use fieldsim_core::{IrrigationZone, Recommendation, SensorData, SensorId, SensorStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub data: SensorData,
    pub statuses: Vec<SensorStatus>,
    pub recommendations: Vec<Recommendation>,
    pub irrigation_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationSnapshot {
    pub active: bool,
    pub duration_secs: f64,
    pub water_tank_level: f64,
    pub zones: Vec<IrrigationZone>,
}

#[derive(Clone)]
pub struct SensorObserver {
    inner: Arc<ConcurrentObserver>,
}

impl SensorObserver {
    pub fn new(inner: Arc<ConcurrentObserver>) -> Self {
        SensorObserver { inner }
    }

    pub async fn snapshot(&self) -> SensorSnapshot {
        let state = self.inner.state.read().await;
        SensorSnapshot {
            data: state.data().clone(),
            statuses: state.statuses().clone(),
            recommendations: state.recommendations().clone(),
            irrigation_active: state.irrigation_active(),
        }
    }

    /// Manual override of a single sensor, clamped to its range
    pub async fn update_value(
        &self,
        sensor_id: &str,
        value: f64,
    ) -> Result<SensorSnapshot, ObserverError> {
        let id: SensorId = sensor_id.parse()?;
        let stored = self.inner.state.write().await.set_sensor_value(id, value);
        info!(sensor = %id, requested = value, stored = stored, "Sensor value overridden");
        Ok(self.snapshot().await)
    }

    pub async fn irrigation(&self) -> IrrigationSnapshot {
        let state = self.inner.state.read().await;
        IrrigationSnapshot {
            active: state.irrigation_active(),
            duration_secs: self.inner.settings.irrigation_duration.as_secs_f64(),
            water_tank_level: state.data().water_tank_level,
            zones: state.zones(),
        }
    }

    pub async fn activate_irrigation(&self) -> Result<IrrigationSnapshot, ObserverError> {
        self.inner.activate_irrigation().await?;
        Ok(self.irrigation().await)
    }
}
