use crate::error::FarmError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The single live snapshot of all six farm measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub co2: f64,
    pub light_intensity: f64,
    pub water_tank_level: f64,
}

impl std::default::Default for SensorData {
    fn default() -> Self {
        SensorData {
            timestamp: Utc::now(),
            soil_moisture: 65.0,
            temperature: 24.0,
            humidity: 70.0,
            co2: 400.0,
            light_intensity: 75.0,
            water_tank_level: 80.0,
        }
    }
}

impl SensorData {
    pub fn value(&self, id: SensorId) -> f64 {
        match id {
            SensorId::Soil => self.soil_moisture,
            SensorId::Temp => self.temperature,
            SensorId::Humidity => self.humidity,
            SensorId::Co2 => self.co2,
            SensorId::Light => self.light_intensity,
            SensorId::Water => self.water_tank_level,
        }
    }

    /// Manual override of one field, clamped to the sensor's declared range.
    /// Returns the value that was actually stored.
    pub fn set_value(&mut self, id: SensorId, value: f64) -> f64 {
        let (min, max) = id.bounds();
        let clamped = value.clamp(min, max);
        let field = match id {
            SensorId::Soil => &mut self.soil_moisture,
            SensorId::Temp => &mut self.temperature,
            SensorId::Humidity => &mut self.humidity,
            SensorId::Co2 => &mut self.co2,
            SensorId::Light => &mut self.light_intensity,
            SensorId::Water => &mut self.water_tank_level,
        };
        *field = clamped;
        self.timestamp = Utc::now();
        clamped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorId {
    Soil,
    Temp,
    Humidity,
    Co2,
    Light,
    Water,
}

impl SensorId {
    /// Display order of the status list
    pub const ALL: [SensorId; 6] = [
        SensorId::Soil,
        SensorId::Temp,
        SensorId::Humidity,
        SensorId::Co2,
        SensorId::Light,
        SensorId::Water,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorId::Soil => "soil",
            SensorId::Temp => "temp",
            SensorId::Humidity => "humidity",
            SensorId::Co2 => "co2",
            SensorId::Light => "light",
            SensorId::Water => "water",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SensorId::Soil => "Soil Moisture",
            SensorId::Temp => "Temperature",
            SensorId::Humidity => "Humidity",
            SensorId::Co2 => "CO₂ Level",
            SensorId::Light => "Light Intensity",
            SensorId::Water => "Water Tank",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorId::Temp => "°C",
            SensorId::Co2 => "ppm",
            _ => "%",
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match self {
            SensorId::Temp => (0.0, 50.0),
            SensorId::Co2 => (300.0, 800.0),
            _ => (0.0, 100.0),
        }
    }

    pub fn icon(&self) -> SensorIcon {
        match self {
            SensorId::Soil => SensorIcon::Droplets,
            SensorId::Temp => SensorIcon::Thermometer,
            SensorId::Humidity => SensorIcon::Cloud,
            SensorId::Co2 => SensorIcon::Wind,
            SensorId::Light => SensorIcon::Sun,
            SensorId::Water => SensorIcon::Gauge,
        }
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorId {
    type Err = FarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorId::ALL
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| FarmError::UnknownSensor(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorIcon {
    Droplets,
    Thermometer,
    Cloud,
    Wind,
    Sun,
    Gauge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorCondition {
    Optimal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorStatus {
    pub id: SensorId,
    pub name: String,
    pub unit: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub icon: SensorIcon,
    pub status: SensorCondition,
}

impl SensorStatus {
    pub fn from_data(id: SensorId, data: &SensorData) -> Self {
        let (min, max) = id.bounds();
        SensorStatus {
            id,
            name: id.name().to_owned(),
            unit: id.unit().to_owned(),
            value: data.value(id),
            min,
            max,
            icon: id.icon(),
            status: classify(id, data),
        }
    }
}

/// Tri-state health of a single sensor, most severe rule wins.
pub fn classify(id: SensorId, data: &SensorData) -> SensorCondition {
    let value = data.value(id);
    match id {
        SensorId::Soil if value < 25.0 => SensorCondition::Critical,
        SensorId::Soil if value < 40.0 => SensorCondition::Warning,
        SensorId::Water if value < 15.0 => SensorCondition::Critical,
        SensorId::Water if value < 30.0 => SensorCondition::Warning,
        SensorId::Temp if value > 35.0 || value < 15.0 => SensorCondition::Critical,
        SensorId::Temp if value > 30.0 || value < 18.0 => SensorCondition::Warning,
        _ => SensorCondition::Optimal,
    }
}

/// One status per sensor, always in `SensorId::ALL` order.
pub fn statuses(data: &SensorData) -> Vec<SensorStatus> {
    SensorId::ALL
        .iter()
        .map(|id| SensorStatus::from_data(*id, data))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn with(id: SensorId, value: f64) -> SensorData {
        let mut data = SensorData::default();
        data.set_value(id, value);
        data
    }

    #[test]
    fn test_soil_boundaries() {
        assert_eq!(
            classify(SensorId::Soil, &with(SensorId::Soil, 40.0)),
            SensorCondition::Optimal
        );
        assert_eq!(
            classify(SensorId::Soil, &with(SensorId::Soil, 39.999)),
            SensorCondition::Warning
        );
        assert_eq!(
            classify(SensorId::Soil, &with(SensorId::Soil, 25.0)),
            SensorCondition::Warning
        );
        assert_eq!(
            classify(SensorId::Soil, &with(SensorId::Soil, 24.999)),
            SensorCondition::Critical
        );
    }

    #[test]
    fn test_water_boundaries() {
        assert_eq!(
            classify(SensorId::Water, &with(SensorId::Water, 30.0)),
            SensorCondition::Optimal
        );
        assert_eq!(
            classify(SensorId::Water, &with(SensorId::Water, 29.999)),
            SensorCondition::Warning
        );
        assert_eq!(
            classify(SensorId::Water, &with(SensorId::Water, 15.0)),
            SensorCondition::Warning
        );
        assert_eq!(
            classify(SensorId::Water, &with(SensorId::Water, 14.999)),
            SensorCondition::Critical
        );
    }

    #[test]
    fn test_temperature_boundaries() {
        let cases = [
            (30.0, SensorCondition::Optimal),
            (30.001, SensorCondition::Warning),
            (35.0, SensorCondition::Warning),
            (35.001, SensorCondition::Critical),
            (18.0, SensorCondition::Optimal),
            (17.999, SensorCondition::Warning),
            (15.0, SensorCondition::Warning),
            (14.999, SensorCondition::Critical),
        ];
        for (value, expected) in cases {
            let data = with(SensorId::Temp, value);
            assert_eq!(classify(SensorId::Temp, &data), expected, "temp={}", value);
        }
    }

    #[test]
    fn test_unmonitored_always_optimal() {
        // prepare
        let mut data = SensorData::default();
        data.set_value(SensorId::Humidity, 0.0);
        data.set_value(SensorId::Co2, 800.0);
        data.set_value(SensorId::Light, 0.0);

        // validate
        for id in [SensorId::Humidity, SensorId::Co2, SensorId::Light] {
            assert_eq!(classify(id, &data), SensorCondition::Optimal);
        }
    }

    #[test]
    fn test_statuses_fixed_order() {
        let data = SensorData::default();

        let actual: Vec<SensorId> = statuses(&data).iter().map(|s| s.id).collect();

        assert_eq!(actual, SensorId::ALL.to_vec());
    }

    #[test]
    fn test_set_value_clamps() {
        let mut data = SensorData::default();

        assert_eq!(data.set_value(SensorId::Co2, 100.0), 300.0);
        assert_eq!(data.set_value(SensorId::Temp, 80.0), 50.0);
        assert_eq!(data.set_value(SensorId::Soil, -3.0), 0.0);
        assert_eq!(data.co2, 300.0);
        assert_eq!(data.temperature, 50.0);
        assert_eq!(data.soil_moisture, 0.0);
    }

    #[test]
    fn test_parse_sensor_id() {
        assert_eq!("co2".parse::<SensorId>(), Ok(SensorId::Co2));
        assert_eq!(
            "pressure".parse::<SensorId>(),
            Err(FarmError::UnknownSensor("pressure".to_owned()))
        );
    }

    #[test]
    fn test_status_serialization() {
        let status = SensorStatus::from_data(SensorId::Water, &SensorData::default());

        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["id"], "water");
        assert_eq!(json["icon"], "Gauge");
        assert_eq!(json["status"], "optimal");
    }
}
