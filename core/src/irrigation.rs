use crate::sensor::SensorData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneStatus {
    Optimal,
    Good,
    NeedsWater,
}

impl ZoneStatus {
    pub fn from_moisture(moisture: f64) -> Self {
        if moisture > 60.0 {
            ZoneStatus::Optimal
        } else if moisture > 40.0 {
            ZoneStatus::Good
        } else {
            ZoneStatus::NeedsWater
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationZone {
    pub id: u32,
    pub name: String,
    pub area_hectares: f64,
    pub moisture: f64,
    pub status: ZoneStatus,
}

/// (name, area, moisture offset from the soil probe)
const ZONES: [(&str, f64, f64); 4] = [
    ("Zone A - Tomatoes", 1.2, 0.0),
    ("Zone B - Peppers", 0.8, -10.0),
    ("Zone C - Herbs", 0.5, 5.0),
    ("Zone D - Leafy Greens", 0.7, -5.0),
];

pub fn zones(data: &SensorData) -> Vec<IrrigationZone> {
    ZONES
        .iter()
        .zip(1..)
        .map(|((name, area, offset), id)| {
            let moisture = data.soil_moisture + offset;
            IrrigationZone {
                id,
                name: (*name).to_owned(),
                area_hectares: *area,
                moisture,
                status: ZoneStatus::from_moisture(moisture),
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zones_follow_soil() {
        let data = SensorData {
            soil_moisture: 48.0,
            ..SensorData::default()
        };

        let actual = zones(&data);

        let statuses: Vec<ZoneStatus> = actual.iter().map(|z| z.status).collect();
        assert_eq!(
            statuses,
            vec![
                ZoneStatus::Good,
                ZoneStatus::NeedsWater,
                ZoneStatus::Good,
                ZoneStatus::Good
            ]
        );
        assert_eq!(actual[1].moisture, 38.0);
        assert_eq!(actual[3].id, 4);
    }

    #[test]
    fn test_zone_thresholds() {
        assert_eq!(ZoneStatus::from_moisture(60.1), ZoneStatus::Optimal);
        assert_eq!(ZoneStatus::from_moisture(60.0), ZoneStatus::Good);
        assert_eq!(ZoneStatus::from_moisture(40.0), ZoneStatus::NeedsWater);
    }
}
