use crate::sensor::SensorData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Irrigation,
    Fertilizer,
    Pest,
    Harvest,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// The sensor condition a recommendation was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    LowSoilMoisture,
    HighCo2,
    HighTemperature,
}

impl Trigger {
    const ALL: [Trigger; 3] = [
        Trigger::LowSoilMoisture,
        Trigger::HighCo2,
        Trigger::HighTemperature,
    ];

    /// Priority if the trigger currently fires, `None` otherwise.
    pub fn evaluate(&self, data: &SensorData) -> Option<Priority> {
        match self {
            Trigger::LowSoilMoisture if data.soil_moisture < 25.0 => Some(Priority::High),
            Trigger::LowSoilMoisture if data.soil_moisture < 40.0 => Some(Priority::Medium),
            Trigger::HighCo2 if data.co2 > 500.0 => Some(Priority::Medium),
            Trigger::HighTemperature if data.temperature > 30.0 => Some(Priority::High),
            _ => None,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Trigger::LowSoilMoisture => "irrigation",
            Trigger::HighCo2 => "ventilation",
            Trigger::HighTemperature => "cooling",
        }
    }

    fn build(&self, priority: Priority) -> Recommendation {
        let (kind, title, description, action) = match self {
            Trigger::LowSoilMoisture => (
                RecommendationKind::Irrigation,
                "Irrigation Needed",
                "Soil moisture is low. Consider activating irrigation system.",
                Some("Activate Irrigation"),
            ),
            Trigger::HighCo2 => (
                RecommendationKind::General,
                "Improve Ventilation",
                "CO₂ levels are elevated. Increase ventilation to optimize growth.",
                None,
            ),
            Trigger::HighTemperature => (
                RecommendationKind::General,
                "Temperature Control",
                "High temperature detected. Activate cooling system.",
                None,
            ),
        };

        Recommendation {
            id: format!("{}-{}", self.prefix(), uuid::Uuid::new_v4()),
            kind,
            priority,
            title: title.to_owned(),
            description: description.to_owned(),
            action: action.map(str::to_owned),
            trigger: *self,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action: Option<String>,
    pub trigger: Trigger,
    pub timestamp: DateTime<Utc>,
}

/// Derives the advisory list for `data` from the `previous` list.
///
/// Entries whose trigger cleared are dropped. A trigger that still fires with
/// the same priority keeps its entry; a changed priority replaces it with a
/// fresh one. New entries are appended and only the most recent
/// `MAX_RECOMMENDATIONS` survive.
pub fn generate(data: &SensorData, previous: &[Recommendation]) -> Vec<Recommendation> {
    let mut retained: Vec<Recommendation> = previous
        .iter()
        .filter(|rec| rec.trigger.evaluate(data) == Some(rec.priority))
        .cloned()
        .collect();

    for trigger in Trigger::ALL.iter() {
        if let Some(priority) = trigger.evaluate(data) {
            if !retained.iter().any(|rec| rec.trigger == *trigger) {
                retained.push(trigger.build(priority));
            }
        }
    }

    if retained.len() > MAX_RECOMMENDATIONS {
        retained.drain(..retained.len() - MAX_RECOMMENDATIONS);
    }
    retained
}
