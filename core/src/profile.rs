use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
    pub id: String,
    pub farm_name: String,
    pub location: String,
    pub size: f64,
    pub crop_type: String,
    pub sustainability_goal: f64,
    pub owner_name: String,
    pub email: String,
}

impl Default for FarmProfile {
    fn default() -> Self {
        FarmProfile {
            id: "1".to_owned(),
            farm_name: "Green Valley Farm".to_owned(),
            location: "Maharashtra, India".to_owned(),
            size: 5.2,
            crop_type: "Tomatoes".to_owned(),
            sustainability_goal: 85.0,
            owner_name: "Rajesh Kumar".to_owned(),
            email: "rajesh@greenvalley.com".to_owned(),
        }
    }
}

/// Partial profile, absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmProfileUpdate {
    pub farm_name: Option<String>,
    pub location: Option<String>,
    pub size: Option<f64>,
    pub crop_type: Option<String>,
    pub sustainability_goal: Option<f64>,
    pub owner_name: Option<String>,
    pub email: Option<String>,
}

impl FarmProfile {
    pub fn merge(&mut self, update: FarmProfileUpdate) {
        if let Some(farm_name) = update.farm_name {
            self.farm_name = farm_name;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
        if let Some(crop_type) = update.crop_type {
            self.crop_type = crop_type;
        }
        if let Some(goal) = update.sustainability_goal {
            self.sustainability_goal = goal;
        }
        if let Some(owner_name) = update.owner_name {
            self.owner_name = owner_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}
