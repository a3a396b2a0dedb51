use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FarmError {
    UnknownSensor(std::string::String),
    UnknownOffer(std::string::String),
    UnknownNotification(std::string::String),
    InvalidQuantity(u32),
    InsufficientCredits { requested: u32, available: f64 },
    ExceedsOffer { requested: u32, wanted: u32 },
    IrrigationActive,
}

impl fmt::Display for FarmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FarmError::UnknownSensor(id) => write!(f, "Unknown sensor: {}", id),
            FarmError::UnknownOffer(id) => write!(f, "Unknown market offer: {}", id),
            FarmError::UnknownNotification(id) => write!(f, "Unknown notification: {}", id),
            FarmError::InvalidQuantity(q) => write!(f, "Invalid quantity: {}", q),
            FarmError::InsufficientCredits {
                requested,
                available,
            } => write!(
                f,
                "Insufficient credits: requested {}, available {:.1}",
                requested, available
            ),
            FarmError::ExceedsOffer { requested, wanted } => write!(
                f,
                "Offer only wants {} credits, requested {}",
                wanted, requested
            ),
            FarmError::IrrigationActive => write!(f, "Irrigation is already active"),
        }
    }
}

impl error::Error for FarmError {}
