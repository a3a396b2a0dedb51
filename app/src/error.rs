use fieldsim_core::error::FarmError;
use std::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Simulation is shutting down")]
    ShuttingDown,
}

#[derive(Debug, Error)]
#[error(transparent)]
pub enum ObserverError {
    User(Box<dyn error::Error + Send + Sync>),
    Internal(Box<dyn error::Error + Send + Sync>),
}

impl From<FarmError> for ObserverError {
    fn from(err: FarmError) -> Self {
        ObserverError::User(Box::from(err))
    }
}

impl From<ApiError> for ObserverError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ShuttingDown => ObserverError::Internal(Box::from(err)),
        }
    }
}
