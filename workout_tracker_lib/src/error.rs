use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to read key {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to serialize workouts: {0}")]
    Serialize(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error("could not get the current position")]
    GeolocationUnavailable,
    #[error("inputs have to be positive numbers")]
    InvalidInput,
    #[error("no map location selected for the workout")]
    NoPendingLocation,
    #[error("no workout with id {0}")]
    RecordNotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TrackerError {
    /// Text for the blocking alert shown to the user, if this error warrants one.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            TrackerError::GeolocationUnavailable => Some("Could not get your location"),
            TrackerError::InvalidInput => Some("Inputs have to be positive numbers!"),
            _ => None,
        }
    }
}
