pub mod config;
pub mod error;
pub mod form;
pub mod session;
pub mod storage;
pub mod workout;

pub use error::{StorageError, TrackerError};
