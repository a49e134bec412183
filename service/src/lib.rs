use std::sync::Arc;

use salon_utils::SalonTimeError;
use thiserror::Error;
use time::{Date, Time};
use uuid::Uuid;

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod treatment;
pub mod uuid_service;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ValidationFailureItem {
    InvalidValue(Arc<str>),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Entity {0} not found")]
    EntityNotFound(Uuid),

    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(Arc<str>),

    #[error("Slot on {0} at {1} is not available")]
    SlotUnavailable(Date, Time),

    #[error("Unknown time zone: {0}")]
    UnknownTimezone(Arc<str>),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(Arc<str>),

    #[error("Validation error: {0:?}")]
    ValidationError(Arc<[ValidationFailureItem]>),
}

impl From<SalonTimeError> for ServiceError {
    fn from(err: SalonTimeError) -> Self {
        match err {
            SalonTimeError::InvalidTimeFormat(value) => Self::InvalidTimeFormat(value),
            SalonTimeError::InvalidWeekday(value) => {
                Self::InvalidConfiguration(format!("unknown weekday {value:?}").into())
            }
        }
    }
}
