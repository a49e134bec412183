use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "service-impl")]
use service::{
    availability::SlotAvailability,
    booking::{Booking, BookingRequest, BookingStatus},
};

/// One start time of the slot grid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct SlotAvailabilityTO {
    /// Local start time as `HH:MM`.
    #[schema(value_type = String, example = "10:30")]
    pub time: Arc<str>,
    pub available: bool,
}
#[cfg(feature = "service-impl")]
impl From<&SlotAvailability> for SlotAvailabilityTO {
    fn from(slot: &SlotAvailability) -> Self {
        Self {
            time: salon_utils::minutes_to_time(salon_utils::time_of_day_to_minutes(slot.time)),
            available: slot.available,
        }
    }
}
#[cfg(feature = "service-impl")]
salon_utils::derive_from_reference!(SlotAvailability, SlotAvailabilityTO);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatusTO {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}
#[cfg(feature = "service-impl")]
impl From<BookingStatus> for BookingStatusTO {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => Self::Pending,
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Completed => Self::Completed,
            BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct BookingRequestTO {
    pub stylist_id: Uuid,
    pub treatment_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2026-03-10")]
    pub date: Date,
    /// Local start time as `HH:MM`.
    #[schema(value_type = String, example = "10:30")]
    pub time: Arc<str>,
}
#[cfg(feature = "service-impl")]
impl TryFrom<&BookingRequestTO> for BookingRequest {
    type Error = salon_utils::SalonTimeError;
    fn try_from(request: &BookingRequestTO) -> Result<Self, Self::Error> {
        Ok(Self {
            stylist_id: request.stylist_id,
            treatment_id: request.treatment_id,
            date: request.date,
            time: salon_utils::parse_time_of_day(&request.time)?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct BookingTO {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub stylist_id: Uuid,
    pub treatment_id: Uuid,
    pub status: BookingStatusTO,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub start_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_at: Option<OffsetDateTime>,
    pub buffer_minutes: u32,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub created: Option<PrimitiveDateTime>,
    #[serde(rename = "$version")]
    pub version: Uuid,
}
#[cfg(feature = "service-impl")]
impl From<&Booking> for BookingTO {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            tenant_id: booking.tenant_id,
            stylist_id: booking.stylist_id,
            treatment_id: booking.treatment_id,
            status: booking.status.into(),
            start_at: booking.start_at,
            end_at: booking.end_at,
            buffer_minutes: booking.buffer_minutes,
            created: booking.created,
            version: booking.version,
        }
    }
}
#[cfg(feature = "service-impl")]
salon_utils::derive_from_reference!(Booking, BookingTO);
