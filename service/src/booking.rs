use std::sync::Arc;

use async_trait::async_trait;
use dao::booking::{BookingEntity, BookingStatusEntity};
use dao::MockTransaction;
use mockall::automock;
use salon_utils::Span;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}
impl From<BookingStatusEntity> for BookingStatus {
    fn from(status: BookingStatusEntity) -> Self {
        match status {
            BookingStatusEntity::Pending => Self::Pending,
            BookingStatusEntity::Confirmed => Self::Confirmed,
            BookingStatusEntity::Completed => Self::Completed,
            BookingStatusEntity::Cancelled => Self::Cancelled,
        }
    }
}
impl From<BookingStatus> for BookingStatusEntity {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => Self::Pending,
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Completed => Self::Completed,
            BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// An appointment of one stylist. `end_at` marks the end of the service
/// itself; the buffer is kept separately as it was when the booking was made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub stylist_id: Uuid,
    pub treatment_id: Uuid,
    pub status: BookingStatus,
    pub start_at: Option<OffsetDateTime>,
    pub end_at: Option<OffsetDateTime>,
    pub buffer_minutes: u32,
    pub created: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// `[start_at, end_at + buffer)`, or `None` if the stored times are
    /// missing, `end_at` is not after `start_at` or the buffer runs past the
    /// representable range.
    pub fn occupied_block(&self) -> Option<Span> {
        let start_at = self.start_at?;
        let end_at = self.end_at?;
        if end_at <= start_at {
            return None;
        }
        let occupied_end =
            end_at.checked_add(Duration::minutes(i64::from(self.buffer_minutes)))?;
        Some(Span::new(start_at, occupied_end))
    }
}

impl From<&BookingEntity> for Booking {
    fn from(entity: &BookingEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            stylist_id: entity.stylist_id,
            treatment_id: entity.treatment_id,
            status: entity.status.into(),
            start_at: entity.start_at,
            end_at: entity.end_at,
            buffer_minutes: entity.buffer_minutes,
            created: entity.created,
            version: entity.version,
        }
    }
}
impl From<&Booking> for BookingEntity {
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

/// What a customer picked: treatment, stylist and a start time on a date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    pub stylist_id: Uuid,
    pub treatment_id: Uuid,
    pub date: Date,
    pub time: Time,
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait BookingService {
    type Transaction: dao::Transaction;

    async fn get_all(
        &self,
        tenant_id: Uuid,
        stylist_id: Option<Uuid>,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[Booking]>, ServiceError>;
    async fn get(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Option<Self::Transaction>,
    ) -> Result<Booking, ServiceError>;

    /// Checks the requested slot once more against the stored bookings and
    /// creates a pending booking. Fails with `ServiceError::SlotUnavailable`
    /// if the slot was taken in the meantime.
    async fn commit(
        &self,
        tenant_id: Uuid,
        request: &BookingRequest,
        tx: Option<Self::Transaction>,
    ) -> Result<Booking, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn booking(buffer_minutes: u32) -> Booking {
        Booking {
            id: Uuid::nil(),
            tenant_id: Uuid::nil(),
            stylist_id: Uuid::nil(),
            treatment_id: Uuid::nil(),
            status: BookingStatus::Confirmed,
            start_at: Some(datetime!(2026-03-10 10:00 UTC)),
            end_at: Some(datetime!(2026-03-10 10:30 UTC)),
            buffer_minutes,
            created: None,
            version: Uuid::nil(),
        }
    }

    #[test]
    fn test_occupied_block_includes_buffer() {
        let block = booking(15).occupied_block().unwrap();
        assert_eq!(block.start, datetime!(2026-03-10 10:00 UTC));
        assert_eq!(block.end, datetime!(2026-03-10 10:45 UTC));
    }

    #[test]
    fn test_occupied_block_of_malformed_booking() {
        let mut missing_end = booking(0);
        missing_end.end_at = None;
        assert_eq!(missing_end.occupied_block(), None);

        let mut inverted = booking(30);
        inverted.end_at = Some(datetime!(2026-03-10 09:30 UTC));
        assert_eq!(inverted.occupied_block(), None);

        let mut empty = booking(30);
        empty.end_at = empty.start_at;
        assert_eq!(empty.occupied_block(), None);
    }

    #[test]
    fn test_occupied_block_with_out_of_range_buffer() {
        assert_eq!(booking(u32::MAX).occupied_block(), None);
    }
}
