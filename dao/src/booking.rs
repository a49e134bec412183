use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingStatusEntity {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatusEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Stored booking. `start_at` and `end_at` are `None` when the stored value
/// is missing or unreadable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub stylist_id: Uuid,
    pub treatment_id: Uuid,
    pub status: BookingStatusEntity,
    pub start_at: Option<OffsetDateTime>,
    pub end_at: Option<OffsetDateTime>,
    pub buffer_minutes: u32,
    pub created: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait BookingDao {
    type Transaction: crate::Transaction;

    /// All bookings of the tenant, cancelled ones included. Restricted to one
    /// stylist if `stylist_id` is given.
    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
        stylist_id: Option<Uuid>,
        tx: Self::Transaction,
    ) -> Result<Arc<[BookingEntity]>, DaoError>;
    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<BookingEntity>, DaoError>;
    /// Fails with `DaoError::OverlappingBooking` if a non-cancelled booking of
    /// the same stylist occupies any part of the new booking's occupied block.
    async fn create(
        &self,
        entity: &BookingEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
