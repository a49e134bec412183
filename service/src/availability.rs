use std::sync::Arc;

use async_trait::async_trait;
use dao::MockTransaction;
use mockall::automock;
use time::{Date, Time};
use uuid::Uuid;

use crate::treatment::Treatment;
use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusinessHours {
    pub opening: Time,
    pub closing: Time,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotAvailability {
    pub time: Time,
    pub available: bool,
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait AvailabilityService {
    type Transaction: dao::Transaction;

    /// Availability of every configured start time of `date`, in grid order.
    async fn get_slot_grid(
        &self,
        tenant_id: Uuid,
        stylist_id: Uuid,
        treatment_id: Uuid,
        date: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[SlotAvailability]>, ServiceError>;

    /// Checks one start time against the bookings stored right now.
    async fn is_slot_available(
        &self,
        tenant_id: Uuid,
        stylist_id: Uuid,
        treatment: &Treatment,
        date: Date,
        time: Time,
        tx: Option<Self::Transaction>,
    ) -> Result<bool, ServiceError>;
}
