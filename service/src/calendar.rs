use async_trait::async_trait;
use dao::MockTransaction;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: Date,
    pub active: bool,
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait CalendarService {
    type Transaction: dao::Transaction;

    /// A day is open unless a stored calendar entry closes it or its weekday
    /// is configured as closed.
    async fn get_day(
        &self,
        tenant_id: Uuid,
        date: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<CalendarDay, ServiceError>;
}
