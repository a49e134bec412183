use async_trait::async_trait;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::DaoError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarDayEntity {
    pub tenant_id: Uuid,
    pub date: Date,
    pub active: bool,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait CalendarDayDao {
    type Transaction: crate::Transaction;

    async fn find_by_date(
        &self,
        tenant_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Option<CalendarDayEntity>, DaoError>;
}
