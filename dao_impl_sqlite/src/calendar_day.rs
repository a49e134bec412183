use std::sync::Arc;

use crate::{uuid_from_db, ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    calendar_day::{CalendarDayDao, CalendarDayEntity},
    DaoError,
};
use sqlx::{query_as, FromRow};
use time::{format_description::well_known::Iso8601, Date};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct CalendarDayDb {
    tenant_id: Vec<u8>,
    date: String,
    active: bool,
}

impl TryFrom<&CalendarDayDb> for CalendarDayEntity {
    type Error = DaoError;
    fn try_from(day: &CalendarDayDb) -> Result<Self, Self::Error> {
        Ok(Self {
            tenant_id: uuid_from_db(&day.tenant_id)?,
            date: Date::parse(&day.date, &Iso8601::DATE).map_db_error()?,
            active: day.active,
        })
    }
}

pub struct CalendarDayDaoImpl {
    pub _pool: Arc<sqlx::SqlitePool>,
}
impl CalendarDayDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { _pool: pool }
    }
}

#[async_trait]
impl CalendarDayDao for CalendarDayDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_by_date(
        &self,
        tenant_id: Uuid,
        date: Date,
        tx: Self::Transaction,
    ) -> Result<Option<CalendarDayEntity>, DaoError> {
        let tenant_id_vec = tenant_id.as_bytes().to_vec();
        let date = date.format(&Iso8601::DATE).map_db_error()?;
        query_as::<_, CalendarDayDb>(
            "SELECT tenant_id, date, active FROM calendar_day WHERE tenant_id = ? AND date = ?",
        )
        .bind(tenant_id_vec)
        .bind(date)
        .fetch_optional(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .as_ref()
        .map(CalendarDayEntity::try_from)
        .transpose()
    }
}
