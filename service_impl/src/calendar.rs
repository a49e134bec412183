use async_trait::async_trait;
use dao::calendar_day::CalendarDayDao;
use dao::TransactionDao;
use service::{
    calendar::{CalendarDay, CalendarService},
    config::ConfigService,
    ServiceError,
};
use time::Date;
use tracing::instrument;
use uuid::Uuid;

use crate::gen_service_impl;

gen_service_impl! {
    struct CalendarServiceImpl: CalendarService = CalendarServiceDeps {
        CalendarDayDao: CalendarDayDao<Transaction = Self::Transaction> = calendar_day_dao,
        ConfigService: ConfigService = config_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

#[async_trait]
impl<Deps: CalendarServiceDeps> CalendarService for CalendarServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self))]
    async fn get_day(
        &self,
        tenant_id: Uuid,
        date: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<CalendarDay, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let stored = self
            .calendar_day_dao
            .find_by_date(tenant_id, date, tx.clone())
            .await?;
        // A stored entry overrides the weekly closing days.
        let active = match stored {
            Some(day) => day.active,
            None => {
                let config = self.config_service.get_config().await?;
                !config.is_closed_weekday(date.weekday())
            }
        };
        self.transaction_dao.commit(tx).await?;
        Ok(CalendarDay { date, active })
    }
}
