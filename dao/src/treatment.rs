use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::DaoError;

/// A bookable salon service. Durations are stored as raw integers and
/// validated when mapped into the service layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreatmentEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: Arc<str>,
    pub duration_minutes: Option<i64>,
    pub buffer_minutes: Option<i64>,
    pub deleted: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait TreatmentDao {
    type Transaction: crate::Transaction;

    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<TreatmentEntity>, DaoError>;
}
