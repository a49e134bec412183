use std::sync::Arc;

use crate::{uuid_from_db, ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    treatment::{TreatmentDao, TreatmentEntity},
    DaoError,
};
use sqlx::{query_as, FromRow};
use time::{format_description::well_known::Iso8601, PrimitiveDateTime};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct TreatmentDb {
    id: Vec<u8>,
    tenant_id: Vec<u8>,
    name: String,
    duration_minutes: Option<i64>,
    buffer_minutes: Option<i64>,
    deleted: Option<String>,
    update_version: Vec<u8>,
}

impl TryFrom<&TreatmentDb> for TreatmentEntity {
    type Error = DaoError;
    fn try_from(treatment: &TreatmentDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: uuid_from_db(&treatment.id)?,
            tenant_id: uuid_from_db(&treatment.tenant_id)?,
            name: treatment.name.as_str().into(),
            duration_minutes: treatment.duration_minutes,
            buffer_minutes: treatment.buffer_minutes,
            deleted: treatment
                .deleted
                .as_ref()
                .map(|deleted| PrimitiveDateTime::parse(deleted, &Iso8601::DATE_TIME))
                .transpose()
                .map_db_error()?,
            version: uuid_from_db(&treatment.update_version)?,
        })
    }
}

pub struct TreatmentDaoImpl {
    pub _pool: Arc<sqlx::SqlitePool>,
}
impl TreatmentDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { _pool: pool }
    }
}

#[async_trait]
impl TreatmentDao for TreatmentDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<TreatmentEntity>, DaoError> {
        let tenant_id_vec = tenant_id.as_bytes().to_vec();
        let id_vec = id.as_bytes().to_vec();
        query_as::<_, TreatmentDb>(
            "SELECT id, tenant_id, name, duration_minutes, buffer_minutes, deleted, update_version FROM treatment WHERE tenant_id = ? AND id = ?",
        )
        .bind(tenant_id_vec)
        .bind(id_vec)
        .fetch_optional(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .as_ref()
        .map(TreatmentEntity::try_from)
        .transpose()
    }
}
