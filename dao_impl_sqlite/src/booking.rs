use std::sync::Arc;

use crate::{uuid_from_db, ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    booking::{BookingDao, BookingEntity, BookingStatusEntity},
    DaoError,
};
use sqlx::{query, query_as, FromRow};
use time::{
    format_description::well_known::Iso8601, Duration, OffsetDateTime, PrimitiveDateTime,
};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct BookingDb {
    id: Vec<u8>,
    tenant_id: Vec<u8>,
    stylist_id: Vec<u8>,
    treatment_id: Vec<u8>,
    status: String,
    start_at: Option<i64>,
    end_at: Option<i64>,
    buffer_minutes: i64,
    created: Option<String>,
    update_version: Vec<u8>,
}

fn from_unix_seconds(seconds: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(seconds).ok()
}

impl TryFrom<&BookingDb> for BookingEntity {
    type Error = DaoError;
    fn try_from(booking: &BookingDb) -> Result<Self, Self::Error> {
        let status = BookingStatusEntity::parse(&booking.status).unwrap_or_else(|| {
            warn!(status = %booking.status, "Unknown booking status, treating it as pending");
            BookingStatusEntity::Pending
        });
        Ok(Self {
            id: uuid_from_db(&booking.id)?,
            tenant_id: uuid_from_db(&booking.tenant_id)?,
            stylist_id: uuid_from_db(&booking.stylist_id)?,
            treatment_id: uuid_from_db(&booking.treatment_id)?,
            status,
            start_at: booking.start_at.and_then(from_unix_seconds),
            end_at: booking.end_at.and_then(from_unix_seconds),
            buffer_minutes: u32::try_from(booking.buffer_minutes).unwrap_or_default(),
            created: booking
                .created
                .as_deref()
                .and_then(|created| PrimitiveDateTime::parse(created, &Iso8601::DATE_TIME).ok()),
            version: uuid_from_db(&booking.update_version)?,
        })
    }
}

pub struct BookingDaoImpl {
    pub _pool: Arc<sqlx::SqlitePool>,
}
impl BookingDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { _pool: pool }
    }
}

#[async_trait]
impl BookingDao for BookingDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
        stylist_id: Option<Uuid>,
        tx: Self::Transaction,
    ) -> Result<Arc<[BookingEntity]>, DaoError> {
        let tenant_id_vec = tenant_id.as_bytes().to_vec();
        let stylist_id_vec = stylist_id.map(|stylist_id| stylist_id.as_bytes().to_vec());
        query_as::<_, BookingDb>(
            "SELECT id, tenant_id, stylist_id, treatment_id, status, start_at, end_at, buffer_minutes, created, update_version FROM booking WHERE tenant_id = ? AND (? IS NULL OR stylist_id = ?) ORDER BY start_at",
        )
        .bind(tenant_id_vec)
        .bind(stylist_id_vec.clone())
        .bind(stylist_id_vec)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(BookingEntity::try_from)
        .collect::<Result<Arc<[BookingEntity]>, DaoError>>()
    }

    async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<BookingEntity>, DaoError> {
        let tenant_id_vec = tenant_id.as_bytes().to_vec();
        let id_vec = id.as_bytes().to_vec();
        query_as::<_, BookingDb>(
            "SELECT id, tenant_id, stylist_id, treatment_id, status, start_at, end_at, buffer_minutes, created, update_version FROM booking WHERE tenant_id = ? AND id = ?",
        )
        .bind(tenant_id_vec)
        .bind(id_vec)
        .fetch_optional(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .as_ref()
        .map(BookingEntity::try_from)
        .transpose()
    }

    async fn create(
        &self,
        entity: &BookingEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let (Some(start_at), Some(end_at)) = (entity.start_at, entity.end_at) else {
            return Err(DaoError::DatabaseQueryError(
                "booking without start or end time".into(),
            ));
        };
        let occupied_until = end_at
            .checked_add(Duration::minutes(i64::from(entity.buffer_minutes)))
            .ok_or_else(|| DaoError::DatabaseQueryError("booking buffer out of range".into()))?;
        let start_at = start_at.unix_timestamp();
        let end_at = end_at.unix_timestamp();
        let occupied_until = occupied_until.unix_timestamp();

        let id_vec = entity.id.as_bytes().to_vec();
        let tenant_id_vec = entity.tenant_id.as_bytes().to_vec();
        let stylist_id_vec = entity.stylist_id.as_bytes().to_vec();
        let treatment_id_vec = entity.treatment_id.as_bytes().to_vec();
        let created = entity
            .created
            .as_ref()
            .map(|created| created.format(&Iso8601::DATE_TIME))
            .transpose()
            .map_db_error()?;
        let version_vec = entity.version.as_bytes().to_vec();
        let status = entity.status.as_str();

        // Overlap check and insert must stay a single statement.
        let result = query(
            "INSERT INTO booking (id, tenant_id, stylist_id, treatment_id, status, start_at, end_at, buffer_minutes, occupied_until, created, update_timestamp, update_process, update_version)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, ?, ?
             WHERE ? = 'cancelled' OR NOT EXISTS (
                 SELECT 1 FROM booking
                 WHERE tenant_id = ? AND stylist_id = ? AND status != 'cancelled'
                   AND start_at IS NOT NULL AND end_at IS NOT NULL AND occupied_until IS NOT NULL
                   AND start_at < end_at
                   AND start_at < ? AND ? < occupied_until
             )",
        )
        .bind(id_vec)
        .bind(tenant_id_vec.clone())
        .bind(stylist_id_vec.clone())
        .bind(treatment_id_vec)
        .bind(status)
        .bind(start_at)
        .bind(end_at)
        .bind(i64::from(entity.buffer_minutes))
        .bind(occupied_until)
        .bind(created)
        .bind(process)
        .bind(version_vec)
        .bind(status)
        .bind(tenant_id_vec)
        .bind(stylist_id_vec)
        .bind(occupied_until)
        .bind(start_at)
        .execute(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?;

        if result.rows_affected() == 0 {
            return Err(DaoError::OverlappingBooking(entity.stylist_id));
        }
        Ok(())
    }
}
