use std::sync::Arc;

use async_trait::async_trait;
use dao::treatment::TreatmentEntity;
use dao::MockTransaction;
use mockall::automock;
use uuid::Uuid;

use crate::ServiceError;

/// A salon service a customer can book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Treatment {
    pub id: Uuid,
    pub name: Arc<str>,
    pub duration_minutes: Option<u32>,
    pub buffer_minutes: Option<u32>,
}
impl From<&TreatmentEntity> for Treatment {
    fn from(entity: &TreatmentEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            duration_minutes: entity
                .duration_minutes
                .and_then(|minutes| u32::try_from(minutes).ok()),
            buffer_minutes: entity
                .buffer_minutes
                .and_then(|minutes| u32::try_from(minutes).ok()),
        }
    }
}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait TreatmentService {
    type Transaction: dao::Transaction;

    /// Deleted treatments are reported as not found.
    async fn get(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Option<Self::Transaction>,
    ) -> Result<Treatment, ServiceError>;
}
