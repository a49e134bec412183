use async_trait::async_trait;
use dao::treatment::TreatmentDao;
use dao::TransactionDao;
use service::{
    treatment::{Treatment, TreatmentService},
    ServiceError,
};
use tracing::instrument;
use uuid::Uuid;

use crate::gen_service_impl;

gen_service_impl! {
    struct TreatmentServiceImpl: TreatmentService = TreatmentServiceDeps {
        TreatmentDao: TreatmentDao<Transaction = Self::Transaction> = treatment_dao,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

#[async_trait]
impl<Deps: TreatmentServiceDeps> TreatmentService for TreatmentServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self))]
    async fn get(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Option<Self::Transaction>,
    ) -> Result<Treatment, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let treatment = self
            .treatment_dao
            .find_by_id(tenant_id, id, tx.clone())
            .await?
            .filter(|treatment| treatment.deleted.is_none())
            .as_ref()
            .map(Treatment::from)
            .ok_or(ServiceError::EntityNotFound(id))?;
        self.transaction_dao.commit(tx).await?;
        Ok(treatment)
    }
}
