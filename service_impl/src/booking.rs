use std::sync::Arc;

use async_trait::async_trait;
use dao::booking::{BookingDao, BookingEntity};
use dao::{DaoError, TransactionDao};
use salon_utils::combine;
use service::{
    availability::AvailabilityService,
    booking::{Booking, BookingRequest, BookingService, BookingStatus},
    clock::ClockService,
    config::ConfigService,
    treatment::TreatmentService,
    uuid_service::UuidService,
    ServiceError, ValidationFailureItem,
};
use time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::duration::{resolve_buffer, resolve_duration};
use crate::gen_service_impl;

const BOOKING_SERVICE_PROCESS: &str = "booking-service";

gen_service_impl! {
    struct BookingServiceImpl: BookingService = BookingServiceDeps {
        BookingDao: BookingDao<Transaction = Self::Transaction> = booking_dao,
        AvailabilityService: AvailabilityService<Transaction = Self::Transaction> = availability_service,
        TreatmentService: TreatmentService<Transaction = Self::Transaction> = treatment_service,
        ConfigService: ConfigService = config_service,
        ClockService: ClockService = clock_service,
        UuidService: UuidService = uuid_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

#[async_trait]
impl<Deps: BookingServiceDeps> BookingService for BookingServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self))]
    async fn get_all(
        &self,
        tenant_id: Uuid,
        stylist_id: Option<Uuid>,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[Booking]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let bookings = self
            .booking_dao
            .find_by_tenant(tenant_id, stylist_id, tx.clone())
            .await?
            .iter()
            .map(Booking::from)
            .collect();
        self.transaction_dao.commit(tx).await?;
        Ok(bookings)
    }

    #[instrument(skip(self))]
    async fn get(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        tx: Option<Self::Transaction>,
    ) -> Result<Booking, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let booking = self
            .booking_dao
            .find_by_id(tenant_id, id, tx.clone())
            .await?
            .as_ref()
            .map(Booking::from)
            .ok_or(ServiceError::EntityNotFound(id))?;
        self.transaction_dao.commit(tx).await?;
        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn commit(
        &self,
        tenant_id: Uuid,
        request: &BookingRequest,
        tx: Option<Self::Transaction>,
    ) -> Result<Booking, ServiceError> {
        let mut validation = Vec::with_capacity(2);
        if request.stylist_id == Uuid::nil() {
            validation.push(ValidationFailureItem::InvalidValue("stylist_id".into()));
        }
        if request.treatment_id == Uuid::nil() {
            validation.push(ValidationFailureItem::InvalidValue("treatment_id".into()));
        }
        if !validation.is_empty() {
            return Err(ServiceError::ValidationError(validation.into()));
        }

        let tx = self.transaction_dao.use_transaction(tx).await?;
        let treatment = self
            .treatment_service
            .get(tenant_id, request.treatment_id, Some(tx.clone()))
            .await?;

        let available = self
            .availability_service
            .is_slot_available(
                tenant_id,
                request.stylist_id,
                &treatment,
                request.date,
                request.time,
                Some(tx.clone()),
            )
            .await?;
        if !available {
            info!(stylist_id = %request.stylist_id, "Requested slot is no longer available");
            return Err(ServiceError::SlotUnavailable(request.date, request.time));
        }

        let config = self.config_service.get_config().await?;
        let start_at = combine(request.date, request.time, config.timezone);
        let end_at = start_at
            .checked_add(Duration::minutes(i64::from(resolve_duration(&treatment))))
            .ok_or(ServiceError::SlotUnavailable(request.date, request.time))?;
        let booking = Booking {
            id: self.uuid_service.new_uuid("booking-id"),
            tenant_id,
            stylist_id: request.stylist_id,
            treatment_id: request.treatment_id,
            status: BookingStatus::Pending,
            start_at: Some(start_at),
            end_at: Some(end_at),
            buffer_minutes: resolve_buffer(&treatment),
            created: Some(self.clock_service.date_time_now()),
            version: self.uuid_service.new_uuid("booking-version"),
        };

        match self
            .booking_dao
            .create(
                &BookingEntity::from(&booking),
                BOOKING_SERVICE_PROCESS,
                tx.clone(),
            )
            .await
        {
            Ok(()) => {}
            Err(DaoError::OverlappingBooking(_)) => {
                info!(stylist_id = %request.stylist_id, "Booking rejected by the store, slot was taken concurrently");
                return Err(ServiceError::SlotUnavailable(request.date, request.time));
            }
            Err(err) => return Err(err.into()),
        }

        self.transaction_dao.commit(tx).await?;
        Ok(booking)
    }
}
