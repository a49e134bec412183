use std::sync::Arc;

use dao::booking::{BookingEntity, BookingStatusEntity, MockBookingDao};
use dao::{DaoError, MockTransaction, MockTransactionDao};
use mockall::predicate::{always, eq};
use service::availability::MockAvailabilityService;
use service::booking::{Booking, BookingRequest, BookingService, BookingStatus};
use service::clock::MockClockService;
use service::config::MockConfigService;
use service::treatment::MockTreatmentService;
use service::uuid_service::MockUuidService;
use service::{ServiceError, ValidationFailureItem};
use time::macros::{date, datetime, time};
use uuid::{uuid, Uuid};

use crate::booking::BookingServiceImpl;
use crate::test::error_test::{test_not_found, test_slot_unavailable, test_validation_error};
use crate::test::fixtures::{
    booking, default_booking_id, default_stylist_id, default_tenant_id, default_treatment_id,
    default_version, salon_config, treatment,
};

pub struct BookingServiceDependencies {
    pub booking_dao: MockBookingDao,
    pub availability_service: MockAvailabilityService,
    pub treatment_service: MockTreatmentService,
    pub config_service: MockConfigService,
    pub clock_service: MockClockService,
    pub uuid_service: MockUuidService,
    pub transaction_dao: MockTransactionDao,
}

impl crate::booking::BookingServiceDeps for BookingServiceDependencies {
    type Transaction = MockTransaction;
    type BookingDao = MockBookingDao;
    type AvailabilityService = MockAvailabilityService;
    type TreatmentService = MockTreatmentService;
    type ConfigService = MockConfigService;
    type ClockService = MockClockService;
    type UuidService = MockUuidService;
    type TransactionDao = MockTransactionDao;
}

impl BookingServiceDependencies {
    pub fn build_service(self) -> BookingServiceImpl<BookingServiceDependencies> {
        BookingServiceImpl {
            booking_dao: self.booking_dao.into(),
            availability_service: self.availability_service.into(),
            treatment_service: self.treatment_service.into(),
            config_service: self.config_service.into(),
            clock_service: self.clock_service.into(),
            uuid_service: self.uuid_service.into(),
            transaction_dao: self.transaction_dao.into(),
        }
    }
}

pub fn build_dependencies(available: bool) -> BookingServiceDependencies {
    let mut treatment_service = MockTreatmentService::new();
    treatment_service
        .expect_get()
        .with(
            eq(default_tenant_id()),
            eq(default_treatment_id()),
            eq(Some(MockTransaction)),
        )
        .returning(|_, _, _| Ok(treatment(Some(30), Some(15))));

    let mut availability_service = MockAvailabilityService::new();
    availability_service
        .expect_is_slot_available()
        .with(
            eq(default_tenant_id()),
            eq(default_stylist_id()),
            eq(treatment(Some(30), Some(15))),
            eq(date!(2026 - 03 - 10)),
            eq(time!(10:00)),
            eq(Some(MockTransaction)),
        )
        .returning(move |_, _, _, _, _, _| Ok(available));

    let mut config_service = MockConfigService::new();
    config_service
        .expect_get_config()
        .returning(|| Ok(salon_config()));

    let mut clock_service = MockClockService::new();
    clock_service
        .expect_date_time_now()
        .returning(|| datetime!(2026-03-01 12:00:00));

    let mut uuid_service = MockUuidService::new();
    uuid_service
        .expect_new_uuid()
        .with(eq("booking-id"))
        .returning(|_| default_booking_id());
    uuid_service
        .expect_new_uuid()
        .with(eq("booking-version"))
        .returning(|_| default_version());

    let mut transaction_dao = MockTransactionDao::new();
    transaction_dao
        .expect_use_transaction()
        .returning(|_| Ok(MockTransaction));
    transaction_dao.expect_commit().returning(|_| Ok(()));

    BookingServiceDependencies {
        booking_dao: MockBookingDao::new(),
        availability_service,
        treatment_service,
        config_service,
        clock_service,
        uuid_service,
        transaction_dao,
    }
}

fn default_request() -> BookingRequest {
    BookingRequest {
        stylist_id: default_stylist_id(),
        treatment_id: default_treatment_id(),
        date: date!(2026 - 03 - 10),
        time: time!(10:00),
    }
}

/// Booking the default request is expected to produce.
fn expected_booking() -> Booking {
    Booking {
        status: BookingStatus::Pending,
        ..booking(default_stylist_id(), datetime!(2026-03-10 10:00 UTC), 30, 15)
    }
}

#[tokio::test]
async fn test_commit() {
    let mut deps = build_dependencies(true);
    let expected_entity = BookingEntity::from(&expected_booking());
    assert_eq!(expected_entity.status, BookingStatusEntity::Pending);
    deps.booking_dao
        .expect_create()
        .with(eq(expected_entity), eq("booking-service"), eq(MockTransaction))
        .times(1)
        .returning(|_, _, _| Ok(()));
    deps.transaction_dao.checkpoint();
    deps.transaction_dao
        .expect_use_transaction()
        .returning(|_| Ok(MockTransaction));
    deps.transaction_dao
        .expect_commit()
        .times(1)
        .returning(|_| Ok(()));
    let service = deps.build_service();

    let result = service
        .commit(default_tenant_id(), &default_request(), None)
        .await
        .unwrap();

    assert_eq!(result, expected_booking());
    assert_eq!(result.end_at, Some(datetime!(2026-03-10 10:30 UTC)));
    assert_eq!(result.buffer_minutes, 15);
}

#[tokio::test]
async fn test_commit_slot_unavailable() {
    let mut deps = build_dependencies(false);
    deps.booking_dao.expect_create().never();
    deps.transaction_dao.checkpoint();
    deps.transaction_dao
        .expect_use_transaction()
        .returning(|_| Ok(MockTransaction));
    deps.transaction_dao.expect_commit().never();
    let service = deps.build_service();

    let result = service
        .commit(default_tenant_id(), &default_request(), None)
        .await;
    test_slot_unavailable(&result, date!(2026 - 03 - 10), time!(10:00));
}

#[tokio::test]
async fn test_commit_rejected_by_store() {
    let mut deps = build_dependencies(true);
    deps.booking_dao
        .expect_create()
        .times(1)
        .returning(|entity, _, _| Err(DaoError::OverlappingBooking(entity.stylist_id)));
    let service = deps.build_service();

    let result = service
        .commit(default_tenant_id(), &default_request(), None)
        .await;
    test_slot_unavailable(&result, date!(2026 - 03 - 10), time!(10:00));
}

#[tokio::test]
async fn test_commit_write_error() {
    let mut deps = build_dependencies(true);
    deps.booking_dao
        .expect_create()
        .returning(|_, _, _| Err(DaoError::DatabaseQueryError("disk full".into())));
    let service = deps.build_service();

    let result = service
        .commit(default_tenant_id(), &default_request(), None)
        .await;
    assert!(matches!(result, Err(ServiceError::DatabaseQueryError(_))));
}

#[tokio::test]
async fn test_commit_out_of_range_duration() {
    let mut deps = build_dependencies(true);
    deps.treatment_service.checkpoint();
    deps.treatment_service
        .expect_get()
        .returning(|_, _, _| Ok(treatment(Some(u32::MAX), None)));
    deps.availability_service.checkpoint();
    deps.availability_service
        .expect_is_slot_available()
        .returning(|_, _, _, _, _, _| Ok(true));
    deps.booking_dao.expect_create().never();
    deps.transaction_dao.checkpoint();
    deps.transaction_dao
        .expect_use_transaction()
        .returning(|_| Ok(MockTransaction));
    deps.transaction_dao.expect_commit().never();
    let service = deps.build_service();

    let result = service
        .commit(default_tenant_id(), &default_request(), None)
        .await;
    test_slot_unavailable(&result, date!(2026 - 03 - 10), time!(10:00));
}

#[tokio::test]
async fn test_commit_unknown_treatment() {
    let mut deps = build_dependencies(true);
    deps.treatment_service.checkpoint();
    deps.treatment_service
        .expect_get()
        .returning(|_, id, _| Err(ServiceError::EntityNotFound(id)));
    deps.availability_service.checkpoint();
    deps.availability_service
        .expect_is_slot_available()
        .never();
    deps.booking_dao.expect_create().never();
    let service = deps.build_service();

    let result = service
        .commit(default_tenant_id(), &default_request(), None)
        .await;
    test_not_found(&result, &default_treatment_id());
}

#[tokio::test]
async fn test_commit_validation() {
    let mut deps = build_dependencies(true);
    deps.booking_dao.expect_create().never();
    deps.treatment_service.checkpoint();
    deps.treatment_service.expect_get().never();
    let service = deps.build_service();

    let request = BookingRequest {
        stylist_id: Uuid::nil(),
        treatment_id: Uuid::nil(),
        ..default_request()
    };
    let result = service.commit(default_tenant_id(), &request, None).await;
    test_validation_error(
        &result,
        &ValidationFailureItem::InvalidValue("stylist_id".into()),
        2,
    );
    test_validation_error(
        &result,
        &ValidationFailureItem::InvalidValue("treatment_id".into()),
        2,
    );
}

#[tokio::test]
async fn test_get_all() {
    let mut deps = build_dependencies(true);
    deps.booking_dao
        .expect_find_by_tenant()
        .with(
            eq(default_tenant_id()),
            eq(Some(default_stylist_id())),
            eq(MockTransaction),
        )
        .returning(|_, _, _| {
            Ok(Arc::new([BookingEntity::from(&expected_booking())]))
        });
    let service = deps.build_service();

    let result = service
        .get_all(default_tenant_id(), Some(default_stylist_id()), None)
        .await
        .unwrap();
    assert_eq!(result.as_ref(), &[expected_booking()]);
}

#[tokio::test]
async fn test_get() {
    let mut deps = build_dependencies(true);
    deps.booking_dao
        .expect_find_by_id()
        .with(
            eq(default_tenant_id()),
            eq(default_booking_id()),
            always(),
        )
        .returning(|_, _, _| Ok(Some(BookingEntity::from(&expected_booking()))));
    let service = deps.build_service();

    let result = service
        .get(default_tenant_id(), default_booking_id(), None)
        .await
        .unwrap();
    assert_eq!(result, expected_booking());
}

#[tokio::test]
async fn test_get_not_found() {
    let missing_id = uuid!("C1D2E3F4-A5B6-4C7D-8E9F-0A1B2C3D4E52");
    let mut deps = build_dependencies(true);
    deps.booking_dao
        .expect_find_by_id()
        .returning(|_, _, _| Ok(None));
    let service = deps.build_service();

    let result = service.get(default_tenant_id(), missing_id, None).await;
    test_not_found(&result, &missing_id);
}
