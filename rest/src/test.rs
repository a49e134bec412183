use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use mockall::predicate::{always, eq};
use service::availability::{MockAvailabilityService, SlotAvailability};
use service::booking::{Booking, BookingRequest, BookingStatus, MockBookingService};
use service::ServiceError;
use time::macros::{date, datetime, time};
use tower::ServiceExt;
use uuid::{uuid, Uuid};

use crate::{router, RestStateDef};

#[derive(Clone)]
struct TestState {
    availability_service: Arc<MockAvailabilityService>,
    booking_service: Arc<MockBookingService>,
}

impl RestStateDef for TestState {
    type AvailabilityService = MockAvailabilityService;
    type BookingService = MockBookingService;

    fn availability_service(&self) -> Arc<Self::AvailabilityService> {
        self.availability_service.clone()
    }
    fn booking_service(&self) -> Arc<Self::BookingService> {
        self.booking_service.clone()
    }
}

fn tenant_id() -> Uuid {
    uuid!("5B0A6C1E-2F3D-4A8B-9C7E-1D2F3A4B5C60")
}
fn stylist_id() -> Uuid {
    uuid!("A4C2E8F0-6B3D-4E19-8F27-1D5C9B0A3E21")
}
fn treatment_id() -> Uuid {
    uuid!("0F9E8D7C-6B5A-4938-8271-605F4E3D2C11")
}

fn pending_booking() -> Booking {
    Booking {
        id: uuid!("C1D2E3F4-A5B6-4C7D-8E9F-0A1B2C3D4E51"),
        tenant_id: tenant_id(),
        stylist_id: stylist_id(),
        treatment_id: treatment_id(),
        status: BookingStatus::Pending,
        start_at: Some(datetime!(2026-03-10 10:00 UTC)),
        end_at: Some(datetime!(2026-03-10 10:30 UTC)),
        buffer_minutes: 15,
        created: Some(datetime!(2026-03-01 12:00:00)),
        version: uuid!("D1E2F3A4-B5C6-4D7E-8F9A-0B1C2D3E4F52"),
    }
}

async fn send(
    availability_service: MockAvailabilityService,
    booking_service: MockBookingService,
    request: Request<Body>,
) -> (StatusCode, Vec<u8>) {
    let state = TestState {
        availability_service: availability_service.into(),
        booking_service: booking_service.into(),
    };
    let response: Response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn post_booking(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/{}/booking", tenant_id()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn booking_body(time: &str) -> String {
    format!(
        r#"{{"stylist_id":"{}","treatment_id":"{}","date":"2026-03-10","time":"{time}"}}"#,
        stylist_id(),
        treatment_id()
    )
}

#[tokio::test]
async fn test_slot_grid() {
    let mut availability_service = MockAvailabilityService::new();
    availability_service
        .expect_get_slot_grid()
        .with(
            eq(tenant_id()),
            eq(stylist_id()),
            eq(treatment_id()),
            eq(date!(2026 - 03 - 10)),
            eq(None),
        )
        .returning(|_, _, _, _, _| {
            Ok(Arc::new([
                SlotAvailability {
                    time: time!(09:00),
                    available: true,
                },
                SlotAvailability {
                    time: time!(09:30),
                    available: false,
                },
            ]))
        });

    let request = Request::builder()
        .uri(format!(
            "/{}/availability/{}/2026-03-10?treatment_id={}",
            tenant_id(),
            stylist_id(),
            treatment_id()
        ))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(availability_service, MockBookingService::new(), request).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"time": "09:00", "available": true},
            {"time": "09:30", "available": false},
        ])
    );
}

#[tokio::test]
async fn test_create_booking() {
    let mut booking_service = MockBookingService::new();
    booking_service
        .expect_commit()
        .with(
            eq(tenant_id()),
            eq(BookingRequest {
                stylist_id: stylist_id(),
                treatment_id: treatment_id(),
                date: date!(2026 - 03 - 10),
                time: time!(10:00),
            }),
            eq(None),
        )
        .times(1)
        .returning(|_, _, _| Ok(pending_booking()));

    let (status, body) = send(
        MockAvailabilityService::new(),
        booking_service,
        post_booking(&booking_body("10:00")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["start_at"], "2026-03-10T10:00:00Z");
    assert_eq!(json["end_at"], "2026-03-10T10:30:00Z");
}

#[tokio::test]
async fn test_create_booking_slot_taken() {
    let mut booking_service = MockBookingService::new();
    booking_service
        .expect_commit()
        .returning(|_, request, _| {
            Err(ServiceError::SlotUnavailable(request.date, request.time))
        });

    let (status, _) = send(
        MockAvailabilityService::new(),
        booking_service,
        post_booking(&booking_body("10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_booking_malformed_time() {
    let mut booking_service = MockBookingService::new();
    booking_service.expect_commit().never();

    let (status, _) = send(
        MockAvailabilityService::new(),
        booking_service,
        post_booking(&booking_body("25:99")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_booking_database_error() {
    let mut booking_service = MockBookingService::new();
    booking_service.expect_commit().returning(|_, _, _| {
        Err(ServiceError::DatabaseQueryError(
            dao::DaoError::DatabaseQueryError("locked".into()),
        ))
    });

    let (status, body) = send(
        MockAvailabilityService::new(),
        booking_service,
        post_booking(&booking_body("10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Database error, please retry");
}

#[tokio::test]
async fn test_get_booking_not_found() {
    let missing_id = uuid!("C1D2E3F4-A5B6-4C7D-8E9F-0A1B2C3D4E52");
    let mut booking_service = MockBookingService::new();
    booking_service
        .expect_get()
        .with(eq(tenant_id()), eq(missing_id), always())
        .returning(|_, id, _| Err(ServiceError::EntityNotFound(id)));

    let request = Request::builder()
        .uri(format!("/{}/booking/{missing_id}", tenant_id()))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(MockAvailabilityService::new(), booking_service, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_all_bookings() {
    let mut booking_service = MockBookingService::new();
    booking_service
        .expect_get_all()
        .with(eq(tenant_id()), eq(Some(stylist_id())), eq(None))
        .returning(|_, _, _| Ok(Arc::new([pending_booking()])));

    let request = Request::builder()
        .uri(format!("/{}/booking?stylist_id={}", tenant_id(), stylist_id()))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(MockAvailabilityService::new(), booking_service, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().map(|bookings| bookings.len()), Some(1));
}
