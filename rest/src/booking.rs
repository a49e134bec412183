use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use rest_types::{BookingRequestTO, BookingStatusTO, BookingTO};
use serde::Deserialize;
use service::booking::{BookingRequest, BookingService};
use service::ServiceError;
use tracing::instrument;
use utoipa::{IntoParams, OpenApi};
use uuid::Uuid;

use crate::{error_handler, json_response, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/", get(get_all_bookings::<RestState>))
        .route("/", post(create_booking::<RestState>))
        .route("/{id}", get(get_booking::<RestState>))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingQuery {
    /// Only bookings of this stylist.
    pub stylist_id: Option<Uuid>,
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "",
    params(
        ("tenant_id" = Uuid, Path, description = "Salon tenant"),
        BookingQuery,
    ),
    responses(
        (status = 200, description = "All bookings, cancelled ones included", body = [BookingTO]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "booking"
)]
pub async fn get_all_bookings<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<BookingQuery>,
) -> Response {
    error_handler(
        (async {
            let bookings: Arc<[BookingTO]> = rest_state
                .booking_service()
                .get_all(tenant_id, query.stylist_id, None)
                .await?
                .iter()
                .map(BookingTO::from)
                .collect();
            json_response(StatusCode::OK, &bookings)
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("tenant_id" = Uuid, Path, description = "Salon tenant"),
        ("id" = Uuid, Path, description = "Booking id"),
    ),
    responses(
        (status = 200, description = "The booking", body = BookingTO),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "booking"
)]
pub async fn get_booking<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path((tenant_id, booking_id)): Path<(Uuid, Uuid)>,
) -> Response {
    error_handler(
        (async {
            let booking = rest_state
                .booking_service()
                .get(tenant_id, booking_id, None)
                .await?;
            json_response(StatusCode::OK, &BookingTO::from(&booking))
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    post,
    path = "",
    params(
        ("tenant_id" = Uuid, Path, description = "Salon tenant"),
    ),
    request_body = BookingRequestTO,
    responses(
        (status = 201, description = "Pending booking created", body = BookingTO),
        (status = 409, description = "Slot was taken in the meantime, pick another time"),
        (status = 422, description = "Malformed time or ids"),
        (status = 500, description = "Booking could not be stored, retry"),
    ),
    tag = "booking"
)]
pub async fn create_booking<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<BookingRequestTO>,
) -> Response {
    error_handler(
        (async {
            let request = BookingRequest::try_from(&request).map_err(ServiceError::from)?;
            let booking = rest_state
                .booking_service()
                .commit(tenant_id, &request, None)
                .await?;
            json_response(StatusCode::CREATED, &BookingTO::from(&booking))
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(get_all_bookings, get_booking, create_booking),
    components(schemas(BookingTO, BookingRequestTO, BookingStatusTO))
)]
pub struct BookingApiDoc;
