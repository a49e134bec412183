use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use rest_types::SlotAvailabilityTO;
use serde::Deserialize;
use service::availability::AvailabilityService;
use time::Date;
use tracing::instrument;
use utoipa::{IntoParams, OpenApi};
use uuid::Uuid;

use crate::{error_handler, json_response, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new().route("/{stylist_id}/{date}", get(get_slot_grid::<RestState>))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlotGridQuery {
    /// Treatment the customer wants to book.
    pub treatment_id: Uuid,
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/{stylist_id}/{date}",
    params(
        ("tenant_id" = Uuid, Path, description = "Salon tenant"),
        ("stylist_id" = Uuid, Path, description = "Stylist to book"),
        ("date" = String, Path, description = "Local date, YYYY-MM-DD", example = "2026-03-10"),
        SlotGridQuery,
    ),
    responses(
        (status = 200, description = "Slot grid in start time order", body = [SlotAvailabilityTO]),
        (status = 404, description = "Treatment not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "availability"
)]
pub async fn get_slot_grid<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Path((tenant_id, stylist_id, date)): Path<(Uuid, Uuid, Date)>,
    Query(query): Query<SlotGridQuery>,
) -> Response {
    error_handler(
        (async {
            let slots: Arc<[SlotAvailabilityTO]> = rest_state
                .availability_service()
                .get_slot_grid(tenant_id, stylist_id, query.treatment_id, date, None)
                .await?
                .iter()
                .map(SlotAvailabilityTO::from)
                .collect();
            json_response(StatusCode::OK, &slots)
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(get_slot_grid),
    components(schemas(SlotAvailabilityTO))
)]
pub struct AvailabilityApiDoc;
