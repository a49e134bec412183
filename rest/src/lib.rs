use std::sync::Arc;

mod availability;
mod booking;
#[cfg(test)]
mod test;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Service error")]
    ServiceError(#[from] service::ServiceError),

    #[error("Could not serialize response: {0}")]
    SerializationError(#[from] serde_json::Error),
}

fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Result<Response, RestError> {
    let body = serde_json::to_string(body)?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

fn error_handler(result: Result<Response, RestError>) -> Response {
    use service::ServiceError;
    match result {
        Ok(response) => response,
        Err(RestError::ServiceError(ServiceError::EntityNotFound(id))) => {
            (StatusCode::NOT_FOUND, id.to_string()).into_response()
        }
        Err(RestError::ServiceError(err @ ServiceError::SlotUnavailable(_, _))) => {
            (StatusCode::CONFLICT, err.to_string()).into_response()
        }
        Err(RestError::ServiceError(
            err @ (ServiceError::InvalidTimeFormat(_) | ServiceError::ValidationError(_)),
        )) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response(),
        Err(RestError::ServiceError(ServiceError::DatabaseQueryError(err))) => {
            error!("Database error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error, please retry",
            )
                .into_response()
        }
        Err(err) => {
            error!("Internal error: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub trait RestStateDef: Clone + Send + Sync + 'static {
    type AvailabilityService: service::availability::AvailabilityService + Send + Sync + 'static;
    type BookingService: service::booking::BookingService + Send + Sync + 'static;

    fn availability_service(&self) -> Arc<Self::AvailabilityService>;
    fn booking_service(&self) -> Arc<Self::BookingService>;
}

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = "/{tenant_id}/availability", api = availability::AvailabilityApiDoc),
        (path = "/{tenant_id}/booking", api = booking::BookingApiDoc),
    ),
    tags(
        (name = "availability", description = "Bookable start times of a stylist"),
        (name = "booking", description = "Appointments"),
    )
)]
pub struct ApiDoc;

pub fn router<RestState: RestStateDef>(rest_state: RestState) -> Router {
    Router::new()
        .nest("/{tenant_id}/availability", availability::generate_route())
        .nest("/{tenant_id}/booking", booking::generate_route())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(rest_state)
}

pub async fn start_server<RestState: RestStateDef>(
    rest_state: RestState,
    address: &str,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Listening on {address}");
    axum::serve(listener, router(rest_state)).await
}
