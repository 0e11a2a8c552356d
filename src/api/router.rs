use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{availability, booking, customer, health, service, staff, tenant};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Tenants
        .route("/api/v1/tenants", post(tenant::create_tenant))
        .route("/api/v1/tenants/by-slug/{slug}", get(tenant::get_tenant_by_slug))

        // Customers
        .route(
            "/api/v1/{tenant_id}/customers",
            post(customer::create_customer).get(customer::list_customers),
        )
        .route(
            "/api/v1/{tenant_id}/customers/{customer_id}",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route(
            "/api/v1/{tenant_id}/customers/{customer_id}/export",
            get(customer::export_customer_data),
        )

        // Services
        .route(
            "/api/v1/{tenant_id}/services",
            post(service::create_service).get(service::list_services),
        )
        .route(
            "/api/v1/{tenant_id}/services/{service_id}",
            get(service::get_service)
                .put(service::update_service)
                .delete(service::delete_service),
        )

        // Staff
        .route(
            "/api/v1/{tenant_id}/staff",
            post(staff::create_staff).get(staff::list_staff),
        )
        .route(
            "/api/v1/{tenant_id}/staff/{staff_id}",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::delete_staff),
        )

        // Availability
        .route("/api/v1/{tenant_id}/slots", get(availability::available_slots))

        // Bookings
        .route(
            "/api/v1/{tenant_id}/bookings",
            post(booking::create_booking).get(booking::list_bookings),
        )
        .route(
            "/api/v1/{tenant_id}/bookings/{booking_id}",
            get(booking::get_booking),
        )
        .route(
            "/api/v1/{tenant_id}/bookings/{booking_id}/status",
            put(booking::update_booking_status),
        )
        .route(
            "/api/v1/{tenant_id}/bookings/{booking_id}/cancel",
            post(booking::cancel_booking),
        )

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!(
                        "started processing request: {} {}",
                        request.method(),
                        request.uri().path()
                    );
                })
                .on_response(
                    |response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                        info!(
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis(),
                            "finished processing request"
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        error!("request failed: {:?}", error);
                    },
                ),
        )
        .with_state(state)
}
