use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, auth, hotel, room, booking, page};
use crate::api::site::{content, listing, room as room_page};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Guest site
        .route("/", get(listing::hotel_list))
        .route("/hotel/{id}/", get(listing::hotel_rooms))
        .route("/room/{id}/", get(room_page::room_detail).post(room_page::submit_booking))
        .route("/pages/{*path}", get(content::show_page))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Public catalog & booking
        .route("/api/v1/hotels", get(hotel::list_hotels))
        .route("/api/v1/hotels/{id}", get(hotel::get_hotel))
        .route("/api/v1/hotels/{id}/rooms", get(hotel::list_hotel_rooms))
        .route("/api/v1/rooms/{id}", get(room::get_room))
        .route("/api/v1/rooms/{id}/bookings", post(booking::create_booking))

        // Admin catalog
        .route("/api/v1/admin/hotels", get(hotel::admin_list_hotels).post(hotel::create_hotel))
        .route("/api/v1/admin/hotels/{id}", get(hotel::admin_get_hotel).put(hotel::update_hotel).delete(hotel::delete_hotel))
        .route("/api/v1/admin/hotels/{id}/images", get(hotel::list_images).post(hotel::add_image))
        .route("/api/v1/admin/hotel-images/{id}", delete(hotel::delete_image))
        .route("/api/v1/admin/rooms", get(room::admin_list_rooms).post(room::create_room))
        .route("/api/v1/admin/rooms/{id}", get(room::admin_get_room).put(room::update_room).delete(room::delete_room))

        // Admin bookings
        .route("/api/v1/admin/bookings", get(booking::list_bookings))
        .route("/api/v1/admin/bookings/{id}", get(booking::get_booking).delete(booking::delete_booking))
        .route("/api/v1/admin/bookings/{id}/status", put(booking::update_booking_status))

        // Admin pages
        .route("/api/v1/admin/pages", get(page::list_pages).post(page::create_page))
        .route("/api/v1/admin/pages/{id}", get(page::get_page).put(page::update_page).delete(page::delete_page))

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
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
