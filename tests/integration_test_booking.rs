mod common;

use axum::http::{header, Method, StatusCode};
use axum::body::Body;
use axum::http::Request;
use common::{body_text, cookie_value, parse_body, TestApp};
use hotel_booking::domain::models::booking::BookingStatus;
use hotel_booking::error::{AppError, BOOKING_CONFLICT_MESSAGE};
use serde_json::json;
use tower::ServiceExt;

fn guest_form<'a>(check_in: &'a str, check_out: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("guest_name", "Anna Petrova"),
        ("guest_email", "anna@example.com"),
        ("guest_phone", "+7 999 123-45-67"),
        ("check_in", check_in),
        ("check_out", check_out),
    ]
}

#[tokio::test]
async fn test_form_booking_redirects_with_flash() {
    let app = TestApp::new().await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "Deluxe").await;
    let uri = format!("/room/{}/", room.id);

    let res = app.post_form(&uri, &guest_form("2024-06-10", "2024-06-15")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], uri.as_str());
    let flash = cookie_value(&res, "flash").expect("flash cookie set");

    let bookings = app.state.booking_repo.list(&Default::default()).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, BookingStatus::Pending);
    assert_eq!(bookings[0].guest_name, "Anna Petrova");

    let res = app.router.clone().oneshot(
        Request::builder().uri(&uri)
            .header(header::COOKIE, format!("flash={}", flash))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Your booking request has been received"));

    // Without the cookie the notice is gone.
    let html = body_text(app.get(&uri).await).await;
    assert!(!html.contains("Your booking request has been received"));
}

#[tokio::test]
async fn test_overlapping_request_conflicts() {
    let app = TestApp::new().await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "R").await;
    app.seed_booking(&room, "2024-06-10", "2024-06-15", BookingStatus::Pending).await;

    let res = app.post_form(&format!("/room/{}/", room.id), &guest_form("2024-06-12", "2024-06-13")).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let html = body_text(res).await;
    assert!(html.contains(BOOKING_CONFLICT_MESSAGE));
    assert!(html.contains("Anna Petrova"), "submitted values are kept");
    assert_eq!(app.booking_count().await, 1);

    let err = app.state.booking_service.create_booking(&room.id, &hotel_booking::domain::services::booking_service::BookingForm {
        guest_name: "B".into(),
        guest_email: "b@example.com".into(),
        guest_phone: "1".into(),
        check_in: "2024-06-12".into(),
        check_out: "2024-06-13".into(),
    }).await.unwrap_err();
    assert!(matches!(err, AppError::BookingConflict));
}

#[tokio::test]
async fn test_abutting_and_cancelled_bookings_do_not_block() {
    let app = TestApp::new().await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "R").await;
    app.seed_booking(&room, "2024-06-10", "2024-06-15", BookingStatus::Confirmed).await;
    app.seed_booking(&room, "2024-06-20", "2024-06-25", BookingStatus::Cancelled).await;

    let uri = format!("/api/v1/rooms/{}/bookings", room.id);
    let payload = |check_in: &str, check_out: &str| json!({
        "guest_name": "Guest",
        "guest_email": "guest@example.com",
        "guest_phone": "12345",
        "check_in": check_in,
        "check_out": check_out,
    });

    let res = app.post_json(&uri, &payload("2024-06-15", "2024-06-18")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "pending");
    assert!(body["id"].as_str().is_some());

    let res = app.post_json(&uri, &payload("2024-06-21", "2024-06-23")).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.post_json(&uri, &payload("2024-06-05", "2024-06-11")).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], BOOKING_CONFLICT_MESSAGE);
}

#[tokio::test]
async fn test_form_validation_rerenders_with_field_errors() {
    let app = TestApp::new().await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "R").await;
    let uri = format!("/room/{}/", room.id);

    let res = app.post_form(&uri, &guest_form("2024-05-30", "2024-06-02")).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res).await.contains("Check-in date cannot be in the past."));

    let res = app.post_form(&uri, &guest_form("2024-06-10", "2024-06-10")).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res).await.contains("Check-out date must be later than check-in date."));

    let res = app.post_form(&uri, &[("guest_name", ""), ("guest_email", "nope"), ("guest_phone", "")]).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(res).await;
    assert!(html.contains("Enter your name"));
    assert!(html.contains("Enter a valid email address."));
    assert!(html.contains("This field is required."));

    assert_eq!(app.booking_count().await, 0);
}

#[tokio::test]
async fn test_check_in_today_is_accepted() {
    let app = TestApp::with_today("2024-06-10").await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "R").await;

    let res = app.post_form(&format!("/room/{}/", room.id), &guest_form("2024-06-10", "2024-06-11")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = app.post_form(&format!("/room/{}/", room.id), &guest_form("2024-06-09", "2024-06-12")).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_room_is_not_found() {
    let app = TestApp::new().await;

    let res = app.post_form("/room/missing/", &guest_form("2024-06-10", "2024-06-11")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_text(res).await.contains("Page not found"));

    let res = app.post_json("/api/v1/rooms/missing/bookings", &json!({})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_transitions_follow_lifecycle() {
    let app = TestApp::new().await;
    let auth = app.login().await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "R").await;
    let booking = app.seed_booking(&room, "2024-06-10", "2024-06-15", BookingStatus::Pending).await;
    let uri = format!("/api/v1/admin/bookings/{}/status", booking.id);

    let res = app.admin(&auth, Method::PUT, &uri, Some(json!({"status": "confirmed"}))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "confirmed");

    let res = app.admin(&auth, Method::PUT, &uri, Some(json!({"status": "confirmed"}))).await;
    assert_eq!(res.status(), StatusCode::OK, "same status is a no-op");

    let res = app.admin(&auth, Method::PUT, &uri, Some(json!({"status": "pending"}))).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse_body(res).await["fields"][0]["field"], "status");

    let res = app.admin(&auth, Method::PUT, &uri, Some(json!({"status": "cancelled"}))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.admin(&auth, Method::PUT, &uri, Some(json!({"status": "confirmed"}))).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "cancelled is terminal");

    let stored = app.state.booking_repo.find_by_id(&booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);
    assert_eq!(stored.guest_name, booking.guest_name);
}

#[tokio::test]
async fn test_concurrent_requests_for_same_dates_book_once() {
    let app = TestApp::new().await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "R").await;
    let uri = format!("/api/v1/rooms/{}/bookings", room.id);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let router = app.router.clone();
        let uri = uri.clone();
        let payload = json!({
            "guest_name": format!("Guest {}", i),
            "guest_email": "guest@example.com",
            "guest_phone": "12345",
            "check_in": "2024-06-10",
            "check_out": "2024-06-12",
        });
        tasks.spawn(async move {
            router.oneshot(
                Request::builder().method("POST").uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string())).unwrap()
            ).await.unwrap().status()
        });
    }

    let statuses = tasks.join_all().await;
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(app.booking_count().await, 1);
}
