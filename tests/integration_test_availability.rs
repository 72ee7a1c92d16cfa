mod common;

use axum::http::StatusCode;
use common::{body_text, parse_body, TestApp};
use hotel_booking::domain::models::booking::BookingStatus;
use serde_json::Value;

fn ids(body: &Value) -> Vec<String> {
    body.as_array().unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_no_range_returns_every_hotel_and_room() {
    let app = TestApp::new().await;
    let grand = app.seed_hotel("Grand").await;
    let _empty = app.seed_hotel("Empty Inn").await;
    let room = app.seed_room(&grand, "Standard").await;
    app.seed_booking(&room, "2024-06-10", "2024-06-15", BookingStatus::Confirmed).await;

    let res = app.get("/api/v1/hotels").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(ids(&parse_body(res).await).len(), 2);

    let res = app.get(&format!("/api/v1/hotels/{}/rooms", grand.id)).await;
    assert_eq!(ids(&parse_body(res).await), vec![room.id.clone()]);

    // A single bound disables filtering.
    let res = app.get(&format!("/api/v1/hotels/{}/rooms?check_in=2024-06-12", grand.id)).await;
    assert_eq!(ids(&parse_body(res).await), vec![room.id]);
}

#[tokio::test]
async fn test_confirmed_booking_june_scenarios() {
    let app = TestApp::new().await;
    let hotel = app.seed_hotel("Grand").await;
    let room = app.seed_room(&hotel, "R").await;
    let booking = app.seed_booking(&room, "2024-06-10", "2024-06-15", BookingStatus::Confirmed).await;

    let rooms_for = |check_in: &str, check_out: &str| {
        format!("/api/v1/hotels/{}/rooms?check_in={}&check_out={}", hotel.id, check_in, check_out)
    };

    let abutting = parse_body(app.get(&rooms_for("2024-06-15", "2024-06-20")).await).await;
    assert_eq!(ids(&abutting), vec![room.id.clone()], "check-out day is free for the next guest");

    let contained = parse_body(app.get(&rooms_for("2024-06-12", "2024-06-14")).await).await;
    assert!(ids(&contained).is_empty());

    let partial = parse_body(app.get(&rooms_for("2024-06-05", "2024-06-11")).await).await;
    assert!(ids(&partial).is_empty());

    app.state.booking_service.change_status(&booking.id, BookingStatus::Cancelled).await.unwrap();

    let after_cancel = parse_body(app.get(&rooms_for("2024-06-12", "2024-06-14")).await).await;
    assert_eq!(ids(&after_cancel), vec![room.id]);
}

#[tokio::test]
async fn test_hotel_survives_only_with_a_free_room() {
    let app = TestApp::new().await;
    let full = app.seed_hotel("Full House").await;
    let partly = app.seed_hotel("Partly Booked").await;
    let _no_rooms = app.seed_hotel("No Rooms").await;

    let only_room = app.seed_room(&full, "Only").await;
    let busy = app.seed_room(&partly, "Busy").await;
    let _free = app.seed_room(&partly, "Free").await;

    app.seed_booking(&only_room, "2024-06-10", "2024-06-15", BookingStatus::Pending).await;
    app.seed_booking(&busy, "2024-06-09", "2024-06-12", BookingStatus::Confirmed).await;

    let res = app.get("/api/v1/hotels?check_in=2024-06-11&check_out=2024-06-13").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(ids(&parse_body(res).await), vec![partly.id]);
}

#[tokio::test]
async fn test_json_rejects_inverted_or_malformed_range() {
    let app = TestApp::new().await;
    app.seed_hotel("Grand").await;

    let res = app.get("/api/v1/hotels?check_in=2024-06-12&check_out=2024-06-10").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = parse_body(res).await;
    assert_eq!(body["fields"][0]["field"], "check_out");

    let res = app.get("/api/v1/hotels?check_in=12.06.2024&check_out=2024-06-14").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_html_listing_filters_and_reports_bad_range() {
    let app = TestApp::new().await;
    let booked = app.seed_hotel("Booked Palace").await;
    let open = app.seed_hotel("Open Lodge").await;
    let room = app.seed_room(&booked, "Suite").await;
    app.seed_room(&open, "Twin").await;
    app.seed_booking(&room, "2024-06-10", "2024-06-15", BookingStatus::Pending).await;

    let res = app.get("/?check_in=2024-06-11&check_out=2024-06-12").await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Open Lodge"));
    assert!(!html.contains("Booked Palace"));

    // Empty form fields mean no filter.
    let html = body_text(app.get("/?check_in=&check_out=").await).await;
    assert!(html.contains("Open Lodge") && html.contains("Booked Palace"));

    let res = app.get("/?check_in=2024-06-12&check_out=2024-06-11").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let html = body_text(res).await;
    assert!(html.contains("Check-out date must be later than check-in date."));
    assert!(html.contains("Booked Palace"), "invalid range falls back to the unfiltered list");
}

#[tokio::test]
async fn test_html_room_list_of_one_hotel() {
    let app = TestApp::new().await;
    let hotel = app.seed_hotel("Grand").await;
    let taken = app.seed_room(&hotel, "Taken Room").await;
    app.seed_room(&hotel, "Vacant Room").await;
    app.seed_booking(&taken, "2024-06-10", "2024-06-15", BookingStatus::Confirmed).await;

    let res = app.get(&format!("/hotel/{}/?check_in=2024-06-12&check_out=2024-06-14", hotel.id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Vacant Room"));
    assert!(!html.contains("Taken Room"));
    assert!(html.contains("3000.00"));

    let res = app.get("/hotel/does-not-exist/").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
