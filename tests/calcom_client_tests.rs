//! CalComClient HTTP mapping against a mock scheduling API.

use calchat::booking::{BookingClient, CalComClient, CreateBookingRequest};
use calchat::error::CalChatError;
use calchat::types::BookingStatus;
use chrono::DateTime;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CalComClient {
    CalComClient::new("cal-test-key").with_base_url(server.uri())
}

fn create_request() -> CreateBookingRequest {
    CreateBookingRequest {
        start_time: DateTime::parse_from_rfc3339("2030-08-15T14:00:00Z").unwrap(),
        attendee_name: "Alice".to_string(),
        attendee_email: "user@example.com".to_string(),
        reason: "quarterly sync".to_string(),
        time_zone: "America/New_York".to_string(),
    }
}

fn wire_booking(id: i64, title: &str, start: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "start": start,
        "end": "2030-08-15T14:30:00Z",
        "description": "quarterly sync",
        "status": "accepted",
    })
}

#[tokio::test]
async fn create_booking_happy_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(header("Authorization", "cal-test-key"))
        .and(header("cal-api-version", "2024-08-13"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": wire_booking(42, "Meeting with Alice", "2030-08-15T14:00:00Z"),
        })))
        .mount(&server)
        .await;

    let record = client(&server)
        .create_booking(&create_request())
        .await
        .unwrap();

    assert_eq!(record.id, 42);
    assert_eq!(record.title, "Meeting with Alice");
    assert_eq!(record.reason.as_deref(), Some("quarterly sync"));
    assert_eq!(record.status, BookingStatus::Accepted);
}

#[tokio::test]
async fn create_booking_conflict_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("slot is no longer available"),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .create_booking(&create_request())
        .await
        .unwrap_err();

    assert!(matches!(err, CalChatError::BookingRejected(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn create_booking_server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_booking(&create_request())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn list_bookings_filters_upcoming_and_sorts_chronologically() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(query_param("status", "upcoming"))
        .and(query_param("attendeeEmail", "user@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                wire_booking(2, "Review", "2030-08-20T10:00:00Z"),
                wire_booking(1, "Standup", "2030-08-16T09:00:00Z"),
            ],
        })))
        .mount(&server)
        .await;

    let records = client(&server)
        .list_bookings("user@example.com")
        .await
        .unwrap();

    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn list_bookings_empty_when_none_exist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let records = client(&server)
        .list_bookings("user@example.com")
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn cancel_booking_happy_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings/5/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    assert!(client(&server).cancel_booking(5).await.is_ok());
}

#[tokio::test]
async fn cancel_missing_booking_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings/999/cancel"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client(&server).cancel_booking(999).await.unwrap_err();
    assert!(matches!(err, CalChatError::BookingNotFound(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn rejected_credentials_surface_as_configuration_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_bookings("user@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, CalChatError::Configuration(_)));
}
