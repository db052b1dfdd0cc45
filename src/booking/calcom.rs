//! Cal.com-style REST client.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CalChatError, Result};
use crate::http::{shared_client, status_to_error};
use crate::types::{BookingRecord, BookingStatus};

use super::{BookingClient, CreateBookingRequest};

const DEFAULT_BASE_URL: &str = "https://api.cal.com/v2";
const API_VERSION: &str = "2024-08-13";
const CANCELLATION_REASON: &str = "Cancelled by the user via chat.";

/// Client for a Cal.com-style bookings API.
pub struct CalComClient {
    api_key: String,
    base_url: String,
    default_duration_minutes: i64,
}

impl CalComClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_duration_minutes: 30,
        }
    }

    /// Point the client at a different API endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Event length used when computing the booking's end time.
    pub fn with_default_duration_minutes(mut self, minutes: i64) -> Self {
        self.default_duration_minutes = minutes;
        self
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(val) = HeaderValue::from_str(&self.api_key) {
            headers.insert("Authorization", val);
        }
        headers.insert("cal-api-version", HeaderValue::from_static(API_VERSION));
        headers
    }
}

#[async_trait::async_trait]
impl BookingClient for CalComClient {
    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<BookingRecord> {
        let url = format!("{}/bookings", self.base_url);
        let end_time = request.start_time + chrono::Duration::minutes(self.default_duration_minutes);
        let title = format!("Meeting with {}", request.attendee_name);
        let payload = serde_json::json!({
            "start": request.start_time.to_rfc3339(),
            "end": end_time.to_rfc3339(),
            "title": title,
            "description": request.reason,
            "timeZone": request.time_zone,
            "attendee": {
                "name": request.attendee_name,
                "email": request.attendee_email,
            },
        });

        debug!(%url, start = %request.start_time, "create_booking");
        let resp = shared_client()
            .post(&url)
            .headers(self.headers())
            .json(&payload)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status {
                400 | 404 | 409 | 422 => CalChatError::BookingRejected(body),
                _ => status_to_error(status, &body),
            });
        }

        let envelope: DataEnvelope<WireBooking> = resp.json().await?;
        Ok(envelope.data.into_record())
    }

    async fn list_bookings(&self, attendee_email: &str) -> Result<Vec<BookingRecord>> {
        let url = format!("{}/bookings", self.base_url);

        debug!(%url, attendee_email, "list_bookings");
        let resp = shared_client()
            .get(&url)
            .headers(self.headers())
            .query(&[
                ("status", "upcoming"),
                ("attendeeEmail", attendee_email),
                ("take", "100"),
            ])
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        let envelope: DataEnvelope<Vec<WireBooking>> = resp.json().await?;
        let mut records: Vec<BookingRecord> = envelope
            .data
            .into_iter()
            .map(WireBooking::into_record)
            .collect();
        records.sort_by_key(|r| r.start_time);
        Ok(records)
    }

    async fn cancel_booking(&self, booking_id: i64) -> Result<()> {
        let url = format!("{}/bookings/{}/cancel", self.base_url, booking_id);
        let payload = serde_json::json!({ "cancellationReason": CANCELLATION_REASON });

        debug!(%url, booking_id, "cancel_booking");
        let resp = shared_client()
            .post(&url)
            .headers(self.headers())
            .json(&payload)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status {
                404 => CalChatError::BookingNotFound(format!(
                    "no active booking with id {booking_id}"
                )),
                400 | 409 | 422 => CalChatError::BookingRejected(body),
                _ => status_to_error(status, &body),
            });
        }

        Ok(())
    }
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Booking as the API returns it; mapped into the domain record.
#[derive(Deserialize)]
struct WireBooking {
    id: i64,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default)]
    description: Option<String>,
    status: BookingStatus,
}

impl WireBooking {
    fn into_record(self) -> BookingRecord {
        BookingRecord {
            id: self.id,
            title: self.title,
            start_time: self.start,
            end_time: self.end,
            reason: self.description,
            status: self.status,
        }
    }
}
