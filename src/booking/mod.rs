//! Scheduling API access.

mod calcom;

pub use calcom::CalComClient;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::types::BookingRecord;

/// Parameters for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub start_time: DateTime<FixedOffset>,
    pub attendee_name: String,
    pub attendee_email: String,
    pub reason: String,
    pub time_zone: String,
}

/// Typed access to the external scheduling API.
///
/// Each call issues a single outbound request; retry policy lives in the
/// executor, not here.
#[async_trait]
pub trait BookingClient: Send + Sync {
    /// Create a booking. Fails with `BookingRejected` when the API reports a
    /// validation or conflict error.
    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<BookingRecord>;

    /// Upcoming bookings for the given attendee, in chronological order.
    /// Empty when none exist.
    async fn list_bookings(&self, attendee_email: &str) -> Result<Vec<BookingRecord>>;

    /// Cancel a booking. Fails with `BookingNotFound` when the id does not
    /// name an existing, active booking.
    async fn cancel_booking(&self, booking_id: i64) -> Result<()>;
}
