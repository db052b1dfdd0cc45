//! Shared test helpers: scripted model provider and stub booking client.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use calchat::booking::{BookingClient, CreateBookingRequest};
use calchat::error::{CalChatError, Result};
use calchat::model::{ModelProvider, ModelReply, ModelRequest};
use calchat::types::{BookingRecord, BookingStatus, ToolInvocation};

/// A model provider that replays a scripted sequence of replies and records
/// every request it receives.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<ModelReply>>>,
    repeat: Option<ModelReply>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider that returns the same reply forever once the script runs
    /// out (used for loop-bound tests).
    pub fn repeating(reply: ModelReply) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            repeat: Some(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_text(&self, text: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ModelReply::Text(text.to_string())));
    }

    pub fn push_invocation(&self, id: &str, name: &str, arguments: serde_json::Value) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ModelReply::Invocation(ToolInvocation {
                id: id.to_string(),
                name: name.to_string(),
                arguments,
            })));
    }

    pub fn push_error(&self, error: CalChatError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn respond(&self, request: &ModelRequest) -> Result<ModelReply> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        match &self.repeat {
            Some(reply) => Ok(reply.clone()),
            None => Err(CalChatError::MalformedModelReply("script exhausted".into())),
        }
    }
}

/// An in-memory booking store standing in for the scheduling API.
pub struct StubBookingClient {
    records: Mutex<Vec<BookingRecord>>,
    failures: Mutex<VecDeque<CalChatError>>,
    next_id: AtomicI64,
    calls: AtomicU32,
}

impl StubBookingClient {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            next_id: AtomicI64::new(1),
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_records(records: Vec<BookingRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let stub = Self::new();
        *stub.records.lock().unwrap() = records;
        stub.next_id.store(next_id, Ordering::SeqCst);
        stub
    }

    /// Queue an error to be returned (once) before normal behavior resumes.
    pub fn queue_failure(&self, error: CalChatError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Number of trait calls made, including failed ones.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<BookingRecord> {
        self.records.lock().unwrap().clone()
    }

    fn begin_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookingClient for StubBookingClient {
    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<BookingRecord> {
        self.begin_call()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let start_time = request.start_time.with_timezone(&Utc);
        let record = BookingRecord {
            id,
            title: format!("Meeting with {}", request.attendee_name),
            start_time,
            end_time: start_time + Duration::minutes(30),
            reason: Some(request.reason.clone()),
            status: BookingStatus::Accepted,
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_bookings(&self, _attendee_email: &str) -> Result<Vec<BookingRecord>> {
        self.begin_call()?;
        let mut records: Vec<BookingRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status != BookingStatus::Cancelled)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.start_time);
        Ok(records)
    }

    async fn cancel_booking(&self, booking_id: i64) -> Result<()> {
        self.begin_call()?;
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.id == booking_id && r.status != BookingStatus::Cancelled)
        {
            Some(record) => {
                record.status = BookingStatus::Cancelled;
                Ok(())
            }
            None => Err(CalChatError::BookingNotFound(format!(
                "no active booking with id {booking_id}"
            ))),
        }
    }
}

/// A future booking record for seeding the stub.
pub fn future_booking(id: i64, title: &str, days_ahead: i64) -> BookingRecord {
    let start: DateTime<Utc> = Utc::now() + Duration::days(days_ahead);
    BookingRecord {
        id,
        title: title.to_string(),
        start_time: start,
        end_time: start + Duration::minutes(30),
        reason: None,
        status: BookingStatus::Accepted,
    }
}
