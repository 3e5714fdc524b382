//! Remote event-service port and its HTTP implementation.
//!
//! The remote store is a table-like `events` resource: select-all,
//! insert, update-by-id, delete-by-id. The HTTP client speaks the
//! PostgREST dialect the hosted backend exposes.

use std::sync::{Arc, Mutex};

use crate::event::EventPayload;
use crate::sync::codec::{encode_payload, EventRecord};
use crate::sync::types::SyncError;

/// Client for the remote `events` table.
///
/// Insert returns the stored record so callers can observe the
/// remote-assigned id; the core itself picks ids up via `fetch_all`
/// after a drain.
pub trait RemoteEventService {
    fn fetch_all(&self) -> impl std::future::Future<Output = Result<Vec<EventRecord>, SyncError>> + Send;

    fn insert(
        &self,
        payload: &EventPayload,
    ) -> impl std::future::Future<Output = Result<EventRecord, SyncError>> + Send;

    fn update(
        &self,
        id: i64,
        payload: &EventPayload,
    ) -> impl std::future::Future<Output = Result<(), SyncError>> + Send;

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<(), SyncError>> + Send;
}

/// HTTP client for a PostgREST-style `events` endpoint.
#[derive(Debug, Clone)]
pub struct HttpEventService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpEventService {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SyncError::Remote(format!("{status}: {body}")))
        }
    }
}

impl RemoteEventService for HttpEventService {
    async fn fetch_all(&self) -> Result<Vec<EventRecord>, SyncError> {
        let response = self
            .request(self.client.get(self.events_url()).query(&[("select", "*")]))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn insert(&self, payload: &EventPayload) -> Result<EventRecord, SyncError> {
        let response = self
            .request(
                self.client
                    .post(self.events_url())
                    .header("Prefer", "return=representation")
                    .json(&encode_payload(payload)),
            )
            .send()
            .await?;
        let mut rows: Vec<EventRecord> = Self::check(response).await?.json().await?;
        rows.pop()
            .ok_or_else(|| SyncError::Remote("insert returned no representation".to_string()))
    }

    async fn update(&self, id: i64, payload: &EventPayload) -> Result<(), SyncError> {
        let response = self
            .request(
                self.client
                    .patch(self.events_url())
                    .query(&[("id", format!("eq.{id}"))])
                    .json(&encode_payload(payload)),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), SyncError> {
        let response = self
            .request(
                self.client
                    .delete(self.events_url())
                    .query(&[("id", format!("eq.{id}"))]),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// In-memory remote store with a switchable failure mode. Backs the
/// deterministic offline/online tests; also handy as a sandbox backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemote {
    inner: Arc<Mutex<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    rows: Vec<EventRecord>,
    next_id: i64,
    fail: bool,
    calls: usize,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a network-style error.
    pub fn set_failing(&self, fail: bool) {
        if let Ok(mut state) = self.inner.lock() {
            state.fail = fail;
        }
    }

    /// Rows currently held by the fake store.
    pub fn rows(&self) -> Vec<EventRecord> {
        self.inner.lock().map(|s| s.rows.clone()).unwrap_or_default()
    }

    /// Number of service calls made so far, successful or not.
    pub fn call_count(&self) -> usize {
        self.inner.lock().map(|s| s.calls).unwrap_or(0)
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, SyncError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| SyncError::Remote("fake store poisoned".to_string()))?;
        state.calls += 1;
        if state.fail {
            return Err(SyncError::Remote("simulated outage".to_string()));
        }
        Ok(state)
    }
}

impl RemoteEventService for InMemoryRemote {
    async fn fetch_all(&self) -> Result<Vec<EventRecord>, SyncError> {
        Ok(self.guard()?.rows.clone())
    }

    async fn insert(&self, payload: &EventPayload) -> Result<EventRecord, SyncError> {
        let mut state = self.guard()?;
        state.next_id += 1;
        let record = EventRecord {
            id: state.next_id,
            date: payload.date.to_string(),
            start_time: Some(payload.start.to_string()),
            end_time: payload.end.map(|t| t.to_string()),
            time: None,
            text: payload.text.clone(),
            client_id: payload.client_id,
        };
        state.rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, payload: &EventPayload) -> Result<(), SyncError> {
        let mut state = self.guard()?;
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SyncError::Remote(format!("no remote row {id}")))?;
        row.date = payload.date.to_string();
        row.start_time = Some(payload.start.to_string());
        row.end_time = payload.end.map(|t| t.to_string());
        row.text = payload.text.clone();
        row.client_id = payload.client_id;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), SyncError> {
        let mut state = self.guard()?;
        state.rows.retain(|r| r.id != id);
        Ok(())
    }
}
