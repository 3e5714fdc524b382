//! CLI command implementations.

pub mod add;
pub mod edit;
pub mod list;
pub mod remove;
pub mod sync;

use chrono::NaiveDate;
use fieldbook_core::storage::{events_slot, sync_queue_slot};
use fieldbook_core::{
    AssumeOnline, ClockTime, Config, Event, FileSlot, HttpEventService, LoadOutcome, Scheduler,
};

pub type CliScheduler = Scheduler<HttpEventService, AssumeOnline, FileSlot>;

/// Open the scheduler over the configured remote and the on-disk slots,
/// performing the cold-start load (cache first, then best-effort remote
/// refresh and startup drain).
pub async fn open_scheduler() -> Result<CliScheduler, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (base_url, api_key) = config.remote_endpoint()?;
    let remote = HttpEventService::new(base_url, api_key);

    let mut scheduler = Scheduler::new(remote, AssumeOnline, events_slot()?, sync_queue_slot()?)?;
    if scheduler.load().await? == LoadOutcome::OfflineCache {
        // Said once here, not repeated on every mutation.
        eprintln!("offline: showing cached data; changes will sync when the connection returns");
    }
    Ok(scheduler)
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.parse().map_err(|_| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

pub fn parse_time(s: &str) -> Result<ClockTime, String> {
    ClockTime::parse(s).ok_or_else(|| format!("invalid time {s:?}, expected HH:MM"))
}

/// One-line rendering for list output.
pub fn print_event(event: &Event) {
    let end = event
        .end
        .map(|t| t.to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let marker = if event.is_local { " (unsynced)" } else { "" };
    let client = event
        .client_id
        .map(|id| format!(" client={id}"))
        .unwrap_or_default();
    println!(
        "{:>15}  {} {}-{}  {}{}{}",
        event.id, event.date, event.start, end, event.text, client, marker
    );
}
