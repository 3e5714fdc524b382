//! Sync queue management.

use fieldbook_core::DrainOutcome;

use super::open_scheduler;

/// Drain the pending queue now (the manual reconnect trigger).
pub async fn run_sync() -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = open_scheduler().await?;

    match scheduler.reconnect().await? {
        DrainOutcome::Empty => println!("nothing to sync"),
        DrainOutcome::Drained(n) => println!("synced {n} pending operation(s)"),
        DrainOutcome::Busy => println!("a sync is already in flight"),
        DrainOutcome::Offline => println!("offline; queue kept for later"),
        DrainOutcome::Failed => println!("sync failed; queue kept for retry"),
    }
    Ok(())
}

/// Show pending-queue and freshness status.
pub async fn run_status() -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = open_scheduler().await?;
    let status = scheduler.sync_status();

    println!("pending operations: {}", status.pending_count);
    println!(
        "data source:        {}",
        if status.offline_fallback {
            "local cache (offline)"
        } else {
            "remote (fresh)"
        }
    );
    match status.last_drain_at {
        Some(at) => println!("last sync:          {at}"),
        None => println!("last sync:          never (this session)"),
    }
    Ok(())
}
