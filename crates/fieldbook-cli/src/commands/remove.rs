//! Cancel a visit.

use super::open_scheduler;

pub async fn run(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = open_scheduler().await?;
    scheduler.delete_event(id).await?;
    println!("removed event {id}");
    Ok(())
}
