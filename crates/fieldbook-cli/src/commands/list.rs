//! List visits, optionally filtered to one calendar day.

use super::{open_scheduler, parse_date, print_event};

pub async fn run(date: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = open_scheduler().await?;

    let events = match date {
        Some(s) => scheduler.events_on(parse_date(s)?),
        None => scheduler.events().to_vec(),
    };

    if events.is_empty() {
        println!("no visits scheduled");
        return Ok(());
    }
    for event in &events {
        print_event(event);
    }
    Ok(())
}
