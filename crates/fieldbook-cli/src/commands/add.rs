//! Book a new visit.

use fieldbook_core::EventDraft;

use super::{open_scheduler, parse_date, parse_time, print_event};

pub async fn run(
    date: &str,
    start: &str,
    end: Option<&str>,
    text: String,
    client_id: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let draft = EventDraft {
        date: parse_date(date)?,
        start: parse_time(start)?,
        end: end.map(parse_time).transpose()?,
        text,
        client_id,
    };

    let mut scheduler = open_scheduler().await?;
    let event = scheduler.create_event(draft).await?;

    println!("booked:");
    print_event(&event);
    Ok(())
}
