//! Edit an existing visit. Unspecified fields keep their current value.

use fieldbook_core::{CoreError, EventDraft};

use super::{open_scheduler, parse_date, parse_time, print_event};

pub async fn run(
    id: i64,
    date: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    text: Option<String>,
    client_id: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = open_scheduler().await?;

    let current = scheduler.get(id).ok_or(CoreError::UnknownEvent(id))?.clone();

    let draft = EventDraft {
        date: date.map(parse_date).transpose()?.unwrap_or(current.date),
        start: start.map(parse_time).transpose()?.unwrap_or(current.start),
        end: end.map(parse_time).transpose()?.or(current.end),
        text: text.unwrap_or(current.text),
        client_id: client_id.or(current.client_id),
    };

    let event = scheduler.update_event(id, draft).await?;
    println!("updated:");
    print_event(&event);
    Ok(())
}
