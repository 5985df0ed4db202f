use anyhow::Result;
use caldir_index::event::Event;
use caldir_index::{CalendarId, EventStore};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &EventStore<Event>, calendar: Option<&CalendarId>, json: bool) -> Result<()> {
    let mut grouped = store.events_by_calendar();
    if let Some(calendar) = calendar {
        grouped.retain(|id, _| id == calendar);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&grouped)?);
        return Ok(());
    }

    if grouped.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (calendar, events)) in grouped.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", calendar.render());
        for event in events {
            println!("   {}", event.render());
        }
    }

    Ok(())
}
