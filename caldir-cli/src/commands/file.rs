use anyhow::Result;
use caldir_index::event::Event;
use caldir_index::{CalendarId, EventStore, FilePath};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &EventStore<Event>, path: &str, calendar: Option<&CalendarId>) -> Result<()> {
    let path = FilePath::from(path.trim_start_matches("./"));

    let events = match calendar {
        Some(calendar) => store.get_events_in_file_and_calendar(&path, calendar),
        None => store.get_events_in_file(&path),
    };

    if events.is_empty() {
        println!("{}", format!("No events indexed for {}", path).dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{} {}", event.render(), format!("[{}]", event.calendar).dimmed());
    }

    Ok(())
}
