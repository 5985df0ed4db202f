use anyhow::Result;
use caldir_index::EventStore;
use caldir_index::event::Event;
use owo_colors::OwoColorize;

use crate::render::pluralize;

pub fn run(store: &EventStore<Event>) -> Result<()> {
    let events = store.event_count();
    let files = store.file_count();
    let calendars = store.calendar_count();

    println!(
        "{} {} in {} {} across {} {}",
        events.bold(),
        pluralize("event", events),
        files.bold(),
        pluralize("file", files),
        calendars.bold(),
        pluralize("calendar", calendars)
    );

    Ok(())
}
