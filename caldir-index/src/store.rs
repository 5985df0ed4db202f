//! In-memory event store.
//!
//! Holds events by id and keeps two relation indexes beside them: which calendar
//! each event belongs to, and which file (and line) it was read from. Every event
//! has exactly one calendar and at most one file.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::error::{Corruption, IndexError, IndexResult};
use crate::ids::{CalendarId, EventId, FilePath};
use crate::relation::RelationIndex;

/// Where an event came from on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLocation {
    pub path: FilePath,
    pub line: Option<usize>,
}

impl EventLocation {
    pub fn new(path: impl Into<FilePath>, line: Option<usize>) -> Self {
        EventLocation {
            path: path.into(),
            line,
        }
    }
}

/// Input to [`EventStore::add`].
#[derive(Debug, Clone)]
pub struct NewEvent<T> {
    pub calendar: CalendarId,
    /// `None` for events with no file behind them (e.g. remote-only events)
    pub location: Option<EventLocation>,
    pub id: EventId,
    pub event: T,
}

/// An event together with everything the store knows about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredEvent<T> {
    pub id: EventId,
    pub event: T,
    pub location: Option<EventLocation>,
    pub calendar: CalendarId,
}

#[derive(Debug, Clone)]
pub struct EventStore<T> {
    events: BTreeMap<EventId, T>,
    calendars: RelationIndex<CalendarId, EventId>,
    files: RelationIndex<FilePath, EventId>,
    lines: BTreeMap<EventId, usize>,
}

impl<T> Default for EventStore<T> {
    fn default() -> Self {
        EventStore {
            events: BTreeMap::new(),
            calendars: RelationIndex::default(),
            files: RelationIndex::default(),
            lines: BTreeMap::new(),
        }
    }
}

impl<T> EventStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.calendars.clear();
        self.files.clear();
        self.lines.clear();
    }

    /// Index a new event. Fails without touching any state if the id is taken.
    pub fn add(&mut self, new_event: NewEvent<T>) -> IndexResult<()> {
        let NewEvent {
            calendar,
            location,
            id,
            event,
        } = new_event;

        if self.events.contains_key(&id) {
            return Err(IndexError::DuplicateId(id));
        }

        debug!(event = %id, calendar = %calendar, "indexing event");

        self.events.insert(id.clone(), event);
        self.calendars.add(calendar, id.clone());

        if let Some(EventLocation { path, line }) = location {
            self.files.add(path, id.clone());
            if let Some(line) = line {
                self.lines.insert(id, line);
            }
        }

        Ok(())
    }

    /// Remove an event from every index. Returns `None` if it wasn't stored.
    pub fn delete(&mut self, id: &EventId) -> Option<T> {
        let event = self.events.remove(id)?;

        self.calendars.delete(id);
        self.files.delete(id);
        self.lines.remove(id);

        debug!(event = %id, "removed event");
        Some(event)
    }

    pub fn get_by_id(&self, id: &EventId) -> Option<&T> {
        self.events.get(id)
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.events.contains_key(id)
    }

    pub fn get_calendar_id_for_event_id(&self, id: &EventId) -> Option<&CalendarId> {
        self.calendars.get_parent(id)
    }

    pub fn get_file_path_for_event_id(&self, id: &EventId) -> Option<&FilePath> {
        self.files.get_parent(id)
    }

    pub fn get_line_for_event_id(&self, id: &EventId) -> Option<usize> {
        self.lines.get(id).copied()
    }

    /// Delete every event read from `path`. Returns the ids that were removed.
    pub fn delete_events_at_path(&mut self, path: &FilePath) -> BTreeSet<EventId> {
        let ids = self.files.get_children(path);
        for id in &ids {
            self.delete(id);
        }

        debug!(path = %path, count = ids.len(), "removed events at path");
        ids
    }

    /// Re-key events from `old` to `new` after the file was renamed on disk.
    pub fn rename_file_for_events(&mut self, old: &FilePath, new: &FilePath) -> IndexResult<()> {
        let ids = self.files.get_children(old);
        self.files.rename_parent_key(old, new.clone())?;
        for id in &ids {
            self.files.repoint(id, new.clone());
        }

        debug!(from = %old, to = %new, count = ids.len(), "renamed file for events");
        Ok(())
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.parent_count()
    }

    pub fn calendar_count(&self) -> usize {
        self.calendars.parent_count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Calendars with at least one event.
    pub fn calendars(&self) -> impl Iterator<Item = &CalendarId> {
        self.calendars.parents()
    }

    /// Files with at least one event.
    pub fn files(&self) -> impl Iterator<Item = &FilePath> {
        self.files.parents()
    }

    fn location_of(&self, id: &EventId) -> Option<EventLocation> {
        self.files.get_parent(id).map(|path| EventLocation {
            path: path.clone(),
            line: self.lines.get(id).copied(),
        })
    }
}

impl<T: Clone> EventStore<T> {
    /// Everything known about one event, or `None` if it (or its calendar) is missing.
    pub fn get_event_details(&self, id: &EventId) -> Option<StoredEvent<T>> {
        let event = self.events.get(id)?;
        let calendar = self.calendars.get_parent(id)?;

        Some(StoredEvent {
            id: id.clone(),
            event: event.clone(),
            location: self.location_of(id),
            calendar: calendar.clone(),
        })
    }

    pub fn get_events_in_file(&self, path: &FilePath) -> Vec<StoredEvent<T>> {
        self.fetch(&self.files.get_children(path))
    }

    pub fn get_events_in_calendar(&self, calendar: &CalendarId) -> Vec<StoredEvent<T>> {
        self.fetch(&self.calendars.get_children(calendar))
    }

    pub fn get_events_in_file_and_calendar(
        &self,
        path: &FilePath,
        calendar: &CalendarId,
    ) -> Vec<StoredEvent<T>> {
        let in_calendar = self.calendars.get_children(calendar);
        let ids: BTreeSet<EventId> = self
            .files
            .get_children(path)
            .into_iter()
            .filter(|id| in_calendar.contains(id))
            .collect();

        self.fetch(&ids)
    }

    pub fn events_by_calendar(&self) -> BTreeMap<CalendarId, Vec<StoredEvent<T>>> {
        self.calendars
            .grouped_by_parent()
            .into_iter()
            .map(|(calendar, ids)| (calendar, self.fetch(&ids)))
            .collect()
    }

    /// Hydrate ids into stored events. Ids no longer in the store are skipped;
    /// an id without a calendar means the indexes are corrupt.
    fn fetch<'a>(&self, ids: impl IntoIterator<Item = &'a EventId>) -> Vec<StoredEvent<T>> {
        ids.into_iter()
            .filter_map(|id| {
                let event = self.events.get(id)?;
                let calendar = match self.calendars.get_parent(id) {
                    Some(calendar) => calendar.clone(),
                    None => Corruption::MissingCalendar(id.clone()).raise(),
                };

                Some(StoredEvent {
                    id: id.clone(),
                    event: event.clone(),
                    location: self.location_of(id),
                    calendar,
                })
            })
            .collect()
    }
}
