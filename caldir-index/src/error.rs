//! Error types for the caldir index.

use thiserror::Error;

use crate::ids::EventId;

/// Errors a caller can expect and recover from.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Event '{0}' is already indexed")]
    DuplicateId(EventId),

    #[error("No events indexed under '{0}'")]
    UnknownParentKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Broken internal invariants.
///
/// These are never returned to callers. They mean the indexes disagree with
/// each other, so the operation aborts via [`Corruption::raise`].
#[derive(Error, Debug)]
pub enum Corruption {
    #[error("event '{0}' has no calendar")]
    MissingCalendar(EventId),

    #[error("child '{child}' points at '{parent}' but that parent has no child set")]
    MissingChildSet { parent: String, child: String },
}

impl Corruption {
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        panic!("index corruption: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_message_names_event() {
        let err = IndexError::DuplicateId(EventId::from("abc@caldir"));
        assert_eq!(err.to_string(), "Event 'abc@caldir' is already indexed");
    }

    #[test]
    #[should_panic(expected = "index corruption: event 'x' has no calendar")]
    fn test_raise_panics_with_corruption_prefix() {
        Corruption::MissingCalendar(EventId::from("x")).raise();
    }
}
