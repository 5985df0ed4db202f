//! Identifier newtypes.
//!
//! Event ids, calendar ids and file path keys are all plain strings underneath,
//! but they play different roles in the indexes. Keeping them as separate types
//! means a calendar id can never be used to look up a file.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                $name(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Unique id of an indexed event (uid, plus recurrence id for overrides).
    EventId
);

string_id!(
    /// Calendar an event belongs to (the calendar directory's slug).
    CalendarId
);

string_id!(
    /// Location of an event's source file, relative to the calendar root.
    FilePath
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(EventId::from("a"), EventId::new(String::from("a")));
        assert!(CalendarId::from("a") < CalendarId::from("b"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&FilePath::from("work/standup.ics")).unwrap();
        assert_eq!(json, "\"work/standup.ics\"");
    }
}
