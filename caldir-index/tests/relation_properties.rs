use caldir_index::{CalendarId, EventId, EventLocation, EventStore, NewEvent, RelationIndex};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, u8),
    Delete(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 0u8..12).prop_map(|(p, c)| Op::Add(p, c)),
        (0u8..12).prop_map(Op::Delete),
    ]
}

fn cal(n: u8) -> CalendarId {
    CalendarId::new(format!("cal-{n}"))
}

fn ev(n: u8) -> EventId {
    EventId::new(format!("ev-{n}"))
}

proptest! {
    #[test]
    fn forward_and_reverse_maps_mirror_each_other(ops in prop::collection::vec(op(), 0..64)) {
        let mut index = RelationIndex::new();

        for op in ops {
            match op {
                // re-parenting always goes through delete first
                Op::Add(p, c) => {
                    index.delete(&ev(c));
                    index.add(cal(p), ev(c));
                }
                Op::Delete(c) => {
                    index.delete(&ev(c));
                }
            }
        }

        let mut reverse_total = 0;
        for (parent, children) in index.grouped_by_parent() {
            prop_assert!(!children.is_empty());
            for child in &children {
                prop_assert_eq!(index.get_parent(child), Some(&parent));
            }
            reverse_total += children.len();
        }
        prop_assert_eq!(reverse_total, index.count());

        for c in 0u8..12 {
            if let Some(parent) = index.get_parent(&ev(c)) {
                prop_assert!(index.get_children(parent).contains(&ev(c)));
            }
        }
    }

    #[test]
    fn store_counts_match_contents(adds in prop::collection::vec((0u8..3, 0u8..3, 0u8..20), 0..40)) {
        let mut store = EventStore::new();
        let mut expected = std::collections::BTreeMap::new();

        for (calendar, file, id) in adds {
            let result = store.add(NewEvent {
                calendar: cal(calendar),
                location: Some(EventLocation::new(format!("file-{file}.ics"), None)),
                id: ev(id),
                event: id,
            });
            if expected.contains_key(&id) {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
                expected.insert(id, calendar);
            }
        }

        let calendars: std::collections::BTreeSet<_> = expected.values().collect();
        prop_assert_eq!(store.event_count(), expected.len());
        prop_assert_eq!(store.calendar_count(), calendars.len());

        let hydrated: usize = store.events_by_calendar().values().map(Vec::len).sum();
        prop_assert_eq!(hydrated, expected.len());
    }
}
