use incidents_core::{IncidentStore, SeverityFilter, SortOrder};
use proptest::prelude::*;
use std::collections::HashSet;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn all_filter_returns_full_set(subs in arb_submissions(), sort in arb_sort()) {
        let store = build_store(&subs);
        let view = store.list_view(SeverityFilter::All, sort);
        prop_assert_eq!(view.len(), store.len());

        let ids: HashSet<u64> = view.iter().map(|i| i.id()).collect();
        let all: HashSet<u64> = store.incidents().iter().map(|i| i.id()).collect();
        prop_assert_eq!(ids, all);
    }

    #[test]
    fn severity_filter_is_exact(subs in arb_submissions(), severity in arb_severity(), sort in arb_sort()) {
        let store = build_store(&subs);
        let view = store.list_view(SeverityFilter::Only(severity), sort);
        prop_assert!(view.iter().all(|i| i.severity() == severity));

        let expected = store.incidents().iter().filter(|i| i.severity() == severity).count();
        prop_assert_eq!(view.len(), expected);
    }

    #[test]
    fn newest_is_non_increasing(subs in arb_submissions(), filter in arb_filter()) {
        let store = build_store(&subs);
        let view = store.list_view(filter, SortOrder::Newest);
        for pair in view.windows(2) {
            prop_assert!(pair[0].reported_at() >= pair[1].reported_at());
        }
    }

    #[test]
    fn oldest_is_non_decreasing(subs in arb_submissions(), filter in arb_filter()) {
        let store = build_store(&subs);
        let view = store.list_view(filter, SortOrder::Oldest);
        for pair in view.windows(2) {
            prop_assert!(pair[0].reported_at() <= pair[1].reported_at());
        }
    }

    #[test]
    fn equal_timestamps_keep_insertion_order(subs in arb_submissions(), filter in arb_filter(), sort in arb_sort()) {
        let store = build_store(&subs);
        let view = store.list_view(filter, sort);
        // Ids are assigned in insertion order, so ties must be ascending by id.
        for pair in view.windows(2) {
            if pair[0].reported_at() == pair[1].reported_at() {
                prop_assert!(pair[0].id() < pair[1].id());
            }
        }
    }

    #[test]
    fn assigned_ids_exceed_all_existing(subs in arb_submissions()) {
        let mut store = IncidentStore::new();
        let sample = build_store(&subs);
        for incident in sample.incidents() {
            let max_before = store.incidents().iter().map(|i| i.id()).max();
            let draft = incidents_core::validate::validate(
                incident.title(),
                incident.description(),
                Some(incident.severity()),
            ).unwrap();
            let created = store.add_incident_at(draft, incident.reported_at());
            match max_before {
                Some(max) => prop_assert!(created.id() > max),
                None => prop_assert_eq!(created.id(), 1),
            }
        }

        let ids: HashSet<u64> = store.incidents().iter().map(|i| i.id()).collect();
        prop_assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn list_view_does_not_touch_view_state(subs in arb_submissions(), filter in arb_filter(), sort in arb_sort()) {
        let store = build_store(&subs);
        let before = store.view();
        let _ = store.list_view(filter, sort);
        prop_assert_eq!(store.view(), before);
    }
}
