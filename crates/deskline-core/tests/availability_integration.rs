//! Integration tests for the availability engine.
//!
//! Exercises the full workflow: catalog ingestion, schedule resolution,
//! margin-expanded overlap evaluation, catalog filtering, and the slot
//! lists a booking UI would render.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use deskline_core::{
    end_options, filter_available, is_available, start_options, AvailabilityQuery,
    BlockedInterval, Catalog, DaySchedule, MarginPolicy, Resource, SearchQuery, WeeklySchedule,
};

fn t(s: &str) -> NaiveTime {
    deskline_core::schedule::time_of_day::parse(s).unwrap()
}

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn office_with_afternoon_block() -> Resource {
    Resource {
        id: "office-1".to_string(),
        name: "Corner office".to_string(),
        capacity: 4,
        price_per_hour: Some(25.0),
        default_schedule: WeeklySchedule::weekdays(t("09:00"), t("18:00")),
        override_schedule: None,
        blocked_intervals: vec![BlockedInterval {
            from: dt("2025-01-10 14:00"),
            to: dt("2025-01-10 16:00"),
            all_day: false,
        }],
    }
}

#[test]
fn test_margin_scenario_from_booking_rules() {
    // With buffer 2h and extra pre-buffer 1h, a 14:00-16:00 reservation
    // blocks [11:00, 18:00] on 2025-01-10 (a Friday, open 09:00-18:00).
    let policy = MarginPolicy::default();
    let resource = office_with_afternoon_block();

    let ends_at_blocked_start = AvailabilityQuery {
        date: date("2025-01-10"),
        start_time: t("10:30"),
        end_time: Some(t("11:00")),
    };
    assert!(is_available(&resource, &ends_at_blocked_start, &policy));

    let inside_margin = AvailabilityQuery {
        date: date("2025-01-10"),
        start_time: t("12:00"),
        end_time: None,
    };
    assert!(!is_available(&resource, &inside_margin, &policy));
}

#[test]
fn test_slot_scenario_half_hour_grid() {
    let policy = MarginPolicy::default();
    let day = DaySchedule::open_hours(t("09:00"), t("12:00"));
    let not_today = dt("2025-01-08 10:00");

    let starts = start_options(date("2025-01-10"), &day, &policy, not_today);
    let expected: Vec<NaiveTime> = ["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
        .iter()
        .map(|s| t(s))
        .collect();
    assert_eq!(starts, expected);

    let ends = end_options(t("10:00"), &starts, &day, &policy);
    assert_eq!(ends, vec![t("11:00"), t("11:30"), t("12:00")]);

    // Every end respects the minimum duration of 2 steps.
    for end in &ends {
        assert!(*end - t("10:00") >= policy.granularity() * 2);
    }
}

#[test]
fn test_search_workflow_from_json_catalog() {
    let json = r#"{
        "resources": [
            {
                "id": "office-1",
                "name": "Corner office",
                "capacity": 4,
                "price_per_hour": 25.0,
                "default_schedule": {
                    "monday": { "open": "09:00", "close": "18:00" },
                    "tuesday": { "open": "09:00", "close": "18:00" },
                    "wednesday": { "open": "09:00", "close": "18:00" },
                    "thursday": { "open": "09:00", "close": "18:00" },
                    "friday": { "open": "09:00", "close": "18:00" },
                    "saturday": { "is_closed": true },
                    "sunday": { "is_closed": true }
                },
                "blocked_intervals": [
                    { "from": "2025-01-10T14:00:00", "to": "2025-01-10T16:00:00" }
                ]
            },
            {
                "id": "meeting-room",
                "name": "Large meeting room",
                "capacity": 12,
                "price_per_hour": 60.0,
                "default_schedule": {
                    "friday": { "open": "08:00", "close": "20:00" }
                }
            }
        ]
    }"#;
    let catalog = Catalog::from_json(json).unwrap();
    let policy = MarginPolicy::default();

    // Browsing without a time selection shows everything.
    let browse = SearchQuery::default();
    assert_eq!(
        filter_available(&catalog.resources, &browse, &policy).len(),
        2
    );

    // A morning window on the blocked Friday: the office still fits
    // (ends exactly at the expanded lower bound), so both survive.
    let morning = SearchQuery {
        date: Some(date("2025-01-10")),
        start_time: Some(t("10:00")),
        end_time: Some(t("11:00")),
        ..SearchQuery::default()
    };
    assert_eq!(
        filter_available(&catalog.resources, &morning, &policy).len(),
        2
    );

    // Mid-day the office is inside the margin-expanded block.
    let midday = SearchQuery {
        date: Some(date("2025-01-10")),
        start_time: Some(t("12:00")),
        end_time: Some(t("13:00")),
        ..SearchQuery::default()
    };
    let open_midday = filter_available(&catalog.resources, &midday, &policy);
    assert_eq!(open_midday.len(), 1);
    assert_eq!(open_midday[0].id, "meeting-room");

    // Capacity narrows it to the meeting room regardless of time.
    let large_party = SearchQuery {
        min_capacity: Some(10),
        ..SearchQuery::default()
    };
    let large = filter_available(&catalog.resources, &large_party, &policy);
    assert_eq!(large.len(), 1);
    assert_eq!(large[0].id, "meeting-room");
}

#[test]
fn test_same_day_pickers_respect_lead_time() {
    let policy = MarginPolicy::default();
    let resource = office_with_afternoon_block();
    let day = resource.day_schedule(date("2025-01-10"));
    let now = dt("2025-01-10 07:40");

    let starts = start_options(date("2025-01-10"), &day, &policy, now);
    // now + 2h = 09:40, rounded up to 10:00.
    assert_eq!(starts.first(), Some(&t("10:00")));
    for start in &starts {
        assert!(*start >= t("10:00"));
    }

    // The last possible start still needs a valid end.
    let last = *starts.last().unwrap();
    let ends = end_options(last, &starts, &day, &policy);
    assert!(ends.iter().all(|end| *end <= t("18:00")));
}

#[test]
fn test_all_day_block_wins_over_everything() {
    let policy = MarginPolicy::default();
    let mut resource = office_with_afternoon_block();
    resource.blocked_intervals.push(BlockedInterval {
        from: dt("2025-01-17 00:00"),
        to: dt("2025-01-17 23:59"),
        all_day: true,
    });

    for start in ["09:00", "12:00", "17:30"] {
        let query = AvailabilityQuery {
            date: date("2025-01-17"),
            start_time: t(start),
            end_time: None,
        };
        assert!(!is_available(&resource, &query, &policy));
    }
}
