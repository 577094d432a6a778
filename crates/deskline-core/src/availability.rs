//! Candidate-window availability evaluation.
//!
//! [`is_available`] is a pure function of a resource, a query, and the
//! margin policy. It short-circuits on the first disqualification and
//! follows a fail-safe-closed policy: closed or malformed schedule data
//! yields "unavailable", never an error.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::catalog::Resource;
use crate::policy::MarginPolicy;
use crate::schedule::time_of_day;

/// A candidate reservation window on a single date.
///
/// An absent `end_time` designates a point-in-time query (duration zero
/// for overlap purposes). That mode exists for UI highlighting only; a
/// reservation must not be committed without an end time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(
        default,
        with = "time_of_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
}

impl AvailabilityQuery {
    /// The effective end used for overlap testing.
    pub fn effective_end(&self) -> NaiveTime {
        self.end_time.unwrap_or(self.start_time)
    }
}

/// Decide whether `resource` can host the queried window.
///
/// Disqualifications, checked in order:
/// 1. the resolved day schedule is closed (or malformed),
/// 2. the start falls outside `[open, close)`,
/// 3. an explicit end falls outside `(open, close]`,
/// 4. a margin-expanded blocked interval conflicts (all-day blocks
///    conflict with the whole day; timed blocks use the half-open test).
pub fn is_available(resource: &Resource, query: &AvailabilityQuery, policy: &MarginPolicy) -> bool {
    let Some((open, close)) = resource.day_schedule(query.date).effective_hours() else {
        return false;
    };

    if query.start_time < open || query.start_time >= close {
        return false;
    }
    if let Some(end_time) = query.end_time {
        if end_time <= open || end_time > close {
            return false;
        }
    }

    let end = query.effective_end();
    for interval in &resource.blocked_intervals {
        if interval
            .expand(policy)
            .conflicts_with(query.date, query.start_time, end)
        {
            return false;
        }
    }
    true
}
