//! Blocked intervals and margin expansion.
//!
//! Existing reservations and administrative blackouts arrive as
//! [`BlockedInterval`] values. Before overlap testing each interval is
//! expanded into an [`ExpandedInterval`] carrying the buffer margins
//! from the [`MarginPolicy`](crate::MarginPolicy): the asymmetric
//! pre-buffer is baked into the stored lower bound, and a date span
//! derived from the widened window serves as a cheap pre-filter.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::policy::MarginPolicy;

/// A time range (or one or more whole days) during which a resource
/// cannot be booked. Created by the reservation subsystem; read-only here.
///
/// `from < to` is expected but not re-validated: a zero-width interval
/// still blocks through its margins and never aborts evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedInterval {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
}

impl BlockedInterval {
    /// Apply the policy's buffer margins.
    pub fn expand(&self, policy: &MarginPolicy) -> ExpandedInterval {
        if self.all_day {
            ExpandedInterval {
                all_day: true,
                date_span: (self.from.date(), self.to.date()),
                time_span: None,
            }
        } else {
            let start = self.from - policy.pre_buffer();
            let end = self.to + policy.post_buffer();
            ExpandedInterval {
                all_day: false,
                date_span: (start.date(), end.date()),
                time_span: Some((start, end)),
            }
        }
    }
}

/// A margin-expanded blocked interval, ready for overlap testing.
///
/// `time_span` is `None` exactly when `all_day` is set: whole-day blocks
/// admit no time-of-day refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedInterval {
    pub all_day: bool,
    pub date_span: (NaiveDate, NaiveDate),
    pub time_span: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl ExpandedInterval {
    /// Date-span pre-filter: can this interval conflict on `date` at all?
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.date_span.0 <= date && date <= self.date_span.1
    }

    /// Half-open conflict test against a candidate window on `date`.
    ///
    /// An all-day block conflicts with every time of day it covers. A
    /// timed block conflicts iff `start < blocked_end && end > blocked_start`,
    /// so a candidate ending exactly at the expanded lower bound (or
    /// starting exactly at the upper bound) does not conflict.
    pub fn conflicts_with(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        if !self.covers_date(date) {
            return false;
        }
        if self.all_day {
            return true;
        }
        match self.time_span {
            Some((blocked_start, blocked_end)) => {
                let candidate_start = date.and_time(start);
                let candidate_end = date.and_time(end);
                candidate_start < blocked_end && candidate_end > blocked_start
            }
            None => false,
        }
    }
}
