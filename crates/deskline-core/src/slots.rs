//! Bookable slot generation for UI time pickers.
//!
//! Start options run from the day's opening time at the policy's
//! granularity, strictly before the closing time, with a lead-time clamp
//! when the queried date is "today". End options for a selected start
//! begin `minimum_slots` steps later and run up to and including the
//! closing time. Both are built on [`SlotIter`], a finite restartable
//! iterator: cloning it and re-running always yields the same sequence.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::policy::MarginPolicy;
use crate::schedule::DaySchedule;

/// Iterator over equally spaced times of day.
///
/// Stops before (or, for end options, at) the terminal bound and never
/// wraps past midnight.
#[derive(Debug, Clone)]
pub struct SlotIter {
    next: Option<NaiveTime>,
    end: NaiveTime,
    step: Duration,
    inclusive: bool,
}

impl SlotIter {
    fn new(first: NaiveTime, end: NaiveTime, step: Duration, inclusive: bool) -> Self {
        Self {
            next: Some(first),
            end,
            step,
            inclusive,
        }
    }

    fn empty() -> Self {
        Self {
            next: None,
            end: NaiveTime::MIN,
            step: Duration::zero(),
            inclusive: false,
        }
    }
}

impl Iterator for SlotIter {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        let current = self.next.take()?;
        let in_range = if self.inclusive {
            current <= self.end
        } else {
            current < self.end
        };
        if !in_range {
            return None;
        }
        let (stepped, wrapped) = current.overflowing_add_signed(self.step);
        if wrapped == 0 {
            self.next = Some(stepped);
        }
        Some(current)
    }
}

/// Round a time up to the next multiple of `granularity_minutes` past
/// midnight. `None` when the rounded value would leave the day.
fn round_up(time: NaiveTime, granularity_minutes: i64) -> Option<NaiveTime> {
    let mut total = (time.hour() * 60 + time.minute()) as i64;
    if time.second() > 0 {
        total += 1;
    }
    let rounded = ((total + granularity_minutes - 1) / granularity_minutes) * granularity_minutes;
    if rounded >= 24 * 60 {
        return None;
    }
    NaiveTime::from_hms_opt((rounded / 60) as u32, (rounded % 60) as u32, 0)
}

/// Lazy form of [`start_options`].
pub fn start_slots(
    date: NaiveDate,
    schedule: &DaySchedule,
    policy: &MarginPolicy,
    now: NaiveDateTime,
) -> SlotIter {
    if policy.slot_granularity_minutes <= 0 {
        return SlotIter::empty();
    }
    let Some((open, close)) = schedule.effective_hours() else {
        return SlotIter::empty();
    };

    let mut first = open;
    if date == now.date() {
        // Same-day bookings need lead time; round up to the picker grid.
        let earliest = now + policy.lead_time();
        if earliest.date() > date {
            return SlotIter::empty();
        }
        match round_up(earliest.time(), policy.slot_granularity_minutes) {
            Some(rounded) => first = first.max(rounded),
            None => return SlotIter::empty(),
        }
    }

    SlotIter::new(first, close, policy.granularity(), false)
}

/// Selectable start times for `date`, earliest first.
///
/// Empty when the day is closed or the lead-time clamp leaves no room.
pub fn start_options(
    date: NaiveDate,
    schedule: &DaySchedule,
    policy: &MarginPolicy,
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    start_slots(date, schedule, policy, now).collect()
}

/// Lazy form of [`end_options`].
pub fn end_slots(
    start: NaiveTime,
    start_options: &[NaiveTime],
    schedule: &DaySchedule,
    policy: &MarginPolicy,
) -> SlotIter {
    if policy.slot_granularity_minutes <= 0 {
        return SlotIter::empty();
    }
    let Some((_, close)) = schedule.effective_hours() else {
        return SlotIter::empty();
    };
    let Some(index) = start_options.iter().position(|&s| s == start) else {
        return SlotIter::empty();
    };

    let offset = i64::try_from(policy.minimum_slots)
        .ok()
        .and_then(|steps| steps.checked_mul(policy.slot_granularity_minutes))
        .and_then(Duration::try_minutes);
    let Some(offset) = offset else {
        return SlotIter::empty();
    };
    let (first, wrapped) = start_options[index].overflowing_add_signed(offset);
    if wrapped != 0 {
        return SlotIter::empty();
    }
    SlotIter::new(first, close, policy.granularity(), true)
}

/// Selectable end times for a chosen start, earliest first.
///
/// The first entry is `minimum_slots` granularity steps after the start;
/// the closing time itself is a valid end. Empty when the start is not in
/// `start_options` or the minimum duration does not fit before close;
/// callers treat that as "no valid end time", not as an error.
pub fn end_options(
    start: NaiveTime,
    start_options: &[NaiveTime],
    schedule: &DaySchedule,
    policy: &MarginPolicy,
) -> Vec<NaiveTime> {
    end_slots(start, start_options, schedule, policy).collect()
}
