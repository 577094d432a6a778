//! Weekly opening hours and the time-of-day wire format.
//!
//! A resource's opening hours are a [`WeeklySchedule`]: one optional
//! [`DaySchedule`] per weekday. Times of day are minute-resolution,
//! 24-hour wall-clock values serialized as `"HH:MM"` strings (the
//! [`time_of_day`] serde helpers).
//!
//! Schedule data arrives from admin-edited records and is not trusted:
//! any entry that claims to be open but lacks a bound, or whose open
//! time is not before its close time, is treated as closed. Evaluation
//! never fails on malformed hours.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Serde helpers for minute-resolution `"HH:MM"` wall-clock times.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::error::TimeParseError;

    /// Wire format for times of day.
    pub const FORMAT: &str = "%H:%M";

    /// Parse a `"HH:MM"` string.
    pub fn parse(s: &str) -> Result<NaiveTime, TimeParseError> {
        NaiveTime::parse_from_str(s, FORMAT)
            .map_err(|_| TimeParseError::InvalidTimeOfDay(s.to_string()))
    }

    /// Format a time as `"HH:MM"`.
    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    /// Helpers for `Option<NaiveTime>` fields.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match time {
                Some(t) => serializer.serialize_some(&super::format(t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s: Option<String> = Option::deserialize(deserializer)?;
            s.map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// Opening hours for one weekday.
///
/// When `is_closed` is false both bounds must be present with
/// `open < close`; entries violating that are normalized to closed by
/// [`DaySchedule::effective_hours`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(
        default,
        with = "time_of_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub open: Option<NaiveTime>,
    #[serde(
        default,
        with = "time_of_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub close: Option<NaiveTime>,
    #[serde(default)]
    pub is_closed: bool,
}

impl DaySchedule {
    /// A day on which the resource never opens.
    pub fn closed() -> Self {
        Self {
            open: None,
            close: None,
            is_closed: true,
        }
    }

    /// A day open between the given bounds.
    pub fn open_hours(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            open: Some(open),
            close: Some(close),
            is_closed: false,
        }
    }

    /// The normalized `(open, close)` window, or `None` when the day is
    /// closed or the entry is malformed (missing bound, `open >= close`).
    pub fn effective_hours(&self) -> Option<(NaiveTime, NaiveTime)> {
        if self.is_closed {
            return None;
        }
        match (self.open, self.close) {
            (Some(open), Some(close)) if open < close => Some((open, close)),
            _ => None,
        }
    }
}

/// Recurring weekly opening hours.
///
/// Every field is optional so that partially specified structures (an
/// override covering only weekdays, say) deserialize without error;
/// resolution falls back per missing day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DaySchedule>,
}

impl WeeklySchedule {
    /// The entry for a weekday, if the structure defines one.
    pub fn day(&self, weekday: chrono::Weekday) -> Option<&DaySchedule> {
        match weekday {
            chrono::Weekday::Mon => self.monday.as_ref(),
            chrono::Weekday::Tue => self.tuesday.as_ref(),
            chrono::Weekday::Wed => self.wednesday.as_ref(),
            chrono::Weekday::Thu => self.thursday.as_ref(),
            chrono::Weekday::Fri => self.friday.as_ref(),
            chrono::Weekday::Sat => self.saturday.as_ref(),
            chrono::Weekday::Sun => self.sunday.as_ref(),
        }
    }

    /// A week with the same hours Monday through Friday, closed weekends.
    pub fn weekdays(open: NaiveTime, close: NaiveTime) -> Self {
        let day = DaySchedule::open_hours(open, close);
        Self {
            monday: Some(day.clone()),
            tuesday: Some(day.clone()),
            wednesday: Some(day.clone()),
            thursday: Some(day.clone()),
            friday: Some(day),
            saturday: Some(DaySchedule::closed()),
            sunday: Some(DaySchedule::closed()),
        }
    }
}
