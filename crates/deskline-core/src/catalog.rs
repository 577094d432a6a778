//! Resource catalog, search queries, and the availability filter.
//!
//! A [`Catalog`] is handed to the engine already materialized by the
//! surrounding system (one fetch per search session); resources are
//! immutable for the duration of one availability computation.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::availability::{is_available, AvailabilityQuery};
use crate::blocking::BlockedInterval;
use crate::error::{CatalogError, Result};
use crate::policy::MarginPolicy;
use crate::schedule::{time_of_day, DaySchedule, WeeklySchedule};

/// A bookable unit (an office, a meeting room, a desk).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<f64>,
    /// Tenant-wide weekly hours.
    #[serde(default)]
    pub default_schedule: WeeklySchedule,
    /// Resource-specific substitute hours. A day present here fully
    /// replaces the default's entry for that day; a day absent here
    /// falls back to the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_schedule: Option<WeeklySchedule>,
    /// Existing reservations and administrative blackouts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_intervals: Vec<BlockedInterval>,
}

impl Resource {
    /// Resolve the effective opening hours for a calendar date.
    ///
    /// Override entry for the weekday if one exists, else the default's
    /// entry, else a synthetic closed day. Never fails.
    pub fn day_schedule(&self, date: NaiveDate) -> DaySchedule {
        let weekday = date.weekday();
        if let Some(override_schedule) = &self.override_schedule {
            if let Some(day) = override_schedule.day(weekday) {
                return day.clone();
            }
        }
        self.default_schedule
            .day(weekday)
            .cloned()
            .unwrap_or_else(DaySchedule::closed)
    }
}

/// A materialized resource catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub resources: Vec<Resource>,
}

impl Catalog {
    /// Parse a catalog from its JSON payload, rejecting duplicate ids.
    pub fn from_json(s: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(s)?;
        let mut seen = HashSet::new();
        for resource in &catalog.resources {
            if !seen.insert(resource.id.as_str()) {
                return Err(CatalogError::DuplicateId(resource.id.clone()).into());
            }
        }
        Ok(catalog)
    }
}

/// User search selections, all optional.
///
/// Availability filtering is opt-in: it applies only once both a date
/// and a start time are selected ("browse first, narrow later"). The
/// capacity and price predicates are plain attribute filters and apply
/// whenever set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        with = "time_of_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveTime>,
    #[serde(
        default,
        with = "time_of_day::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price_per_hour: Option<f64>,
}

impl SearchQuery {
    /// The availability portion of the search, when complete enough to
    /// evaluate.
    pub fn availability_query(&self) -> Option<AvailabilityQuery> {
        match (self.date, self.start_time) {
            (Some(date), Some(start_time)) => Some(AvailabilityQuery {
                date,
                start_time,
                end_time: self.end_time,
            }),
            _ => None,
        }
    }

    fn matches_attributes(&self, resource: &Resource) -> bool {
        if let Some(min_capacity) = self.min_capacity {
            if resource.capacity < min_capacity {
                return false;
            }
        }
        if let Some(max_price) = self.max_price_per_hour {
            match resource.price_per_hour {
                Some(price) if price <= max_price => {}
                _ => return false,
            }
        }
        true
    }
}

/// Filter a catalog against a search, preserving catalog order.
///
/// Without a complete date + start selection every resource passes the
/// availability stage; attribute predicates still apply.
pub fn filter_available(
    resources: &[Resource],
    query: &SearchQuery,
    policy: &MarginPolicy,
) -> Vec<Resource> {
    let availability = query.availability_query();
    resources
        .iter()
        .filter(|resource| query.matches_attributes(resource))
        .filter(|resource| {
            availability
                .as_ref()
                .map_or(true, |q| is_available(resource, q, policy))
        })
        .cloned()
        .collect()
}
