//! Margin and slot policy configuration.
//!
//! [`MarginPolicy`] is the sole externally tunable configuration of the
//! engine: buffer margins around blocked intervals, minimum notice for
//! same-day bookings, the UI time-picker step size, and the minimum
//! bookable duration expressed in granularity steps. A policy can be
//! embedded in a host TOML document and parsed with [`MarginPolicy::from_toml`];
//! the engine itself reads no files and no environment.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Buffer, lead-time and slot-granularity settings.
///
/// The pre-buffer applied before a blocked interval is
/// `buffer_hours + extra_pre_buffer_hours`, while the post-buffer is
/// `buffer_hours` alone: preparation time before a booking is more
/// safety-critical than wind-down time after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginPolicy {
    /// Buffer applied symmetrically to both ends of a timed blocked interval.
    #[serde(default = "default_buffer_hours")]
    pub buffer_hours: i64,
    /// Additional buffer applied only before a blocked interval's start.
    #[serde(default = "default_extra_pre_buffer_hours")]
    pub extra_pre_buffer_hours: i64,
    /// Minimum notice required for same-day bookings.
    #[serde(default = "default_lead_time_hours")]
    pub lead_time_hours: i64,
    /// Step size of generated start/end options, in minutes.
    #[serde(default = "default_slot_granularity_minutes")]
    pub slot_granularity_minutes: i64,
    /// Minimum number of granularity steps between a start and its
    /// earliest valid end.
    #[serde(default = "default_minimum_slots")]
    pub minimum_slots: usize,
}

// Default functions
fn default_buffer_hours() -> i64 {
    2
}
fn default_extra_pre_buffer_hours() -> i64 {
    1
}
fn default_lead_time_hours() -> i64 {
    2
}
fn default_slot_granularity_minutes() -> i64 {
    30
}
fn default_minimum_slots() -> usize {
    2
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self {
            buffer_hours: default_buffer_hours(),
            extra_pre_buffer_hours: default_extra_pre_buffer_hours(),
            lead_time_hours: default_lead_time_hours(),
            slot_granularity_minutes: default_slot_granularity_minutes(),
            minimum_slots: default_minimum_slots(),
        }
    }
}

impl MarginPolicy {
    /// Parse a policy from a TOML fragment. Missing keys take their
    /// defaults; out-of-range values are rejected.
    pub fn from_toml(s: &str) -> Result<Self, PolicyError> {
        let policy: MarginPolicy =
            toml::from_str(s).map_err(|e| PolicyError::ParseFailed(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Validate value ranges.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.slot_granularity_minutes <= 0 {
            return Err(PolicyError::InvalidValue {
                key: "slot_granularity_minutes".to_string(),
                message: format!(
                    "must be positive, got {}",
                    self.slot_granularity_minutes
                ),
            });
        }
        if self.buffer_hours < 0 {
            return Err(PolicyError::InvalidValue {
                key: "buffer_hours".to_string(),
                message: format!("must not be negative, got {}", self.buffer_hours),
            });
        }
        if self.extra_pre_buffer_hours < 0 {
            return Err(PolicyError::InvalidValue {
                key: "extra_pre_buffer_hours".to_string(),
                message: format!(
                    "must not be negative, got {}",
                    self.extra_pre_buffer_hours
                ),
            });
        }
        if self.lead_time_hours < 0 {
            return Err(PolicyError::InvalidValue {
                key: "lead_time_hours".to_string(),
                message: format!("must not be negative, got {}", self.lead_time_hours),
            });
        }
        // The minimum bookable duration has to fit inside a single day.
        let minimum_minutes = i64::try_from(self.minimum_slots)
            .ok()
            .and_then(|steps| steps.checked_mul(self.slot_granularity_minutes));
        match minimum_minutes {
            Some(minutes) if minutes < 24 * 60 => {}
            _ => {
                return Err(PolicyError::InvalidValue {
                    key: "minimum_slots".to_string(),
                    message: format!(
                        "minimum duration of {} steps at {} minutes does not fit within a day",
                        self.minimum_slots, self.slot_granularity_minutes
                    ),
                });
            }
        }
        Ok(())
    }

    /// Total buffer before a blocked interval's start.
    pub fn pre_buffer(&self) -> Duration {
        Duration::hours(self.buffer_hours + self.extra_pre_buffer_hours)
    }

    /// Buffer after a blocked interval's end.
    pub fn post_buffer(&self) -> Duration {
        Duration::hours(self.buffer_hours)
    }

    /// Minimum notice before a same-day start.
    pub fn lead_time(&self) -> Duration {
        Duration::hours(self.lead_time_hours)
    }

    /// Picker step size.
    pub fn granularity(&self) -> Duration {
        Duration::minutes(self.slot_granularity_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = MarginPolicy::default();
        assert_eq!(policy.buffer_hours, 2);
        assert_eq!(policy.extra_pre_buffer_hours, 1);
        assert_eq!(policy.lead_time_hours, 2);
        assert_eq!(policy.slot_granularity_minutes, 30);
        assert_eq!(policy.minimum_slots, 2);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_asymmetric_buffers() {
        let policy = MarginPolicy::default();
        assert_eq!(policy.pre_buffer(), Duration::hours(3));
        assert_eq!(policy.post_buffer(), Duration::hours(2));
    }

    #[test]
    fn test_from_toml_partial() {
        let policy = MarginPolicy::from_toml("slot_granularity_minutes = 15\n").unwrap();
        assert_eq!(policy.slot_granularity_minutes, 15);
        // Unspecified keys fall back to defaults
        assert_eq!(policy.buffer_hours, 2);
        assert_eq!(policy.minimum_slots, 2);
    }

    #[test]
    fn test_from_toml_rejects_zero_granularity() {
        let result = MarginPolicy::from_toml("slot_granularity_minutes = 0\n");
        assert!(matches!(
            result,
            Err(PolicyError::InvalidValue { ref key, .. }) if key == "slot_granularity_minutes"
        ));
    }

    #[test]
    fn test_from_toml_rejects_negative_buffer() {
        let result = MarginPolicy::from_toml("buffer_hours = -1\n");
        assert!(matches!(result, Err(PolicyError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_toml_rejects_day_spanning_minimum_duration() {
        // 48 steps of 30 minutes is a full day, which can never fit.
        let result = MarginPolicy::from_toml("minimum_slots = 48\n");
        assert!(matches!(
            result,
            Err(PolicyError::InvalidValue { ref key, .. }) if key == "minimum_slots"
        ));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            MarginPolicy::from_toml("buffer_hours = \"lots\"\n"),
            Err(PolicyError::ParseFailed(_))
        ));
    }
}
