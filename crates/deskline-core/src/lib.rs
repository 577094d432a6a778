//! # Deskline Core Library
//!
//! This library provides the resource availability engine for the Deskline
//! coworking-space manager. Given a bookable resource's recurring weekly
//! opening hours and its already-reserved or blocked time intervals, it
//! decides whether a candidate reservation window is bookable and generates
//! the rounded time-slot choices offered to a booking UI.
//!
//! The engine is a pure library boundary: the catalog is supplied already
//! materialized by the surrounding system, and every operation is a pure
//! function of its inputs. There is no persistent state and no I/O, which
//! makes the engine trivially safe to call from concurrent requests.
//!
//! ## Key Components
//!
//! - [`Resource`]: a bookable unit with its schedules and blocked intervals
//! - [`MarginPolicy`]: the sole tunable configuration (buffers, lead time,
//!   slot granularity, minimum duration)
//! - [`is_available`]: candidate-window availability evaluation
//! - [`filter_available`]: stable filtering of a catalog against a search
//! - [`start_options`] / [`end_options`]: slot lists for UI pickers
//!
//! Malformed schedule data never aborts an evaluation; it resolves to
//! "closed" / "unavailable" so that bad data under-books rather than
//! double-books.

pub mod availability;
pub mod blocking;
pub mod catalog;
pub mod error;
pub mod policy;
pub mod schedule;
pub mod slots;

pub use availability::{is_available, AvailabilityQuery};
pub use blocking::{BlockedInterval, ExpandedInterval};
pub use catalog::{filter_available, Catalog, Resource, SearchQuery};
pub use error::{CatalogError, CoreError, PolicyError, TimeParseError};
pub use policy::MarginPolicy;
pub use schedule::{DaySchedule, WeeklySchedule};
pub use slots::{end_options, start_options, SlotIter};
