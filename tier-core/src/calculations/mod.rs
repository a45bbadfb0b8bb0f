//! Tier resolution and income calculation.
//!
//! This module holds the validated breakpoint/price schedule and the pure
//! calculations that run against it. Recording results is left to
//! [`crate::session::PricingSession`].

pub mod parse;
pub mod schedule;

pub use parse::{parse_number, parse_number_list};
pub use schedule::{ScheduleError, TierSchedule};
