//! Headcount tier schedule.
//!
//! A schedule is a list of breakpoints with one unit price per breakpoint.
//! Breakpoint `i` opens tier `i`, which runs up to (but not including)
//! breakpoint `i + 1`. The last tier is open ended.
//!
//! | Tier | Headcount range   | Price       |
//! |------|-------------------|-------------|
//! | 0    | `< bp[1]`         | `prices[0]` |
//! | i    | `bp[i]..bp[i+1]`  | `prices[i]` |
//! | n-1  | `>= bp[n-1]`      | `prices[n-1]` |
//!
//! A headcount below the first breakpoint still resolves to tier 0.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tier_core::TierSchedule;
//!
//! let schedule = TierSchedule::parse("10,50,100", "100,80,60").unwrap();
//!
//! let result = schedule.income(dec!(75));
//! assert_eq!(result.tier_index, 1);
//! assert_eq!(result.price, dec!(80));
//! assert_eq!(result.income, dec!(6000));
//! assert_eq!(schedule.tier_label(2).as_deref(), Some("100人以上"));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::parse::parse_number_list;
use crate::models::{IncomeResult, TierResolution};

/// Errors that can occur while building a [`TierSchedule`].
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A token in the breakpoint or price list is not a number.
    #[error("invalid number '{token}': {source}")]
    Parse {
        token: String,
        #[source]
        source: rust_decimal::Error,
    },

    /// The breakpoint and price lists have different lengths.
    #[error("breakpoints and prices must have the same length ({breakpoints} vs {prices})")]
    LengthMismatch { breakpoints: usize, prices: usize },

    /// Breakpoints are not in ascending order. `index` is the first
    /// breakpoint that is smaller than its predecessor.
    #[error("breakpoints must be in ascending order (breakpoint {index} is out of order)")]
    UnsortedBreakpoints { index: usize },
}

impl From<(String, rust_decimal::Error)> for ScheduleError {
    fn from((token, source): (String, rust_decimal::Error)) -> Self {
        ScheduleError::Parse { token, source }
    }
}

/// Validated breakpoints and the unit price for each tier.
///
/// The default value is the empty schedule, which resolves every headcount
/// to tier 0 at price 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierSchedule {
    breakpoints: Vec<Decimal>,
    prices: Vec<Decimal>,
}

impl TierSchedule {
    /// The empty schedule.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schedule from already parsed numbers.
    ///
    /// Lengths are checked before order, so a list that is both too short
    /// and unsorted reports [`ScheduleError::LengthMismatch`]. Equal
    /// neighbouring breakpoints are allowed.
    pub fn new(
        breakpoints: Vec<Decimal>,
        prices: Vec<Decimal>,
    ) -> Result<Self, ScheduleError> {
        if breakpoints.len() != prices.len() {
            return Err(ScheduleError::LengthMismatch {
                breakpoints: breakpoints.len(),
                prices: prices.len(),
            });
        }

        if let Some(index) = first_unsorted(&breakpoints) {
            return Err(ScheduleError::UnsortedBreakpoints { index });
        }

        Ok(Self {
            breakpoints,
            prices,
        })
    }

    /// Parses comma-separated breakpoint and price text and validates it.
    ///
    /// Breakpoints are parsed in full before prices, so a bad token in both
    /// lists reports the breakpoint token.
    pub fn parse(
        breakpoints_text: &str,
        prices_text: &str,
    ) -> Result<Self, ScheduleError> {
        let breakpoints = parse_number_list(breakpoints_text)?;
        let prices = parse_number_list(prices_text)?;

        Self::new(breakpoints, prices)
    }

    pub fn breakpoints(&self) -> &[Decimal] {
        &self.breakpoints
    }

    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Finds the tier for `headcount`.
    ///
    /// The tier is the last breakpoint less than or equal to `headcount`;
    /// a headcount below every breakpoint falls into tier 0. An empty
    /// schedule yields the zero resolution.
    pub fn resolve_tier(
        &self,
        headcount: Decimal,
    ) -> TierResolution {
        if self.is_empty() {
            return TierResolution::default();
        }

        let tier_index = self
            .breakpoints
            .iter()
            .take_while(|bp| headcount >= **bp)
            .count()
            .saturating_sub(1);

        let resolution = TierResolution {
            tier_index,
            price: self.prices[tier_index],
        };
        debug!(%headcount, tier = tier_index, price = %resolution.price, "resolved tier");
        resolution
    }

    /// Computes income for `headcount` without recording anything.
    pub fn income(
        &self,
        headcount: Decimal,
    ) -> IncomeResult {
        let TierResolution { tier_index, price } = self.resolve_tier(headcount);

        IncomeResult {
            headcount,
            income: headcount.saturating_mul(price),
            tier_index,
            price,
        }
    }

    /// Human readable range for a tier, e.g. `"10～50人"` or `"100人以上"`.
    ///
    /// Returns `None` when `tier_index` is out of range.
    pub fn tier_label(
        &self,
        tier_index: usize,
    ) -> Option<String> {
        let start = self.breakpoints.get(tier_index)?.normalize();

        Some(match self.breakpoints.get(tier_index + 1) {
            Some(next) => format!("{start}～{}人", next.normalize()),
            None => format!("{start}人以上"),
        })
    }
}

fn first_unsorted(values: &[Decimal]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| pair[1] < pair[0])
        .map(|i| i + 1)
}
