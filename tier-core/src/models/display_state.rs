use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The values a front end shows for the current headcount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub headcount: Decimal,
    /// `"{bp}～{next}人"` for inner tiers, `"{bp}人以上"` for the last one.
    pub tier_label: String,
    pub price: Decimal,
    pub income: Decimal,
}

impl fmt::Display for DisplayState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "headcount: {} | tier: {} | price: {} | income: {}",
            self.headcount.normalize(),
            self.tier_label,
            self.price.normalize(),
            self.income.normalize()
        )
    }
}
