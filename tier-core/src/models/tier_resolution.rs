use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Observation;

/// The tier a headcount falls into and the unit price that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierResolution {
    pub tier_index: usize,
    pub price: Decimal,
}

/// Result of evaluating a schedule against one headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeResult {
    pub headcount: Decimal,
    pub income: Decimal,
    pub tier_index: usize,
    pub price: Decimal,
}

impl IncomeResult {
    pub fn observation(&self) -> Observation {
        Observation::new(self.headcount, self.income)
    }
}
