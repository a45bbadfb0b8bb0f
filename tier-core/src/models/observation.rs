use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recorded `(headcount, income)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub headcount: Decimal,
    pub income: Decimal,
}

impl Observation {
    pub fn new(
        headcount: Decimal,
        income: Decimal,
    ) -> Self {
        Self { headcount, income }
    }
}
