//! Plain-text rendering of session state for the terminal.

use std::fmt::Write;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tier_core::{ChartData, DisplayState, IncomeHistory};

const BAR_WIDTH: usize = 40;

pub const NO_SCHEDULE: &str = "no valid schedule; enter breakpoints and prices first";

pub fn display(state: Option<&DisplayState>) -> String {
    match state {
        Some(state) => state.to_string(),
        None => NO_SCHEDULE.to_string(),
    }
}

/// One `headcount,income` line per observation, oldest first.
pub fn history(history: &IncomeHistory) -> String {
    let mut out = format!("{} of {} observations\n", history.len(), history.capacity());
    for (i, observation) in history.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:>8}  {:>12}",
            i + 1,
            observation.headcount.normalize().to_string(),
            observation.income.normalize().to_string()
        );
    }
    out
}

/// Text version of the income chart: the trend as horizontal bars scaled to
/// the largest income, followed by the tier separators.
pub fn chart(chart: &ChartData) -> String {
    let mut out = String::new();

    if chart.scatter.is_empty() {
        out.push_str("no observations yet\n");
    }

    let points = if chart.trend.is_empty() {
        &chart.scatter
    } else {
        &chart.trend
    };
    let max_income = points
        .iter()
        .map(|o| o.income)
        .max()
        .unwrap_or(Decimal::ZERO);

    for point in points {
        let marker = if chart.current.as_ref() == Some(point) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{marker}{:>8} |{:<width$}| {}",
            point.headcount.normalize().to_string(),
            "#".repeat(bar_len(point.income, max_income)),
            point.income.normalize(),
            width = BAR_WIDTH
        );
    }

    if let Some((lo, hi)) = chart.x_range {
        let _ = writeln!(out, "headcount axis: {} .. {}", lo.normalize(), hi.normalize());
    }

    for separator in &chart.separators {
        let _ = writeln!(
            out,
            "分段{} at {}",
            separator.tier_index,
            separator.breakpoint.normalize()
        );
    }

    out
}

fn bar_len(
    value: Decimal,
    max: Decimal,
) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH)
}
