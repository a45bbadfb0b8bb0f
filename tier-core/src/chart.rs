//! Data handed to an income chart renderer.
//!
//! Nothing here draws; a renderer plots `scatter` as points, `trend` as a
//! line, highlights `current`, and draws a vertical separator at every tier
//! boundary after the first.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::TierSchedule;
use crate::history::IncomeHistory;
use crate::models::Observation;

/// Vertical separator at the start of tier `tier_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Separator {
    pub tier_index: usize,
    pub breakpoint: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// Observations oldest first.
    pub scatter: Vec<Observation>,
    /// Observations sorted by headcount. Empty until there are two points.
    pub trend: Vec<Observation>,
    pub current: Option<Observation>,
    pub separators: Vec<Separator>,
    /// Lowest recorded income; separator labels sit on this line.
    pub label_baseline: Option<Decimal>,
    /// Headcount axis range padded by 5% of the recorded span on each side.
    /// `None` when nothing is recorded or the padded range leaves the
    /// `Decimal` range.
    pub x_range: Option<(Decimal, Decimal)>,
}

impl ChartData {
    pub fn build(
        schedule: &TierSchedule,
        history: &IncomeHistory,
    ) -> Self {
        let trend = if history.len() > 1 {
            history.snapshot_sorted_by_headcount()
        } else {
            Vec::new()
        };

        let separators = schedule
            .breakpoints()
            .iter()
            .enumerate()
            .skip(1)
            .map(|(tier_index, bp)| Separator {
                tier_index,
                breakpoint: *bp,
            })
            .collect();

        let x_range = history.headcount_bounds().and_then(|(lo, hi)| {
            let padding = hi.checked_sub(lo)?.checked_mul(Decimal::new(5, 2))?;
            Some((lo.checked_sub(padding)?, hi.checked_add(padding)?))
        });

        Self {
            scatter: history.iter().copied().collect(),
            trend,
            current: history.latest().copied(),
            separators,
            label_baseline: history.min_income(),
            x_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn schedule() -> TierSchedule {
        TierSchedule::parse("10,50,100", "100,80,60").unwrap()
    }

    fn record(
        history: &mut IncomeHistory,
        schedule: &TierSchedule,
        headcount: Decimal,
    ) {
        history.append(schedule.income(headcount).observation());
    }

    #[test]
    fn empty_history_has_no_points_but_keeps_separators() {
        let chart = ChartData::build(&schedule(), &IncomeHistory::new());

        assert!(chart.scatter.is_empty());
        assert!(chart.trend.is_empty());
        assert_eq!(chart.current, None);
        assert_eq!(chart.label_baseline, None);
        assert_eq!(chart.x_range, None);
        assert_eq!(chart.separators.len(), 2);
    }

    #[test]
    fn separators_skip_the_first_breakpoint() {
        let chart = ChartData::build(&schedule(), &IncomeHistory::new());

        assert_eq!(
            chart.separators,
            vec![
                Separator {
                    tier_index: 1,
                    breakpoint: dec!(50)
                },
                Separator {
                    tier_index: 2,
                    breakpoint: dec!(100)
                },
            ]
        );
    }

    #[test]
    fn extreme_headcounts_drop_the_axis_range() {
        let schedule = schedule();
        let mut history = IncomeHistory::new();
        record(&mut history, &schedule, Decimal::MIN);
        record(&mut history, &schedule, Decimal::MAX);

        let chart = ChartData::build(&schedule, &history);

        assert_eq!(chart.scatter.len(), 2);
        assert_eq!(chart.trend.len(), 2);
        assert_eq!(chart.x_range, None);
    }

    #[test]
    fn single_point_has_no_trend_line() {
        let schedule = schedule();
        let mut history = IncomeHistory::new();
        record(&mut history, &schedule, dec!(75));

        let chart = ChartData::build(&schedule, &history);

        assert_eq!(chart.scatter.len(), 1);
        assert!(chart.trend.is_empty());
        assert_eq!(chart.current, Some(Observation::new(dec!(75), dec!(6000))));
        assert_eq!(chart.x_range, Some((dec!(75), dec!(75))));
    }

    #[test]
    fn trend_is_sorted_and_scatter_is_chronological() {
        let schedule = schedule();
        let mut history = IncomeHistory::new();
        for headcount in [dec!(150), dec!(5), dec!(75)] {
            record(&mut history, &schedule, headcount);
        }

        let chart = ChartData::build(&schedule, &history);

        let scatter: Vec<_> = chart.scatter.iter().map(|o| o.headcount).collect();
        let trend: Vec<_> = chart.trend.iter().map(|o| o.headcount).collect();
        assert_eq!(scatter, vec![dec!(150), dec!(5), dec!(75)]);
        assert_eq!(trend, vec![dec!(5), dec!(75), dec!(150)]);
        assert_eq!(chart.current.map(|o| o.headcount), Some(dec!(75)));
        assert_eq!(chart.label_baseline, Some(dec!(500)));
    }

    #[test]
    fn x_range_is_padded_by_five_percent() {
        let schedule = schedule();
        let mut history = IncomeHistory::new();
        record(&mut history, &schedule, dec!(0));
        record(&mut history, &schedule, dec!(200));

        let chart = ChartData::build(&schedule, &history);

        assert_eq!(chart.x_range, Some((dec!(-10), dec!(210))));
    }
}
