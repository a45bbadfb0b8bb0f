//! Per-user calculator session.
//!
//! A [`PricingSession`] owns one schedule, one history and the current
//! headcount. Sessions share nothing, so a front end serving several users
//! creates one per user.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculations::{ScheduleError, TierSchedule};
use crate::chart::ChartData;
use crate::history::IncomeHistory;
use crate::models::{DisplayState, IncomeResult, TierResolution};

#[derive(Debug, Clone, Default)]
pub struct PricingSession {
    schedule: TierSchedule,
    history: IncomeHistory,
    headcount: Decimal,
}

impl PricingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose history keeps `capacity` observations.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            history: IncomeHistory::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn schedule(&self) -> &TierSchedule {
        &self.schedule
    }

    pub fn history(&self) -> &IncomeHistory {
        &self.history
    }

    pub fn headcount(&self) -> Decimal {
        self.headcount
    }

    pub fn has_schedule(&self) -> bool {
        !self.schedule.is_empty()
    }

    /// Parses and installs a new schedule from comma-separated text.
    ///
    /// See [`PricingSession::apply_schedule`] for what happens on success
    /// and failure.
    pub fn validate_schedule(
        &mut self,
        breakpoints_text: &str,
        prices_text: &str,
    ) -> Result<(), ScheduleError> {
        self.apply_schedule(TierSchedule::parse(breakpoints_text, prices_text))
    }

    /// Installs a schedule built elsewhere.
    ///
    /// On success the schedule replaces the current one and the history is
    /// cleared. On failure the session drops to the empty schedule and the
    /// error is handed back; the history is left alone.
    pub fn apply_schedule(
        &mut self,
        candidate: Result<TierSchedule, ScheduleError>,
    ) -> Result<(), ScheduleError> {
        match candidate {
            Ok(schedule) => {
                info!(tiers = schedule.len(), "schedule accepted");
                self.schedule = schedule;
                self.history.clear();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "schedule rejected");
                self.schedule = TierSchedule::empty();
                Err(err)
            }
        }
    }

    /// Stores `value` as the current headcount and computes its income.
    pub fn set_headcount(
        &mut self,
        value: Decimal,
    ) -> IncomeResult {
        self.headcount = value;
        self.compute_income(value)
    }

    /// Resolves the tier for `headcount`. Never records history.
    pub fn resolve_tier(
        &self,
        headcount: Decimal,
    ) -> TierResolution {
        self.schedule.resolve_tier(headcount)
    }

    /// Computes income for `headcount` and records it in the history.
    ///
    /// Without a schedule the zero result is returned and nothing is
    /// recorded.
    pub fn compute_income(
        &mut self,
        headcount: Decimal,
    ) -> IncomeResult {
        if self.schedule.is_empty() {
            debug!(%headcount, "no schedule, skipping computation");
            return IncomeResult {
                headcount,
                ..IncomeResult::default()
            };
        }

        let result = self.schedule.income(headcount);
        self.history.append(result.observation());
        result
    }

    /// What a front end shows for the current headcount, or `None` when no
    /// schedule is installed.
    pub fn display_state(&self) -> Option<DisplayState> {
        let result = self.schedule.income(self.headcount);
        let tier_label = self.schedule.tier_label(result.tier_index)?;

        Some(DisplayState {
            headcount: result.headcount,
            tier_label,
            price: result.price,
            income: result.income,
        })
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData::build(&self.schedule, &self.history)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Observation;

    fn session() -> PricingSession {
        let mut session = PricingSession::new();
        session.validate_schedule("10,50,100", "100,80,60").unwrap();
        session
    }

    #[test]
    fn new_session_has_no_schedule() {
        let session = PricingSession::new();

        assert!(!session.has_schedule());
        assert!(session.history().is_empty());
        assert_eq!(session.display_state(), None);
    }

    #[test]
    fn set_headcount_records_history() {
        let mut session = session();

        let result = session.set_headcount(dec!(75));

        assert_eq!(result.income, dec!(6000));
        assert_eq!(session.headcount(), dec!(75));
        assert_eq!(
            session.history().latest(),
            Some(&Observation::new(dec!(75), dec!(6000)))
        );
    }

    #[test]
    fn resolve_tier_does_not_record() {
        let session = session();

        let first = session.resolve_tier(dec!(75));
        let second = session.resolve_tier(dec!(75));

        assert_eq!(first, second);
        assert!(session.history().is_empty());
    }

    #[test]
    fn display_state_uses_current_headcount() {
        let mut session = session();
        session.set_headcount(dec!(150));

        let state = session.display_state().unwrap();

        assert_eq!(state.headcount, dec!(150));
        assert_eq!(state.tier_label, "100人以上");
        assert_eq!(state.price, dec!(60));
        assert_eq!(state.income, dec!(9000));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn display_state_for_inner_tier() {
        let mut session = session();
        session.set_headcount(dec!(10));

        let state = session.display_state().unwrap();

        assert_eq!(state.tier_label, "10～50人");
        assert_eq!(state.income, dec!(1000));
    }

    #[test]
    fn successful_validation_clears_history() {
        let mut session = session();
        session.set_headcount(dec!(5));
        session.set_headcount(dec!(75));

        session.validate_schedule("0,20", "5,4").unwrap();

        assert!(session.history().is_empty());
        assert_eq!(session.schedule().breakpoints(), &[dec!(0), dec!(20)]);
    }

    #[test]
    fn failed_validation_empties_schedule() {
        let mut session = session();
        session.set_headcount(dec!(75));

        let err = session.validate_schedule("10,50", "100").unwrap_err();

        assert!(matches!(err, ScheduleError::LengthMismatch { .. }));
        assert!(!session.has_schedule());
        assert!(session.schedule().prices().is_empty());
        assert_eq!(session.display_state(), None);
    }

    #[test]
    fn failed_validation_keeps_history() {
        let mut session = session();
        session.set_headcount(dec!(75));

        let _ = session.validate_schedule("50,10", "100,80");

        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn parse_failure_empties_schedule() {
        let mut session = session();

        let err = session.validate_schedule("10,fifty", "1,2").unwrap_err();

        assert!(matches!(err, ScheduleError::Parse { .. }));
        assert!(!session.has_schedule());
    }

    #[test]
    fn compute_without_schedule_is_zero_and_unrecorded() {
        let mut session = PricingSession::new();

        let result = session.set_headcount(dec!(40));

        assert_eq!(result.income, Decimal::ZERO);
        assert_eq!(result.price, Decimal::ZERO);
        assert_eq!(result.tier_index, 0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = session();
        let mut b = PricingSession::new();
        b.validate_schedule("0", "1").unwrap();

        a.set_headcount(dec!(75));
        b.set_headcount(dec!(3));

        assert_eq!(a.history().len(), 1);
        assert_eq!(b.history().len(), 1);
        assert_eq!(b.history().latest().map(|o| o.income), Some(dec!(3)));
    }

    #[test]
    fn history_capacity_is_configurable() {
        let mut session = PricingSession::with_history_capacity(3);
        session.validate_schedule("0", "1").unwrap();
        for headcount in 0..10 {
            session.set_headcount(Decimal::from(headcount));
        }

        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history().capacity(), 3);
    }

    #[test]
    fn chart_data_reflects_session() {
        let mut session = session();
        session.set_headcount(dec!(5));
        session.set_headcount(dec!(75));

        let chart = session.chart_data();

        assert_eq!(chart.scatter.len(), 2);
        assert_eq!(chart.trend.len(), 2);
        assert_eq!(chart.separators.len(), 2);
    }
}
