//! End-to-end session scenarios using only the public API.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tier_core::{HISTORY_CAPACITY, PricingSession, ScheduleError};

fn standard_session() -> PricingSession {
    let mut session = PricingSession::new();
    session
        .validate_schedule("10,50,100", "100,80,60")
        .expect("standard schedule is valid");
    session
}

#[test]
fn slider_sweep_keeps_last_hundred_observations() {
    let mut session = standard_session();

    for headcount in 0..=1000 {
        session.set_headcount(Decimal::from(headcount));
        assert!(session.history().len() <= HISTORY_CAPACITY);
    }

    let history: Vec<_> = session.history().iter().map(|o| o.headcount).collect();
    let expected: Vec<_> = (901..=1000).map(Decimal::from).collect();
    assert_eq!(history, expected);
}

#[test]
fn boundary_headcounts_belong_to_the_new_tier() {
    let session = standard_session();

    for bp in session.schedule().breakpoints().to_vec() {
        let at = session.resolve_tier(bp).tier_index;
        let just_after = session.resolve_tier(bp + dec!(0.001)).tier_index;
        assert_eq!(at, just_after, "breakpoint {bp}");
    }
}

#[test]
fn rejected_schedule_then_recovery() {
    let mut session = standard_session();
    session.set_headcount(dec!(75));

    let err = session.validate_schedule("50,10", "100,80").unwrap_err();
    assert!(matches!(err, ScheduleError::UnsortedBreakpoints { .. }));
    assert_eq!(session.set_headcount(dec!(75)).income, Decimal::ZERO);

    session
        .validate_schedule("10, 50, 100", "100, 80, 60")
        .expect("valid again");
    assert!(session.history().is_empty());

    let result = session.set_headcount(dec!(75));
    assert_eq!(result.income, dec!(6000));
    assert_eq!(session.display_state().unwrap().tier_label, "50～100人");
}

#[test]
fn chart_separators_follow_the_schedule() {
    let mut session = standard_session();
    session.set_headcount(dec!(20));
    session.set_headcount(dec!(120));

    let chart = session.chart_data();

    let separators: Vec<_> = chart.separators.iter().map(|s| s.breakpoint).collect();
    assert_eq!(separators, vec![dec!(50), dec!(100)]);
    assert_eq!(chart.current.map(|o| o.income), Some(dec!(7200)));
}
