use chrono::NaiveDate;

use crate::models::Plan;

/// The amount a plan asks for on `as_of`.
///
/// Before the start date the target is clamped to the starting amount.
/// From then on the target climbs by `increment_amount` once per completed
/// cadence period (integer division over the cadence's fixed day span) and
/// never exceeds `target_amount`.
pub fn current_target(plan: &Plan, as_of: NaiveDate) -> i64 {
    if as_of < plan.start_date {
        return plan.starting_amount;
    }

    let elapsed_days = (as_of - plan.start_date).num_days();
    let periods = elapsed_days / plan.cadence.days_per_period();
    let raw = plan.starting_amount + periods * plan.increment_amount;

    raw.min(plan.target_amount)
}

/// Fraction of the way from the starting amount to the goal, in [0, 1].
/// A plan whose starting amount already meets the goal counts as done.
pub fn progress_percentage(plan: &Plan, as_of: NaiveDate) -> f64 {
    let span = plan.target_amount - plan.starting_amount;
    if span <= 0 {
        return 1.0;
    }

    let gained = (current_target(plan, as_of) - plan.starting_amount) as f64;
    (gained / span as f64).clamp(0.0, 1.0)
}

/// Estimated days until the plan reaches its goal amount.
///
/// Counts the increments still needed and converts them back through the
/// cadence's fixed day span. This intentionally ignores how far into the
/// current period `as_of` falls, so the estimate rounds up to whole
/// periods.
pub fn days_until_target(plan: &Plan, as_of: NaiveDate) -> i64 {
    let current = current_target(plan, as_of);
    if current >= plan.target_amount {
        return 0;
    }

    let remaining = plan.target_amount - current;
    // Ceiling division; both operands are positive by Plan's invariants.
    let increments_needed = (remaining + plan.increment_amount - 1) / plan.increment_amount;

    increments_needed * plan.cadence.days_per_period()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cadence;

    fn plan(starting: i64, target: i64, increment: i64, cadence: Cadence) -> Plan {
        Plan::new("test plan", "push-ups", starting, target, increment, cadence, day(0)).unwrap()
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Duration::days(offset)
    }

    #[test]
    fn weekly_plan_steps_once_per_seven_days() {
        let p = plan(1, 20, 1, Cadence::Weekly);
        assert_eq!(current_target(&p, day(0)), 1);
        assert_eq!(current_target(&p, day(6)), 1);
        assert_eq!(current_target(&p, day(7)), 2);
        assert_eq!(current_target(&p, day(13)), 2);
        assert_eq!(current_target(&p, day(20)), 3);
    }

    #[test]
    fn target_is_clamped_before_start_date() {
        let p = plan(5, 50, 2, Cadence::Daily);
        assert_eq!(current_target(&p, day(-10)), 5);
    }

    #[test]
    fn target_never_exceeds_goal() {
        let p = plan(1, 20, 1, Cadence::Daily);
        assert_eq!(current_target(&p, day(19)), 20);
        assert_eq!(current_target(&p, day(500)), 20);
    }

    #[test]
    fn target_stays_within_bounds_and_is_monotone() {
        let p = plan(3, 40, 4, Cadence::Biweekly);
        let mut prev = 0;
        for offset in 0..400 {
            let t = current_target(&p, day(offset));
            assert!(t >= p.starting_amount);
            assert!(t <= p.target_amount);
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn monthly_cadence_uses_fixed_thirty_days() {
        let p = plan(10, 100, 5, Cadence::Monthly);
        assert_eq!(current_target(&p, day(29)), 10);
        assert_eq!(current_target(&p, day(30)), 15);
        // Feb/Mar calendar lengths must not matter.
        assert_eq!(current_target(&p, day(60)), 20);
    }

    #[test]
    fn progress_percentage_stays_in_unit_interval() {
        let p = plan(1, 20, 1, Cadence::Weekly);
        assert_eq!(progress_percentage(&p, day(-5)), 0.0);
        assert_eq!(progress_percentage(&p, day(0)), 0.0);
        let mid = progress_percentage(&p, day(70));
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(progress_percentage(&p, day(10_000)), 1.0);
    }

    #[test]
    fn degenerate_span_reports_complete_without_dividing() {
        // Plan::new forbids target <= starting, so build the degenerate
        // shape by hand to exercise the guard.
        let mut p = plan(10, 20, 1, Cadence::Daily);
        p.target_amount = 10;
        assert_eq!(progress_percentage(&p, day(3)), 1.0);
    }

    #[test]
    fn days_until_target_counts_whole_periods() {
        let p = plan(1, 20, 1, Cadence::Weekly);
        // 19 increments to go, one per week.
        assert_eq!(days_until_target(&p, day(0)), 19 * 7);
        // At day 13 the target is 2, so 18 increments remain.
        assert_eq!(days_until_target(&p, day(13)), 18 * 7);
    }

    #[test]
    fn days_until_target_rounds_increments_up() {
        let p = plan(1, 10, 4, Cadence::Daily);
        // 9 remaining at step 4 needs 3 increments, not 2.25.
        assert_eq!(days_until_target(&p, day(0)), 3);
    }

    #[test]
    fn days_until_target_is_zero_once_goal_reached() {
        let p = plan(1, 20, 1, Cadence::Daily);
        assert_eq!(days_until_target(&p, day(19)), 0);
        assert_eq!(days_until_target(&p, day(100)), 0);
    }
}
