//! Calendar-year roll-up of an amortization schedule, for charting.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::schedule::PeriodRecord;
use crate::types::Money;

/// Per-calendar-year sums of a monthly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyBucket {
    pub year: i32,
    /// Principal paid down during the year (including extra principal)
    pub principal_sum: Money,
    /// Interest accrued during the year
    pub interest_sum: Money,
    /// Total paid during the year
    pub payment_sum: Money,
}

/// Group a schedule's periods by calendar year, in chronological order.
///
/// Pure over its input: aggregating the same schedule repeatedly yields
/// identical buckets, and bucket sums reconcile with the schedule totals.
pub fn aggregate_by_year(schedule: &[PeriodRecord]) -> Vec<YearlyBucket> {
    let mut buckets: Vec<YearlyBucket> = Vec::new();

    for period in schedule {
        let year = period.date.year();
        // Schedule dates are monotonic, so the matching bucket is always last
        match buckets.last_mut() {
            Some(bucket) if bucket.year == year => {
                bucket.principal_sum += period.principal_portion;
                bucket.interest_sum += period.interest_portion;
                bucket.payment_sum += period.payment_amount;
            }
            _ => buckets.push(YearlyBucket {
                year,
                principal_sum: period.principal_portion,
                interest_sum: period.interest_portion,
                payment_sum: period.payment_amount,
            }),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{simulate_schedule, ScheduleInput};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn five_year_schedule() -> Vec<PeriodRecord> {
        simulate_schedule(&ScheduleInput {
            principal: dec!(50000),
            annual_rate_percent: dec!(6),
            monthly_payment: dec!(966.64),
            extra_monthly_payment: dec!(0),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        })
        .unwrap()
        .result
        .schedule
    }

    // -----------------------------------------------------------------------
    // 1. Buckets cover the expected years in order
    // -----------------------------------------------------------------------
    #[test]
    fn test_buckets_chronological() {
        let buckets = aggregate_by_year(&five_year_schedule());

        // March 2024 start, 60 monthly payments => 2024 through 2029
        let years: Vec<i32> = buckets.iter().map(|b| b.year).collect();
        assert_eq!(years, vec![2024, 2025, 2026, 2027, 2028, 2029]);
    }

    // -----------------------------------------------------------------------
    // 2. Bucket sums reconcile with schedule totals within one minor unit.
    //    Per-year partial sums can round the last Decimal digit differently
    //    from a straight sum over the schedule.
    // -----------------------------------------------------------------------
    #[test]
    fn test_bucket_sums_reconcile() {
        let schedule = five_year_schedule();
        let buckets = aggregate_by_year(&schedule);

        let principal_total: Decimal = buckets.iter().map(|b| b.principal_sum).sum();
        let interest_total: Decimal = buckets.iter().map(|b| b.interest_sum).sum();
        let schedule_interest: Decimal = schedule.iter().map(|p| p.interest_portion).sum();

        let principal_diff = (principal_total - dec!(50000)).abs();
        assert!(
            principal_diff < dec!(0.01),
            "Bucket principal should sum to ~50000, got {}",
            principal_total
        );

        let interest_diff = (interest_total - schedule_interest).abs();
        assert!(
            interest_diff < dec!(0.01),
            "Bucket interest ({}) should match schedule interest ({})",
            interest_total,
            schedule_interest
        );
    }

    // -----------------------------------------------------------------------
    // 3. Partial first and last years bucket by calendar year, not by 12s
    // -----------------------------------------------------------------------
    #[test]
    fn test_partial_years() {
        let schedule = five_year_schedule();
        let buckets = aggregate_by_year(&schedule);

        // 2024 holds March through December: 10 payments
        let first_year_payment: Decimal = schedule
            .iter()
            .take(10)
            .map(|p| p.payment_amount)
            .sum();
        assert_eq!(buckets[0].payment_sum, first_year_payment);
    }

    // -----------------------------------------------------------------------
    // 4. Aggregation is repeatable
    // -----------------------------------------------------------------------
    #[test]
    fn test_aggregation_is_pure() {
        let schedule = five_year_schedule();
        assert_eq!(aggregate_by_year(&schedule), aggregate_by_year(&schedule));
    }

    // -----------------------------------------------------------------------
    // 5. Empty schedule aggregates to no buckets
    // -----------------------------------------------------------------------
    #[test]
    fn test_empty_schedule() {
        assert!(aggregate_by_year(&[]).is_empty());
    }
}
