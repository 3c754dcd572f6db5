//! Period-by-period amortization schedule generator.
//!
//! Simulates monthly balance reduction for a fixed nominal annual rate with
//! simple monthly compounding, supporting an optional extra principal
//! contribution per month. Non-amortizing configurations are rejected up
//! front; pathological long-horizon loans that pass the upfront check but do
//! not pay off within [`MAX_PERIODS`] come back as a partial schedule flagged
//! [`PayoffStatus::LimitExceeded`] instead of an error, so callers can still
//! render a "does not pay off within N years" view.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanEngineError;
use crate::payment::monthly_rate;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanEngineResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Safety cap on schedule length: 600 months = 50 years.
pub const MAX_PERIODS: u32 = 600;

/// One minor currency unit. Residual balances at or below this are folded
/// into the final period so the schedule ends at exactly zero.
pub const PAYOFF_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a schedule simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// Loan principal (outstanding balance at start)
    pub principal: Money,
    /// Nominal annual rate as a percentage (5 = 5% p.a.)
    pub annual_rate_percent: Rate,
    /// Scheduled monthly payment (interest + principal)
    pub monthly_payment: Money,
    /// Extra principal contributed on top of the payment each month
    #[serde(default)]
    pub extra_monthly_payment: Money,
    /// Date of the first payment
    pub start_date: NaiveDate,
}

/// One period of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based period index
    pub index: u32,
    /// Payment date
    pub date: NaiveDate,
    /// Total paid this period (interest + principal, including extra)
    pub payment_amount: Money,
    /// Portion applied to the balance
    pub principal_portion: Money,
    /// Portion covering accrued interest
    pub interest_portion: Money,
    /// Balance after this payment
    pub remaining_balance: Money,
}

/// Whether the simulation reached a zero balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffStatus {
    /// Balance reached exactly zero within the period cap
    PaidOff,
    /// The cap was hit with a balance still outstanding
    LimitExceeded { remaining_balance: Money },
}

/// Full result of one schedule simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub schedule: Vec<PeriodRecord>,
    /// Sum of all payment amounts
    pub total_paid: Money,
    /// Sum of all interest portions
    pub total_interest: Money,
    /// Schedule length in months
    pub periods_to_payoff: u32,
    pub status: PayoffStatus,
}

impl SimulationResult {
    pub fn paid_off(&self) -> bool {
        self.status == PayoffStatus::PaidOff
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the full amortization schedule for a loan.
pub fn simulate_schedule(
    input: &ScheduleInput,
) -> LoanEngineResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = run_schedule(input)?;

    if let PayoffStatus::LimitExceeded { remaining_balance } = &result.status {
        warnings.push(format!(
            "Loan does not pay off within {} months; {} still outstanding",
            MAX_PERIODS, remaining_balance
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Iterative amortization — monthly interest accrual, principal reduction, extra principal",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Validate, run the upfront convergence check, and iterate the schedule.
/// Shared by [`simulate_schedule`] and the payoff comparison.
pub(crate) fn run_schedule(input: &ScheduleInput) -> LoanEngineResult<SimulationResult> {
    validate_input(input)?;

    let rate = monthly_rate(input.annual_rate_percent);
    let total_monthly = input.monthly_payment + input.extra_monthly_payment;

    // Fail fast: a payment that cannot cover first-period interest never
    // amortizes, and would otherwise walk the cap for 50 misleading years.
    let first_period_interest = input.principal * rate;
    if total_monthly <= first_period_interest {
        return Err(LoanEngineError::NonAmortizing {
            offered_payment: total_monthly,
            minimum_payment: first_period_interest,
        });
    }

    let mut schedule: Vec<PeriodRecord> = Vec::new();
    let mut balance = input.principal;
    let mut date = input.start_date;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for index in 1..=MAX_PERIODS {
        let interest = balance * rate;
        let mut principal_portion = input.monthly_payment - interest + input.extra_monthly_payment;

        // Final period: fold sub-cent residuals in and close at exactly zero
        if balance - principal_portion <= PAYOFF_TOLERANCE {
            principal_portion = balance;
        }

        balance -= principal_portion;

        let payment_amount = interest + principal_portion;
        total_paid += payment_amount;
        total_interest += interest;

        schedule.push(PeriodRecord {
            index,
            date,
            payment_amount,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance,
        });

        if balance <= Decimal::ZERO {
            break;
        }

        date = add_months(date, 1);
    }

    let status = if balance > Decimal::ZERO {
        PayoffStatus::LimitExceeded {
            remaining_balance: balance,
        }
    } else {
        PayoffStatus::PaidOff
    };

    Ok(SimulationResult {
        periods_to_payoff: schedule.len() as u32,
        schedule,
        total_paid,
        total_interest,
        status,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &ScheduleInput) -> LoanEngineResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate_percent < Decimal::ZERO {
        return Err(LoanEngineError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.monthly_payment <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment must be positive".into(),
        });
    }
    if input.extra_monthly_payment < Decimal::ZERO {
        return Err(LoanEngineError::InvalidInput {
            field: "extra_monthly_payment".into(),
            reason: "Extra payment cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Calendar arithmetic
// ---------------------------------------------------------------------------

/// Add a number of months to a date, clamping the day to the month's max.
pub(crate) fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total_months = date.year() * 12 + date.month() as i32 - 1 + months;
    let new_year = total_months.div_euclid(12);
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    let max_day = days_in_month(new_year, new_month);
    let day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, day).unwrap_or(date)
}

/// Number of days in a given month/year.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
