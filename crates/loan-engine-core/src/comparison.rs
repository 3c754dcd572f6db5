//! Accelerated-payoff simulation and scenario comparison.
//!
//! Runs the schedule generator twice over identical loan terms, once without
//! and once with the extra monthly principal, and diffs the two runs into
//! savings metrics. A fixed-horizon variant reports the balance still owed
//! at a target date for goal-tracking consumers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanEngineError;
use crate::payment::{compute_standard_payment, StandardPaymentInput};
use crate::schedule::{run_schedule, ScheduleInput, SimulationResult};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanEngineResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a baseline-vs-accelerated payoff comparison.
///
/// The scheduled payment is taken as given when `monthly_payment` is present;
/// otherwise it is derived from `term_months` via the standard annuity
/// formula. One of the two must be provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffComparisonInput {
    pub principal: Money,
    pub annual_rate_percent: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    pub extra_monthly_payment: Money,
    pub start_date: NaiveDate,
}

/// Savings from the accelerated run relative to the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Months shaved off the payoff
    pub periods_saved: i64,
    /// Interest avoided over the life of the loan
    pub interest_saved: Money,
    /// Balance still owed at the target horizon, for fixed-horizon
    /// comparisons only; `None` in full-payoff comparisons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall: Option<Money>,
}

/// Output of [`simulate_accelerated_payoff`]: both runs plus their diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffComparisonOutput {
    /// The scheduled payment both runs share (derived if not given)
    pub monthly_payment: Money,
    pub baseline: SimulationResult,
    pub accelerated: SimulationResult,
    pub comparison: ComparisonResult,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run baseline and accelerated schedules over the same loan and diff them.
pub fn simulate_accelerated_payoff(
    input: &PayoffComparisonInput,
) -> LoanEngineResult<ComputationOutput<PayoffComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.extra_monthly_payment <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidInput {
            field: "extra_monthly_payment".into(),
            reason: "Accelerated payoff requires a positive extra payment".into(),
        });
    }

    let monthly_payment = resolve_payment(input)?;

    let baseline = run_schedule(&ScheduleInput {
        principal: input.principal,
        annual_rate_percent: input.annual_rate_percent,
        monthly_payment,
        extra_monthly_payment: Decimal::ZERO,
        start_date: input.start_date,
    })?;

    let accelerated = run_schedule(&ScheduleInput {
        principal: input.principal,
        annual_rate_percent: input.annual_rate_percent,
        monthly_payment,
        extra_monthly_payment: input.extra_monthly_payment,
        start_date: input.start_date,
    })?;

    for (label, run) in [("baseline", &baseline), ("accelerated", &accelerated)] {
        if !run.paid_off() {
            warnings.push(format!(
                "{} run did not pay off within {} periods",
                label, run.periods_to_payoff
            ));
        }
    }

    let comparison = compare_scenarios(&baseline, &accelerated)?;

    let output = PayoffComparisonOutput {
        monthly_payment,
        baseline,
        accelerated,
        comparison,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Accelerated payoff — identical terms simulated with and without extra principal",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Diff two full-payoff simulation results into savings metrics.
///
/// When both runs paid off normally, negative savings indicate an upstream
/// computation bug and are surfaced as [`LoanEngineError::InvariantViolation`]
/// rather than clamped to zero.
pub fn compare_scenarios(
    baseline: &SimulationResult,
    accelerated: &SimulationResult,
) -> LoanEngineResult<ComparisonResult> {
    let periods_saved =
        i64::from(baseline.periods_to_payoff) - i64::from(accelerated.periods_to_payoff);
    let interest_saved = baseline.total_interest - accelerated.total_interest;

    if baseline.paid_off()
        && accelerated.paid_off()
        && (periods_saved < 0 || interest_saved < Decimal::ZERO)
    {
        return Err(LoanEngineError::InvariantViolation(format!(
            "accelerated run is worse than baseline (periods_saved={}, interest_saved={})",
            periods_saved, interest_saved
        )));
    }

    Ok(ComparisonResult {
        periods_saved,
        interest_saved,
        shortfall: None,
    })
}

/// Diff two runs against a fixed horizon instead of full payoff.
///
/// `shortfall` carries the balance the accelerated plan still owes at the
/// horizon, or `None` once it has paid off by then. The full-payoff savings
/// invariant does not apply here, so no violation is raised.
pub fn compare_at_horizon(
    baseline: &SimulationResult,
    accelerated: &SimulationResult,
    horizon_months: u32,
) -> LoanEngineResult<ComparisonResult> {
    if horizon_months == 0 {
        return Err(LoanEngineError::InvalidInput {
            field: "horizon_months".into(),
            reason: "Horizon must be at least one month".into(),
        });
    }

    let periods_saved =
        i64::from(baseline.periods_to_payoff) - i64::from(accelerated.periods_to_payoff);
    let interest_saved = baseline.total_interest - accelerated.total_interest;

    let owed = balance_at_period(accelerated, horizon_months);
    let shortfall = if owed > Decimal::ZERO { Some(owed) } else { None };

    Ok(ComparisonResult {
        periods_saved,
        interest_saved,
        shortfall,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Use the given payment, or derive it from the term.
fn resolve_payment(input: &PayoffComparisonInput) -> LoanEngineResult<Money> {
    if let Some(payment) = input.monthly_payment {
        return Ok(payment);
    }
    let Some(term_months) = input.term_months else {
        return Err(LoanEngineError::InvalidInput {
            field: "monthly_payment/term_months".into(),
            reason: "Either monthly_payment or term_months must be provided".into(),
        });
    };
    let derived = compute_standard_payment(&StandardPaymentInput {
        principal: input.principal,
        annual_rate_percent: input.annual_rate_percent,
        term_months,
    })?;
    Ok(derived.result.monthly_payment)
}

/// Balance outstanding after `period` months, reading the simulated schedule.
fn balance_at_period(result: &SimulationResult, period: u32) -> Money {
    if period >= result.periods_to_payoff {
        return match &result.status {
            crate::schedule::PayoffStatus::PaidOff => Decimal::ZERO,
            crate::schedule::PayoffStatus::LimitExceeded { remaining_balance } => {
                *remaining_balance
            }
        };
    }
    result.schedule[period as usize - 1].remaining_balance
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
