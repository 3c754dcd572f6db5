use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_engine_core::aggregate::aggregate_by_year;
use loan_engine_core::comparison::{self, PayoffComparisonInput};
use loan_engine_core::payment::{self, StandardPaymentInput};
use loan_engine_core::schedule::{self, ScheduleInput};

use crate::input;

/// Arguments for the standard payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a percentage (5 = 5% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the full amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a percentage
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Scheduled monthly payment (mutually exclusive with --term-months)
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Term in months, used to derive the payment when --payment is absent
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Extra principal contributed each month
    #[arg(long, default_value = "0")]
    pub extra: Decimal,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the baseline vs. accelerated payoff comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a percentage
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Scheduled monthly payment (derived from --term-months when absent)
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Extra principal contributed each month in the accelerated run
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Compare at a fixed horizon (months) instead of full payoff
    #[arg(long)]
    pub horizon_months: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the per-calendar-year roll-up
#[derive(Args)]
pub struct YearlyArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment_input: StandardPaymentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        StandardPaymentInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        }
    };

    let result = payment::compute_standard_payment(&payment_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input = resolve_schedule_input(&args)?;
    let result = schedule::simulate_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let compare_input: PayoffComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PayoffComparisonInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            monthly_payment: args.payment,
            term_months: args.term_months,
            extra_monthly_payment: args
                .extra
                .ok_or("--extra is required (or provide --input)")?,
            start_date: args
                .start_date
                .ok_or("--start-date is required (or provide --input)")?,
        }
    };

    let mut result = comparison::simulate_accelerated_payoff(&compare_input)?;

    // Fixed-horizon mode swaps in the shortfall-aware comparison
    if let Some(horizon) = args.horizon_months {
        result.result.comparison = comparison::compare_at_horizon(
            &result.result.baseline,
            &result.result.accelerated,
            horizon,
        )?;
    }

    Ok(serde_json::to_value(result)?)
}

pub fn run_yearly(args: YearlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input = resolve_schedule_input(&args.schedule)?;
    let result = schedule::simulate_schedule(&schedule_input)?;
    let buckets = aggregate_by_year(&result.result.schedule);
    Ok(serde_json::to_value(buckets)?)
}

/// Build a [`ScheduleInput`] from file, stdin, or flags, deriving the payment
/// from the term when only `--term-months` is given.
fn resolve_schedule_input(args: &ScheduleArgs) -> Result<ScheduleInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(input::file::read_json(path)?);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let annual_rate_percent = args
        .annual_rate
        .ok_or("--annual-rate is required (or provide --input)")?;

    let monthly_payment = match (args.payment, args.term_months) {
        (Some(payment), _) => payment,
        (None, Some(term_months)) => {
            payment::compute_standard_payment(&StandardPaymentInput {
                principal,
                annual_rate_percent,
                term_months,
            })?
            .result
            .monthly_payment
        }
        (None, None) => return Err("--payment or --term-months is required".into()),
    };

    Ok(ScheduleInput {
        principal,
        annual_rate_percent,
        monthly_payment,
        extra_monthly_payment: args.extra,
        start_date: args
            .start_date
            .ok_or("--start-date is required (or provide --input)")?,
    })
}
