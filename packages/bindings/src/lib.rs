use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Standard payment
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_standard_payment(input_json: String) -> NapiResult<String> {
    let input: loan_engine_core::payment::StandardPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_engine_core::payment::compute_standard_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_schedule(input_json: String) -> NapiResult<String> {
    let input: loan_engine_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_engine_core::schedule::simulate_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Accelerated payoff
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_accelerated_payoff(input_json: String) -> NapiResult<String> {
    let input: loan_engine_core::comparison::PayoffComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_engine_core::comparison::simulate_accelerated_payoff(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Yearly aggregation
// ---------------------------------------------------------------------------

#[napi]
pub fn aggregate_by_year(schedule_json: String) -> NapiResult<String> {
    let schedule: Vec<loan_engine_core::schedule::PeriodRecord> =
        serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    let buckets = loan_engine_core::aggregate::aggregate_by_year(&schedule);
    serde_json::to_string(&buckets).map_err(to_napi_error)
}
