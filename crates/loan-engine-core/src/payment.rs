//! Standard payment calculator for fully amortizing loans.
//!
//! Derives the fixed monthly payment from principal, nominal annual rate,
//! and term using the standard annuity formula, with a zero-rate
//! short-circuit.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanEngineError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanEngineResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for the standard payment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardPaymentInput {
    /// Loan principal (outstanding balance at start)
    pub principal: Money,
    /// Nominal annual rate as a percentage (5 = 5% p.a.)
    pub annual_rate_percent: Rate,
    /// Term in months
    pub term_months: u32,
}

/// Output of the standard payment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardPaymentOutput {
    /// Fixed monthly payment that fully amortizes the loan over the term
    pub monthly_payment: Money,
    /// Monthly rate used (annual_rate_percent / 100 / 12)
    pub monthly_rate: Rate,
    /// Total paid if the payment is made every month of the term
    pub total_scheduled_paid: Money,
    /// Excess of total scheduled payments over principal
    pub total_scheduled_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the fixed monthly payment for a fully amortizing loan.
///
/// Zero-rate loans pay `principal / term_months` per month; otherwise the
/// annuity formula `P * c(1+c)^n / ((1+c)^n - 1)` applies, where `c` is the
/// monthly rate.
pub fn compute_standard_payment(
    input: &StandardPaymentInput,
) -> LoanEngineResult<ComputationOutput<StandardPaymentOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let monthly_rate = monthly_rate(input.annual_rate_percent);
    let term = Decimal::from(input.term_months);

    let monthly_payment = if monthly_rate.is_zero() {
        input.principal / term
    } else {
        annuity_payment(input.principal, monthly_rate, input.term_months)?
    };

    let total_scheduled_paid = monthly_payment * term;
    let output = StandardPaymentOutput {
        monthly_payment,
        monthly_rate,
        total_scheduled_paid,
        total_scheduled_interest: total_scheduled_paid - input.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Standard annuity payment — fixed monthly payment over the full term",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Convert a nominal annual percentage rate into the simple monthly rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &StandardPaymentInput) -> LoanEngineResult<()> {
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
    if input.term_months == 0 {
        return Err(LoanEngineError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Annuity formula
// ---------------------------------------------------------------------------

/// `P * c(1+c)^n / ((1+c)^n - 1)` with overflow surfaced as a typed error
/// rather than a panic for extreme rate/term combinations.
fn annuity_payment(principal: Money, rate: Rate, term_months: u32) -> LoanEngineResult<Money> {
    let one_plus_c = Decimal::ONE + rate;
    let factor = one_plus_c
        .checked_powd(Decimal::from(term_months))
        .ok_or_else(|| LoanEngineError::Overflow {
            context: format!("annuity growth factor (1+c)^{term_months}"),
        })?;

    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanEngineError::Overflow {
            context: "annuity denominator (1+c)^n - 1".into(),
        });
    }

    principal
        .checked_mul(rate * factor)
        .map(|numerator| numerator / denominator)
        .ok_or_else(|| LoanEngineError::Overflow {
            context: "annuity numerator P * c(1+c)^n".into(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn thirty_year_mortgage() -> StandardPaymentInput {
        StandardPaymentInput {
            principal: dec!(100000),
            annual_rate_percent: dec!(5),
            term_months: 360,
        }
    }

    // -----------------------------------------------------------------------
    // 1. Reference mortgage: 100k at 5% over 30 years => ~536.82/month
    // -----------------------------------------------------------------------
    #[test]
    fn test_reference_mortgage_payment() {
        let result = compute_standard_payment(&thirty_year_mortgage()).unwrap();
        let out = &result.result;

        let diff = (out.monthly_payment - dec!(536.82)).abs();
        assert!(
            diff < dec!(0.01),
            "100k @ 5% / 360m should pay ~536.82, got {}",
            out.monthly_payment
        );
    }

    // -----------------------------------------------------------------------
    // 2. Zero rate pays principal / term exactly
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_is_straight_line() {
        let input = StandardPaymentInput {
            principal: dec!(12000),
            annual_rate_percent: dec!(0),
            term_months: 24,
        };
        let result = compute_standard_payment(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.monthly_payment, dec!(500));
        assert_eq!(out.total_scheduled_interest, dec!(0));
    }

    // -----------------------------------------------------------------------
    // 3. Zero rate with non-terminating division still reconstructs principal
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_matches_plain_division() {
        let input = StandardPaymentInput {
            principal: dec!(100000),
            annual_rate_percent: dec!(0),
            term_months: 360,
        };
        let result = compute_standard_payment(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.monthly_payment, dec!(100000) / dec!(360));
    }

    // -----------------------------------------------------------------------
    // 4. Shorter term raises the payment
    // -----------------------------------------------------------------------
    #[test]
    fn test_shorter_term_pays_more_per_month() {
        let thirty = compute_standard_payment(&thirty_year_mortgage()).unwrap();
        let fifteen = compute_standard_payment(&StandardPaymentInput {
            term_months: 180,
            ..thirty_year_mortgage()
        })
        .unwrap();

        assert!(
            fifteen.result.monthly_payment > thirty.result.monthly_payment,
            "15y payment ({}) should exceed 30y payment ({})",
            fifteen.result.monthly_payment,
            thirty.result.monthly_payment
        );
        assert!(
            fifteen.result.total_scheduled_interest < thirty.result.total_scheduled_interest,
            "15y total interest should be lower"
        );
    }

    // -----------------------------------------------------------------------
    // 5. Higher rate raises the payment
    // -----------------------------------------------------------------------
    #[test]
    fn test_higher_rate_pays_more_per_month() {
        let base = compute_standard_payment(&thirty_year_mortgage()).unwrap();
        let steep = compute_standard_payment(&StandardPaymentInput {
            annual_rate_percent: dec!(8),
            ..thirty_year_mortgage()
        })
        .unwrap();

        assert!(steep.result.monthly_payment > base.result.monthly_payment);
    }

    // -----------------------------------------------------------------------
    // 6. Five-year loan reference value: 50k @ 6% / 60m => ~966.64
    // -----------------------------------------------------------------------
    #[test]
    fn test_five_year_loan_payment() {
        let input = StandardPaymentInput {
            principal: dec!(50000),
            annual_rate_percent: dec!(6),
            term_months: 60,
        };
        let result = compute_standard_payment(&input).unwrap();
        let out = &result.result;

        let diff = (out.monthly_payment - dec!(966.64)).abs();
        assert!(
            diff < dec!(0.01),
            "50k @ 6% / 60m should pay ~966.64, got {}",
            out.monthly_payment
        );
    }

    // -----------------------------------------------------------------------
    // 7. Non-positive principal rejected
    // -----------------------------------------------------------------------
    #[test]
    fn test_invalid_principal_error() {
        let mut input = thirty_year_mortgage();
        input.principal = dec!(0);

        let result = compute_standard_payment(&input);
        assert!(result.is_err());
        match result.unwrap_err() {
            LoanEngineError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 8. Negative rate rejected
    // -----------------------------------------------------------------------
    #[test]
    fn test_negative_rate_error() {
        let mut input = thirty_year_mortgage();
        input.annual_rate_percent = dec!(-1);

        let result = compute_standard_payment(&input);
        assert!(result.is_err());
        match result.unwrap_err() {
            LoanEngineError::InvalidInput { field, .. } => {
                assert_eq!(field, "annual_rate_percent")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 9. Zero term rejected
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_term_error() {
        let mut input = thirty_year_mortgage();
        input.term_months = 0;

        let result = compute_standard_payment(&input);
        assert!(result.is_err());
        match result.unwrap_err() {
            LoanEngineError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 10. Metadata populated
    // -----------------------------------------------------------------------
    #[test]
    fn test_metadata_populated() {
        let result = compute_standard_payment(&thirty_year_mortgage()).unwrap();

        assert!(result.methodology.contains("annuity"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
        assert!(!result.metadata.version.is_empty());
    }
}
