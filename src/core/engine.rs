use super::error::{CalculationError, ValidationError};
use super::params::ParameterTable;
use super::types::{Breakdown, CalculationInput, CalculationResult, Parameter};

const EARLY_BLOCK_DAYS: u64 = 90;

/// Applies the tiered inclusion rates to the assessment base.
///
/// Each band only contributes the part of the base that falls inside it, so the
/// function is continuous at `rh1` and `rh2` without any clamping.
pub fn reduced_base(assessment_base: f64, p: &Parameter) -> f64 {
    if assessment_base <= p.threshold_low {
        return assessment_base * p.rate_to_low;
    }
    let full_low_band = p.threshold_low * p.rate_to_low;
    if assessment_base <= p.threshold_high {
        return full_low_band + (assessment_base - p.threshold_low) * p.rate_between;
    }
    full_low_band
        + (p.threshold_high - p.threshold_low) * p.rate_between
        + (assessment_base - p.threshold_high) * p.rate_above
}

/// Returns `(factor, blocks)` for the early-retirement penalty.
///
/// Every started 90-day block counts in full. The factor floors at zero, after
/// which further days have no effect.
pub fn early_reduction_factor(p: &Parameter, early_days: i64) -> (f64, u64) {
    if early_days <= 0 {
        return (1.0, 0);
    }
    let blocks = early_days.unsigned_abs().div_ceil(EARLY_BLOCK_DAYS);
    let reduction = blocks as f64 * p.early_reduction_per_90_days;
    ((1.0 - reduction).max(0.0), blocks)
}

/// Evaluates the pension formula against the standard parameter table.
pub fn calculate_pension(input: CalculationInput) -> Result<CalculationResult, CalculationError> {
    calculate_pension_with(ParameterTable::standard(), input)
}

pub fn calculate_pension_with(
    table: &ParameterTable,
    input: CalculationInput,
) -> Result<CalculationResult, CalculationError> {
    if input.years < 0 {
        return Err(ValidationError::NegativeYears { years: input.years }.into());
    }
    if input.assessment_base.is_nan() || input.assessment_base.is_infinite() {
        return Err(ValidationError::NonFiniteAssessmentBase.into());
    }
    if input.assessment_base < 0.0 {
        return Err(ValidationError::NegativeAssessmentBase {
            assessment_base: input.assessment_base,
        }
        .into());
    }
    let params = *table.lookup(input.year)?;
    if input.early_days < 0 {
        return Err(ValidationError::NegativeEarlyDays {
            early_days: input.early_days,
        }
        .into());
    }

    let reduced_base = reduced_base(input.assessment_base, &params);
    let percent_part_gross = reduced_base * params.accrual_rate_per_year * input.years as f64;
    let (early_factor, early_blocks) = early_reduction_factor(&params, input.early_days);
    let percent_part_net = percent_part_gross * early_factor;

    Ok(CalculationResult {
        inputs: input,
        params,
        results: Breakdown {
            reduced_base,
            percent_part_gross,
            early_blocks,
            early_factor,
            percent_part_net,
            pension_monthly: params.basic_amount + percent_part_net,
        },
    })
}
