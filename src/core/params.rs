use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::error::{ConfigurationError, ParameterError};
use super::types::Parameter;

pub const DEFAULT_YEAR: i64 = 2025;

const STANDARD_PARAMETERS: [Parameter; 2] = [
    Parameter {
        year: 2025,
        basic_amount: 4660.0,
        threshold_low: 20486.0,
        threshold_high: 186228.0,
        rate_to_low: 1.00,
        rate_between: 0.26,
        rate_above: 0.00,
        accrual_rate_per_year: 0.015,
        early_reduction_per_90_days: 0.015,
    },
    // Provisional figures until the 2026 decree is final.
    Parameter {
        year: 2026,
        basic_amount: 4900.0,
        threshold_low: 21546.0,
        threshold_high: 195868.0,
        rate_to_low: 0.99,
        rate_between: 0.26,
        rate_above: 0.00,
        accrual_rate_per_year: 0.01495,
        early_reduction_per_90_days: 0.015,
    },
];

static STANDARD_TABLE: LazyLock<ParameterTable> = LazyLock::new(|| ParameterTable {
    by_year: STANDARD_PARAMETERS.iter().map(|p| (p.year, *p)).collect(),
});

/// Year-keyed parameter records. Immutable once built.
#[derive(Clone, Debug)]
pub struct ParameterTable {
    by_year: BTreeMap<i64, Parameter>,
}

impl ParameterTable {
    /// The process-wide table of legislated years.
    pub fn standard() -> &'static ParameterTable {
        &STANDARD_TABLE
    }

    /// Builds a table from custom records, rejecting duplicates and
    /// records outside the formula's domain.
    pub fn new(records: impl IntoIterator<Item = Parameter>) -> Result<Self, ParameterError> {
        let mut by_year = BTreeMap::new();
        for record in records {
            validate_record(&record)?;
            if by_year.insert(record.year, record).is_some() {
                return Err(ParameterError::DuplicateYear { year: record.year });
            }
        }
        Ok(Self { by_year })
    }

    pub fn lookup(&self, year: i64) -> Result<&Parameter, ConfigurationError> {
        self.by_year.get(&year).ok_or_else(|| ConfigurationError {
            year,
            supported: self.supported_years(),
        })
    }

    /// Registered years, ascending.
    pub fn supported_years(&self) -> Vec<i64> {
        self.by_year.keys().copied().collect()
    }
}

fn validate_record(p: &Parameter) -> Result<(), ParameterError> {
    for (field, value) in [
        ("basic_amount", p.basic_amount),
        ("rh1", p.threshold_low),
        ("rh2", p.threshold_high),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ParameterError::InvalidAmount {
                year: p.year,
                field,
                value,
            });
        }
    }

    if !(p.threshold_low > 0.0 && p.threshold_low < p.threshold_high) {
        return Err(ParameterError::ThresholdOrder {
            year: p.year,
            low: p.threshold_low,
            high: p.threshold_high,
        });
    }

    for (field, value) in [
        ("pct_to_rh1", p.rate_to_low),
        ("pct_between", p.rate_between),
        ("pct_above", p.rate_above),
        ("accrual_rate_per_year", p.accrual_rate_per_year),
        ("early_reduction_per_90days", p.early_reduction_per_90_days),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ParameterError::RateOutOfRange {
                year: p.year,
                field,
                value,
            });
        }
    }

    Ok(())
}
