use thiserror::Error;

/// An input outside the range the formula is defined for.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("years must be >= 0")]
    NegativeYears { years: i64 },
    #[error("ovz_monthly must be >= 0")]
    NegativeAssessmentBase { assessment_base: f64 },
    #[error("ovz_monthly must be a finite number")]
    NonFiniteAssessmentBase,
    #[error("early_days must be >= 0")]
    NegativeEarlyDays { early_days: i64 },
}

impl ValidationError {
    /// Wire name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NegativeYears { .. } => "years",
            ValidationError::NegativeAssessmentBase { .. }
            | ValidationError::NonFiniteAssessmentBase => "ovz_monthly",
            ValidationError::NegativeEarlyDays { .. } => "early_days",
        }
    }
}

/// A request for a year with no registered parameter record.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("year must be one of: {supported:?}")]
pub struct ConfigurationError {
    pub year: i64,
    /// Registered years, ascending.
    pub supported: Vec<i64>,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalculationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Rejected record when building a custom parameter table.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("duplicate parameter record for year {year}")]
    DuplicateYear { year: i64 },
    #[error("year {year}: thresholds must satisfy 0 < rh1 < rh2 (got rh1={low}, rh2={high})")]
    ThresholdOrder { year: i64, low: f64, high: f64 },
    #[error("year {year}: {field} must be between 0 and 1 (got {value})")]
    RateOutOfRange {
        year: i64,
        field: &'static str,
        value: f64,
    },
    #[error("year {year}: {field} must be a finite number >= 0 (got {value})")]
    InvalidAmount {
        year: i64,
        field: &'static str,
        value: f64,
    },
}
