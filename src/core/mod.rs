mod engine;
mod error;
mod params;
mod types;

pub use engine::{calculate_pension, calculate_pension_with, early_reduction_factor, reduced_base};
pub use error::{CalculationError, ConfigurationError, ParameterError, ValidationError};
pub use params::{DEFAULT_YEAR, ParameterTable};
pub use types::{Breakdown, CalculationInput, CalculationResult, Parameter};
