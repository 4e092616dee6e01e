use serde::Serialize;

/// Formula parameters for one legislative year.
///
/// Serialized field names follow the wire contract of `/api/calculate`
/// (`rh1`, `pct_to_rh1`, ...), so the JSON matches what the calculator UI reads.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Parameter {
    #[serde(skip)]
    pub year: i64,
    pub basic_amount: f64,
    #[serde(rename = "rh1")]
    pub threshold_low: f64,
    #[serde(rename = "rh2")]
    pub threshold_high: f64,
    #[serde(rename = "pct_to_rh1")]
    pub rate_to_low: f64,
    #[serde(rename = "pct_between")]
    pub rate_between: f64,
    #[serde(rename = "pct_above")]
    pub rate_above: f64,
    pub accrual_rate_per_year: f64,
    #[serde(rename = "early_reduction_per_90days")]
    pub early_reduction_per_90_days: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CalculationInput {
    #[serde(rename = "ovz_monthly")]
    pub assessment_base: f64,
    pub years: i64,
    pub year: i64,
    pub early_days: i64,
}

/// Intermediate values of one evaluation. The UI renders these as a
/// breakdown, so every step is reported rather than only the final amount.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Breakdown {
    pub reduced_base: f64,
    pub percent_part_gross: f64,
    #[serde(rename = "early_blocks_90days")]
    pub early_blocks: u64,
    pub early_factor: f64,
    pub percent_part_net: f64,
    pub pension_monthly: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResult {
    pub inputs: CalculationInput,
    pub params: Parameter,
    pub results: Breakdown,
}
