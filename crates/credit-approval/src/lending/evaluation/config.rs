use serde::{Deserialize, Serialize};

/// Rubric configuration describing the scoring weights and lending policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Ceiling for the on-time payment component.
    pub payment_history_weight: f64,
    /// Points granted per historical loan and the cap they accumulate to.
    pub loan_count_step: f64,
    pub loan_count_cap: f64,
    /// Points granted per loan originated in the snapshot year, capped.
    pub recent_activity_step: f64,
    pub recent_activity_cap: f64,
    /// Ceiling for the principal-to-limit volume component.
    pub loan_volume_weight: f64,
    /// Flat floor so customers with no history still clear the lowest band.
    pub baseline_score: f64,
    /// Score at or above which the requested rate stands.
    pub prime_cutoff: u8,
    /// Score at or above which the standard floor applies.
    pub standard_cutoff: u8,
    /// Score at or above which the subprime floor applies; below it the
    /// request is rejected outright.
    pub subprime_cutoff: u8,
    pub standard_rate_floor: f64,
    pub subprime_rate_floor: f64,
    /// Share of monthly salary that total repayments may not exceed.
    pub repayment_to_income_cap: f64,
}
