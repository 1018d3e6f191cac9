mod config;
mod policy;
mod rules;

pub use config::EvaluationConfig;
pub use policy::{monthly_installment, LoanDecision, RejectionReason};

use serde::{Deserialize, Serialize};

use super::domain::{CustomerId, CustomerProfile, LoanRequest, ScoreFactor};

/// Stateless evaluator applying the rubric configuration to a profile.
///
/// Evaluation is a pure function of `(profile, request, config)`: no data
/// access, no clock, no randomness. Identical inputs produce identical
/// results.
pub struct EligibilityEngine {
    config: EvaluationConfig,
}

impl EligibilityEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn evaluate(&self, profile: &CustomerProfile, request: &LoanRequest) -> EligibilityResult {
        let breakdown = rules::score_profile(profile, &self.config);
        let outcome = policy::decide(profile, request, &breakdown, &self.config);

        EligibilityResult {
            customer_id: profile.customer.customer_id,
            credit_score: breakdown.credit_score,
            decision: outcome.decision,
            corrected_interest_rate: outcome.corrected_interest_rate,
            monthly_installment: round_to_cents(outcome.monthly_installment),
            components: breakdown.components,
        }
    }
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Discrete contribution to an evaluation, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

/// Evaluation output describing the score, decision, and corrected terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub customer_id: CustomerId,
    pub credit_score: u8,
    pub decision: LoanDecision,
    pub corrected_interest_rate: f64,
    pub monthly_installment: f64,
    pub components: Vec<ScoreComponent>,
}

impl EligibilityResult {
    pub fn approved(&self) -> bool {
        self.decision.is_approved()
    }
}
