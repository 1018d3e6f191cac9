use serde::{Deserialize, Serialize};

use super::config::EvaluationConfig;
use super::rules::ScoreBreakdown;
use crate::lending::domain::{CustomerProfile, LoanRequest};

/// Adjudication outcome for a proposed loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved,
    Rejected(RejectionReason),
}

impl LoanDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, LoanDecision::Approved)
    }

    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Approved => "loan approved".to_string(),
            LoanDecision::Rejected(reason) => reason.summary(),
        }
    }
}

/// Enumerates rejection causes so responses can explain the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    DebtOverLimit {
        current_debt: f64,
        approved_limit: f64,
    },
    ScoreBelowCutoff {
        credit_score: u8,
        cutoff: u8,
    },
    RepaymentCapExceeded {
        projected_outgo: f64,
        cap: f64,
    },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::DebtOverLimit {
                current_debt,
                approved_limit,
            } => format!(
                "rejected: outstanding debt {current_debt:.2} exceeds approved limit {approved_limit:.2}"
            ),
            RejectionReason::ScoreBelowCutoff {
                credit_score,
                cutoff,
            } => format!("rejected: credit score {credit_score} below cutoff {cutoff}"),
            RejectionReason::RepaymentCapExceeded {
                projected_outgo,
                cap,
            } => format!(
                "rejected: projected monthly outgo {projected_outgo:.2} exceeds repayment cap {cap:.2}"
            ),
        }
    }
}

pub(crate) struct RateOutcome {
    pub decision: LoanDecision,
    pub corrected_interest_rate: f64,
    pub monthly_installment: f64,
}

pub(crate) fn decide(
    profile: &CustomerProfile,
    request: &LoanRequest,
    breakdown: &ScoreBreakdown,
    config: &EvaluationConfig,
) -> RateOutcome {
    if breakdown.over_limit {
        return RateOutcome {
            decision: LoanDecision::Rejected(RejectionReason::DebtOverLimit {
                current_debt: breakdown.current_debt,
                approved_limit: profile.customer.approved_limit,
            }),
            corrected_interest_rate: request.interest_rate,
            monthly_installment: monthly_installment(
                request.amount,
                request.interest_rate,
                request.tenure_months,
            ),
        };
    }

    let score = breakdown.credit_score;
    if score < config.subprime_cutoff {
        return RateOutcome {
            decision: LoanDecision::Rejected(RejectionReason::ScoreBelowCutoff {
                credit_score: score,
                cutoff: config.subprime_cutoff,
            }),
            corrected_interest_rate: request.interest_rate,
            monthly_installment: monthly_installment(
                request.amount,
                request.interest_rate,
                request.tenure_months,
            ),
        };
    }

    let corrected_interest_rate = if score >= config.prime_cutoff {
        request.interest_rate
    } else if score >= config.standard_cutoff {
        request.interest_rate.max(config.standard_rate_floor)
    } else {
        request.interest_rate.max(config.subprime_rate_floor)
    };

    let installment = monthly_installment(
        request.amount,
        corrected_interest_rate,
        request.tenure_months,
    );

    let projected_outgo = installment + profile.current_monthly_obligation();
    let cap = profile.customer.monthly_salary * config.repayment_to_income_cap;
    if projected_outgo > cap {
        return RateOutcome {
            decision: LoanDecision::Rejected(RejectionReason::RepaymentCapExceeded {
                projected_outgo,
                cap,
            }),
            corrected_interest_rate,
            monthly_installment: installment,
        };
    }

    RateOutcome {
        decision: LoanDecision::Approved,
        corrected_interest_rate,
        monthly_installment: installment,
    }
}

/// Reducing-balance EMI over the tenure. Zero tenure never reaches this
/// point through intake; it yields zero rather than dividing by it.
pub fn monthly_installment(principal: f64, annual_rate: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return principal / tenure_months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}
