use chrono::Datelike;

use super::config::EvaluationConfig;
use super::ScoreComponent;
use crate::lending::domain::{CustomerProfile, ScoreFactor};

/// Intermediate scoring state shared with the decision policy.
pub(crate) struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub credit_score: u8,
    pub over_limit: bool,
    pub current_debt: f64,
}

pub(crate) fn score_profile(
    profile: &CustomerProfile,
    config: &EvaluationConfig,
) -> ScoreBreakdown {
    let approved_limit = profile.customer.approved_limit;
    let current_debt = profile.current_debt();

    // Hard rejection short-circuits the weighting entirely.
    if current_debt > approved_limit {
        let components = vec![ScoreComponent {
            factor: ScoreFactor::LoanVolume,
            points: 0.0,
            notes: format!(
                "outstanding principal {current_debt:.2} exceeds approved limit {approved_limit:.2}"
            ),
        }];
        return ScoreBreakdown {
            components,
            credit_score: 0,
            over_limit: true,
            current_debt,
        };
    }

    let mut components = Vec::new();

    let total_emis: u32 = profile.loans.iter().map(|loan| loan.tenure_months).sum();
    let on_time_emis: u32 = profile.loans.iter().map(|loan| loan.emis_paid_on_time).sum();
    let payment_points = if total_emis > 0 {
        (on_time_emis as f64 / total_emis as f64) * config.payment_history_weight
    } else {
        0.0
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::PaymentHistory,
        points: payment_points,
        notes: format!("{on_time_emis} of {total_emis} EMIs paid on time"),
    });

    let loan_count = profile.loans.len();
    let count_points = (loan_count as f64 * config.loan_count_step).min(config.loan_count_cap);
    components.push(ScoreComponent {
        factor: ScoreFactor::LoanCount,
        points: count_points,
        notes: format!("{loan_count} historical loan(s)"),
    });

    let current_year = profile.as_of.year();
    let recent_count = profile.loans_originated_in(current_year);
    let recent_points =
        (recent_count as f64 * config.recent_activity_step).min(config.recent_activity_cap);
    components.push(ScoreComponent {
        factor: ScoreFactor::CurrentYearActivity,
        points: recent_points,
        notes: format!("{recent_count} loan(s) originated in {current_year}"),
    });

    let total_principal: f64 = profile.loans.iter().map(|loan| loan.amount).sum();
    let volume_points = if approved_limit > 0.0 && total_principal <= approved_limit {
        ((total_principal / approved_limit) * config.loan_volume_weight)
            .min(config.loan_volume_weight)
    } else {
        0.0
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::LoanVolume,
        points: volume_points,
        notes: format!(
            "total principal {total_principal:.2} against limit {approved_limit:.2}"
        ),
    });

    components.push(ScoreComponent {
        factor: ScoreFactor::Baseline,
        points: config.baseline_score,
        notes: "baseline granted to every customer within limit".to_string(),
    });

    let total: f64 = components.iter().map(|component| component.points).sum();
    let credit_score = total.round().clamp(0.0, 100.0) as u8;

    ScoreBreakdown {
        components,
        credit_score,
        over_limit: false,
        current_debt,
    }
}
