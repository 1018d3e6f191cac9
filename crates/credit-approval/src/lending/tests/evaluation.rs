use super::common::*;
use crate::lending::domain::ScoreFactor;
use crate::lending::evaluation::{monthly_installment, LoanDecision, RejectionReason};
use chrono::NaiveDate;

#[test]
fn debt_over_limit_hard_rejects_regardless_of_history() {
    let engine = evaluation_engine();
    // Perfect repayment history, but active principal exceeds the limit.
    let profile = profile(
        customer(1, 90_000.0, 1_000_000.0),
        vec![
            running_loan(1, 1, 700_000.0),
            running_loan(1, 2, 600_000.0),
            settled_loan(1, 3, 100_000.0, 12),
        ],
    );

    let result = engine.evaluate(&profile, &request(50_000.0, 12, 10.0));

    assert_eq!(result.credit_score, 0);
    assert!(!result.approved());
    match result.decision {
        LoanDecision::Rejected(RejectionReason::DebtOverLimit {
            current_debt,
            approved_limit,
        }) => {
            assert_eq!(current_debt, 1_300_000.0);
            assert_eq!(approved_limit, 1_000_000.0);
        }
        other => panic!("expected debt-over-limit rejection, got {other:?}"),
    }
}

#[test]
fn fresh_customer_scores_baseline_and_floors_to_subprime_rate() {
    let engine = evaluation_engine();
    let profile = profile(customer(1, 50_000.0, 1_000_000.0), Vec::new());

    let result = engine.evaluate(&profile, &request(100_000.0, 12, 8.0));

    assert_eq!(result.credit_score, 25);
    assert!(result.approved());
    assert_eq!(result.corrected_interest_rate, 16.0);
    let expected = (monthly_installment(100_000.0, 16.0, 12) * 100.0).round() / 100.0;
    assert_eq!(result.monthly_installment, expected);
    assert!(result.monthly_installment > 9_000.0 && result.monthly_installment < 9_150.0);
    assert!(result
        .components
        .iter()
        .any(|component| component.factor == ScoreFactor::Baseline && component.points == 25.0));
}

#[test]
fn subprime_band_floors_a_five_percent_request_to_sixteen() {
    let engine = evaluation_engine();
    let profile = profile(customer(1, 50_000.0, 1_000_000.0), Vec::new());

    let result = engine.evaluate(&profile, &request(100_000.0, 12, 5.0));

    assert!(result.credit_score >= 10 && result.credit_score < 30);
    assert_eq!(result.corrected_interest_rate, 16.0);
}

#[test]
fn standard_band_floors_rate_to_twelve() {
    let engine = evaluation_engine();
    // 3 of 12 EMIs on time: 7.5 + 5 + 0.375 + 25 rounds to 38.
    let profile = profile(
        customer(1, 60_000.0, 2_000_000.0),
        vec![settled_loan(1, 1, 50_000.0, 3)],
    );

    let result = engine.evaluate(&profile, &request(100_000.0, 24, 8.0));

    assert_eq!(result.credit_score, 38);
    assert!(result.approved());
    assert_eq!(result.corrected_interest_rate, 12.0);
}

#[test]
fn prime_score_keeps_the_requested_rate() {
    let engine = evaluation_engine();
    let profile = profile(
        customer(1, 80_000.0, 2_500_000.0),
        vec![
            settled_loan(1, 1, 200_000.0, 12),
            settled_loan(1, 2, 300_000.0, 12),
        ],
    );

    let result = engine.evaluate(&profile, &request(100_000.0, 12, 8.0));

    assert!(result.credit_score >= 50);
    assert!(result.approved());
    assert_eq!(result.corrected_interest_rate, 8.0);
}

#[test]
fn score_is_monotonic_in_on_time_ratio() {
    let engine = evaluation_engine();
    let base = customer(1, 60_000.0, 2_000_000.0);
    let terms = request(50_000.0, 12, 10.0);

    let sloppy = engine.evaluate(
        &profile(base.clone(), vec![settled_loan(1, 1, 50_000.0, 2)]),
        &terms,
    );
    let diligent = engine.evaluate(
        &profile(base, vec![settled_loan(1, 1, 50_000.0, 10)]),
        &terms,
    );

    assert!(diligent.credit_score >= sloppy.credit_score);
}

#[test]
fn score_clamps_at_one_hundred() {
    let engine = evaluation_engine();
    // Five maxed components would sum to 110.
    let start = NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid");
    let end = NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid");
    let loans = (0..10)
        .map(|index| {
            loan(
                1,
                LoanTerms {
                    id: index + 1,
                    amount: 100_000.0,
                    tenure_months: 12,
                    emis_paid_on_time: 12,
                    start_date: start,
                    end_date: end,
                },
            )
        })
        .collect();
    let profile = profile(customer(1, 300_000.0, 1_000_000.0), loans);

    let result = engine.evaluate(&profile, &request(50_000.0, 12, 10.0));

    assert_eq!(result.credit_score, 100);
}

#[test]
fn repayment_cap_rejects_even_with_a_passing_score() {
    let engine = evaluation_engine();
    let profile = profile(customer(1, 10_000.0, 1_000_000.0), Vec::new());

    let result = engine.evaluate(&profile, &request(100_000.0, 12, 8.0));

    assert_eq!(result.credit_score, 25);
    assert!(!result.approved());
    assert_eq!(result.corrected_interest_rate, 16.0);
    match result.decision {
        LoanDecision::Rejected(RejectionReason::RepaymentCapExceeded { projected_outgo, cap }) => {
            assert_eq!(cap, 5_000.0);
            assert!(projected_outgo > cap);
        }
        other => panic!("expected repayment-cap rejection, got {other:?}"),
    }
}

#[test]
fn existing_obligations_count_toward_the_repayment_cap() {
    let engine = evaluation_engine();
    // The running loan repays ~12,500 a month; salary 30,000 caps total
    // outgo at 15,000, so a ~9,000 installment cannot fit.
    let profile = profile(
        customer(1, 30_000.0, 1_000_000.0),
        vec![running_loan(1, 1, 300_000.0)],
    );

    let result = engine.evaluate(&profile, &request(100_000.0, 12, 8.0));

    assert!(!result.approved());
    assert!(matches!(
        result.decision,
        LoanDecision::Rejected(RejectionReason::RepaymentCapExceeded { .. })
    ));
}

#[test]
fn evaluation_is_deterministic() {
    let engine = evaluation_engine();
    let profile = profile(
        customer(1, 80_000.0, 2_500_000.0),
        vec![settled_loan(1, 1, 200_000.0, 9), running_loan(1, 2, 50_000.0)],
    );
    let terms = request(150_000.0, 18, 9.5);

    let first = engine.evaluate(&profile, &terms);
    let second = engine.evaluate(&profile, &terms);

    assert_eq!(first, second);
}

#[test]
fn installment_matches_the_worksheet_anchor() {
    // 10,000 at 10% over 12 months comes to 879.16.
    let emi = monthly_installment(10_000.0, 10.0, 12);
    assert!((emi - 879.16).abs() < 0.01);
}

#[test]
fn zero_rate_installment_divides_principal_evenly() {
    assert_eq!(monthly_installment(12_000.0, 0.0, 12), 1_000.0);
}
