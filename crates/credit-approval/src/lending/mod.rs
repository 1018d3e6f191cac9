//! Loan origination: intake, eligibility evaluation, booking, and views.
//!
//! The evaluator in [`evaluation`] is deliberately a pure function over a
//! [`domain::CustomerProfile`] snapshot; everything else here is the
//! orchestration around it (validation, storage access, HTTP shaping).

pub mod domain;
pub mod evaluation;
pub mod ingest;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Customer, CustomerId, CustomerProfile, LoanId, LoanRecord, LoanRequest, RegistrationRequest,
    ScoreFactor,
};
pub use evaluation::{
    monthly_installment, EligibilityEngine, EligibilityResult, EvaluationConfig, LoanDecision,
    RejectionReason, ScoreComponent,
};
pub use intake::{IntakeError, IntakeGuard, LimitPolicy};
pub use repository::{LendingRepository, RepositoryError};
pub use router::lending_router;
pub use service::{LendingService, LendingServiceError, LoanCreation, SeedSummary};
