use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    Customer, CustomerId, CustomerProfile, LoanId, LoanRecord, LoanRequest, RegistrationRequest,
};
use super::evaluation::{EligibilityEngine, EligibilityResult, EvaluationConfig};
use super::intake::{IntakeError, IntakeGuard};
use super::repository::{LendingRepository, RepositoryError};

/// Service composing the intake guard, repository, and eligibility engine.
pub struct LendingService<R> {
    repository: Arc<R>,
    guard: IntakeGuard,
    engine: EligibilityEngine,
    customer_sequence: AtomicU64,
    loan_sequence: AtomicU64,
}

impl<R> LendingService<R>
where
    R: LendingRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EvaluationConfig) -> Self {
        Self {
            repository,
            guard: IntakeGuard::default(),
            engine: EligibilityEngine::new(config),
            customer_sequence: AtomicU64::new(1),
            loan_sequence: AtomicU64::new(1),
        }
    }

    /// Register a customer, deriving the approved limit from salary.
    pub fn register_customer(
        &self,
        registration: RegistrationRequest,
    ) -> Result<Customer, LendingServiceError> {
        let customer_id = CustomerId(self.customer_sequence.fetch_add(1, Ordering::Relaxed));
        let customer = self
            .guard
            .customer_from_registration(registration, customer_id)?;
        let stored = self.repository.insert_customer(customer)?;
        Ok(stored)
    }

    /// Evaluate a proposed loan against the customer's snapshot at `as_of`.
    pub fn check_eligibility(
        &self,
        customer_id: CustomerId,
        request: LoanRequest,
        as_of: NaiveDate,
    ) -> Result<EligibilityResult, LendingServiceError> {
        let request = self.guard.loan_request(request)?;
        let profile = self.profile(customer_id, as_of)?;
        Ok(self.engine.evaluate(&profile, &request))
    }

    /// Evaluate and, on approval, book the loan at the corrected rate.
    pub fn create_loan(
        &self,
        customer_id: CustomerId,
        request: LoanRequest,
        as_of: NaiveDate,
    ) -> Result<LoanCreation, LendingServiceError> {
        let request = self.guard.loan_request(request)?;
        let profile = self.profile(customer_id, as_of)?;
        let result = self.engine.evaluate(&profile, &request);

        if !result.approved() {
            return Ok(LoanCreation {
                loan_id: None,
                customer_id,
                approved: false,
                message: result.decision.summary(),
                monthly_installment: 0.0,
            });
        }

        let end_date = as_of
            .checked_add_months(Months::new(request.tenure_months))
            .ok_or(IntakeError::TenureOutOfRange(request.tenure_months))?;

        let loan = LoanRecord {
            loan_id: LoanId(self.loan_sequence.fetch_add(1, Ordering::Relaxed)),
            customer_id,
            amount: request.amount,
            tenure_months: request.tenure_months,
            interest_rate: result.corrected_interest_rate,
            monthly_repayment: result.monthly_installment,
            emis_paid_on_time: 0,
            start_date: as_of,
            end_date,
        };
        let stored = self.repository.insert_loan(loan)?;

        Ok(LoanCreation {
            loan_id: Some(stored.loan_id),
            customer_id,
            approved: true,
            message: result.decision.summary(),
            monthly_installment: stored.monthly_repayment,
        })
    }

    /// A loan joined with the customer it belongs to.
    pub fn loan_detail(&self, loan_id: LoanId) -> Result<(LoanRecord, Customer), LendingServiceError> {
        let loan = self
            .repository
            .fetch_loan(&loan_id)?
            .ok_or(LendingServiceError::LoanNotFound(loan_id))?;
        let customer = self
            .repository
            .fetch_customer(&loan.customer_id)?
            .ok_or(LendingServiceError::CustomerNotFound(loan.customer_id))?;
        Ok((loan, customer))
    }

    /// All loans booked for a customer.
    pub fn customer_loans(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LoanRecord>, LendingServiceError> {
        if self.repository.fetch_customer(&customer_id)?.is_none() {
            return Err(LendingServiceError::CustomerNotFound(customer_id));
        }
        Ok(self.repository.loans_for_customer(&customer_id)?)
    }

    /// Load pre-existing records, e.g. from the worksheet CSVs. Rows that
    /// collide with stored ids and loans naming unknown customers are skipped
    /// with a warning; id sequences advance past the largest seeded id.
    pub fn seed(
        &self,
        customers: Vec<Customer>,
        loans: Vec<LoanRecord>,
    ) -> Result<SeedSummary, LendingServiceError> {
        let mut summary = SeedSummary::default();

        for customer in customers {
            let id = customer.customer_id;
            match self.repository.insert_customer(customer) {
                Ok(_) => {
                    summary.customers += 1;
                    self.customer_sequence.fetch_max(id.0 + 1, Ordering::Relaxed);
                }
                Err(RepositoryError::Conflict) => {
                    warn!(customer_id = id.0, "skipping duplicate customer row");
                    summary.skipped_customers += 1;
                }
                Err(other) => return Err(other.into()),
            }
        }

        for loan in loans {
            let id = loan.loan_id;
            if self.repository.fetch_customer(&loan.customer_id)?.is_none() {
                warn!(
                    loan_id = id.0,
                    customer_id = loan.customer_id.0,
                    "customer not found, skipping loan row"
                );
                summary.skipped_loans += 1;
                continue;
            }
            match self.repository.insert_loan(loan) {
                Ok(_) => {
                    summary.loans += 1;
                    self.loan_sequence.fetch_max(id.0 + 1, Ordering::Relaxed);
                }
                Err(RepositoryError::Conflict) => {
                    warn!(loan_id = id.0, "skipping duplicate loan row");
                    summary.skipped_loans += 1;
                }
                Err(other) => return Err(other.into()),
            }
        }

        Ok(summary)
    }

    fn profile(
        &self,
        customer_id: CustomerId,
        as_of: NaiveDate,
    ) -> Result<CustomerProfile, LendingServiceError> {
        let customer = self
            .repository
            .fetch_customer(&customer_id)?
            .ok_or(LendingServiceError::CustomerNotFound(customer_id))?;
        let loans = self.repository.loans_for_customer(&customer_id)?;
        Ok(CustomerProfile {
            customer,
            loans,
            as_of,
        })
    }
}

/// Outcome of a loan creation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCreation {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub approved: bool,
    pub message: String,
    pub monthly_installment: f64,
}

/// Counts reported after loading seed data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub customers: usize,
    pub loans: usize,
    pub skipped_customers: usize,
    pub skipped_loans: usize,
}

/// Error raised by the lending service.
#[derive(Debug, thiserror::Error)]
pub enum LendingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),
    #[error("loan {0} not found")]
    LoanNotFound(LoanId),
}
