use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::lending::domain::{
    Customer, CustomerId, CustomerProfile, LoanId, LoanRecord, LoanRequest,
};
use crate::lending::evaluation::{EligibilityEngine, EvaluationConfig};
use crate::lending::repository::{LendingRepository, RepositoryError};
use crate::lending::router::lending_router;
use crate::lending::service::LendingService;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig {
        payment_history_weight: 30.0,
        loan_count_step: 5.0,
        loan_count_cap: 20.0,
        recent_activity_step: 5.0,
        recent_activity_cap: 20.0,
        loan_volume_weight: 15.0,
        baseline_score: 25.0,
        prime_cutoff: 50,
        standard_cutoff: 30,
        subprime_cutoff: 10,
        standard_rate_floor: 12.0,
        subprime_rate_floor: 16.0,
        repayment_to_income_cap: 0.5,
    }
}

pub(super) fn customer(id: u64, monthly_salary: f64, approved_limit: f64) -> Customer {
    Customer {
        customer_id: CustomerId(id),
        first_name: "Aarav".to_string(),
        last_name: "Sharma".to_string(),
        age: 32,
        phone_number: 9_123_456_789,
        monthly_salary,
        approved_limit,
    }
}

pub(super) struct LoanTerms {
    pub id: u64,
    pub amount: f64,
    pub tenure_months: u32,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub(super) fn loan(customer_id: u64, terms: LoanTerms) -> LoanRecord {
    LoanRecord {
        loan_id: LoanId(terms.id),
        customer_id: CustomerId(customer_id),
        amount: terms.amount,
        tenure_months: terms.tenure_months,
        interest_rate: 10.0,
        monthly_repayment: terms.amount / terms.tenure_months.max(1) as f64,
        emis_paid_on_time: terms.emis_paid_on_time,
        start_date: terms.start_date,
        end_date: terms.end_date,
    }
}

/// A loan fully repaid before the snapshot date.
pub(super) fn settled_loan(customer_id: u64, id: u64, amount: f64, emis: u32) -> LoanRecord {
    loan(
        customer_id,
        LoanTerms {
            id,
            amount,
            tenure_months: 12,
            emis_paid_on_time: emis,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 10).expect("valid"),
            end_date: NaiveDate::from_ymd_opt(2023, 1, 10).expect("valid"),
        },
    )
}

/// A loan still running at the snapshot date.
pub(super) fn running_loan(customer_id: u64, id: u64, amount: f64) -> LoanRecord {
    loan(
        customer_id,
        LoanTerms {
            id,
            amount,
            tenure_months: 24,
            emis_paid_on_time: 6,
            start_date: NaiveDate::from_ymd_opt(2023, 12, 1).expect("valid"),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid"),
        },
    )
}

pub(super) fn profile(customer: Customer, loans: Vec<LoanRecord>) -> CustomerProfile {
    CustomerProfile {
        customer,
        loans,
        as_of: as_of(),
    }
}

pub(super) fn request(amount: f64, tenure_months: u32, interest_rate: f64) -> LoanRequest {
    LoanRequest {
        amount,
        tenure_months,
        interest_rate,
    }
}

pub(super) fn evaluation_engine() -> EligibilityEngine {
    EligibilityEngine::new(evaluation_config())
}

pub(super) fn build_service() -> (LendingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LendingService::new(repository.clone(), evaluation_config());
    (service, repository)
}

pub(super) fn router_with_service(
    service: LendingService<MemoryRepository>,
) -> axum::Router {
    lending_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) customers: Arc<Mutex<HashMap<CustomerId, Customer>>>,
    pub(super) loans: Arc<Mutex<HashMap<LoanId, LoanRecord>>>,
}

impl LendingRepository for MemoryRepository {
    fn insert_customer(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        let mut guard = self.customers.lock().expect("customer mutex poisoned");
        if guard.contains_key(&customer.customer_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(customer.customer_id, customer.clone());
        Ok(customer)
    }

    fn fetch_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let guard = self.customers.lock().expect("customer mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_loan(&self, loan: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        let mut guard = self.loans.lock().expect("loan mutex poisoned");
        if guard.contains_key(&loan.loan_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(loan.loan_id, loan.clone());
        Ok(loan)
    }

    fn fetch_loan(&self, id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError> {
        let guard = self.loans.lock().expect("loan mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn loans_for_customer(&self, id: &CustomerId) -> Result<Vec<LoanRecord>, RepositoryError> {
        let guard = self.loans.lock().expect("loan mutex poisoned");
        let mut loans: Vec<LoanRecord> = guard
            .values()
            .filter(|loan| loan.customer_id == *id)
            .cloned()
            .collect();
        loans.sort_by_key(|loan| loan.loan_id);
        Ok(loans)
    }
}

/// Repository whose inserts always collide, for conflict-path handlers.
pub(super) struct ConflictRepository;

impl LendingRepository for ConflictRepository {
    fn insert_customer(&self, _customer: Customer) -> Result<Customer, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(Some(customer(id.0, 80_000.0, 2_500_000.0)))
    }

    fn insert_loan(&self, _loan: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch_loan(&self, _id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError> {
        Ok(None)
    }

    fn loans_for_customer(&self, _id: &CustomerId) -> Result<Vec<LoanRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Repository that is entirely offline.
pub(super) struct UnavailableRepository;

impl LendingRepository for UnavailableRepository {
    fn insert_customer(&self, _customer: Customer) -> Result<Customer, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_customer(&self, _id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_loan(&self, _loan: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_loan(&self, _id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn loans_for_customer(&self, _id: &CustomerId) -> Result<Vec<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
