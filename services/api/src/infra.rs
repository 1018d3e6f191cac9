use credit_approval::lending::{
    Customer, CustomerId, EvaluationConfig, LendingRepository, LoanId, LoanRecord, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLendingRepository {
    customers: Arc<Mutex<HashMap<CustomerId, Customer>>>,
    loans: Arc<Mutex<HashMap<LoanId, LoanRecord>>>,
}

impl LendingRepository for InMemoryLendingRepository {
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

pub(crate) fn default_evaluation_config() -> EvaluationConfig {
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
