use super::domain::{Customer, CustomerId, LoanId, LoanRecord};

/// Storage abstraction so the service module can be exercised in isolation.
/// The host application decides what actually backs it; the api service
/// ships an in-memory implementation.
pub trait LendingRepository: Send + Sync {
    fn insert_customer(&self, customer: Customer) -> Result<Customer, RepositoryError>;
    fn fetch_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;
    fn insert_loan(&self, loan: LoanRecord) -> Result<LoanRecord, RepositoryError>;
    fn fetch_loan(&self, id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError>;
    fn loans_for_customer(&self, id: &CustomerId) -> Result<Vec<LoanRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
