use super::domain::{Customer, CustomerId, LoanRequest, RegistrationRequest};

/// Validation errors raised before any evaluation runs.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("loan amount must be positive, got {0}")]
    NonPositiveAmount(f64),
    #[error("tenure must be at least one month")]
    ZeroTenure,
    #[error("tenure of {0} months is out of range")]
    TenureOutOfRange(u32),
    #[error("interest rate must be non-negative, got {0}")]
    NegativeInterestRate(f64),
    #[error("monthly income must be positive, got {0}")]
    NonPositiveIncome(f64),
    #[error("applicant age must be positive")]
    ZeroAge,
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("{field} must be a finite number")]
    NonFiniteNumber { field: &'static str },
}

const DEFAULT_SALARY_MULTIPLE: f64 = 36.0;
const DEFAULT_ROUNDING_STEP: f64 = 100_000.0;

/// Policy dial backing the approved-limit derivation.
#[derive(Debug, Clone)]
pub struct LimitPolicy {
    salary_multiple: f64,
    rounding_step: f64,
}

impl LimitPolicy {
    pub fn new(salary_multiple: f64, rounding_step: f64) -> Self {
        let sanitized_step = if rounding_step.is_finite() && rounding_step > 0.0 {
            rounding_step
        } else {
            DEFAULT_ROUNDING_STEP
        };

        Self {
            salary_multiple,
            rounding_step: sanitized_step,
        }
    }

    /// Credit ceiling for a salary: the salary multiple rounded to the
    /// nearest lakh-sized step.
    pub fn approved_limit_for(&self, monthly_income: f64) -> f64 {
        let raw = self.salary_multiple * monthly_income;
        (raw / self.rounding_step).round() * self.rounding_step
    }
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SALARY_MULTIPLE, DEFAULT_ROUNDING_STEP)
    }
}

/// Guard responsible for producing sanitized domain values from raw input.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: LimitPolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: LimitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LimitPolicy {
        &self.policy
    }

    /// Convert an inbound registration into a customer with a derived limit.
    pub fn customer_from_registration(
        &self,
        registration: RegistrationRequest,
        customer_id: CustomerId,
    ) -> Result<Customer, IntakeError> {
        if registration.first_name.trim().is_empty() {
            return Err(IntakeError::BlankField {
                field: "first_name",
            });
        }
        if registration.last_name.trim().is_empty() {
            return Err(IntakeError::BlankField { field: "last_name" });
        }
        if registration.age == 0 {
            return Err(IntakeError::ZeroAge);
        }
        if !registration.monthly_income.is_finite() {
            return Err(IntakeError::NonFiniteNumber {
                field: "monthly_income",
            });
        }
        if registration.monthly_income <= 0.0 {
            return Err(IntakeError::NonPositiveIncome(registration.monthly_income));
        }

        let approved_limit = self.policy.approved_limit_for(registration.monthly_income);

        Ok(Customer {
            customer_id,
            first_name: registration.first_name,
            last_name: registration.last_name,
            age: registration.age,
            phone_number: registration.phone_number,
            monthly_salary: registration.monthly_income,
            approved_limit,
        })
    }

    /// Validate proposed loan terms before they reach the evaluator.
    pub fn loan_request(&self, request: LoanRequest) -> Result<LoanRequest, IntakeError> {
        if !request.amount.is_finite() {
            return Err(IntakeError::NonFiniteNumber { field: "amount" });
        }
        if request.amount <= 0.0 {
            return Err(IntakeError::NonPositiveAmount(request.amount));
        }
        if request.tenure_months == 0 {
            return Err(IntakeError::ZeroTenure);
        }
        if !request.interest_rate.is_finite() {
            return Err(IntakeError::NonFiniteNumber {
                field: "interest_rate",
            });
        }
        if request.interest_rate < 0.0 {
            return Err(IntakeError::NegativeInterestRate(request.interest_rate));
        }

        Ok(request)
    }
}
