use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Customer, CustomerId, LoanId, LoanRecord, LoanRequest, RegistrationRequest};
use super::evaluation::EligibilityResult;
use super::repository::{LendingRepository, RepositoryError};
use super::service::{LendingService, LendingServiceError};

/// Router builder exposing the loan origination endpoints.
pub fn lending_router<R>(service: Arc<LendingService<R>>) -> Router
where
    R: LendingRepository + 'static,
{
    Router::new()
        .route("/register", post(register_handler::<R>))
        .route("/check-eligibility", post(check_eligibility_handler::<R>))
        .route("/create-loan", post(create_loan_handler::<R>))
        .route("/view-loan/:loan_id", get(view_loan_handler::<R>))
        .route("/view-loans/:customer_id", get(view_customer_loans_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct RegisterCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub monthly_income: f64,
    pub phone_number: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoanEligibilityRequest {
    pub customer_id: u64,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub tenure: u32,
}

impl LoanEligibilityRequest {
    fn terms(&self) -> LoanRequest {
        LoanRequest {
            amount: self.loan_amount,
            tenure_months: self.tenure,
            interest_rate: self.interest_rate,
        }
    }
}

/// Customer fields echoed after registration.
#[derive(Debug, Serialize)]
pub struct RegisteredCustomerView {
    pub customer_id: u64,
    pub name: String,
    pub age: u32,
    pub monthly_income: f64,
    pub approved_limit: f64,
    pub phone_number: u64,
}

impl From<Customer> for RegisteredCustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            customer_id: customer.customer_id.0,
            name: customer.full_name(),
            age: customer.age,
            monthly_income: customer.monthly_salary,
            approved_limit: customer.approved_limit,
            phone_number: customer.phone_number,
        }
    }
}

/// Eligibility response; the corrected rate is omitted on rejection.
#[derive(Debug, Serialize)]
pub struct EligibilityView {
    pub customer_id: u64,
    pub approval: bool,
    pub interest_rate: f64,
    pub corrected_interest_rate: Option<f64>,
    pub tenure: u32,
    pub monthly_installment: f64,
}

impl EligibilityView {
    fn new(result: EligibilityResult, request: &LoanEligibilityRequest) -> Self {
        let approval = result.approved();
        Self {
            customer_id: result.customer_id.0,
            approval,
            interest_rate: request.interest_rate,
            corrected_interest_rate: approval.then_some(result.corrected_interest_rate),
            tenure: request.tenure,
            monthly_installment: result.monthly_installment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoanCreationView {
    pub loan_id: Option<u64>,
    pub customer_id: u64,
    pub loan_approved: bool,
    pub message: String,
    pub monthly_installment: f64,
}

#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub customer_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: u64,
    pub monthly_salary: f64,
    pub approved_limit: f64,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            customer_id: customer.customer_id.0,
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            phone_number: customer.phone_number,
            monthly_salary: customer.monthly_salary,
            approved_limit: customer.approved_limit,
        }
    }
}

/// A loan joined with its customer.
#[derive(Debug, Serialize)]
pub struct LoanDetailView {
    pub loan_id: u64,
    pub customer: CustomerView,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub monthly_repayment: f64,
    pub tenure: u32,
}

impl LoanDetailView {
    fn new(loan: LoanRecord, customer: Customer) -> Self {
        Self {
            loan_id: loan.loan_id.0,
            customer: customer.into(),
            loan_amount: loan.amount,
            interest_rate: loan.interest_rate,
            monthly_repayment: loan.monthly_repayment,
            tenure: loan.tenure_months,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoanSummaryView {
    pub loan_id: u64,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub monthly_repayment: f64,
    pub repayments_left: u32,
}

impl LoanSummaryView {
    fn new(loan: &LoanRecord, as_of: NaiveDate) -> Self {
        Self {
            loan_id: loan.loan_id.0,
            loan_amount: loan.amount,
            interest_rate: loan.interest_rate,
            monthly_repayment: loan.monthly_repayment,
            repayments_left: loan.repayments_left(as_of),
        }
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
    axum::Json(payload): axum::Json<RegisterCustomerRequest>,
) -> Response
where
    R: LendingRepository + 'static,
{
    let registration = RegistrationRequest {
        first_name: payload.first_name,
        last_name: payload.last_name,
        age: payload.age,
        monthly_income: payload.monthly_income,
        phone_number: payload.phone_number,
    };

    match service.register_customer(registration) {
        Ok(customer) => {
            let view = RegisteredCustomerView::from(customer);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_eligibility_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
    axum::Json(payload): axum::Json<LoanEligibilityRequest>,
) -> Response
where
    R: LendingRepository + 'static,
{
    let as_of = Local::now().date_naive();
    match service.check_eligibility(CustomerId(payload.customer_id), payload.terms(), as_of) {
        Ok(result) => {
            let view = EligibilityView::new(result, &payload);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_loan_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
    axum::Json(payload): axum::Json<LoanEligibilityRequest>,
) -> Response
where
    R: LendingRepository + 'static,
{
    let as_of = Local::now().date_naive();
    match service.create_loan(CustomerId(payload.customer_id), payload.terms(), as_of) {
        Ok(creation) => {
            let status = if creation.approved {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            let view = LoanCreationView {
                loan_id: creation.loan_id.map(|id| id.0),
                customer_id: creation.customer_id.0,
                loan_approved: creation.approved,
                message: creation.message,
                monthly_installment: creation.monthly_installment,
            };
            (status, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_loan_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
    Path(loan_id): Path<u64>,
) -> Response
where
    R: LendingRepository + 'static,
{
    match service.loan_detail(LoanId(loan_id)) {
        Ok((loan, customer)) => {
            let view = LoanDetailView::new(loan, customer);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_customer_loans_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
    Path(customer_id): Path<u64>,
) -> Response
where
    R: LendingRepository + 'static,
{
    let as_of = Local::now().date_naive();
    match service.customer_loans(CustomerId(customer_id)) {
        Ok(loans) => {
            let views: Vec<LoanSummaryView> = loans
                .iter()
                .map(|loan| LoanSummaryView::new(loan, as_of))
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: LendingServiceError) -> Response {
    let status = match &error {
        LendingServiceError::Intake(_) => StatusCode::BAD_REQUEST,
        LendingServiceError::CustomerNotFound(_) | LendingServiceError::LoanNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        LendingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LendingServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
