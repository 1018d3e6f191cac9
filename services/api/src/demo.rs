use std::io;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;

use crate::infra::{default_evaluation_config, InMemoryLendingRepository};
use credit_approval::error::AppError;
use credit_approval::lending::{
    Customer, CustomerId, LendingService, LoanId, LoanRecord, LoanRequest, RegistrationRequest,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Snapshot date for the scripted run (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub(crate) as_of: Option<NaiveDate>,
}

/// Walk the full origination flow against an in-memory store and print each
/// response, so the service can be demonstrated without an HTTP client.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let repository = Arc::new(InMemoryLendingRepository::default());
    let service = LendingService::new(repository, default_evaluation_config());

    let established = Customer {
        customer_id: CustomerId(1),
        first_name: "Aarav".to_string(),
        last_name: "Sharma".to_string(),
        age: 35,
        phone_number: 9_123_456_789,
        monthly_salary: 100_000.0,
        approved_limit: 3_600_000.0,
    };
    let history = vec![
        demo_loan(1, 100, 400_000.0),
        demo_loan(1, 101, 300_000.0),
    ];
    let summary = service.seed(vec![established], history)?;
    print_json("seeded records", &summary)?;

    let registered = service.register_customer(RegistrationRequest {
        first_name: "Mira".to_string(),
        last_name: "Patel".to_string(),
        age: 41,
        monthly_income: 60_000.0,
        phone_number: 9_876_543_210,
    })?;
    print_json("registered customer", &registered)?;

    let request = LoanRequest {
        amount: 500_000.0,
        tenure_months: 24,
        interest_rate: 9.0,
    };
    let eligibility = service.check_eligibility(CustomerId(1), request, as_of)?;
    print_json("eligibility for the established customer", &eligibility)?;

    let fresh_eligibility =
        service.check_eligibility(registered.customer_id, request, as_of)?;
    print_json("eligibility for the new registrant", &fresh_eligibility)?;

    let creation = service.create_loan(CustomerId(1), request, as_of)?;
    print_json("loan creation", &creation)?;

    if let Some(loan_id) = creation.loan_id {
        let (loan, customer) = service.loan_detail(loan_id)?;
        print_json("loan detail", &loan)?;
        print_json("loan customer", &customer)?;
    }

    let loans = service.customer_loans(CustomerId(1))?;
    print_json("customer loans", &loans)?;

    Ok(())
}

fn demo_loan(customer_id: u64, id: u64, amount: f64) -> LoanRecord {
    LoanRecord {
        loan_id: LoanId(id),
        customer_id: CustomerId(customer_id),
        amount,
        tenure_months: 12,
        interest_rate: 8.0,
        monthly_repayment: amount / 12.0,
        emis_paid_on_time: 12,
        start_date: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2022, 12, 31).expect("valid date"),
    }
}

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;
    println!("--- {label}\n{rendered}");
    Ok(())
}
