use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use super::domain::{Customer, CustomerId, LoanId, LoanRecord};

/// Errors raised while parsing the seed worksheets.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// Column layout of the customer worksheet export.
#[derive(Debug, Deserialize)]
struct CustomerRow {
    #[serde(rename = "Customer ID")]
    customer_id: u64,
    #[serde(rename = "First Name")]
    first_name: String,
    #[serde(rename = "Last Name")]
    last_name: String,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Phone Number")]
    phone_number: u64,
    #[serde(rename = "Monthly Salary")]
    monthly_salary: f64,
    #[serde(rename = "Approved Limit")]
    approved_limit: f64,
}

/// Column layout of the loan worksheet export.
#[derive(Debug, Deserialize)]
struct LoanRow {
    #[serde(rename = "Customer ID")]
    customer_id: u64,
    #[serde(rename = "Loan ID")]
    loan_id: u64,
    #[serde(rename = "Loan Amount")]
    loan_amount: f64,
    #[serde(rename = "Tenure")]
    tenure: u32,
    #[serde(rename = "Interest Rate")]
    interest_rate: f64,
    #[serde(rename = "Monthly payment")]
    monthly_payment: f64,
    #[serde(rename = "EMIs paid on Time")]
    emis_paid_on_time: u32,
    #[serde(rename = "Date of Approval")]
    start_date: String,
    #[serde(rename = "End Date")]
    end_date: String,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Parse customers from a worksheet CSV export.
pub fn customers_from_reader<R: Read>(reader: R) -> Result<Vec<Customer>, IngestError> {
    let mut csv_reader = csv_reader(reader);
    let mut customers = Vec::new();

    for row in csv_reader.deserialize::<CustomerRow>() {
        let row = row?;
        customers.push(Customer {
            customer_id: CustomerId(row.customer_id),
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
            phone_number: row.phone_number,
            monthly_salary: row.monthly_salary,
            approved_limit: row.approved_limit,
        });
    }

    Ok(customers)
}

/// Parse loans from a worksheet CSV export.
pub fn loans_from_reader<R: Read>(reader: R) -> Result<Vec<LoanRecord>, IngestError> {
    let mut csv_reader = csv_reader(reader);
    let mut loans = Vec::new();

    for (index, row) in csv_reader.deserialize::<LoanRow>().enumerate() {
        let row = row?;
        let data_row = index + 2;
        let start_date = parse_date(&row.start_date, data_row)?;
        let end_date = parse_date(&row.end_date, data_row)?;
        loans.push(LoanRecord {
            loan_id: LoanId(row.loan_id),
            customer_id: CustomerId(row.customer_id),
            amount: row.loan_amount,
            tenure_months: row.tenure,
            interest_rate: row.interest_rate,
            monthly_repayment: row.monthly_payment,
            emis_paid_on_time: row.emis_paid_on_time,
            start_date,
            end_date,
        });
    }

    Ok(loans)
}

// Worksheet exports carry either ISO or US-style dates depending on the
// tool that produced them.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

fn parse_date(raw: &str, row: usize) -> Result<NaiveDate, IngestError> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| IngestError::InvalidRow {
            row,
            message: format!("unparseable date '{raw}'"),
        })
}
