use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for booked loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(pub u64);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw registration payload before intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub monthly_income: f64,
    pub phone_number: u64,
}

/// A registered customer with the salary-derived credit ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: u64,
    pub monthly_salary: f64,
    pub approved_limit: f64,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One booked loan, historical or still running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub amount: f64,
    pub tenure_months: u32,
    pub interest_rate: f64,
    pub monthly_repayment: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LoanRecord {
    /// A loan still counts against the customer until its end date passes.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        self.end_date >= as_of
    }

    pub fn originated_in(&self, year: i32) -> bool {
        self.start_date.year() == year
    }

    /// Whole months of repayment remaining, a partial month rounding up.
    pub fn repayments_left(&self, as_of: NaiveDate) -> u32 {
        if as_of > self.end_date {
            return 0;
        }

        let mut months = (self.end_date.year() - as_of.year()) * 12
            + self.end_date.month() as i32
            - as_of.month() as i32;
        if self.end_date.day() > as_of.day() {
            months += 1;
        }

        months.max(0) as u32
    }
}

/// Proposed terms for a new loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub amount: f64,
    pub tenure_months: u32,
    pub interest_rate: f64,
}

/// By-value snapshot handed to the evaluator: one customer, their loan
/// history, and the date the snapshot was taken. `as_of` anchors "active"
/// and "current year" so evaluation stays a function of its inputs alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub loans: Vec<LoanRecord>,
    pub as_of: NaiveDate,
}

impl CustomerProfile {
    /// Sum of outstanding principal across active loans.
    pub fn current_debt(&self) -> f64 {
        self.loans
            .iter()
            .filter(|loan| loan.is_active(self.as_of))
            .map(|loan| loan.amount)
            .sum()
    }

    /// Sum of the monthly repayments still being serviced.
    pub fn current_monthly_obligation(&self) -> f64 {
        self.loans
            .iter()
            .filter(|loan| loan.is_active(self.as_of))
            .map(|loan| loan.monthly_repayment)
            .sum()
    }

    pub fn loans_originated_in(&self, year: i32) -> usize {
        self.loans
            .iter()
            .filter(|loan| loan.originated_in(year))
            .count()
    }
}

/// Factors contributing to the weighted credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFactor {
    PaymentHistory,
    LoanCount,
    CurrentYearActivity,
    LoanVolume,
    Baseline,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::PaymentHistory => "payment_history",
            ScoreFactor::LoanCount => "loan_count",
            ScoreFactor::CurrentYearActivity => "current_year_activity",
            ScoreFactor::LoanVolume => "loan_volume",
            ScoreFactor::Baseline => "baseline",
        }
    }
}
