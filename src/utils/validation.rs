use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{validate_email, validate_length};

use crate::models::employee::NewEmployee;

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("Valid regex pattern"));

static EMPLOYEE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{3,15}$").expect("Valid regex pattern"));

pub const VALID_GENDERS: [&str; 3] = ["Male", "Female", "Other"];

pub const MOBILE_MIN: i64 = 1_000_000_000;
pub const MOBILE_MAX: i64 = 9_999_999_999;

pub const MIN_ADDRESS_LEN: usize = 5;
pub const MIN_AGE: i32 = 18;

// Column widths of the storage schema.
const MAX_NAME_LEN: u64 = 50;
const MAX_ADDRESS_LEN: u64 = 200;
const MAX_EMAIL_LEN: u64 = 100;

/// Why a candidate employee record was rejected. The display text is the
/// `detail` returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("First name must contain only letters")]
    FirstName,
    #[error("Last name must contain only letters")]
    LastName,
    #[error("Invalid gender")]
    Gender,
    #[error("Invalid mobile number")]
    MobileNumber,
    #[error("Address too short")]
    AddressTooShort,
    #[error("Invalid employee ID")]
    EmployeeId,
    #[error("Employee must be at least 18 years old")]
    Underage,
    #[error("Invalid email address")]
    Email,
    #[error("First name is too long")]
    FirstNameTooLong,
    #[error("Last name is too long")]
    LastNameTooLong,
    #[error("Address is too long")]
    AddressTooLong,
    #[error("Email is too long")]
    EmailTooLong,
}

impl ValidationFailure {
    /// Name of the offending field in the request body.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationFailure::FirstName | ValidationFailure::FirstNameTooLong => "first_name",
            ValidationFailure::LastName | ValidationFailure::LastNameTooLong => "last_name",
            ValidationFailure::Gender => "gender",
            ValidationFailure::MobileNumber => "mobileno",
            ValidationFailure::AddressTooShort | ValidationFailure::AddressTooLong => "address",
            ValidationFailure::EmployeeId => "employee_id",
            ValidationFailure::Underage => "dob",
            ValidationFailure::Email | ValidationFailure::EmailTooLong => "email",
        }
    }
}

/// Checks a candidate record field by field and stops at the first
/// violation. `today` is the reference date for the age check.
pub fn validate_employee(employee: &NewEmployee, today: NaiveDate) -> Result<(), ValidationFailure> {
    if !NAME_REGEX.is_match(&employee.first_name) {
        return Err(ValidationFailure::FirstName);
    }
    if !NAME_REGEX.is_match(&employee.last_name) {
        return Err(ValidationFailure::LastName);
    }
    if !VALID_GENDERS.contains(&employee.gender.as_str()) {
        return Err(ValidationFailure::Gender);
    }
    if !(MOBILE_MIN..=MOBILE_MAX).contains(&employee.mobileno) {
        return Err(ValidationFailure::MobileNumber);
    }
    if employee.address.trim().chars().count() < MIN_ADDRESS_LEN {
        return Err(ValidationFailure::AddressTooShort);
    }
    if !EMPLOYEE_ID_REGEX.is_match(&employee.employee_id) {
        return Err(ValidationFailure::EmployeeId);
    }
    if employee.dob > today || age_on(employee.dob, today) < MIN_AGE {
        return Err(ValidationFailure::Underage);
    }
    if !validate_email(employee.email.as_str()) {
        return Err(ValidationFailure::Email);
    }
    check_max_lengths(employee)
}

fn check_max_lengths(employee: &NewEmployee) -> Result<(), ValidationFailure> {
    let limits = [
        (employee.first_name.as_str(), MAX_NAME_LEN, ValidationFailure::FirstNameTooLong),
        (employee.last_name.as_str(), MAX_NAME_LEN, ValidationFailure::LastNameTooLong),
        (employee.address.as_str(), MAX_ADDRESS_LEN, ValidationFailure::AddressTooLong),
        (employee.email.as_str(), MAX_EMAIL_LEN, ValidationFailure::EmailTooLong),
    ];
    for (value, max, failure) in limits {
        if !validate_length(value, None, Some(max), None) {
            return Err(failure);
        }
    }
    Ok(())
}

/// Whole years between `dob` and `today`, not counting a birthday that has
/// not yet come round this year.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age - 1
    } else {
        age
    }
}
