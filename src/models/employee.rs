use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Body of `POST /employees`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewEmployee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    #[serde(deserialize_with = "deserialize_mobileno")]
    pub mobileno: i64,
    pub address: String,
    pub email: String,
    pub dob: NaiveDate,
    pub joiningdate: NaiveDate,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmployeePersonalInfo {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub mobileno: String,
    pub address: String,
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmployeeEmploymentInfo {
    pub employee_id: String,
    pub email: String,
    pub dob: NaiveDate,
    pub joiningdate: NaiveDate,
}

/// One row of the personal/employment join, as served by `GET /employees`.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub mobileno: String,
    pub address: String,
    pub email: String,
    pub dob: NaiveDate,
    pub joiningdate: NaiveDate,
}

/// Mobile numbers arrive as JSON integers, integral floats (`9876543210.0`)
/// or digit strings (`"9876543210"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum MobileInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

// Largest magnitude an f64 can carry while still converting exactly to i64.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn deserialize_mobileno<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match MobileInput::deserialize(deserializer)? {
        MobileInput::Integer(n) => Ok(n),
        MobileInput::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT => Ok(f as i64),
        MobileInput::Float(f) => Err(de::Error::custom(format!(
            "mobileno must be a whole number, got {f}"
        ))),
        MobileInput::Text(text) => text.trim().parse::<i64>().map_err(|_| {
            de::Error::custom(format!("mobileno must be a whole number, got {text:?}"))
        }),
    }
}

/// Lowercases the domain of an email address, leaving the local part as
/// written. Everything after the last `@` counts as the domain.
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

impl NewEmployee {
    /// The email as it is stored and compared for duplicates.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Splits the request into the two rows that share `employee_id`.
    pub fn to_rows(&self) -> (EmployeePersonalInfo, EmployeeEmploymentInfo) {
        let personal = EmployeePersonalInfo {
            employee_id: self.employee_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            mobileno: self.mobileno.to_string(),
            address: self.address.clone(),
        };
        let employment = EmployeeEmploymentInfo {
            employee_id: self.employee_id.clone(),
            email: self.normalized_email(),
            dob: self.dob,
            joiningdate: self.joiningdate,
        };
        (personal, employment)
    }
}
