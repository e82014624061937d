use log::{debug, warn};
use sqlx::{PgConnection, PgPool};

use crate::db::{EMAIL_KEY, EMPLOYMENT_INFO_PKEY, MOBILENO_KEY, PERSONAL_INFO_PKEY};
use crate::models::employee::{
    EmployeeEmploymentInfo, EmployeePersonalInfo, EmployeeRecord, NewEmployee,
};

/// A unique key the candidate record shares with a stored employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Conflict {
    #[error("Employee ID already exists")]
    EmployeeId,
    #[error("Mobile number already exists")]
    MobileNumber,
    #[error("Email already exists")]
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateCheck {
    Clear,
    Conflict(Conflict),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub employee_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Committed(Committed),
    Rejected(Conflict),
}

const LIST_EMPLOYEES: &str = "SELECT p.employee_id, p.first_name, p.last_name, p.gender, \
     p.mobileno, p.address, e.email, e.dob, e.joiningdate \
     FROM employee_personal_info p \
     INNER JOIN employee_employment_info e ON e.employee_id = p.employee_id \
     ORDER BY p.employee_id";

pub async fn list(pool: &PgPool) -> Result<Vec<EmployeeRecord>, sqlx::Error> {
    sqlx::query_as::<_, EmployeeRecord>(LIST_EMPLOYEES)
        .fetch_all(pool)
        .await
}

/// Checks the unique keys of `employee` in the order employee_id, mobile
/// number, email and reports the first one already taken.
pub async fn check_duplicates(
    conn: &mut PgConnection,
    employee: &NewEmployee,
) -> Result<DuplicateCheck, sqlx::Error> {
    let mobileno = employee.mobileno.to_string();
    let email = employee.normalized_email();
    let checks = [
        (
            "SELECT EXISTS(SELECT 1 FROM employee_personal_info WHERE employee_id = $1)",
            employee.employee_id.as_str(),
            Conflict::EmployeeId,
        ),
        (
            "SELECT EXISTS(SELECT 1 FROM employee_personal_info WHERE mobileno = $1)",
            mobileno.as_str(),
            Conflict::MobileNumber,
        ),
        (
            "SELECT EXISTS(SELECT 1 FROM employee_employment_info WHERE email = $1)",
            email.as_str(),
            Conflict::Email,
        ),
    ];

    for (sql, value, conflict) in checks {
        let exists: bool = sqlx::query_scalar(sql)
            .bind(value)
            .fetch_one(&mut *conn)
            .await?;
        if exists {
            return Ok(DuplicateCheck::Conflict(conflict));
        }
    }
    Ok(DuplicateCheck::Clear)
}

async fn insert_rows(
    conn: &mut PgConnection,
    personal: &EmployeePersonalInfo,
    employment: &EmployeeEmploymentInfo,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO employee_personal_info (employee_id, first_name, last_name, gender, mobileno, address) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&personal.employee_id)
    .bind(&personal.first_name)
    .bind(&personal.last_name)
    .bind(&personal.gender)
    .bind(&personal.mobileno)
    .bind(&personal.address)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        "INSERT INTO employee_employment_info (employee_id, email, dob, joiningdate) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(&employment.employee_id)
    .bind(&employment.email)
    .bind(employment.dob)
    .bind(employment.joiningdate)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Runs the duplicate check and the two-row insert inside one transaction.
///
/// The transaction holds its pooled connection until it is committed or
/// rolled back. A writer that passes the duplicate check but loses a race
/// against a concurrent insert trips a unique constraint instead, which is
/// reported as the matching [`Conflict`].
pub async fn create(pool: &PgPool, employee: &NewEmployee) -> Result<CreateOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let check = match check_duplicates(&mut *tx, employee).await {
        Ok(check) => check,
        Err(err) => {
            rollback(tx).await;
            return Err(err);
        }
    };
    if let DuplicateCheck::Conflict(conflict) = check {
        rollback(tx).await;
        return Ok(CreateOutcome::Rejected(conflict));
    }

    let (personal, employment) = employee.to_rows();
    if let Err(err) = insert_rows(&mut *tx, &personal, &employment).await {
        rollback(tx).await;
        return match conflict_from_error(&err) {
            Some(conflict) => Ok(CreateOutcome::Rejected(conflict)),
            None => Err(err),
        };
    }

    match tx.commit().await {
        Ok(()) => Ok(CreateOutcome::Committed(Committed {
            employee_id: personal.employee_id,
        })),
        Err(err) => match conflict_from_error(&err) {
            Some(conflict) => Ok(CreateOutcome::Rejected(conflict)),
            None => Err(err),
        },
    }
}

async fn rollback(tx: sqlx::Transaction<'_, sqlx::Postgres>) {
    // A failed rollback closes the connection, which discards the work too.
    if let Err(err) = tx.rollback().await {
        warn!("Rollback failed: {}", err);
    }
}

fn conflict_from_error(err: &sqlx::Error) -> Option<Conflict> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }
    debug!("Unique violation on {:?}", db_err.constraint());
    conflict_for_constraint(db_err.constraint()?)
}

fn conflict_for_constraint(constraint: &str) -> Option<Conflict> {
    match constraint {
        PERSONAL_INFO_PKEY | EMPLOYMENT_INFO_PKEY => Some(Conflict::EmployeeId),
        MOBILENO_KEY => Some(Conflict::MobileNumber),
        EMAIL_KEY => Some(Conflict::Email),
        _ => None,
    }
}
