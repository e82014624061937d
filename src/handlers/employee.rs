use actix_web::{web, HttpResponse};
use chrono::Local;
use log::info;
use serde_json::json;
use sqlx::PgPool;

use crate::db::employee::{self as store, CreateOutcome};
use crate::errors::AppError;
use crate::models::employee::NewEmployee;
use crate::utils::validation;

pub async fn get_employees(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let employees = store::list(&**pool).await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_employee(
    pool: web::Data<PgPool>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    let new_employee = new_employee.into_inner();
    validation::validate_employee(&new_employee, Local::now().date_naive())?;

    match store::create(&**pool, &new_employee).await? {
        CreateOutcome::Committed(committed) => {
            info!("Employee {} added", committed.employee_id);
            Ok(HttpResponse::Created().json(json!({
                "message": "Employee added successfully",
            })))
        }
        CreateOutcome::Rejected(conflict) => Err(conflict.into()),
    }
}
