use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use tera::{Context, Tera};

use crate::db::employee as store;
use crate::errors::AppError;
use crate::models::employee::EmployeeRecord;
use crate::utils::validation::VALID_GENDERS;

const EMPLOYEE_LIST_TEMPLATE: &str = "employeelist.html";
const FORM_TEMPLATE: &str = "form.html";

/// Compiles the embedded page templates. `.html` names get tera's
/// autoescaping.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            EMPLOYEE_LIST_TEMPLATE,
            include_str!("../../templates/employeelist.html"),
        ),
        (FORM_TEMPLATE, include_str!("../../templates/form.html")),
    ])?;
    Ok(tera)
}

pub fn render_employee_list(
    tera: &Tera,
    employees: &[EmployeeRecord],
) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("employees", employees);
    tera.render(EMPLOYEE_LIST_TEMPLATE, &context)
}

pub fn render_form(tera: &Tera) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("genders", &VALID_GENDERS);
    tera.render(FORM_TEMPLATE, &context)
}

pub async fn employee_list(
    pool: web::Data<PgPool>,
    tera: web::Data<Tera>,
) -> Result<HttpResponse, AppError> {
    let employees = store::list(&**pool).await?;
    let page = render_employee_list(&tera, &employees)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(page))
}

pub async fn employee_form(tera: web::Data<Tera>) -> Result<HttpResponse, AppError> {
    let page = render_form(&tera)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(page))
}
