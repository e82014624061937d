pub mod employee;
pub mod views;

use actix_web::web;

use crate::errors::AppError;

/// Registers every route of the service. Shared by `main` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(web::resource("/").route(web::get().to(views::employee_list)))
    .service(web::resource("/form").route(web::get().to(views::employee_form)))
    .service(
        web::resource("/employees")
            .route(web::get().to(employee::get_employees))
            .route(web::post().to(employee::create_employee)),
    );
}
