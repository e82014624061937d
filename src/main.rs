mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;

#[cfg(test)]
mod test_support;

use std::io;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use crate::config::Config;

fn startup_error<E>(context: &str, err: E) -> io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, err)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| startup_error("Invalid configuration", err))?;

    let pool = db::create_pool(&config)
        .await
        .map_err(|err| startup_error("Failed to connect to the database", err))?;
    db::init_schema(&pool)
        .await
        .map_err(|err| startup_error("Failed to create the employee tables", err))?;

    let templates = handlers::views::load_templates()
        .map_err(|err| startup_error("Failed to compile templates", err))?;

    let pool = web::Data::new(pool);
    let templates = web::Data::new(templates);

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(pool.clone())
            .app_data(templates.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
