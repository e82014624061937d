pub mod employee;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

pub const PERSONAL_INFO_PKEY: &str = "employee_personal_info_pkey";
pub const MOBILENO_KEY: &str = "employee_personal_info_mobileno_key";
pub const EMPLOYMENT_INFO_PKEY: &str = "employee_employment_info_pkey";
pub const EMAIL_KEY: &str = "employee_employment_info_email_key";

// Serialises schema bootstrap between instances starting together.
const SCHEMA_LOCK_KEY: i64 = 0x656d_706c_6f79;

const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS employee_personal_info (
        employee_id VARCHAR(20) NOT NULL,
        first_name VARCHAR(50) NOT NULL,
        last_name VARCHAR(50) NOT NULL,
        gender VARCHAR(10) NOT NULL,
        mobileno VARCHAR(15) NOT NULL,
        address VARCHAR(200) NOT NULL,
        CONSTRAINT employee_personal_info_pkey PRIMARY KEY (employee_id),
        CONSTRAINT employee_personal_info_mobileno_key UNIQUE (mobileno)
    )",
    "CREATE TABLE IF NOT EXISTS employee_employment_info (
        employee_id VARCHAR(20) NOT NULL,
        email VARCHAR(100) NOT NULL,
        dob DATE NOT NULL,
        joiningdate DATE NOT NULL,
        CONSTRAINT employee_employment_info_pkey PRIMARY KEY (employee_id),
        CONSTRAINT employee_employment_info_email_key UNIQUE (email),
        CONSTRAINT employee_employment_info_employee_id_fkey
            FOREIGN KEY (employee_id) REFERENCES employee_personal_info (employee_id)
    )",
];

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Creates both employee tables if they are absent.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await
}
