//! Fixtures shared by the storage-backed tests.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

use crate::db;
use crate::models::employee::NewEmployee;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);
static KEYS: OnceLock<RandomState> = OnceLock::new();
static EMBEDDED_DATABASE_URL: OnceLock<String> = OnceLock::new();

const EMBEDDED_DATABASE_NAME: &str = "employee_records_test";

/// Connection string for the storage-backed tests: `TEST_DATABASE_URL` when
/// set, otherwise a database on the shared embedded PostgreSQL cluster.
pub fn test_database_url() -> String {
    if let Ok(url) = std::env::var("TEST_DATABASE_URL") {
        return url;
    }
    EMBEDDED_DATABASE_URL
        .get_or_init(|| {
            // The cluster bootstrap drives its own runtime, so keep it off the
            // test's async executor.
            std::thread::spawn(embedded_database_url)
                .join()
                .expect("embedded PostgreSQL setup thread")
        })
        .clone()
}

fn embedded_database_url() -> String {
    let cluster = shared_cluster_handle().expect("embedded PostgreSQL cluster should start");
    let exists = cluster
        .database_exists(EMBEDDED_DATABASE_NAME)
        .expect("database lookup on embedded cluster");
    if !exists {
        cluster
            .create_database(EMBEDDED_DATABASE_NAME)
            .expect("test database created on embedded cluster");
    }
    cluster
        .connection()
        .database_url(EMBEDDED_DATABASE_NAME)
        .to_string()
}

/// Connects to the test database and bootstraps the schema. Panics when no
/// database can be reached.
pub async fn test_pool() -> PgPool {
    let url = test_database_url();
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("test database is reachable");
    db::init_schema(&pool).await.expect("schema bootstrap");
    pool
}

/// A valid employee whose unique keys differ from every other call.
pub fn sample_employee() -> NewEmployee {
    // Randomly keyed per process, so reruns against a kept database do not
    // collide with rows left by earlier runs.
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let unique = KEYS.get_or_init(RandomState::new).hash_one(seq);

    NewEmployee {
        employee_id: format!("T{}", unique % 1_000_000_000_000),
        first_name: "Test".to_string(),
        last_name: "Employee".to_string(),
        gender: "Other".to_string(),
        mobileno: 1_000_000_000 + (unique % 9_000_000_000) as i64,
        address: "1 Test Lane".to_string(),
        email: format!("t{unique:x}@example.com"),
        dob: NaiveDate::from_ymd_opt(1990, 5, 17).expect("valid date literal"),
        joiningdate: NaiveDate::from_ymd_opt(2021, 1, 4).expect("valid date literal"),
    }
}
