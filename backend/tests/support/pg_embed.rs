//! Embedded PostgreSQL for adapter suites.
//!
//! One cluster is shared per test binary; each test gets its own temporary
//! database with the crate's migrations applied. Setup failures panic unless
//! `SKIP_TEST_CLUSTER` is truthy, in which case the test is skipped.

use std::time::Duration;

use clinic_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

const CLUSTER_RETRIES: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated scratch database plus the runtime that drives its pool.
pub struct Database {
    pub runtime: Runtime,
    pub pool: DbPool,
    url: String,
    _database: TemporaryDatabase,
}

impl Database {
    /// Row count of `table`, read over a separate connection.
    pub fn count(&self, table: &str) -> i64 {
        let mut client = Client::connect(&self.url, NoTls).expect("connect for count");
        let sql = format!(r#"SELECT COUNT(*) FROM "{}""#, table.replace('"', "\"\""));
        client
            .query_one(sql.as_str(), &[])
            .expect("count rows")
            .get(0)
    }

    /// Run raw SQL, for seeding rows the ports cannot create.
    pub fn execute(&self, sql: &str) {
        let mut client = Client::connect(&self.url, NoTls).expect("connect for seed");
        client.batch_execute(sql).expect("seed statement");
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt >= CLUSTER_RETRIES => return Err(format!("{err:?}")),
            Err(_) => {
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

fn setup() -> Result<Database, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();

    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrate: {err}"))?;
    let config = PoolConfig::new(url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1))
        .with_query_timeout(Duration::from_secs(30));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(Database {
        runtime,
        pool,
        url,
        _database: database,
    })
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Provision a database, or `None` when setup failed and skipping is allowed.
pub fn database() -> Option<Database> {
    match setup() {
        Ok(database) => Some(database),
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}
