//! Cluster lifecycle helpers for `PostgreSQL` integration tests.

use diesel::prelude::*;
use postgresql_embedded::{PostgreSQL, Settings};
use rstest::fixture;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<Option<ManagedCluster>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle, absent when no cluster could start.
pub type PostgresCluster = Option<&'static ManagedCluster>;

/// Managed embedded `PostgreSQL` cluster for test lifecycles.
pub struct ManagedCluster {
    postgres: PostgreSQL,
    runtime: Runtime,
}

impl ManagedCluster {
    fn start() -> Result<Self, BoxError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let mut postgres = PostgreSQL::new(Settings::default());
        runtime.block_on(postgres.setup())?;
        runtime.block_on(postgres.start())?;
        Ok(Self { postgres, runtime })
    }

    /// Returns the connection URL for `database`.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.postgres.settings().url(database)
    }

    /// Creates an empty database that is dropped with the returned guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the admin connection or `CREATE DATABASE` fails.
    pub fn temporary_database(&'static self, name: &str) -> Result<TemporaryDatabase, BoxError> {
        let sql = format!("CREATE DATABASE {}", quote_identifier(name));
        self.execute_admin_sql(&sql)?;
        Ok(TemporaryDatabase {
            cluster: self,
            name: name.to_owned(),
        })
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        diesel::sql_query(sql).execute(&mut conn)?;
        Ok(())
    }
}

impl Drop for ManagedCluster {
    fn drop(&mut self) {
        drop(self.runtime.block_on(self.postgres.stop()));
    }
}

/// Database created for a single test and dropped afterwards.
pub struct TemporaryDatabase {
    cluster: &'static ManagedCluster,
    name: String,
}

impl TemporaryDatabase {
    /// Returns the connection URL for this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.database_url(&self.name)
    }
}

impl Drop for TemporaryDatabase {
    #[expect(
        clippy::print_stderr,
        reason = "Drop cannot return the cleanup failure"
    )]
    fn drop(&mut self) {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(&self.name)
        );
        if let Err(err) = self.cluster.execute_admin_sql(&sql) {
            eprintln!("failed to drop test database {}: {err}", self.name);
        }
    }
}

/// Provides the shared `PostgreSQL` cluster, or `None` when it cannot start.
///
/// Tests receiving `None` return early after the `SKIP-TEST-CLUSTER` notice
/// has been printed once.
#[fixture]
#[expect(
    clippy::print_stderr,
    reason = "skipped runs must be visible in test output"
)]
pub fn postgres_cluster() -> PostgresCluster {
    SHARED_CLUSTER
        .get_or_init(|| match ManagedCluster::start() {
            Ok(cluster) => Some(cluster),
            Err(err) => {
                eprintln!("SKIP-TEST-CLUSTER: failed to start PostgreSQL: {err}");
                None
            }
        })
        .as_ref()
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
