use std::time::Duration;

use fieldx::fxstruct;
use sea_orm::ConnectOptions;
use sea_orm::DatabaseConnection;
use tracing::error;
use tracing::info;

use crate::types::Result;

use super::DatabaseDriver;

/// PostgreSQL warehouse.
#[derive(Debug)]
#[fxstruct(sync, rc, no_new, builder)]
pub struct Pg {
    host: String,
    port: u16,
    user: String,
    password: String,
    database: String,
    #[fieldx(inner_mut, get(off), set, builder(off))]
    connection: DatabaseConnection,
}

impl Pg {
    pub async fn connect(&self) -> Result<()> {
        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        );
        let mut opts = ConnectOptions::new(&url);
        opts.max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(20))
            .max_lifetime(Duration::from_secs(60))
            .test_before_acquire(true)
            .sqlx_logging(false);

        self.set_connection(sea_orm::Database::connect(opts).await.inspect_err(|e| {
            error!(
                "Error connecting to database postgres://{}@{}:{}/{}: {e}",
                self.user, self.host, self.port, self.database
            )
        })?);

        info!("Connected to {}:{}/{}", self.host, self.port, self.database);

        Ok(())
    }
}

impl DatabaseDriver for Pg {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn connection(&self) -> DatabaseConnection {
        self.connection.read().clone()
    }
}
