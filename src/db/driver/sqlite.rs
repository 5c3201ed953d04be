use std::path::Path;

use async_trait::async_trait;
use fieldx::fxstruct;
use sea_orm::sqlx::sqlite::SqliteConnectOptions;
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::sqlx::Executor;
use sea_orm::ConnectionTrait;
use sea_orm::DatabaseConnection;
use sea_orm::SqlxSqliteConnector;
use tracing::error;

use crate::types::Result;

use super::DatabaseDriver;

const MAIN_DB: &str = "warehouse.db";
const APP_DB: &str = "app.db";

/// SQLite stand-in for the warehouse.
///
/// The `app` schema is a second database file. `ATTACH` is per connection, so it is issued by the pool for every
/// connection it opens.
#[derive(Debug)]
#[fxstruct(sync, no_new)]
pub struct Sqlite {
    connection: DatabaseConnection,
}

impl Sqlite {
    pub async fn connect(db_dir: &Path) -> Result<Self> {
        let main_db = db_dir.join(MAIN_DB);
        let attach = format!(
            "ATTACH DATABASE '{}' AS app;",
            db_dir.join(APP_DB).display().to_string().replace('\'', "''")
        );

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .after_connect(move |conn, _meta| {
                let attach = attach.clone();
                Box::pin(async move {
                    conn.execute(attach.as_str()).await?;
                    Ok(())
                })
            })
            .connect_with(SqliteConnectOptions::new().filename(&main_db).create_if_missing(true))
            .await
            .inspect_err(|e| error!("Error connecting to database {}: {e}", main_db.display()))?;

        Ok(Self {
            connection: SqlxSqliteConnector::from_sqlx_sqlite_pool(pool),
        })
    }
}

#[async_trait]
impl DatabaseDriver for Sqlite {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    async fn configure(&self) -> Result<()> {
        self.connection.execute_unprepared("PRAGMA journal_mode=WAL;").await?;
        self.connection.execute_unprepared("PRAGMA synchronous=NORMAL;").await?;

        Ok(())
    }
}
