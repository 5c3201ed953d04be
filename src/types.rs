use thiserror::Error;

/// Errors produced by the pipeline. None of them is handled inside the crate; every one of them ends the run.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Cannot generate {order_count} orders without any customers to reference")]
    NoCustomers { order_count: u32 },

    #[error("Cannot generate {count} {what}: ids must fit into a 32-bit signed integer")]
    CountTooLarge { what: &'static str, count: u32 },

    #[error("Order #{order_id} references customer #{customer_id} which is not in the customer set")]
    Lookup { order_id: i32, customer_id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sea_orm::sqlx::Error),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Failed to build {0}")]
    Builder(#[from] fieldx::error::FieldXError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bad progress bar template: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    #[error("Failed to initialize tracing: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),

    #[error("{0}")]
    Config(String),
}

pub type Result<T, E = EtlError> = std::result::Result<T, E>;

macro_rules! etlerr {
    ($($t:tt)*) => {
        $crate::types::EtlError::Config(format!($($t)*))
    };
}

pub(crate) use etlerr;
