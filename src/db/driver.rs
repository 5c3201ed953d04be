//! Warehouse connection providers.
#[cfg(feature = "pg")]
pub mod pg;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::fmt::Debug;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::types::Result;

/// A source of warehouse connections.
///
/// [`DatabaseConnection`] is a pooled handle: a physical connection is checked out for the duration of a statement and
/// returned to the pool when the statement completes or fails.
#[async_trait]
pub trait DatabaseDriver: Debug + Sync + Send + 'static {
    /// Return driver name.
    fn name(&self) -> &'static str;
    fn connection(&self) -> DatabaseConnection;
    /// Apply per-session settings. Nothing to do unless the backend needs tuning.
    async fn configure(&self) -> Result<()> {
        Ok(())
    }
}
