//! The load stage: batched upsert of flat records into `app.flat_orders`.

use std::sync::Arc;

use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use sea_orm::sea_query::OnConflict;
use sea_orm::EntityTrait;
use sea_orm::IntoActiveModel;
use sea_orm_migration::MigratorTrait;
use tracing::debug;
use tracing::info;
use tracing::instrument;

use super::driver::DatabaseDriver;
use super::entity::flat_order;
use super::entity::FlatOrderRecord;
use super::entity::FlatOrders;
use super::migrations::Migrator;
use crate::types::Result;

/// Rows per `INSERT` statement. Eight bind parameters per row keeps a full batch far below PostgreSQL's 65535 limit.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

#[derive(Debug)]
pub struct Loader<D: DatabaseDriver> {
    db:         Arc<D>,
    batch_size: usize,
    progress:   ProgressBar,
}

impl<D: DatabaseDriver> Loader<D> {
    pub fn new(db: Arc<D>) -> Self {
        Self {
            db,
            batch_size: DEFAULT_BATCH_SIZE,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Report batch progress on the terminal.
    pub fn with_progress(mut self) -> Result<Self> {
        self.progress = ProgressBar::no_length()
            .with_style(ProgressStyle::default_bar().template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?)
            .with_prefix("Loading");
        Ok(self)
    }

    pub fn db(&self) -> &Arc<D> {
        &self.db
    }

    /// Create the target schema and table if they are missing.
    #[instrument(level = "debug", skip(self), fields(driver = self.db.name()))]
    pub async fn prepare(&self) -> Result<()> {
        self.db.configure().await?;
        Migrator::up(&self.db.connection(), None).await?;
        Ok(())
    }

    /// Upsert `records` keyed by `order_id`. On conflict every non-key column is replaced with the incoming value.
    ///
    /// Returns the number of rows the database reports as affected.
    #[instrument(level = "debug", skip_all, fields(records = records.len(), batch_size = self.batch_size))]
    pub async fn load(&self, records: &[FlatOrderRecord]) -> Result<u64> {
        if records.is_empty() {
            debug!("Nothing to load");
            return Ok(0);
        }

        let db = self.db.connection();
        let on_conflict = OnConflict::column(flat_order::Column::OrderId)
            .update_columns(flat_order::update_columns())
            .to_owned();

        self.progress.set_length(records.len() as u64);
        self.progress.set_position(0);

        let mut affected = 0;
        for batch in records.chunks(self.batch_size) {
            let rows = FlatOrders::insert_many(batch.iter().map(|r| r.clone().into_active_model()))
                .on_conflict(on_conflict.clone())
                .exec_without_returning(&db)
                .await?;
            debug!("Upserted batch of {} records, {rows} rows affected", batch.len());
            affected += rows;
            self.progress.inc(batch.len() as u64);
        }

        self.progress.finish_with_message("done");
        info!("Loaded {} records into app.flat_orders via {}", records.len(), self.db.name());

        Ok(affected)
    }
}
