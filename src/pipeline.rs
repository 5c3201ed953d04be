//! Extract, transform, load. Once, in that order.

use std::fmt::Display;
use std::time::Duration;
use std::time::Instant;

use comfy_table::CellAlignment;
use rand::Rng;
use tracing::info;
use tracing::instrument;

use crate::db::driver::DatabaseDriver;
use crate::db::entity::FlatOrderRecord;
use crate::db::loader::Loader;
use crate::generator::Generator;
use crate::transform::transform;
use crate::types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub customers: usize,
    pub orders:    usize,
    pub records:   usize,
    pub affected:  u64,
    pub elapsed:   Duration,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = comfy_table::Table::new();
        table
            .load_preset(comfy_table::presets::ASCII_FULL_CONDENSED)
            .set_header(["", "Count"])
            .add_row(["Customers".to_string(), self.customers.to_string()])
            .add_row(["Orders".to_string(), self.orders.to_string()])
            .add_row(["Flat records".to_string(), self.records.to_string()])
            .add_row(["Rows affected".to_string(), self.affected.to_string()])
            .add_row(["Elapsed (s)".to_string(), format!("{:.2}", self.elapsed.as_secs_f64())]);

        if let Some(column) = table.column_mut(1) {
            column.set_cell_alignment(CellAlignment::Right);
        }

        write!(f, "{table}")
    }
}

#[derive(Debug)]
pub struct Pipeline<D: DatabaseDriver> {
    generator: Generator,
    loader:    Loader<D>,
}

impl<D: DatabaseDriver> Pipeline<D> {
    pub fn new(generator: Generator, loader: Loader<D>) -> Self {
        Self { generator, loader }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn loader(&self) -> &Loader<D> {
        &self.loader
    }

    /// Generate and join without touching the warehouse.
    pub fn extract_transform<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(usize, usize, Vec<FlatOrderRecord>)> {
        let (customers, orders) = self.generator.extract(rng)?;
        let records = transform(&customers, &orders)?;
        Ok((customers.len(), orders.len(), records))
    }

    /// Run the whole pipeline. The first error aborts the run and is returned as is.
    #[instrument(level = "info", skip_all, fields(driver = self.loader.db().name()))]
    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunSummary> {
        let started = Instant::now();

        let (customers, orders, records) = self.extract_transform(rng)?;
        info!("Extracted {customers} customers and {orders} orders, joined into {} flat records", records.len());

        let affected = self.loader.load(&records).await?;

        Ok(RunSummary {
            customers,
            orders,
            records: records.len(),
            affected,
            elapsed: started.elapsed(),
        })
    }
}
