//! # flat-orders
//!
//! Seed or refresh a demo analytics table with synthetic data.
//!
//! A run goes through three stages, strictly one after another:
//!
//! - **Extract**: [`Generator`] produces customers and the orders placed by them. Names come from the
//!   [fake](https://crates.io/crates/fake) crate, states, categories and sub-categories are drawn from the fixed lists
//!   in [`reference`]. Every draw uses the caller's RNG, so a seeded run is reproducible.
//! - **Transform**: [`transform()`] joins every order with its customer through a hash map, yielding one
//!   [`FlatOrderRecord`] per order, keeping the order sequence.
//! - **Load**: [`Loader`] upserts the records into `app.flat_orders` in multi-row batches. A conflicting `order_id`
//!   gets all of its other columns replaced, so loading the same records twice leaves the table unchanged.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use flat_orders::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # #[cfg(feature = "pg")]
//! # async fn demo() -> flat_orders::types::Result<()> {
//! let db = flat_orders::db::driver::pg::Pg::builder()
//!     .host("localhost".to_string())
//!     .port(5432)
//!     .user("sdeuser".to_string())
//!     .password("sdepassword".to_string())
//!     .database("warehouse".to_string())
//!     .build()?;
//! db.connect().await?;
//!
//! let pipeline = Pipeline::new(Generator::builder().customers(3).orders(5).build()?, Loader::new(db));
//! let summary = pipeline.run(&mut StdRng::seed_from_u64(1)).await?;
//! assert_eq!(summary.records, 5);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod db;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod reference;
pub mod transform;
pub mod types;

#[doc(inline)]
pub use db::entity::FlatOrderRecord;
#[doc(inline)]
pub use db::loader::Loader;
#[doc(inline)]
pub use generator::Generator;
#[doc(inline)]
pub use pipeline::Pipeline;
#[doc(inline)]
pub use transform::transform;

pub mod prelude {
    pub use crate::db::driver::DatabaseDriver;
    pub use crate::db::entity::FlatOrderRecord;
    pub use crate::db::entity::FlatOrders;
    pub use crate::db::loader::Loader;
    pub use crate::generator::Generator;
    pub use crate::model::*;
    pub use crate::pipeline::Pipeline;
    pub use crate::pipeline::RunSummary;
    pub use crate::transform::transform;
    pub use crate::types::*;
}
