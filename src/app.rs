//! Command line front end.

use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::CommandFactory;
use clap::Parser;
use fieldx::fxstruct;
use garde::Validate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing::instrument;

#[cfg(feature = "pg")]
use crate::db::driver::pg::Pg;
#[cfg(feature = "sqlite")]
use crate::db::driver::sqlite::Sqlite;
use crate::db::driver::DatabaseDriver;
use crate::db::loader::Loader;
use crate::db::loader::DEFAULT_BATCH_SIZE;
use crate::generator::Generator;
use crate::pipeline::Pipeline;
use crate::pipeline::RunSummary;
use crate::reference::DEFAULT_CUSTOMERS;
use crate::reference::DEFAULT_ORDERS;
#[cfg(not(all(feature = "pg", feature = "sqlite")))]
use crate::types::etlerr;
use crate::types::Result;

/// Record ids are `i32` in the warehouse.
const MAX_COUNT: u32 = i32::MAX as u32;

#[derive(Debug, Clone, clap::Parser, Validate)]
#[fxstruct(no_new, get(copy))]
#[clap(about, version, name = "flat-orders")]
pub struct Cli {
    /// Number of customers to generate.
    #[clap(long, env = "FLAT_ORDERS_CUSTOMERS", default_value_t = DEFAULT_CUSTOMERS)]
    #[garde(range(max = MAX_COUNT), custom(Self::customers_for_orders(&self.orders)))]
    customers: u32,

    /// Number of orders to generate.
    #[clap(long, env = "FLAT_ORDERS_ORDERS", default_value_t = DEFAULT_ORDERS)]
    #[garde(range(max = MAX_COUNT))]
    orders: u32,

    /// Seed for the random generator. Runs with the same seed and order date produce identical data.
    #[clap(long, env = "FLAT_ORDERS_SEED")]
    #[garde(skip)]
    seed: Option<u64>,

    /// Date stamped on every order. Defaults to today.
    #[clap(long, env = "FLAT_ORDERS_ORDER_DATE")]
    #[garde(skip)]
    order_date: Option<NaiveDate>,

    /// Rows per upsert statement.
    #[clap(long, env = "FLAT_ORDERS_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    #[garde(range(min = 1))]
    batch_size: usize,

    /// Create the `app` schema and the `flat_orders` table if they don't exist.
    #[clap(long, env = "FLAT_ORDERS_MIGRATE", default_value_t = false)]
    #[garde(skip)]
    migrate: bool,

    /// Print the flat records as JSON lines instead of loading them.
    #[clap(long, env = "FLAT_ORDERS_DRY_RUN", default_value_t = false)]
    #[garde(skip)]
    dry_run: bool,

    /// Silence the progress output
    #[clap(long, short, env = "FLAT_ORDERS_QUIET", default_value_t = false)]
    #[garde(skip)]
    quiet: bool,

    /// Use SQLite as the warehouse.
    #[clap(long, env = "FLAT_ORDERS_SQLITE", default_value_t = false)]
    #[garde(custom(Self::feature_enabled(cfg!(feature = "sqlite"), "sqlite")))]
    sqlite: bool,

    /// Directory holding the SQLite database files.
    /// If not provided, a temporary directory will be used.
    #[clap(long, env = "FLAT_ORDERS_SQLITE_PATH")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    sqlite_path: Option<PathBuf>,

    #[clap(long, env = "WAREHOUSE_HOST", default_value = "localhost")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    host: String,

    #[clap(long, env = "WAREHOUSE_PORT", default_value_t = 5432)]
    #[garde(skip)]
    port: u16,

    #[clap(long, env = "WAREHOUSE_DB", default_value = "warehouse")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    database: String,

    #[clap(long, env = "WAREHOUSE_USER", default_value = "sdeuser")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    user: String,

    #[clap(long, env = "WAREHOUSE_PASSWORD", hide_env_values = true, default_value = "sdepassword")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    password: String,

    /// File to send log into
    #[clap(long, env = "FLAT_ORDERS_LOG_FILE")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn customers_for_orders(orders: &u32) -> impl FnOnce(&u32, &()) -> garde::Result + '_ {
        move |customers, _| {
            if *customers == 0 && *orders > 0 {
                Err(garde::Error::new(format!(
                    "{orders} orders need at least one customer to reference"
                )))
            }
            else {
                Ok(())
            }
        }
    }

    fn feature_enabled(enabled: bool, feature: &'static str) -> impl FnOnce(&bool, &()) -> garde::Result {
        move |value, _| {
            if !*value || enabled {
                Ok(())
            }
            else {
                Err(garde::Error::new(format!("Build feature '{feature}' must be enabled.")))
            }
        }
    }

    fn generator(&self) -> Result<Generator> {
        Ok(Generator::builder()
            .customers(self.customers())
            .orders(self.orders())
            .order_date(self.order_date().unwrap_or_else(|| Local::now().date_naive()))
            .build()?)
    }

    fn rng(&self) -> StdRng {
        match self.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub struct EtlApp {
    cli: Cli,
}

impl EtlApp {
    pub fn new() -> Result<Self> {
        Self::from_cli(Cli::try_parse()?)
    }

    pub fn from_args<S: ToString>(args: Vec<S>) -> Result<Self> {
        Self::from_cli(Cli::try_parse_from(args.into_iter().map(|s| s.to_string()))?)
    }

    fn from_cli(cli: Cli) -> Result<Self> {
        if let Err(err) = cli.validate() {
            let mut cmd = Cli::command();
            return Err(cmd.error(ErrorKind::InvalidValue, err).into());
        }
        Ok(Self { cli })
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    pub fn setup_tracing(&self) -> Result<()> {
        use std::sync::Mutex;
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        let dest_writer = Mutex::new(if let Some(log_file) = self.cli.log_file() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(log_file)?;
            Box::new(file) as Box<dyn Write + Send>
        }
        else {
            Box::new(std::io::stderr()) as Box<dyn Write + Send>
        });

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_writer(dest_writer))
            .try_init()?;

        Ok(())
    }

    /// Generate and join, then write the records to `out` as JSON lines.
    pub fn dry_run<W: Write>(&self, out: W) -> Result<usize> {
        let generator = self.cli.generator()?;
        let (customers, orders) = generator.extract(&mut self.cli.rng())?;
        let records = crate::transform::transform(&customers, &orders)?;

        let mut out = BufWriter::new(out);
        for record in &records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        Ok(records.len())
    }

    #[instrument(level = "debug", skip_all)]
    async fn run_with<D: DatabaseDriver>(&self, db: Arc<D>) -> Result<RunSummary> {
        let mut loader = Loader::new(db).with_batch_size(self.cli.batch_size());
        if !self.cli.quiet() {
            loader = loader.with_progress()?;
        }

        if self.cli.migrate() {
            loader.prepare().await?;
        }

        let pipeline = Pipeline::new(self.cli.generator()?, loader);
        let summary = pipeline.run(&mut self.cli.rng()).await?;

        for line in summary.to_string().lines() {
            info!("{line}");
        }

        pipeline.loader().db().connection().close().await?;

        Ok(summary)
    }

    #[cfg(feature = "sqlite")]
    async fn run_sqlite(&self) -> Result<RunSummary> {
        // Keep the temp dir alive until the run is over.
        let tempdir;
        let db_dir = match self.cli.sqlite_path() {
            Some(path) => path,
            None => {
                tempdir = tempfile::Builder::new().prefix("flat-orders").tempdir()?;
                tempdir.path().to_path_buf()
            }
        };
        let db = Arc::new(Sqlite::connect(&db_dir).await?);
        self.run_with(db).await
    }

    #[cfg(feature = "pg")]
    async fn run_pg(&self) -> Result<RunSummary> {
        let db = Pg::builder()
            .host(self.cli.host())
            .port(self.cli.port())
            .user(self.cli.user())
            .password(self.cli.password())
            .database(self.cli.database())
            .build()?;
        db.connect().await?;
        self.run_with(db).await
    }

    /// Execute the run selected on the command line. Returns `None` for a dry run.
    pub async fn execute(&self) -> Result<Option<RunSummary>> {
        if self.cli.dry_run() {
            let count = self.dry_run(std::io::stdout().lock())?;
            info!("Dry run produced {count} records");
            return Ok(None);
        }

        if self.cli.sqlite() {
            #[cfg(feature = "sqlite")]
            return self.run_sqlite().await.map(Some);
            #[cfg(not(feature = "sqlite"))]
            return Err(etlerr!("SQLite support is not enabled. Use `cargo run --features sqlite ...`"));
        }

        #[cfg(feature = "pg")]
        return self.run_pg().await.map(Some);
        #[cfg(not(feature = "pg"))]
        Err(etlerr!(
            "PostgreSQL support is not enabled. Use `cargo run --features pg ...` or pass --sqlite."
        ))
    }
}
