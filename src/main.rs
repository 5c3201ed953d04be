use anyhow::Context;
use flat_orders::app::EtlApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let app = match EtlApp::new() {
        Ok(app) => app,
        Err(flat_orders::types::EtlError::Cli(err)) => err.exit(),
        Err(err) => return Err(err.into()),
    };

    app.setup_tracing().context("Failed to set up logging")?;
    app.execute().await.context("Pipeline run failed")?;

    Ok(())
}
