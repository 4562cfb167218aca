pub mod cli;
pub mod context;
pub mod logging;

use anyhow::Result;
use tracing::error;

use backend_infrastructure::AppConfig;

pub use cli::{Args, Command};
pub use context::AppContext;
pub use logging::init_logging;

pub async fn run(args: Args) -> Result<()> {
    if let Some(config) = &args.config {
        std::env::set_var("EVENTS_CONFIG", config);
    }
    let config = AppConfig::load().await?;
    let _guard = init_logging(config.log_dir.as_deref())?;

    let context = AppContext::new(&config).await?;
    let result = cli::execute(&context.state, args.command).await;
    context.shutdown().await;

    if args.metrics {
        eprint!("{}", context.state.metrics.render_prometheus());
    }
    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(err) => {
            error!("{:#}", err);
            Err(err)
        }
    }
}
