use anyhow::Result;
use clap::Parser;

use backend_bootstrap::Args;

#[tokio::main]
async fn main() -> Result<()> {
    backend_bootstrap::run(Args::parse()).await
}
