use clap::Parser;
use lifedash::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lifedash::logging::init_tracing();
    let cli = Cli::parse();
    cli.run().await
}
