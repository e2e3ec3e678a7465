mod app;
mod cli;

use animal_gallery::config::Config;
use animal_gallery::observability;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config = Config::load_with(cli.config.clone())?;
    observability::init_tracing(&config.logging.filter);

    app::run(cli.command, config).await
}
