use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the listing and the TUI frame
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_overrides(&mut config);

    let ctx = AppContext::new(config)?;

    match cli.selected_command() {
        Commands::List => {
            commands::list_stories(&ctx).await?;
        }
        Commands::Url => {
            commands::print_url(&ctx)?;
        }
        Commands::Tui => {
            newsdesk::tui::run(&ctx).await?;
        }
    }

    Ok(())
}
