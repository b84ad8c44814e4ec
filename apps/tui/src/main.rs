mod app;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use color_eyre::Result;
use std::path::Path;
use stock_league_core::ApiClient;
use stock_league_tui::cli::CliArgs;
use stock_league_tui::config::init_app_config;
use stock_league_tui::logging::{init_tracing, LogTarget, LOG_FILE};
use stock_league_tui::transport::ReqwestTransport;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Check if we're running in a terminal
    let headless = args.wants_headless() || !is_terminal();
    let log_target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(Path::new(LOG_FILE))
    };
    init_tracing(args.debug, log_target)?;

    let api_label = config.base.url(&config.listing_endpoint);
    tracing::info!(api = %api_label, source = ?args.source(), headless, "starting");

    let client = ApiClient::new(ReqwestTransport::new(), config);
    let probe = !args.no_probe;

    if headless {
        return event::run_headless(&client, args.source(), args.json, probe).await;
    }

    let mut app = App::new(args.source(), api_label);

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &client, probe).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
