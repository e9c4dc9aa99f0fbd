//! geoweather - current weather and address for where you are
//!
//! ```sh
//! # interactive, position from the public IP
//! OPENWEATHER_API_KEY=... geoweather
//!
//! # fixed position, one summary on stdout
//! geoweather --lat 35.0 --lon 139.0 --once
//! ```

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use geoweather_core::{Action, Config, Pipeline};
use ratatui::{backend::CrosstermBackend, Terminal};

use geoweather_tui::cli::Args;
use geoweather_tui::components::AppView;
use geoweather_tui::report::render_report;
use geoweather_tui::{logging, Runtime};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let config = args.to_config().context("invalid configuration")?;
    let pipeline = Pipeline::new(&config).context("failed to set up the pipeline")?;
    tracing::info!(
        stale_policy = ?config.stale_policy,
        geolocation_supported = pipeline.state().geolocation_supported,
        "pipeline ready"
    );

    if args.once {
        run_once(pipeline, &config).await;
        return Ok(());
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let view = AppView::new(
        config.weather.icon_base_url.clone(),
        config.map.tile_url_template.clone(),
    );
    let mut runtime = Runtime::new(pipeline, view);
    let result = runtime.run(&mut terminal).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("terminal loop failed")
}

async fn run_once(mut pipeline: Pipeline, config: &Config) {
    pipeline.dispatch(Action::LocationRequest);
    pipeline.run_until_idle().await;
    print!(
        "{}",
        render_report(
            pipeline.state(),
            &config.weather.icon_base_url,
            &config.map.tile_url_template,
        )
    );
}
