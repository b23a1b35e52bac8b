mod app;
mod config;
mod currency;
mod data;
mod input;
mod state;
mod ui;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use app::RentApp;
use config::Config;
use input::TerminalPrompt;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    let mut state = AppState::new(&config.data, config.load_options()?);
    if let Some(code) = &config.home_currency {
        state
            .set_home_currency(code)
            .with_context(|| format!("invalid --home-currency {code:?}"))?;
    }

    let prompt = TerminalPrompt::new().context("initialising line editor")?;
    log::debug!("Starting session with data file {}", config.data.display());

    let mut app = RentApp::new(state, prompt, io::stdout());
    app.run().context("writing to stdout")?;
    Ok(())
}
