//! Starts deckwm on the X display named by `$DISPLAY`.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use deckwm_core::Manager;
use std::process::ExitCode;
use xlib_display_server::{XlibDisplayServer, XlibWindowHandle};

#[allow(dead_code)]
#[derive(Debug, Parser)]
#[command(
    name = "deckwm",
    about,
    disable_version_flag = true,
    long_about = "A dynamic tiling window manager. The desktop summary is written to stdout, \
                  logs go to stderr (filtered with RUST_LOG)."
)]
struct DeckwmCli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    DeckwmCli::parse();
    deckwm::utils::log::setup_logging();
    tracing::info!("deckwm {} booting...", env!("CARGO_PKG_VERSION"));

    match run() {
        Ok(()) => {
            tracing::info!("Completed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = deckwm::load().context("Cannot load the configuration")?;
    XlibDisplayServer::check_connection().context("Cannot open the X display")?;

    let rt = tokio::runtime::Runtime::new().context("Couldn't init Tokio runtime")?;
    let _rt_guard = rt.enter();

    let manager = Manager::<XlibWindowHandle, deckwm::Config, XlibDisplayServer>::new(config);
    manager.register_child_hook();
    rt.block_on(manager.event_loop());
    Ok(())
}
