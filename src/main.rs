use anyhow::{Context, Result};
use openremote::{Config, Host, Notice};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Host that opens links in the desktop browser.
///
/// With `print_only` the URL is written to stdout instead, which keeps the
/// binary usable from editors that open links themselves.
struct Desktop {
    print_only: bool,
}

impl Host for Desktop {
    fn open_url(&self, url: &str) -> Result<()> {
        if self.print_only {
            println!("{}", url);
            return Ok(());
        }

        debug!(url, "launching viewer");
        open::that(url).with_context(|| format!("Failed to launch viewer for {}", url))
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Info(message) => println!("{}", message),
            Notice::Error(message) => eprintln!("openremote: {}", message),
        }
    }
}

fn main() -> Result<ExitCode> {
    let config = Config::parse();

    let default_level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    config.validate().context("Invalid configuration")?;

    let host = Desktop {
        print_only: config.no_open,
    };

    if openremote::execute(&config, &host) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
