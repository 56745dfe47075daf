mod capture;
mod cli;
mod convert;
mod dialog;
mod lookup;
mod output;
mod select;
mod session;
mod tools;

use anyhow::Result;
use tools::Outcome;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries only the picked color; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match cli::parse(std::env::args().skip(1))? {
        cli::Invocation::Help => {
            print!("{}", cli::usage());
            return Ok(());
        }
        cli::Invocation::Run(config) => config,
    };
    debug!(?config, "parsed configuration");

    if let Err(err) = session::check() {
        if config.notify {
            output::notify("swatch", &format!("{err}"));
        }
        return Err(err);
    }

    let converter = convert::detect();
    debug!(?converter, "selected pixel converter");

    let region = match select::pick_region() {
        Outcome::Success(region) => region,
        Outcome::Cancelled => return Ok(()),
        Outcome::Failed(err) => return Err(err),
    };
    debug!(region = %region, "region selected");

    let sampled = capture::sample_pixel(&region, converter, config.delay)?;
    debug!(sampled = %sampled, "pixel sampled");

    let mut color = if config.picker {
        match dialog::adjust(&sampled) {
            Outcome::Success(color) => color,
            Outcome::Cancelled => return Ok(()),
            Outcome::Failed(err) => return Err(err),
        }
    } else {
        sampled
    };

    if lookup::enabled() {
        if let Some(name) = lookup::name_of(&color) {
            color = format!("{color} ({name})");
        }
    }

    let copied = output::dispatch(&config.dest, &color)?;

    if config.notify {
        output::notify(&color, output::notification_body(copied));
    }

    Ok(())
}
