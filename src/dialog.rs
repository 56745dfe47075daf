use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;
use tracing::warn;

use crate::tools::{capture_output, Outcome};

/// Interactive color adjustment dialog.
pub const DIALOG: &str = "zenity";

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Offer the sampled color for interactive adjustment.
///
/// A non-zero exit is user cancellation. A zero exit with empty output
/// means no change: the sampled color stays.
pub fn adjust(sampled: &str) -> Outcome<String> {
    let mut cmd = Command::new(DIALOG);
    cmd.args(["--color-selection", "--color", sampled]);

    let output = match capture_output(&mut cmd) {
        Ok(output) => output,
        Err(err) => return Outcome::Failed(err),
    };
    if !output.status.success() {
        return Outcome::Cancelled;
    }

    let text = String::from_utf8_lossy(&output.stdout);
    match parse_rgb(text.trim()) {
        Some(color) => Outcome::Success(color),
        None => {
            if !text.trim().is_empty() {
                warn!("unparseable dialog output {:?}, keeping sampled color", text.trim());
            }
            Outcome::Success(sampled.to_string())
        }
    }
}

/// Turn the dialog's `rgb(r,g,b)` style output into `#rrggbb`: the first
/// three runs of decimal digits, each as two zero-padded lowercase hex
/// digits.
fn parse_rgb(text: &str) -> Option<String> {
    let mut channels = DIGIT_RUNS
        .find_iter(text)
        .filter_map(|run| run.as_str().parse::<u32>().ok());
    let (r, g, b) = (channels.next()?, channels.next()?, channels.next()?);
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}
