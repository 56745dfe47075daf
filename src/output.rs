use anyhow::{anyhow, bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::tools::capture_output;

/// Clipboard writer.
pub const CLIPBOARD: &str = "wl-copy";

/// Desktop notifier.
pub const NOTIFIER: &str = "notify-send";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Stdout,
    Clipboard,
}

impl Destination {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "stdout" => Some(Self::Stdout),
            "clipboard" => Some(Self::Clipboard),
            _ => None,
        }
    }
}

/// Write `color` to every destination in the comma-separated `list`, in the
/// order given, each at most once. Returns whether the clipboard was among
/// them.
///
/// An unrecognized destination is fatal at the point it is reached; output
/// already written to earlier destinations stands.
pub fn dispatch(list: &str, color: &str) -> Result<bool> {
    dispatch_with(list, color, |dest, color| match dest {
        Destination::Stdout => {
            println!("{color}");
            Ok(())
        }
        Destination::Clipboard => write_clipboard(color),
    })
}

fn dispatch_with(
    list: &str,
    color: &str,
    mut write: impl FnMut(Destination, &str) -> Result<()>,
) -> Result<bool> {
    let mut written: Vec<Destination> = Vec::new();
    for token in list.split(',').filter(|token| !token.is_empty()) {
        let dest = Destination::parse(token)
            .ok_or_else(|| anyhow!("unrecognized destination: {token}"))?;
        if written.contains(&dest) {
            continue;
        }
        write(dest, color)?;
        written.push(dest);
    }
    Ok(written.contains(&Destination::Clipboard))
}

fn write_clipboard(color: &str) -> Result<()> {
    let mut cmd = Command::new(CLIPBOARD);
    // -n: no trailing newline on the clipboard content
    cmd.arg("-n")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    debug!("running {:?}", cmd);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to run clipboard writer ({CLIPBOARD})"))?;
    child
        .stdin
        .take()
        .context("clipboard writer has no stdin")?
        .write_all(color.as_bytes())
        .context("failed to write to the clipboard")?;
    let status = child.wait().context("failed to wait for clipboard writer")?;
    if !status.success() {
        bail!("clipboard writer exited with {status}");
    }
    Ok(())
}

/// Notification body for a finished pick.
pub fn notification_body(copied: bool) -> &'static str {
    if copied {
        "Copied to clipboard"
    } else {
        "Color picked"
    }
}

/// Best-effort desktop notification; a missing or failing notifier is
/// logged, never fatal.
pub fn notify(summary: &str, body: &str) {
    let mut cmd = Command::new(NOTIFIER);
    cmd.args([summary, body]);
    match capture_output(&mut cmd) {
        Ok(output) if output.status.success() => {}
        Ok(output) => warn!("notifier exited with {}", output.status),
        Err(err) => warn!("could not send notification: {err:#}"),
    }
}
