use anyhow::{bail, Result};
use std::env;
use std::ffi::OsStr;

use crate::tools::find_in_path;
use crate::{capture, select};

/// Environment variable indicating a live Wayland session.
pub const SESSION_VAR: &str = "WAYLAND_DISPLAY";

/// Tools that must be present before anything is attempted. The clipboard
/// writer, dialog, notifier and http client are only checked when invoked.
const REQUIRED_TOOLS: &[&str] = &[select::SELECTOR, capture::GRABBER];

/// Verify the runtime environment before any tool is launched.
pub fn check() -> Result<()> {
    check_session(env::var_os(SESSION_VAR).as_deref())?;
    check_tools(|tool| find_in_path(tool).is_some())
}

fn check_session(value: Option<&OsStr>) -> Result<()> {
    match value {
        Some(display) if !display.is_empty() => Ok(()),
        _ => bail!("no graphical session ({SESSION_VAR} is not set)"),
    }
}

fn check_tools(installed: impl Fn(&str) -> bool) -> Result<()> {
    for tool in REQUIRED_TOOLS {
        if !installed(tool) {
            bail!("required tool not found in PATH: {tool}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_accepts_nonempty_display() {
        assert!(check_session(Some(OsStr::new("wayland-1"))).is_ok());
    }

    #[test]
    fn session_rejects_unset_display() {
        let err = check_session(None).unwrap_err();
        assert!(err.to_string().contains(SESSION_VAR));
    }

    #[test]
    fn session_rejects_empty_display() {
        assert!(check_session(Some(OsStr::new(""))).is_err());
    }

    #[test]
    fn tools_pass_when_all_installed() {
        assert!(check_tools(|_| true).is_ok());
    }

    #[test]
    fn tools_fail_naming_the_missing_one() {
        let err = check_tools(|tool| tool != capture::GRABBER).unwrap_err();
        assert!(err.to_string().contains(capture::GRABBER));
    }
}
