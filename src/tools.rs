//! Helpers for locating and driving the external tools this program
//! orchestrates.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// The result of driving one of the interactive external tools.
///
/// Cancellation comes from the user (dismissing the selector or the dialog)
/// and is not an error: the program exits quietly with status zero.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Cancelled,
    Failed(anyhow::Error),
}

/// Run a tool to completion, capturing stdout, stderr and exit status.
pub fn capture_output(cmd: &mut Command) -> Result<Output> {
    debug!("running {:?}", cmd);
    let output = cmd
        .output()
        .with_context(|| format!("failed to run {:?}", cmd.get_program()))?;
    if !output.stderr.is_empty() {
        debug!(
            "{:?} stderr: {}",
            cmd.get_program(),
            String::from_utf8_lossy(&output.stderr).trim_end()
        );
    }
    Ok(output)
}

/// Locate `program` on `PATH`, like `command -v`.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    find_in_dirs(env::split_paths(&path), program)
}

fn find_in_dirs(dirs: impl IntoIterator<Item = PathBuf>, program: &str) -> Option<PathBuf> {
    dirs.into_iter()
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Write an executable shell script for tests to stand in for a real tool.
#[cfg(all(test, unix))]
pub(crate) fn fake_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}
