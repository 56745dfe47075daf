use std::process::Command;

use crate::tools::{capture_output, Outcome};

/// Region selection tool.
pub const SELECTOR: &str = "slurp";

/// Overlay color passed to the selector, fully transparent.
const OVERLAY_COLOR: &str = "00000000";

/// Let the user pick a point on screen.
///
/// Returns the capture geometry reported by the selector. A non-zero exit
/// or empty output means the user backed out of the selection.
pub fn pick_region() -> Outcome<String> {
    let mut cmd = Command::new(SELECTOR);
    cmd.args(["-p", "-b", OVERLAY_COLOR]);

    let output = match capture_output(&mut cmd) {
        Ok(output) => output,
        Err(err) => return Outcome::Failed(err),
    };
    interpret(
        output.status.success(),
        &String::from_utf8_lossy(&output.stdout),
    )
}

fn interpret(success: bool, stdout: &str) -> Outcome<String> {
    let geometry = stdout.trim();
    if !success || geometry.is_empty() {
        return Outcome::Cancelled;
    }
    Outcome::Success(geometry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_selection_yields_trimmed_geometry() {
        match interpret(true, "481,162 1x1\n") {
            Outcome::Success(geometry) => assert_eq!(geometry, "481,162 1x1"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn nonzero_exit_is_cancellation() {
        assert!(matches!(
            interpret(false, "481,162 1x1\n"),
            Outcome::Cancelled
        ));
    }

    #[test]
    fn empty_output_is_cancellation() {
        assert!(matches!(interpret(true, "  \n"), Outcome::Cancelled));
    }
}
