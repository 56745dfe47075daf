use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Immutable run configuration, built once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw comma-separated destination list; validated during dispatch.
    pub dest: String,
    pub picker: bool,
    pub notify: bool,
    /// Settle delay in seconds before the screen grab.
    pub delay: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dest: "stdout".to_string(),
            picker: false,
            notify: false,
            delay: 1.0,
        }
    }
}

#[derive(Debug)]
pub enum Invocation {
    Run(Config),
    Help,
}

// optional integer part, optional single decimal point, at least one digit
static DELAY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]+$").unwrap());

/// Scan the argument tokens in order.
///
/// Unrecognized tokens are skipped; invocations written for older versions
/// of the tool must keep working. `--help` wins the moment it is reached.
pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Invocation> {
    let mut config = Config::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--dest" => {
                let Some(list) = args.next() else {
                    bail!("--dest requires a value");
                };
                if !list.split(',').any(|token| !token.is_empty()) {
                    bail!("--dest requires at least one destination");
                }
                config.dest = list;
            }
            "-c" | "--copy" => config.dest = "stdout,clipboard".to_string(),
            "--picker" => config.picker = true,
            "--notify" => config.notify = true,
            "--no-notify" => config.notify = false,
            "clipboard" => config.dest = "clipboard".to_string(),
            "--delay" => {
                let Some(value) = args.next() else {
                    bail!("--delay requires a value");
                };
                if !DELAY_PATTERN.is_match(&value) {
                    bail!("invalid --delay value: {value}");
                }
                config.delay = value.parse()?;
            }
            other => debug!("ignoring unrecognized argument {other:?}"),
        }
    }

    Ok(Invocation::Run(config))
}

pub fn usage() -> &'static str {
    "swatch - pick a pixel color from the screen

Usage: swatch [OPTIONS]

Options:
  --dest LIST      comma-separated output destinations: stdout, clipboard
  -c, --copy       shorthand for --dest stdout,clipboard
  --picker         open a color adjustment dialog after sampling
  --notify         send a desktop notification with the result
  --no-notify      disable the desktop notification
  --delay SECONDS  settle delay before the screen grab (default: 1)
  -h, --help       print this help

Environment:
  WAYLAND_DISPLAY     must be set; a Wayland session is required
  SWATCH_NAME_LOOKUP  set non-empty to annotate the color with a name
                      from the color API (requires curl)
  RUST_LOG            diagnostic log filter, written to stderr
"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_tokens(tokens: &[&str]) -> Result<Invocation> {
        parse(tokens.iter().map(|t| t.to_string()))
    }

    fn config_of(tokens: &[&str]) -> Config {
        match parse_tokens(tokens).unwrap() {
            Invocation::Run(config) => config,
            Invocation::Help => panic!("expected a run configuration"),
        }
    }

    #[test]
    fn defaults_are_stdout_no_picker_no_notify_one_second() {
        let config = config_of(&[]);
        assert_eq!(config.dest, "stdout");
        assert!(!config.picker);
        assert!(!config.notify);
        assert_eq!(config.delay, 1.0);
    }

    #[test]
    fn dest_list_is_taken_verbatim() {
        assert_eq!(config_of(&["--dest", "clipboard,stdout"]).dest, "clipboard,stdout");
    }

    #[test]
    fn copy_shorthand_targets_both() {
        assert_eq!(config_of(&["-c"]).dest, "stdout,clipboard");
        assert_eq!(config_of(&["--copy"]).dest, "stdout,clipboard");
    }

    #[test]
    fn bare_clipboard_word_targets_clipboard_only() {
        assert_eq!(config_of(&["clipboard"]).dest, "clipboard");
    }

    #[test]
    fn notify_can_be_set_and_cleared_in_order() {
        assert!(config_of(&["--notify"]).notify);
        assert!(!config_of(&["--notify", "--no-notify"]).notify);
    }

    #[test]
    fn picker_flag_enables_the_dialog() {
        assert!(config_of(&["--picker"]).picker);
    }

    #[test]
    fn delay_accepts_the_numeric_forms() {
        assert_eq!(config_of(&["--delay", "2"]).delay, 2.0);
        assert_eq!(config_of(&["--delay", "0.25"]).delay, 0.25);
        assert_eq!(config_of(&["--delay", ".5"]).delay, 0.5);
        assert_eq!(config_of(&["--delay", "0"]).delay, 0.0);
    }

    #[test]
    fn delay_rejects_everything_else() {
        for bad in ["abc", "1.2.3", "5.", "-1", ""] {
            let err = parse_tokens(&["--delay", bad]).unwrap_err();
            assert!(err.to_string().contains("--delay"), "{bad:?}: {err}");
        }
        assert!(parse_tokens(&["--delay"]).is_err());
    }

    #[test]
    fn dest_requires_a_nonempty_list() {
        assert!(parse_tokens(&["--dest"]).is_err());
        assert!(parse_tokens(&["--dest", ""]).is_err());
        assert!(parse_tokens(&["--dest", ",,"]).is_err());
    }

    #[test]
    fn unknown_tokens_change_nothing() {
        let config = config_of(&["--frobnicate", "whatever", "-x"]);
        assert_eq!(config.dest, "stdout");
        assert!(!config.picker);
        assert!(!config.notify);
        assert_eq!(config.delay, 1.0);
    }

    #[test]
    fn help_short_circuits_later_errors() {
        assert!(matches!(
            parse_tokens(&["--help", "--delay", "abc"]).unwrap(),
            Invocation::Help
        ));
        assert!(matches!(parse_tokens(&["-h"]).unwrap(), Invocation::Help));
    }

    #[test]
    fn an_earlier_delay_error_beats_help() {
        assert!(parse_tokens(&["--delay", "abc", "--help"]).is_err());
    }

    #[test]
    fn later_destination_tokens_win() {
        assert_eq!(config_of(&["-c", "clipboard"]).dest, "clipboard");
        assert_eq!(config_of(&["clipboard", "--dest", "stdout"]).dest, "stdout");
    }
}
