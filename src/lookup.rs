//! Optional color-name annotation via a remote naming service.
//!
//! Strictly best-effort: a missing http client, a dead network or an
//! unexpected response body all just mean the color goes out unannotated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::process::Command;
use tracing::debug;

use crate::tools::{capture_output, find_in_path};

/// Environment variable enabling the lookup.
pub const TOGGLE_VAR: &str = "SWATCH_NAME_LOOKUP";

/// External HTTP client driven for the request.
const HTTP_CLIENT: &str = "curl";

const ENDPOINT: &str = "https://www.thecolorapi.com/id";
const TIMEOUT_SECS: &str = "3";

// matches the name object's value field in the JSON-shaped body
static NAME_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""name"\s*:\s*\{[^{}]*?"value"\s*:\s*"([^"]*)""#).unwrap());

pub fn enabled() -> bool {
    env::var_os(TOGGLE_VAR).map(|v| !v.is_empty()).unwrap_or(false)
}

/// Fetch a human-readable name for `color` (`#RRGGBB`).
pub fn name_of(color: &str) -> Option<String> {
    let hex = color.trim_start_matches('#');
    if hex.is_empty() {
        return None;
    }
    let Some(client) = find_in_path(HTTP_CLIENT) else {
        debug!("no http client on PATH, skipping name lookup");
        return None;
    };

    let url = format!("{ENDPOINT}?hex={hex}");
    let mut cmd = Command::new(client);
    cmd.args(["-sf", "--max-time", TIMEOUT_SECS, &url]);
    let output = match capture_output(&mut cmd) {
        Ok(output) => output,
        Err(err) => {
            debug!("name lookup failed: {err:#}");
            return None;
        }
    };
    if !output.status.success() {
        debug!("name lookup request exited with {}", output.status);
        return None;
    }
    parse_name(&String::from_utf8_lossy(&output.stdout))
}

fn parse_name(body: &str) -> Option<String> {
    let name = NAME_FIELD.captures(body)?.get(1)?.as_str();
    if name.is_empty() || name == "null" {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_extracted_from_a_response_body() {
        let body = r##"{"hex":{"value":"#0047AB"},"name":{"value":"Cobalt","closest_named_hex":"#0047AB","exact_match_name":false}}"##;
        assert_eq!(parse_name(body), Some("Cobalt".to_string()));
    }

    #[test]
    fn whitespace_around_the_fields_is_tolerated() {
        let body = "{ \"name\" : { \"value\" : \"Deep Sea\" } }";
        assert_eq!(parse_name(body), Some("Deep Sea".to_string()));
    }

    #[test]
    fn null_and_empty_names_are_discarded() {
        assert_eq!(parse_name(r#"{"name":{"value":"null"}}"#), None);
        assert_eq!(parse_name(r#"{"name":{"value":""}}"#), None);
    }

    #[test]
    fn bodies_without_a_name_yield_nothing() {
        assert_eq!(parse_name(""), None);
        assert_eq!(parse_name(r##"{"hex":{"value":"#0047AB"}}"##), None);
        assert_eq!(parse_name("<html>502 Bad Gateway</html>"), None);
    }
}
