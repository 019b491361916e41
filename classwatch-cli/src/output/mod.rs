//! Output formatting for the CLI.

pub mod json;
pub mod text;


pub use json::{account_output, event_output, AccountOutput, EventOutput};
pub use text::TextFormatter;

use anyhow::Result;
use serde::Serialize;

/// Serializes a value to JSON, honoring `--pretty`.
pub fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}
