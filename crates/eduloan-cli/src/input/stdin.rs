use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise piped JSON from stdin.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: T = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse loan parameters from stdin: {}", e))?;
    Ok(Some(value))
}
