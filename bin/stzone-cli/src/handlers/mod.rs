pub(crate) mod genesis;
pub(crate) mod inspect;

use anyhow::anyhow;
use serde::Serialize;

/// Prints `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow!(format!("Failed to serialize output: {}", e)))?;
    println!("{json}");

    Ok(())
}
