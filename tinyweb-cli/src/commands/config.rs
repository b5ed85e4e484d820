//! Config command implementation.

use super::load_config;
use anyhow::{bail, Result};
use std::path::Path;

/// Print one scalar setting by its dotted key
pub fn config_get(config_path: &Path, key: &str) -> Result<()> {
    let config = load_config(config_path)?;
    match config.get(key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => bail!("No value for config key '{}'", key),
    }
}
