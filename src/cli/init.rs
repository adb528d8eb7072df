//! Init command: write a benford.toml template

use anyhow::{bail, Result};
use std::path::Path;

use crate::config::{CONFIG_FILE, CONFIG_TEMPLATE};

pub fn run() -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        bail!("{} already exists; remove it first to regenerate", CONFIG_FILE);
    }
    std::fs::write(path, CONFIG_TEMPLATE)?;
    println!("Wrote {} with the default settings.", CONFIG_FILE);
    Ok(())
}
