//! Recipe profiles: saved JSON parameter sets.
//!
//! A profile is loaded first, then any flag given on the command line
//! overrides the matching field.

use anyhow::Context;
use pizza_core::RecipeParams;
use std::{fs, path::Path};
use tracing::debug;

pub fn load(path: &Path) -> anyhow::Result<RecipeParams> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("read profile {}", path.display()))?;
    let params: RecipeParams = serde_json::from_str(&txt)
        .with_context(|| format!("parse profile {}", path.display()))?;
    debug!(profile = %path.display(), ?params, "profile loaded");
    Ok(params)
}

pub fn save(path: &Path, params: &RecipeParams) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(params).context("serialize profile")?;
    fs::write(path, json).with_context(|| format!("write profile {}", path.display()))?;
    debug!(profile = %path.display(), "profile written");
    Ok(())
}
