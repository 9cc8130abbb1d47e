//! Config commands - show and change the search defaults.

use std::path::PathBuf;

use anyhow::{bail, Result};
use portseek_core::ConfigStore;

pub async fn show(store: &ConfigStore, json: bool) -> Result<()> {
    let defaults = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&defaults)?);
        return Ok(());
    }

    println!("Config file:   {}", store.path().display());
    println!("Base port:     {}", defaults.base_port);
    println!("Highest port:  {}", defaults.highest_port);
    println!("Base path:     {}", defaults.base_path.display());
    println!("Socket mode:   {:o}", defaults.socket_mode);
    Ok(())
}

pub async fn set(
    store: &ConfigStore,
    base_port: Option<u16>,
    highest_port: Option<u16>,
    base_path: Option<PathBuf>,
) -> Result<()> {
    if base_port.is_none() && highest_port.is_none() && base_path.is_none() {
        bail!("Nothing to set. Pass --base-port, --highest-port or --base-path");
    }

    let mut defaults = store.load().await?;
    if let Some(port) = base_port {
        defaults.base_port = u32::from(port);
    }
    if let Some(port) = highest_port {
        defaults.highest_port = u32::from(port);
    }
    if let Some(path) = base_path {
        defaults.base_path = path;
    }
    store.save(&defaults).await?;

    println!("Saved {}", store.path().display());
    Ok(())
}
