//! Socket command - find a free unix socket path.

use anyhow::Result;
use portseek_core::{PortFinder, SocketOptions};
use serde_json::json;

pub async fn get(finder: &PortFinder, options: SocketOptions, json: bool) -> Result<()> {
    let path = finder.get_socket(&options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "path": path }))?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
