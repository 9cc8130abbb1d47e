//! Hosts command - show the host list port searches walk.

use anyhow::Result;
use portseek_core::PortFinder;

pub async fn list(finder: &PortFinder, json: bool) -> Result<()> {
    let hosts = finder.hosts().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&hosts)?);
        return Ok(());
    }

    for host in hosts.iter() {
        println!("{}", host);
    }
    println!("\nTotal: {} hosts", hosts.len());
    Ok(())
}
