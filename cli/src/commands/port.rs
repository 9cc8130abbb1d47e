//! Port commands - find one or several free ports.

use anyhow::Result;
use portseek_core::{PortFinder, PortOptions};
use serde_json::json;

pub async fn get(finder: &PortFinder, options: PortOptions, json: bool) -> Result<()> {
    let port = finder.get_port(&options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "port": port }))?);
    } else {
        println!("{}", port);
    }
    Ok(())
}

pub async fn get_many(
    finder: &PortFinder,
    count: usize,
    options: PortOptions,
    json: bool,
) -> Result<()> {
    let ports = match finder.get_ports(count, &options).await {
        Ok(ports) => ports,
        Err(e) => {
            let partial = e.partial_ports();
            if json {
                println!("{}", serde_json::to_string_pretty(&json!({ "ports": partial }))?);
            } else {
                for port in partial {
                    println!("{}", port);
                }
            }
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "ports": ports }))?);
    } else {
        for port in &ports {
            println!("{}", port);
        }
    }
    Ok(())
}
