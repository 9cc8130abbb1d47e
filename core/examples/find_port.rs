//! Example: Find a free port, a batch of ports and a socket path.

use portseek_core::{PortFinder, PortOptions, SocketOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let finder = PortFinder::new();

    println!("Hosts checked:");
    for host in finder.hosts().await.iter() {
        println!("  {}", host);
    }
    println!();

    match finder.get_port(&PortOptions::new()).await {
        Ok(port) => println!("Free port:     {}", port),
        Err(e) => eprintln!("Error finding port: {}", e),
    }

    match finder.get_ports(3, &PortOptions::new().with_port(9000)).await {
        Ok(ports) => println!("Free ports:    {:?}", ports),
        Err(e) => eprintln!("Error finding ports (got {:?}): {}", e.partial_ports(), e),
    }

    match finder.get_socket(&SocketOptions::new()).await {
        Ok(path) => println!("Free socket:   {}", path.display()),
        Err(e) => eprintln!("Error finding socket: {}", e),
    }
}
