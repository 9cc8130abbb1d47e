//! Network interface port (interface).

use std::io;

/// Port for enumerating local interface addresses.
pub trait InterfacePort: Send + Sync {
    /// All addresses of all local interfaces, in enumeration order.
    ///
    /// Returns `Unsupported` on platforms without enumeration.
    fn addresses(&self) -> io::Result<Vec<String>>;
}
