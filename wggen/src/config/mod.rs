pub mod parser;
pub mod types;

pub use parser::{find_address_owner, parse_client_ip};
pub use types::{ClientConfig, ClientTemplate, InterfaceAddress, ServerPeer};
