use ip_network::IpNetwork;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{ConfigError, Result};

/// Interface address with prefix length, e.g. `10.0.0.2/24`.
///
/// Unlike `IpNetwork` this keeps host bits, which is what the `Address`
/// line of a WireGuard interface carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddress {
    pub ip: IpAddr,
    pub prefix: u8,
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ip, self.prefix)
    }
}

/// Fixed values written into every generated config
#[derive(Debug, Clone)]
pub struct ClientTemplate {
    /// DNS servers pushed to the client
    pub dns: Vec<IpAddr>,
    /// Server endpoint (host:port, hostname allowed)
    pub endpoint: String,
    /// Routes sent through the tunnel on the client side
    pub allowed_ips: Vec<IpNetwork>,
    /// Keepalive the server keeps towards the client, in seconds
    pub persistent_keepalive: u16,
    /// Client-side interface prefix for IPv4 addresses
    pub ipv4_prefix: u8,
    /// Client-side interface prefix for IPv6 addresses
    pub ipv6_prefix: u8,
}

impl Default for ClientTemplate {
    fn default() -> Self {
        Self {
            dns: vec![IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))],
            endpoint: "slurpgeit.nl:51337".to_string(),
            allowed_ips: default_routes(),
            persistent_keepalive: 25,
            ipv4_prefix: 24,
            ipv6_prefix: 64,
        }
    }
}

fn default_routes() -> Vec<IpNetwork> {
    [
        IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    ]
    .into_iter()
    .filter_map(|ip| IpNetwork::new(ip, 0).ok())
    .collect()
}

impl ClientTemplate {
    /// Address for the client's own `[Interface]`
    pub fn interface_address(&self, ip: IpAddr) -> InterfaceAddress {
        let prefix = if ip.is_ipv4() {
            self.ipv4_prefix
        } else {
            self.ipv6_prefix
        };
        InterfaceAddress { ip, prefix }
    }
}

/// Single-host network for the server side (`/32` or `/128`)
pub fn host_network(ip: IpAddr) -> Result<IpNetwork> {
    let prefix = if ip.is_ipv4() { 32 } else { 128 };
    IpNetwork::new(ip, prefix).map_err(|_| ConfigError::InvalidAddress(ip.to_string()).into())
}

/// Client-side configuration file contents
#[derive(Clone)]
pub struct ClientConfig {
    pub address: InterfaceAddress,
    pub private_key: String,
    pub dns: Vec<IpAddr>,
    pub server_public_key: String,
    pub preshared_key: Option<String>,
    pub allowed_ips: Vec<IpNetwork>,
    pub endpoint: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("server_public_key", &self.server_public_key)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(
        template: &ClientTemplate,
        ip: IpAddr,
        private_key: String,
        server_public_key: String,
        preshared_key: Option<String>,
    ) -> Self {
        Self {
            address: template.interface_address(ip),
            private_key,
            dns: template.dns.clone(),
            server_public_key,
            preshared_key,
            allowed_ips: template.allowed_ips.clone(),
            endpoint: template.endpoint.clone(),
        }
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Interface]")?;
        writeln!(f, "Address = {}", self.address)?;
        writeln!(f, "PrivateKey = {}", self.private_key)?;
        if !self.dns.is_empty() {
            writeln!(f, "DNS = {}", join(&self.dns))?;
        }
        writeln!(f)?;
        writeln!(f, "[Peer]")?;
        writeln!(f, "PublicKey = {}", self.server_public_key)?;
        if let Some(psk) = &self.preshared_key {
            writeln!(f, "PresharedKey = {}", psk)?;
        }
        writeln!(f, "AllowedIPs = {}", join(&self.allowed_ips))?;
        writeln!(f, "Endpoint = {}", self.endpoint)
    }
}

/// `[Peer]` stanza for the server's configuration
#[derive(Debug, Clone)]
pub struct ServerPeer {
    pub client: String,
    pub public_key: String,
    pub allowed_ip: IpNetwork,
    pub persistent_keepalive: u16,
    pub preshared_key: Option<String>,
}

impl ServerPeer {
    pub fn new(
        template: &ClientTemplate,
        client: &str,
        ip: IpAddr,
        public_key: String,
        preshared_key: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            client: client.to_string(),
            public_key,
            allowed_ip: host_network(ip)?,
            persistent_keepalive: template.persistent_keepalive,
            preshared_key,
        })
    }
}

impl fmt::Display for ServerPeer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.client)?;
        writeln!(f, "[Peer]")?;
        writeln!(f, "PublicKey = {}", self.public_key)?;
        writeln!(f, "AllowedIPs = {}", self.allowed_ip)?;
        writeln!(f, "PersistentKeepalive = {}", self.persistent_keepalive)?;
        if let Some(psk) = &self.preshared_key {
            writeln!(f, "PresharedKey = {}", psk)?;
        }
        Ok(())
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
