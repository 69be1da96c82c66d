use crate::error::{ConfigError, Result};
use ini::Ini;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use super::types::InterfaceAddress;

/// Parse the client IP argument (a bare address, no prefix)
pub fn parse_client_ip(s: &str) -> Result<IpAddr> {
    let s = s.trim();
    s.parse::<IpAddr>()
        .map_err(|_| ConfigError::InvalidAddress(s.to_string()).into())
}

/// Parse an interface address, with or without CIDR notation
pub fn parse_interface_address(s: &str) -> Result<InterfaceAddress> {
    let s = s.trim();
    let (ip_str, prefix) = match s.split_once('/') {
        Some((ip, prefix)) => {
            let prefix = prefix
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidAddress(s.to_string()))?;
            (ip.trim(), Some(prefix))
        }
        None => (s, None),
    };

    let ip: IpAddr = ip_str
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(s.to_string()))?;
    let max = if ip.is_ipv4() { 32 } else { 128 };
    let prefix = prefix.unwrap_or(max);
    if prefix > max {
        return Err(ConfigError::InvalidAddress(s.to_string()).into());
    }

    Ok(InterfaceAddress { ip, prefix })
}

/// Read the `[Interface] Address` entries of a generated client config
pub fn parse_client_addresses<P: AsRef<Path>>(path: P) -> Result<Vec<InterfaceAddress>> {
    let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let props = ini
        .section(Some("Interface"))
        .ok_or(ConfigError::MissingField("Interface section"))?;
    let address = props
        .get("Address")
        .ok_or(ConfigError::MissingField("Address"))?;

    address
        .split(',')
        .map(parse_interface_address)
        .collect()
}

/// Find an existing client config that already uses `ip`.
///
/// Files that cannot be parsed are skipped with a debug log; a missing
/// directory means no clients yet.
pub fn find_address_owner(clients_dir: &Path, ip: IpAddr) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(clients_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::File(e).into()),
    };

    let mut confs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "conf").unwrap_or(false))
        .collect();
    confs.sort();

    for path in confs {
        match parse_client_addresses(&path) {
            Ok(addrs) => {
                if addrs.iter().any(|a| a.ip == ip) {
                    return Ok(Some(path));
                }
            }
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    Ok(None)
}
