//! The provisioning pipeline: check, generate keys, render, write, print.

use std::io::Write;
use std::path::PathBuf;

use crate::config::{
    find_address_owner, parse_client_ip, ClientConfig, ClientTemplate, ServerPeer,
};
use crate::error::Result;
use crate::keys::KeyPair;
use crate::layout::Layout;
use crate::output;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub config_path: PathBuf,
    pub qr_path: PathBuf,
    pub public_key: String,
    pub client_config: String,
    pub server_peer: String,
}

pub struct Generator {
    layout: Layout,
    template: ClientTemplate,
}

impl Generator {
    pub fn new(layout: Layout, template: ClientTemplate) -> Self {
        Self { layout, template }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Provision `client` at `ip`, writing progress and the server stanza to `out`.
    ///
    /// Refuses to run when either output file exists. Nothing is written
    /// before keys and server inputs are all in hand; a failure between the
    /// two output writes leaves the `.conf` behind.
    pub fn run<W: Write>(&self, client: &str, ip: &str, out: &mut W) -> Result<Provisioned> {
        let ip = parse_client_ip(ip)?;

        self.layout.ensure_clients_dir()?;
        self.layout.check_outputs_absent(client)?;

        if let Some(owner) = find_address_owner(&self.layout.clients_dir, ip)? {
            tracing::warn!("Address {} is already assigned in {}", ip, owner.display());
        }

        let keys = KeyPair::generate();
        tracing::info!("Generated keypair for {}", client);

        let preshared = self.layout.read_preshared_key()?;
        if preshared.is_some() {
            tracing::info!(
                "Using pre-shared key from {}",
                self.layout.preshared_key_path().display()
            );
        }
        let server_public_key = self.layout.read_server_public_key()?;

        let client_config = ClientConfig::new(
            &self.template,
            ip,
            keys.private_base64(),
            server_public_key,
            preshared.clone(),
        )
        .to_string();

        let config_path = self.layout.config_path(client);
        writeln!(out, "[+] Writing config.")?;
        output::write_config(&config_path, &client_config)?;

        let qr_path = self.layout.qr_path(client);
        writeln!(out, "[+] Writing QR code.")?;
        output::write_qr(&qr_path, &client_config)?;

        let server_peer = ServerPeer::new(
            &self.template,
            client,
            ip,
            keys.public_base64(),
            preshared,
        )?
        .to_string();

        writeln!(out, "[+] Add to server peer config:")?;
        writeln!(out)?;
        writeln!(out, "{}", server_peer)?;

        tracing::info!("Provisioned {} at {}", client, ip);

        Ok(Provisioned {
            config_path,
            qr_path,
            public_key: keys.public_base64(),
            client_config,
            server_peer,
        })
    }
}
