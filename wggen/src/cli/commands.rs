use std::io::{self, BufRead};

use crate::config::ClientTemplate;
use crate::error::{KeyError, Result};
use crate::generator::Generator;
use crate::keys::{encode_key, generate_preshared_key, generate_private_key, public_key_from_base64};
use crate::layout::Layout;

/// Execute the 'generate' command
pub fn cmd_generate(client: String, ip: String) -> Result<()> {
    let generator = Generator::new(Layout::default(), ClientTemplate::default());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let provisioned = generator.run(&client, &ip, &mut out)?;

    tracing::debug!(
        "Client {} public key {}",
        client,
        provisioned.public_key
    );
    Ok(())
}

/// Execute the 'genkey' command
pub fn cmd_genkey() {
    let private_key = generate_private_key();
    println!("{}", encode_key(&private_key.to_bytes()));
}

/// Execute the 'pubkey' command
pub fn cmd_pubkey() -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    stdin
        .lock()
        .read_line(&mut line)
        .map_err(KeyError::Stdin)?;

    println!("{}", public_key_from_base64(&line)?);
    Ok(())
}

/// Execute the 'genpsk' command
pub fn cmd_genpsk() {
    println!("{}", generate_preshared_key());
}
