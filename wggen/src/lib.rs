//! wggen - WireGuard client provisioning
//!
//! Generates a client keypair in-process, renders the client configuration
//! and a QR code of it, and prints the `[Peer]` stanza to add to the server.
//!
//! # Layout
//!
//! - `server/publickey` (required) and `server/preshared` (optional) are read
//! - `clients/<name>.conf` and `clients/<name>.png` are written, mode 0600,
//!   and never overwritten
//!
//! # Example
//!
//! ```no_run
//! use wggen::config::ClientTemplate;
//! use wggen::layout::Layout;
//! use wggen::Generator;
//!
//! let generator = Generator::new(Layout::default(), ClientTemplate::default());
//! let provisioned = generator
//!     .run("alice", "192.168.1.50", &mut std::io::stdout())
//!     .unwrap();
//! println!("Wrote {}", provisioned.config_path.display());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod keys;
pub mod layout;
pub mod output;

pub use error::{Result, WgError};
pub use generator::{Generator, Provisioned};
