use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "wggen",
    about = "Generate WireGuard client configs and QR codes",
    version
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a client config and QR code, and print the server peer stanza
    Generate {
        /// Client name (file name stem under clients/)
        client: String,

        /// Client tunnel IP address
        ip: String,
    },

    /// Generate a new private key
    Genkey,

    /// Derive public key from private key (reads from stdin)
    Pubkey,

    /// Generate a new pre-shared key
    Genpsk,
}

impl Cli {
    /// Default log filter for the verbosity level, used when RUST_LOG is unset
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_takes_two_positionals() {
        let cli = Cli::try_parse_from(["wggen", "generate", "alice", "192.168.1.50"]).unwrap();
        match cli.command {
            Commands::Generate { client, ip } => {
                assert_eq!(client, "alice");
                assert_eq!(ip, "192.168.1.50");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_requires_ip() {
        assert!(Cli::try_parse_from(["wggen", "generate", "alice"]).is_err());
        assert!(Cli::try_parse_from(["wggen", "generate"]).is_err());
    }

    #[test]
    fn test_generate_rejects_extra_args() {
        assert!(Cli::try_parse_from(["wggen", "generate", "alice", "10.0.0.2", "x"]).is_err());
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["wggen", "-vv", "genkey"]).unwrap();
        assert_eq!(cli.log_directive(), "debug");
        let cli = Cli::try_parse_from(["wggen", "genkey"]).unwrap();
        assert_eq!(cli.log_directive(), "warn");
    }
}
