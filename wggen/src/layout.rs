//! On-disk layout: server inputs under `server/`, client outputs under
//! `clients/`, both relative to the working directory by default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, OutputError, Result};

const SERVER_DIR: &str = "server";
const CLIENTS_DIR: &str = "clients";
const SERVER_PUBLIC_KEY: &str = "publickey";
const SERVER_PRESHARED_KEY: &str = "preshared";

#[derive(Debug, Clone)]
pub struct Layout {
    pub server_dir: PathBuf,
    pub clients_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            server_dir: PathBuf::from(SERVER_DIR),
            clients_dir: PathBuf::from(CLIENTS_DIR),
        }
    }
}

impl Layout {
    /// Layout rooted at `root` instead of the working directory
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            server_dir: root.join(SERVER_DIR),
            clients_dir: root.join(CLIENTS_DIR),
        }
    }

    pub fn server_public_key_path(&self) -> PathBuf {
        self.server_dir.join(SERVER_PUBLIC_KEY)
    }

    pub fn preshared_key_path(&self) -> PathBuf {
        self.server_dir.join(SERVER_PRESHARED_KEY)
    }

    pub fn config_path(&self, client: &str) -> PathBuf {
        self.clients_dir.join(format!("{}.conf", client))
    }

    pub fn qr_path(&self, client: &str) -> PathBuf {
        self.clients_dir.join(format!("{}.png", client))
    }

    /// Create the clients directory (owner-only on unix) if missing
    pub fn ensure_clients_dir(&self) -> Result<()> {
        if self.clients_dir.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&self.clients_dir)?;

        tracing::debug!("Created {}", self.clients_dir.display());
        Ok(())
    }

    /// Fail if either output file for `client` already exists
    pub fn check_outputs_absent(&self, client: &str) -> Result<()> {
        for path in [self.config_path(client), self.qr_path(client)] {
            if path.exists() {
                return Err(OutputError::AlreadyExists(path).into());
            }
        }
        Ok(())
    }

    /// Server public key, trimmed. Required.
    pub fn read_server_public_key(&self) -> Result<String> {
        let path = self.server_public_key_path();
        let key = fs::read_to_string(&path)
            .map_err(|source| ConfigError::ServerKey { path, source })?;
        Ok(key.trim().to_string())
    }

    /// Pre-shared key, trimmed. `None` when the file is absent or blank.
    pub fn read_preshared_key(&self) -> Result<Option<String>> {
        let path = self.preshared_key_path();
        match fs::read_to_string(&path) {
            Ok(key) => {
                let key = key.trim();
                if key.is_empty() {
                    tracing::debug!("{} is empty, ignoring", path.display());
                    Ok(None)
                } else {
                    Ok(Some(key.to_string()))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::File(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WgError;

    #[test]
    fn test_default_paths_are_relative() {
        let layout = Layout::default();
        assert_eq!(layout.config_path("alice"), PathBuf::from("clients/alice.conf"));
        assert_eq!(layout.qr_path("alice"), PathBuf::from("clients/alice.png"));
        assert_eq!(
            layout.server_public_key_path(),
            PathBuf::from("server/publickey")
        );
    }

    #[test]
    fn test_check_outputs_absent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::with_root(dir.path());
        layout.ensure_clients_dir().unwrap();
        assert!(layout.check_outputs_absent("alice").is_ok());

        fs::write(layout.qr_path("alice"), b"png").unwrap();
        let err = layout.check_outputs_absent("alice").unwrap_err();
        assert!(err.is_already_exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_clients_dir_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::with_root(dir.path());
        layout.ensure_clients_dir().unwrap();
        let mode = fs::metadata(&layout.clients_dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_missing_server_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::with_root(dir.path());
        let err = layout.read_server_public_key().unwrap_err();
        assert!(matches!(err, WgError::Config(ConfigError::ServerKey { .. })));
    }

    #[test]
    fn test_server_key_is_trimmed_not_validated() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::with_root(dir.path());
        fs::create_dir_all(&layout.server_dir).unwrap();
        fs::write(layout.server_public_key_path(), "SRVPUBKEY=\n").unwrap();
        assert_eq!(layout.read_server_public_key().unwrap(), "SRVPUBKEY=");
    }

    #[test]
    fn test_preshared_key_optional() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::with_root(dir.path());
        fs::create_dir_all(&layout.server_dir).unwrap();
        assert_eq!(layout.read_preshared_key().unwrap(), None);

        fs::write(layout.preshared_key_path(), "  \n").unwrap();
        assert_eq!(layout.read_preshared_key().unwrap(), None);

        fs::write(layout.preshared_key_path(), " PSK=\n").unwrap();
        assert_eq!(layout.read_preshared_key().unwrap(), Some("PSK=".to_string()));
    }
}
