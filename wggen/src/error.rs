use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WgError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl WgError {
    /// True when the run was refused because client files already exist
    pub fn is_already_exists(&self) -> bool {
        matches!(self, WgError::Output(OutputError::AlreadyExists(_)))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Cannot read server public key {}: {source}", path.display())]
    ServerKey {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("File error: {0}")]
    File(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    #[error("{kind} key must be 32 bytes, got {len}")]
    InvalidLength { kind: &'static str, len: usize },

    #[error("Failed to read from stdin: {0}")]
    Stdin(io::Error),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Client file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("QR encoding failed: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, WgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_detected_through_wrapper() {
        let err: WgError = OutputError::AlreadyExists(PathBuf::from("clients/a.conf")).into();
        assert!(err.is_already_exists());

        let err: WgError = ConfigError::InvalidAddress("nope".into()).into();
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_key_length_message() {
        let err = KeyError::InvalidLength {
            kind: "Private",
            len: 3,
        };
        assert_eq!(err.to_string(), "Private key must be 32 bytes, got 3");
    }
}
