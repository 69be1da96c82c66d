use image::{GrayImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{OutputError, Result};

/// Pixels per QR module
const QR_MODULE_SIZE: u32 = 10;

/// Open a new file readable only by the owner. Never truncates.
fn create_private(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options.open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::AlreadyExists {
            OutputError::AlreadyExists(path.to_path_buf()).into()
        } else {
            OutputError::Write {
                path: path.to_path_buf(),
                source,
            }
            .into()
        }
    })
}

/// Write the config text verbatim
pub fn write_config(path: &Path, config: &str) -> Result<()> {
    let mut file = create_private(path)?;
    file.write_all(config.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Wrote {} bytes to {}", config.len(), path.display());
    Ok(())
}

/// Render text as a QR code bitmap with the standard 4-module quiet zone
pub fn render_qr(text: &str) -> Result<GrayImage> {
    let code = QrCode::new(text.as_bytes()).map_err(OutputError::from)?;
    Ok(code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(QR_MODULE_SIZE, QR_MODULE_SIZE)
        .build())
}

/// Encode text as a QR code and write it as PNG
pub fn write_qr(path: &Path, text: &str) -> Result<()> {
    let image = render_qr(text)?;
    let mut writer = BufWriter::new(create_private(path)?);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(OutputError::from)?;
    writer.flush().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Wrote {}x{} QR code to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
