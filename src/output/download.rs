//! Download affordance for rendered artifacts: the image file and an embeddable link

use crate::error::{Error, Result};
use crate::qr::RenderedArtifact;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

/// Content type used for the download link, so browsers save rather than display
pub const DOWNLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Label of the download link
pub const DOWNLOAD_LINK_TEXT: &str = "Download QR Code";

/// `data:` URI carrying the PNG bytes as base64
pub fn data_uri(artifact: &RenderedArtifact) -> String {
    let encoded = STANDARD.encode(artifact.png_bytes());
    format!("data:{DOWNLOAD_CONTENT_TYPE};base64,{encoded}")
}

/// HTML anchor that downloads the image as `file_name` when clicked
pub fn download_link(artifact: &RenderedArtifact, file_name: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" download="{}">{}</a>"#,
        data_uri(artifact),
        file_name,
        text
    )
}

/// Write the PNG bytes to `path`, creating parent directories as needed.
pub fn write_artifact(artifact: &RenderedArtifact, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {}: {e}", parent.display()),
                ))
            })?;
        }
    }

    std::fs::write(path, artifact.png_bytes()).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write {}: {e}", path.display()),
        ))
    })?;

    tracing::info!(
        path = %path.display(),
        bytes = artifact.png_bytes().len(),
        "Wrote QR code image"
    );
    Ok(())
}
