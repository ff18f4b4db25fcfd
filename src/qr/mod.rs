//! QR symbol rendering
//!
//! The symbol math itself (Reed-Solomon, module placement, version
//! selection) belongs to the `qrcode` crate. This module wraps it behind the
//! [`QrRenderer`] seam and paints the modules into a PNG using the requested
//! colors, module size and quiet zone.

mod encoder;

pub use encoder::QrEncoder;

use crate::error::Result;
use crate::payload::Payload;
use crate::settings::QrSettings;
use bytes::Bytes;
use image::RgbImage;

/// PNG file signature
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Anything that can turn a payload and settings into an image.
///
/// Implementations must be deterministic: identical inputs give byte-identical
/// artifacts.
pub trait QrRenderer {
    /// Render the payload. Fails with [`crate::Error::Generation`] when the
    /// payload cannot be encoded at the requested error correction level.
    fn render(&self, payload: &Payload, settings: &QrSettings) -> Result<RenderedArtifact>;
}

/// Symbol metadata reported alongside a rendered image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    /// QR version (1-40) chosen to fit the payload
    pub version: i16,
    /// Modules per side, without the quiet zone
    pub modules: u32,
}

/// A rendered QR image together with its PNG encoding
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    image: RgbImage,
    png: Bytes,
    symbol: SymbolInfo,
}

impl RenderedArtifact {
    /// Bundle an image with its serialized bytes
    pub fn new(image: RgbImage, png: Bytes, symbol: SymbolInfo) -> Self {
        Self { image, png, symbol }
    }

    /// The in-memory bitmap
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// PNG-encoded bytes, suitable for display or download
    pub fn png_bytes(&self) -> &Bytes {
        &self.png
    }

    /// Symbol version and size
    pub fn symbol(&self) -> SymbolInfo {
        self.symbol
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the byte buffer carries the PNG signature
    pub fn is_png(&self) -> bool {
        self.png.starts_with(&PNG_MAGIC)
    }
}
