//! QR code encoder backed by the `qrcode` crate

use crate::error::{Error, Result};
use crate::payload::Payload;
use crate::qr::{QrRenderer, RenderedArtifact, SymbolInfo};
use crate::settings::QrSettings;
use bytes::Bytes;
use image::{ImageFormat, RgbImage};
use qrcode::{QrCode, Version};
use std::io::Cursor;

/// QR code encoder producing PNG artifacts
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl QrEncoder {
    /// Create a new QR encoder
    pub fn new() -> Self {
        Self
    }

    /// Paint the symbol modules onto a bitmap honouring box size, border and colors.
    fn paint(&self, code: &QrCode, modules: u32, settings: &QrSettings) -> RgbImage {
        let box_size = settings.box_size();
        let border = settings.border();
        let side = (modules + 2 * border) * box_size;

        let fill = settings.fill_color().to_pixel();
        let mut image = RgbImage::from_pixel(side, side, settings.back_color().to_pixel());

        for (index, color) in code.to_colors().into_iter().enumerate() {
            if color != qrcode::Color::Dark {
                continue;
            }
            let index = index as u32;
            let left = (border + index % modules) * box_size;
            let top = (border + index / modules) * box_size;
            for y in top..top + box_size {
                for x in left..left + box_size {
                    image.put_pixel(x, y, fill);
                }
            }
        }

        image
    }
}

impl QrRenderer for QrEncoder {
    fn render(&self, payload: &Payload, settings: &QrSettings) -> Result<RenderedArtifact> {
        let ec_level = settings.error_correction().ec_level();
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ec_level)?;

        let version = match code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        };
        tracing::debug!(
            version,
            ecc_level = %settings.error_correction(),
            length = payload.len(),
            "Encoded QR symbol"
        );

        let modules = u32::try_from(code.width())
            .map_err(|_| Error::Image("QR symbol too wide".to_string()))?;
        let image = self.paint(&code, modules, settings);

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let symbol = SymbolInfo { version, modules };

        Ok(RenderedArtifact::new(image, Bytes::from(png), symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Color, ErrorCorrection};

    fn settings(box_size: u32, border: u32, ec: ErrorCorrection) -> QrSettings {
        QrSettings::new(Color::BLACK, Color::WHITE, box_size, border, ec).unwrap()
    }

    #[test]
    fn test_encode_produces_png() {
        let artifact = QrEncoder::new()
            .render(&Payload::new("Hello, QR!"), &QrSettings::default())
            .unwrap();
        assert!(artifact.is_png());
        assert_eq!(&artifact.png_bytes()[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_image_dimensions_follow_settings() {
        let artifact = QrEncoder::new()
            .render(&Payload::new("dimensions"), &settings(3, 2, ErrorCorrection::L))
            .unwrap();
        let symbol = artifact.symbol();
        assert_eq!(symbol.version, 1);
        assert_eq!(symbol.modules, 21);
        assert_eq!(artifact.width(), (21 + 2 * 2) * 3);
        assert_eq!(artifact.height(), artifact.width());
    }

    #[test]
    fn test_zero_border_starts_with_finder_pattern() {
        let artifact = QrEncoder::new()
            .render(&Payload::new("edge"), &settings(2, 0, ErrorCorrection::M))
            .unwrap();
        // The top-left finder pattern corner is always dark.
        assert_eq!(*artifact.image().get_pixel(0, 0), Color::BLACK.to_pixel());
    }

    #[test]
    fn test_colors_applied() {
        let fill = Color::rgb(0x12, 0x34, 0x56);
        let back = Color::rgb(0xFE, 0xDC, 0xBA);
        let settings = QrSettings::new(fill, back, 4, 1, ErrorCorrection::Q).unwrap();
        let artifact = QrEncoder::new()
            .render(&Payload::new("colors"), &settings)
            .unwrap();
        let image = artifact.image();
        assert_eq!(*image.get_pixel(0, 0), back.to_pixel());
        assert_eq!(*image.get_pixel(4, 4), fill.to_pixel());
        assert!(image.pixels().all(|p| *p == fill.to_pixel() || *p == back.to_pixel()));
    }

    #[test]
    fn test_deterministic_output() {
        let encoder = QrEncoder::new();
        let payload = Payload::new("same in, same out");
        let first = encoder.render(&payload, &QrSettings::default()).unwrap();
        let second = encoder.render(&payload, &QrSettings::default()).unwrap();
        assert_eq!(first.png_bytes(), second.png_bytes());
    }

    #[test]
    fn test_payload_too_long_is_generation_error() {
        let payload = Payload::new("x".repeat(3000));
        let err = QrEncoder::new()
            .render(&payload, &settings(1, 0, ErrorCorrection::L))
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_round_trip_with_decoder() {
        let payload = Payload::new("WIFI:S:Home;T:WPA;P:pw123;;");
        let artifact = QrEncoder::new()
            .render(&payload, &QrSettings::default())
            .unwrap();

        let gray = image::DynamicImage::ImageRgb8(artifact.image().clone()).to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(gray);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_meta, content) = grids[0].decode().unwrap();
        assert_eq!(content, payload.as_str());
    }
}
