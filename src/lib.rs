//! QRCRAFT - turn links, text, contacts and WiFi credentials into QR codes
//!
//! This library builds the payload strings that phone camera apps understand
//! (`mailto:`, `tel:`, `WIFI:`) and renders them into PNG images with
//! configurable colors, module size, quiet zone and error correction.
//!
//! # Features
//!
//! - **Typed intents**: one [`InputIntent`] variant per kind of data
//! - **Payload builders**: exact URI-scheme output, empty when a required field is missing
//! - **Validated settings**: [`QrSettings`] rejects out-of-range sizes and bad colors
//! - **Generation gate**: empty payloads never reach the encoder
//!
//! # Example
//!
//! ```no_run
//! use qrcraft::{Generation, InputIntent, QrEncoder, QrRenderRequest, QrSettings, generate};
//!
//! fn main() -> qrcraft::Result<()> {
//!     let intent = InputIntent::url("https://example.com");
//!     let request = QrRenderRequest::from_intent(&intent, QrSettings::default());
//!
//!     match generate(&request, &QrEncoder::new())? {
//!         Generation::Rendered(artifact) => std::fs::write("qrcode.png", artifact.png_bytes())?,
//!         Generation::NoData => println!("Nothing to encode"),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod generate;
pub mod intent;
pub mod logging;
pub mod output;
pub mod payload;
pub mod qr;
pub mod settings;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, OutputOptions, QrOptions, QrcraftConfig};
pub use generate::{Generation, QrRenderRequest, generate};
pub use intent::{InputIntent, WifiEncryption};
pub use payload::Payload;
pub use qr::{QrEncoder, QrRenderer, RenderedArtifact, SymbolInfo};
pub use settings::{Color, ErrorCorrection, QrSettings};
