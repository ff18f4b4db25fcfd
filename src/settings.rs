//! Rendering settings: colors, module size, quiet zone and error correction

use crate::error::{Error, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest accepted box (module) size in pixels
pub const MIN_BOX_SIZE: u32 = 1;
/// Largest accepted box (module) size in pixels
pub const MAX_BOX_SIZE: u32 = 20;
/// Largest accepted border, in modules
pub const MAX_BORDER: u32 = 10;

/// QR redundancy tier, trading capacity for damage tolerance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// About 7% of codewords recoverable
    L,
    /// About 15% of codewords recoverable
    M,
    /// About 25% of codewords recoverable
    Q,
    /// About 30% of codewords recoverable
    #[default]
    H,
}

impl ErrorCorrection {
    /// All levels, from least to most redundant
    pub const ALL: [ErrorCorrection; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Help text for the error correction selector
    pub const HELP: &'static str = "L: 7%, M: 15%, Q: 25%, H: 30% recovery";

    /// Approximate share of the symbol that can be damaged and still decode
    pub fn recovery_percent(self) -> u8 {
        match self {
            Self::L => 7,
            Self::M => 15,
            Self::Q => 25,
            Self::H => 30,
        }
    }

    /// Level understood by the `qrcode` encoder
    pub fn ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::L => qrcode::EcLevel::L,
            Self::M => qrcode::EcLevel::M,
            Self::Q => qrcode::EcLevel::Q,
            Self::H => qrcode::EcLevel::H,
        }
    }

    /// Single-letter label
    pub fn label(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    /// Parse a level letter or name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::L),
            "m" | "medium" => Some(Self::M),
            "q" | "quartile" => Some(Self::Q),
            "h" | "high" => Some(Self::H),
            _ => None,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unsupported error correction level '{value}', expected L, M, Q or H")
        })
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An sRGB color parsed from a hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure black, the default fill color
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Pure white, the default background color
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Build a color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB`. The leading `#` is optional and case is ignored.
    pub fn parse(value: &str) -> Result<Self> {
        let digits = value.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(Error::InvalidColor(value.to_string())),
        };

        let bytes = hex::decode(&expanded).map_err(|_| Error::InvalidColor(value.to_string()))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err(Error::InvalidColor(value.to_string())),
        }
    }

    /// Canonical `#RRGGBB` form (upper case)
    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }

    /// Pixel value for the image buffer
    pub fn to_pixel(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Validated rendering settings for a single generation.
///
/// Fields are private so a value can only be obtained through [`QrSettings::new`]
/// or [`Default`], both of which uphold the range invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QrSettings {
    fill_color: Color,
    back_color: Color,
    box_size: u32,
    border: u32,
    error_correction: ErrorCorrection,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            back_color: Color::WHITE,
            box_size: 10,
            border: 4,
            error_correction: ErrorCorrection::H,
        }
    }
}

impl QrSettings {
    /// Create settings, rejecting a box size outside 1..=20 or a border above 10.
    pub fn new(
        fill_color: Color,
        back_color: Color,
        box_size: u32,
        border: u32,
        error_correction: ErrorCorrection,
    ) -> Result<Self> {
        if !(MIN_BOX_SIZE..=MAX_BOX_SIZE).contains(&box_size) {
            return Err(Error::InvalidSetting(format!(
                "box size {box_size} out of range {MIN_BOX_SIZE}-{MAX_BOX_SIZE}"
            )));
        }
        if border > MAX_BORDER {
            return Err(Error::InvalidSetting(format!(
                "border {border} out of range 0-{MAX_BORDER}"
            )));
        }

        Ok(Self {
            fill_color,
            back_color,
            box_size,
            border,
            error_correction,
        })
    }

    /// Color of dark modules
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Color of light modules and the quiet zone
    pub fn back_color(&self) -> Color {
        self.back_color
    }

    /// Pixels per module side
    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    /// Quiet zone width in modules
    pub fn border(&self) -> u32 {
        self.border
    }

    /// Error correction level
    pub fn error_correction(&self) -> ErrorCorrection {
        self.error_correction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = QrSettings::default();
        assert_eq!(settings.fill_color(), Color::BLACK);
        assert_eq!(settings.back_color(), Color::WHITE);
        assert_eq!(settings.box_size(), 10);
        assert_eq!(settings.border(), 4);
        assert_eq!(settings.error_correction(), ErrorCorrection::H);
    }

    #[test]
    fn test_settings_ranges() {
        let ok = |box_size, border| {
            QrSettings::new(Color::BLACK, Color::WHITE, box_size, border, ErrorCorrection::M)
        };
        assert!(ok(1, 0).is_ok());
        assert!(ok(20, 10).is_ok());
        assert!(matches!(ok(0, 4), Err(Error::InvalidSetting(_))));
        assert!(matches!(ok(21, 4), Err(Error::InvalidSetting(_))));
        assert!(matches!(ok(10, 11), Err(Error::InvalidSetting(_))));
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("#000000").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("FF8800").unwrap(), Color::rgb(0xFF, 0x88, 0x00));
        assert_eq!(Color::parse("#f80").unwrap(), Color::rgb(0xFF, 0x88, 0x00));
        assert!(matches!(Color::parse("#12345"), Err(Error::InvalidColor(_))));
        assert!(matches!(Color::parse("#GGGGGG"), Err(Error::InvalidColor(_))));
        assert!(Color::parse("black").is_err());
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::rgb(0x1A, 0x2B, 0x3C);
        assert_eq!(color.to_hex(), "#1A2B3C");
        assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
    }

    #[test]
    fn test_error_correction_redundancy_is_monotonic() {
        let percents: Vec<u8> = ErrorCorrection::ALL
            .iter()
            .map(|level| level.recovery_percent())
            .collect();
        assert_eq!(percents, vec![7, 15, 25, 30]);
        assert!(percents.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(ErrorCorrection::L < ErrorCorrection::H);
    }

    #[test]
    fn test_error_correction_from_str() {
        assert_eq!("L".parse(), Ok(ErrorCorrection::L));
        assert_eq!("medium".parse(), Ok(ErrorCorrection::M));
        assert_eq!("q".parse(), Ok(ErrorCorrection::Q));
        assert_eq!("HIGH".parse(), Ok(ErrorCorrection::H));
        assert!("X".parse::<ErrorCorrection>().is_err());
    }

    #[test]
    fn test_ec_level_mapping() {
        assert_eq!(ErrorCorrection::L.ec_level(), qrcode::EcLevel::L);
        assert_eq!(ErrorCorrection::H.ec_level(), qrcode::EcLevel::H);
    }
}
