//! qrcraft runtime configuration handling

use crate::error::{Error, Result};
use crate::settings::{Color, ErrorCorrection, QrSettings};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name offered for the downloadable image
pub const DOWNLOAD_FILE_NAME: &str = "qrcode.png";

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrcraftConfig {
    /// Default QR rendering settings
    pub qr: QrOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Where generated images are written
    pub output: OutputOptions,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl QrcraftConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let source = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_file()?,
        };

        let mut config = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.source = source;

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrcraft.toml", "qrcraft.yaml", "qrcraft.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrcraft");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    ///
    /// Runs before logging is installed, so problems are returned rather than logged.
    fn apply_env_overrides(&mut self) -> Result<()> {
        self.qr.apply_env_overrides()?;
        self.logging.apply_env_overrides()?;
        self.output.apply_env_overrides();
        Ok(())
    }

    /// Produce validated rendering settings from the configured defaults.
    pub fn qr_settings(&self) -> Result<QrSettings> {
        self.qr.to_settings()
    }
}

/// User-facing QR overrides that are merged on top of `QrSettings::default()`.
///
/// Colors and the level are kept as plain strings so that a bad value is reported
/// when settings are resolved, with the offending text in the message. Numeric
/// environment overrides are checked as they are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Dark module color, e.g. `#000000`
    pub fill_color: Option<String>,
    /// Background color, e.g. `#FFFFFF`
    pub back_color: Option<String>,
    /// Pixels per module (1-20)
    pub box_size: Option<u32>,
    /// Quiet zone in modules (0-10)
    pub border: Option<u32>,
    /// Error correction level (L, M, Q or H)
    pub error_correction: Option<String>,
}

impl QrOptions {
    pub(crate) fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(color) = env::var("QRCRAFT_FILL_COLOR") {
            self.fill_color = Some(color);
        }
        if let Ok(color) = env::var("QRCRAFT_BACK_COLOR") {
            self.back_color = Some(color);
        }
        if let Ok(size) = env::var("QRCRAFT_BOX_SIZE") {
            self.box_size = Some(parse_env_number("QRCRAFT_BOX_SIZE", &size)?);
        }
        if let Ok(border) = env::var("QRCRAFT_BORDER") {
            self.border = Some(parse_env_number("QRCRAFT_BORDER", &border)?);
        }
        if let Ok(level) = env::var("QRCRAFT_ERROR_CORRECTION") {
            self.error_correction = Some(level);
        }
        Ok(())
    }

    /// Overlay `other` on top of these options; values set in `other` win.
    pub fn merged_with(&self, other: &QrOptions) -> QrOptions {
        QrOptions {
            fill_color: other.fill_color.clone().or_else(|| self.fill_color.clone()),
            back_color: other.back_color.clone().or_else(|| self.back_color.clone()),
            box_size: other.box_size.or(self.box_size),
            border: other.border.or(self.border),
            error_correction: other
                .error_correction
                .clone()
                .or_else(|| self.error_correction.clone()),
        }
    }

    /// Merge overrides onto the default settings and validate the result.
    pub fn to_settings(&self) -> Result<QrSettings> {
        let defaults = QrSettings::default();

        let fill_color = match &self.fill_color {
            Some(value) => Color::parse(value)?,
            None => defaults.fill_color(),
        };
        let back_color = match &self.back_color {
            Some(value) => Color::parse(value)?,
            None => defaults.back_color(),
        };
        let error_correction = match &self.error_correction {
            Some(value) => value.parse::<ErrorCorrection>().map_err(Error::InvalidSetting)?,
            None => defaults.error_correction(),
        };

        QrSettings::new(
            fill_color,
            back_color,
            self.box_size.unwrap_or(defaults.box_size()),
            self.border.unwrap_or(defaults.border()),
            error_correction,
        )
    }
}

fn parse_env_number(name: &str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        Error::InvalidSetting(format!("{name}='{value}' is not a non-negative whole number"))
    })
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRCRAFT_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in terminal logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(level) = env::var("QRCRAFT_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRCRAFT_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRCRAFT_LOG_COLOR") {
            self.color = match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => false,
                "1" | "true" | "on" => true,
                _ => {
                    return Err(Error::InvalidSetting(format!(
                        "QRCRAFT_LOG_COLOR='{color}' must be one of on/off, true/false, 1/0"
                    )));
                }
            };
        }
        if let Ok(rotation) = env::var("QRCRAFT_LOG_ROTATION") {
            let parsed = LogRotation::parse(&rotation).ok_or_else(|| {
                Error::InvalidSetting(format!(
                    "QRCRAFT_LOG_ROTATION='{rotation}' must be hourly or daily"
                ))
            })?;
            self.rotation = Some(parsed);
        }
        Ok(())
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Destination of the downloadable image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory the image is written to
    pub directory: PathBuf,
    /// File name of the image
    pub file_name: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: DOWNLOAD_FILE_NAME.to_string(),
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRCRAFT_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.directory = PathBuf::from(dir);
            }
        }
    }

    /// Full path of the image file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}
