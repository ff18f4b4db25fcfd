//! What the user wants encoded, as collected from the input form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single user intent. Exactly one kind of data is encoded per generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputIntent {
    /// A link, encoded verbatim
    Url {
        /// The URL as typed
        value: String,
    },
    /// Free-form text, encoded verbatim
    Text {
        /// The text as typed
        value: String,
    },
    /// A `mailto:` link with optional subject and body
    Email {
        /// Recipient address
        address: String,
        /// Optional subject line
        #[serde(default)]
        subject: Option<String>,
        /// Optional message body
        #[serde(default)]
        body: Option<String>,
    },
    /// A `tel:` link
    Phone {
        /// Phone number as typed, e.g. `+1234567890`
        number: String,
    },
    /// WiFi network credentials in the `WIFI:` scheme
    Wifi {
        /// Network name
        ssid: String,
        /// Network password, ignored for open networks
        #[serde(default)]
        password: Option<String>,
        /// Network authentication type
        #[serde(default)]
        encryption: WifiEncryption,
    },
}

impl InputIntent {
    /// Build a URL intent
    pub fn url(value: impl Into<String>) -> Self {
        Self::Url {
            value: value.into(),
        }
    }

    /// Build a free text intent
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Build an email intent
    pub fn email(
        address: impl Into<String>,
        subject: Option<String>,
        body: Option<String>,
    ) -> Self {
        Self::Email {
            address: address.into(),
            subject,
            body,
        }
    }

    /// Build a phone intent
    pub fn phone(number: impl Into<String>) -> Self {
        Self::Phone {
            number: number.into(),
        }
    }

    /// Build a WiFi intent
    pub fn wifi(
        ssid: impl Into<String>,
        password: Option<String>,
        encryption: WifiEncryption,
    ) -> Self {
        Self::Wifi {
            ssid: ssid.into(),
            password,
            encryption,
        }
    }

    /// Short label of the active variant, as shown on the input type selector
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url { .. } => "url",
            Self::Text { .. } => "text",
            Self::Email { .. } => "email",
            Self::Phone { .. } => "phone",
            Self::Wifi { .. } => "wifi",
        }
    }
}

/// WiFi authentication types understood by phone camera apps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WifiEncryption {
    /// WPA or WPA2 personal
    #[default]
    Wpa,
    /// Legacy WEP
    Wep,
    /// Open network, no password
    None,
}

impl WifiEncryption {
    /// Value of the `T:` field in a `WIFI:` payload
    pub fn auth_type(self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::None => "nopass",
        }
    }

    /// Label shown in the encryption selector
    pub fn label(self) -> &'static str {
        match self {
            Self::Wpa => "WPA/WPA2",
            Self::Wep => "WEP",
            Self::None => "None",
        }
    }

    /// Parse a selector label or auth type (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wpa/wpa2" | "wpa" | "wpa2" => Some(Self::Wpa),
            "wep" => Some(Self::Wep),
            "none" | "nopass" | "open" => Some(Self::None),
            _ => None,
        }
    }
}

impl FromStr for WifiEncryption {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unsupported WiFi encryption '{value}', expected WPA/WPA2, WEP or None")
        })
    }
}

impl fmt::Display for WifiEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
