//! Payload construction for each kind of input intent
//!
//! Each builder reproduces the URI conventions that phone camera apps expect
//! (`mailto:`, `tel:`, `WIFI:`). A missing identifying field (address, number,
//! SSID) yields an empty [`Payload`] instead of an error; emptiness is the
//! signal the generation gate checks.
//!
//! Values are inserted as typed. `mailto:` subjects and bodies are not
//! percent-encoded and `;`, `:` or `\` inside WiFi fields are not escaped.

use crate::intent::{InputIntent, WifiEncryption};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The exact string handed to the QR encoder
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    /// Wrap an already formatted payload string
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    /// An empty payload, meaning "nothing to encode"
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// True when there is nothing to encode
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the payload as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build the payload for any intent.
pub fn build(intent: &InputIntent) -> Payload {
    let payload = match intent {
        InputIntent::Url { value } => url(value),
        InputIntent::Text { value } => text(value),
        InputIntent::Email {
            address,
            subject,
            body,
        } => email(address, subject.as_deref(), body.as_deref()),
        InputIntent::Phone { number } => phone(number),
        InputIntent::Wifi {
            ssid,
            password,
            encryption,
        } => wifi(ssid, password.as_deref(), *encryption),
    };

    tracing::debug!(
        kind = intent.kind(),
        length = payload.len(),
        "Built QR payload"
    );
    payload
}

/// URL payloads are taken verbatim; well-formedness is not checked.
pub fn url(value: &str) -> Payload {
    Payload::new(value)
}

/// Text payloads are taken verbatim, including the empty string.
pub fn text(value: &str) -> Payload {
    Payload::new(value)
}

/// `mailto:{address}[?subject=..][&body=..]`
///
/// An empty subject or body counts as absent.
pub fn email(address: &str, subject: Option<&str>, body: Option<&str>) -> Payload {
    if address.is_empty() {
        return Payload::empty();
    }

    let subject = subject.filter(|s| !s.is_empty());
    let body = body.filter(|b| !b.is_empty());

    let mut data = format!("mailto:{address}");
    match (subject, body) {
        (Some(subject), Some(body)) => {
            data.push_str(&format!("?subject={subject}&body={body}"));
        }
        (Some(subject), None) => data.push_str(&format!("?subject={subject}")),
        (None, Some(body)) => data.push_str(&format!("?body={body}")),
        (None, None) => {}
    }

    Payload::new(data)
}

/// `tel:{number}`
pub fn phone(number: &str) -> Payload {
    if number.is_empty() {
        return Payload::empty();
    }
    Payload::new(format!("tel:{number}"))
}

/// `WIFI:S:{ssid};T:{auth};[P:{password};];`
///
/// The password is dropped for open networks.
pub fn wifi(ssid: &str, password: Option<&str>, encryption: WifiEncryption) -> Payload {
    if ssid.is_empty() {
        return Payload::empty();
    }

    let mut data = format!("WIFI:S:{ssid};T:{};", encryption.auth_type());
    if encryption != WifiEncryption::None {
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            data.push_str(&format!("P:{password};"));
        }
    }
    data.push(';');

    Payload::new(data)
}
