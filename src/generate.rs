//! The generation gate: validates a render request and dispatches it to the encoder

use crate::error::Result;
use crate::intent::InputIntent;
use crate::payload::{self, Payload};
use crate::qr::{QrRenderer, RenderedArtifact};
use crate::settings::QrSettings;

/// A payload paired with the settings to render it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRenderRequest {
    /// What to encode
    pub payload: Payload,
    /// How to draw it
    pub settings: QrSettings,
}

impl QrRenderRequest {
    /// Create a request from an already built payload
    pub fn new(payload: Payload, settings: QrSettings) -> Self {
        Self { payload, settings }
    }

    /// Build the payload for `intent` and pair it with `settings`
    pub fn from_intent(intent: &InputIntent, settings: QrSettings) -> Self {
        Self::new(payload::build(intent), settings)
    }
}

/// Outcome of a generation attempt that did not fail
#[derive(Debug, Clone)]
pub enum Generation {
    /// The payload was empty, nothing was rendered
    NoData,
    /// The encoder produced an image
    Rendered(RenderedArtifact),
}

impl Generation {
    /// The artifact, if one was rendered
    pub fn artifact(&self) -> Option<&RenderedArtifact> {
        match self {
            Generation::Rendered(artifact) => Some(artifact),
            Generation::NoData => None,
        }
    }
}

/// Run a single generation.
///
/// An empty payload never reaches `renderer` and yields [`Generation::NoData`].
/// Encoder failures come back as [`crate::Error::Generation`]; there is no retry.
pub fn generate<R>(request: &QrRenderRequest, renderer: &R) -> Result<Generation>
where
    R: QrRenderer + ?Sized,
{
    if request.payload.is_empty() {
        tracing::warn!("Empty payload, skipping QR generation");
        return Ok(Generation::NoData);
    }

    let artifact = renderer.render(&request.payload, &request.settings)?;
    tracing::debug!(
        width = artifact.width(),
        height = artifact.height(),
        bytes = artifact.png_bytes().len(),
        "Rendered QR artifact"
    );

    Ok(Generation::Rendered(artifact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::intent::WifiEncryption;
    use crate::qr::QrEncoder;
    use crate::settings::{Color, ErrorCorrection};
    use std::cell::Cell;

    /// Counts calls and delegates to the real encoder
    struct CountingRenderer {
        calls: Cell<usize>,
    }

    impl CountingRenderer {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl QrRenderer for CountingRenderer {
        fn render(&self, payload: &Payload, settings: &QrSettings) -> Result<RenderedArtifact> {
            self.calls.set(self.calls.get() + 1);
            QrEncoder::new().render(payload, settings)
        }
    }

    #[test]
    fn test_empty_payload_never_reaches_renderer() {
        let renderer = CountingRenderer::new();
        let intents = [
            InputIntent::url(""),
            InputIntent::text(""),
            InputIntent::email("", Some("Hi".to_string()), None),
            InputIntent::phone(""),
            InputIntent::wifi("", Some("pw".to_string()), WifiEncryption::Wpa),
        ];

        for intent in &intents {
            let request = QrRenderRequest::from_intent(intent, QrSettings::default());
            let outcome = generate(&request, &renderer).unwrap();
            assert!(matches!(outcome, Generation::NoData));
            assert!(outcome.artifact().is_none());
        }
        assert_eq!(renderer.calls.get(), 0);
    }

    #[test]
    fn test_non_empty_payload_is_rendered_once() {
        let renderer = CountingRenderer::new();
        let request = QrRenderRequest::from_intent(&InputIntent::phone("+123"), QrSettings::default());
        let outcome = generate(&request, &renderer).unwrap();
        assert!(outcome.artifact().is_some_and(|a| a.is_png()));
        assert_eq!(renderer.calls.get(), 1);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let request = QrRenderRequest::new(Payload::new("idempotent"), QrSettings::default());
        let first = generate(&request, &QrEncoder::new()).unwrap();
        let second = generate(&request, &QrEncoder::new()).unwrap();
        assert_eq!(
            first.artifact().map(|a| a.png_bytes().clone()),
            second.artifact().map(|a| a.png_bytes().clone())
        );
    }

    #[test]
    fn test_capacity_shrinks_with_redundancy() {
        // Byte-mode capacity at version 40: L 2953, M 2331, Q 1663, H 1273.
        let payload = Payload::new("x".repeat(2000));
        let outcome = |level| {
            let settings = QrSettings::new(Color::BLACK, Color::WHITE, 1, 0, level).unwrap();
            generate(&QrRenderRequest::new(payload.clone(), settings), &QrEncoder::new())
        };

        assert!(outcome(ErrorCorrection::L).is_ok());
        assert!(outcome(ErrorCorrection::M).is_ok());
        assert!(outcome(ErrorCorrection::Q).is_err());
        assert!(matches!(outcome(ErrorCorrection::H), Err(Error::Generation(_))));
    }
}
