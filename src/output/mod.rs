//! Helpers for presenting generation results at the UI boundary

pub mod download;

use crate::error::Error;
use crate::generate::{Generation, QrRenderRequest};
use crate::qr::RenderedArtifact;
use crate::settings::ErrorCorrection;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Warning shown when there is nothing to encode
pub const NO_DATA_WARNING: &str = "Please enter some data to generate a QR code";

/// Combined structured and human-readable representation of a generation outcome
#[derive(Debug, Clone)]
pub struct RenderedOutcome {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render the outcome of a generate action into both JSON and human-readable forms.
///
/// `saved_to` is the location of the downloadable image when one was written.
pub fn render_outcome(
    request: &QrRenderRequest,
    outcome: &Result<Generation, Error>,
    saved_to: Option<&Path>,
) -> RenderedOutcome {
    match outcome {
        Ok(Generation::Rendered(artifact)) => render_artifact(request, artifact, saved_to),
        Ok(Generation::NoData) => RenderedOutcome {
            json: json!({
                "status": "no_data",
                "message": NO_DATA_WARNING,
            }),
            human: vec![format!("Warning: {NO_DATA_WARNING}")],
        },
        Err(err) => {
            let message = error_message(err);
            RenderedOutcome {
                json: json!({
                    "status": "error",
                    "payload": request.payload.as_str(),
                    "message": message,
                }),
                human: vec![message],
            }
        }
    }
}

/// User-facing text for a failed generation
pub fn error_message(err: &Error) -> String {
    format!("Error generating QR code: {err}")
}

fn render_artifact(
    request: &QrRenderRequest,
    artifact: &RenderedArtifact,
    saved_to: Option<&Path>,
) -> RenderedOutcome {
    let settings = &request.settings;
    let symbol = artifact.symbol();

    let mut root = Map::new();
    root.insert("status".to_string(), Value::String("ok".to_string()));
    root.insert(
        "payload".to_string(),
        Value::String(request.payload.to_string()),
    );
    root.insert(
        "file".to_string(),
        saved_to
            .map(|path| Value::String(path.display().to_string()))
            .unwrap_or(Value::Null),
    );
    root.insert(
        "byte_length".to_string(),
        Value::from(artifact.png_bytes().len()),
    );
    root.insert("width".to_string(), Value::from(artifact.width()));
    root.insert("height".to_string(), Value::from(artifact.height()));
    root.insert(
        "symbol".to_string(),
        json!({
            "version": symbol.version,
            "modules": symbol.modules,
        }),
    );
    root.insert(
        "settings".to_string(),
        json!({
            "fill_color": settings.fill_color().to_hex(),
            "back_color": settings.back_color().to_hex(),
            "box_size": settings.box_size(),
            "border": settings.border(),
            "error_correction": settings.error_correction().label(),
        }),
    );

    let mut human = vec!["Your QR Code".to_string()];
    human.push(format!("  Payload: {}", format_text_snippet(request.payload.as_str())));
    human.push(format!(
        "  Size: {}x{} px (version {}, {} modules)",
        artifact.width(),
        artifact.height(),
        symbol.version,
        symbol.modules
    ));
    human.push(format!(
        "  Error correction: {}",
        ec_label(settings.error_correction())
    ));
    human.push(format!(
        "  Colors: {} on {}",
        settings.fill_color(),
        settings.back_color()
    ));
    if let Some(path) = saved_to {
        human.push(format!("  Saved to: {}", path.display()));
    }

    RenderedOutcome {
        json: Value::Object(root),
        human,
    }
}

fn ec_label(level: ErrorCorrection) -> String {
    format!("{} ({}% recovery)", level, level.recovery_percent())
}

fn format_text_snippet(text: &str) -> String {
    const MAX: usize = 120;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let snippet: String = text.chars().take(MAX).collect();
        let total = text.chars().count();
        format!("{}... ({} chars)", snippet, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate;
    use crate::intent::InputIntent;
    use crate::payload::Payload;
    use crate::qr::QrEncoder;
    use crate::settings::QrSettings;

    #[test]
    fn renders_success_consistently() {
        let request = QrRenderRequest::from_intent(
            &InputIntent::url("https://example.com"),
            QrSettings::default(),
        );
        let outcome = generate(&request, &QrEncoder::new());
        let rendered = render_outcome(&request, &outcome, Some(Path::new("qrcode.png")));

        assert_eq!(rendered.json["status"], "ok");
        assert_eq!(rendered.json["payload"], "https://example.com");
        assert_eq!(rendered.json["file"], "qrcode.png");
        assert_eq!(rendered.json["settings"]["fill_color"], "#000000");
        assert_eq!(rendered.json["settings"]["back_color"], "#FFFFFF");
        assert_eq!(rendered.json["settings"]["box_size"], 10);
        assert_eq!(rendered.json["settings"]["border"], 4);
        assert_eq!(rendered.json["settings"]["error_correction"], "H");
        assert!(
            rendered
                .human
                .iter()
                .any(|line| line.contains("Error correction: H (30% recovery)"))
        );
        assert!(
            rendered
                .human
                .iter()
                .any(|line| line.contains("Saved to: qrcode.png"))
        );
    }

    #[test]
    fn renders_no_data_as_warning() {
        let request = QrRenderRequest::new(Payload::empty(), QrSettings::default());
        let outcome = generate(&request, &QrEncoder::new());
        let rendered = render_outcome(&request, &outcome, None);

        assert_eq!(rendered.json["status"], "no_data");
        assert_eq!(
            rendered.human,
            vec![format!("Warning: {NO_DATA_WARNING}")]
        );
    }

    #[test]
    fn renders_generation_error_message() {
        let request = QrRenderRequest::new(Payload::empty(), QrSettings::default());
        let outcome = Err(Error::Generation("data too long".to_string()));
        let rendered = render_outcome(&request, &outcome, None);

        assert_eq!(rendered.json["status"], "error");
        assert_eq!(
            rendered.human,
            vec!["Error generating QR code: data too long".to_string()]
        );
    }

    #[test]
    fn long_payloads_are_truncated_for_display() {
        let text = "a".repeat(200);
        let snippet = format_text_snippet(&text);
        assert!(snippet.ends_with("... (200 chars)"));
    }
}
