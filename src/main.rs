//! qrcraft command line entrypoint
//!
//! Each subcommand is one "Generate" action: the intent and settings are built
//! fresh from the arguments, the payload is rendered and the image is written
//! out for download.

use clap::{Args, Parser, Subcommand};
use qrcraft::output::download::{DOWNLOAD_LINK_TEXT, download_link, write_artifact};
use qrcraft::output::{RenderedOutcome, render_outcome};
use qrcraft::{
    Generation, InputIntent, QrEncoder, QrOptions, QrRenderRequest, QrcraftConfig, Result,
    WifiEncryption, generate, logging,
};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "qrcraft",
    version,
    about = "Generate QR codes for links, text, and more"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrcraft.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Where to write the image (defaults to ./qrcode.png or the configured output)
    #[arg(short, long, value_name = "PATH", global = true)]
    output: Option<PathBuf>,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Also print an HTML download link embedding the image as base64
    #[arg(long, global = true)]
    link: bool,

    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    intent: IntentCommand,
}

/// Rendering overrides; unset flags fall back to config, then defaults
#[derive(Args, Debug)]
struct SettingsArgs {
    /// Dark module color (#RRGGBB)
    #[arg(long, value_name = "HEX", global = true)]
    fill_color: Option<String>,

    /// Background color (#RRGGBB)
    #[arg(long, value_name = "HEX", global = true)]
    back_color: Option<String>,

    /// Pixels per module (1-20)
    #[arg(long, value_name = "PX", global = true)]
    box_size: Option<u32>,

    /// Quiet zone width in modules (0-10)
    #[arg(long, value_name = "MODULES", global = true)]
    border: Option<u32>,

    /// Error correction level. L: 7%, M: 15%, Q: 25%, H: 30% recovery
    #[arg(short, long, value_name = "LEVEL", global = true)]
    error_correction: Option<String>,
}

impl SettingsArgs {
    fn to_options(&self) -> QrOptions {
        QrOptions {
            fill_color: self.fill_color.clone(),
            back_color: self.back_color.clone(),
            box_size: self.box_size,
            border: self.border,
            error_correction: self.error_correction.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum IntentCommand {
    /// Encode a URL as-is
    Url {
        /// The link, e.g. https://example.com
        value: String,
    },
    /// Encode free text as-is
    Text {
        /// The text to encode
        value: String,
    },
    /// Encode a mailto: link
    Email {
        /// Recipient address
        address: String,
        /// Optional subject line
        #[arg(long)]
        subject: Option<String>,
        /// Optional message body
        #[arg(long)]
        body: Option<String>,
    },
    /// Encode a tel: link
    Phone {
        /// Phone number, e.g. +1234567890
        number: String,
    },
    /// Encode WiFi network credentials
    Wifi {
        /// Network name (SSID)
        ssid: String,
        /// Network password
        #[arg(long)]
        password: Option<String>,
        /// Encryption: WPA/WPA2, WEP or None
        #[arg(long, default_value = "WPA/WPA2")]
        encryption: WifiEncryption,
    },
}

impl From<IntentCommand> for InputIntent {
    fn from(command: IntentCommand) -> Self {
        match command {
            IntentCommand::Url { value } => InputIntent::url(value),
            IntentCommand::Text { value } => InputIntent::text(value),
            IntentCommand::Email {
                address,
                subject,
                body,
            } => InputIntent::email(address, subject, body),
            IntentCommand::Phone { number } => InputIntent::phone(number),
            IntentCommand::Wifi {
                ssid,
                password,
                encryption,
            } => InputIntent::wifi(ssid, password, encryption),
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = QrcraftConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;
    match &config.source {
        Some(path) => info!("Using configuration file: {}", path.display()),
        None => debug!("No qrcraft.toml / qrcraft.yaml found, using defaults"),
    }

    let settings = config
        .qr
        .merged_with(&cli.settings.to_options())
        .to_settings()?;
    let output_path = cli.output.clone().unwrap_or_else(|| config.output.path());
    let file_name = output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.output.file_name.clone());

    let intent = InputIntent::from(cli.intent);
    info!(kind = intent.kind(), ?settings, "Generating QR code");

    let request = QrRenderRequest::from_intent(&intent, settings);
    let outcome = generate(&request, &QrEncoder::new());

    let saved_to = match &outcome {
        Ok(Generation::Rendered(artifact)) => {
            write_artifact(artifact, &output_path)?;
            Some(output_path.as_path())
        }
        _ => None,
    };

    let mut rendered = render_outcome(&request, &outcome, saved_to);
    let link = match (&outcome, cli.link) {
        (Ok(Generation::Rendered(artifact)), true) => {
            Some(download_link(artifact, &file_name, DOWNLOAD_LINK_TEXT))
        }
        _ => None,
    };

    emit(&mut rendered, link, cli.json)?;

    Ok(match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

fn emit(rendered: &mut RenderedOutcome, link: Option<String>, json: bool) -> Result<()> {
    if json {
        if let (Some(link), Some(obj)) = (link, rendered.json.as_object_mut()) {
            obj.insert("download_link".to_string(), Value::String(link));
        }
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
        if let Some(link) = link {
            println!();
            println!("{link}");
        }
    }
    Ok(())
}
