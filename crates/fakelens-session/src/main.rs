//! FakeLens driver binary.
//!
//! Loads an image, optionally replays a crop drag against it, submits the
//! result to the detection service, and prints the presented report.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fakelens_client::{DetectorClient, DetectorConfig};
use fakelens_crop::PointerEvent;
use fakelens_models::{AnalysisMode, ContainerRect, ImageFormat};
use fakelens_session::{present, AnalyzerSession};

#[derive(Debug, Parser)]
#[command(
    name = "fakelens",
    about = "Submit an image (optionally cropped) to the deepfake detection service"
)]
struct Args {
    /// Path to a JPEG or PNG image
    image: PathBuf,

    /// Analysis mode: simple or augmented
    #[arg(long, default_value = "simple")]
    mode: String,

    /// Replay a crop drag, as "x1,y1:x2,y2" in rendered coordinates
    #[arg(long)]
    drag: Option<String>,

    /// Rendered size as "WIDTHxHEIGHT" (defaults to the natural size)
    #[arg(long)]
    rendered: Option<String>,

    /// Override the detection service base URL
    #[arg(long)]
    service_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let mode: AnalysisMode = args
        .mode
        .parse()
        .map_err(|e| anyhow!("{e} (expected 'simple' or 'augmented')"))?;

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let name = args
        .image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime_type = args
        .image
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .map(|format| format.mime_type())
        .unwrap_or("application/octet-stream");

    let mut session = AnalyzerSession::new();
    if !session.select_file(&name, mime_type, bytes) {
        bail!(
            "{}",
            session.error_message().unwrap_or("File selection failed")
        );
    }

    let (natural_width, natural_height) = session.natural_size().expect("image just selected");
    let (rendered_width, rendered_height) = match &args.rendered {
        Some(value) => {
            parse_pair(value, 'x').context("Invalid --rendered, expected WIDTHxHEIGHT")?
        }
        None => (natural_width as f64, natural_height as f64),
    };
    session.image_rendered(rendered_width, rendered_height);
    info!(
        natural = format!("{natural_width}x{natural_height}"),
        rendered = format!("{rendered_width}x{rendered_height}"),
        "Image loaded"
    );

    if let Some(drag) = &args.drag {
        let ((x1, y1), (x2, y2)) = parse_drag(drag)?;
        let container = ContainerRect::new(0.0, 0.0, rendered_width, rendered_height);
        session.pointer_start(&PointerEvent::mouse(x1, y1), Some(&container));
        session.pointer_move(&PointerEvent::mouse(x2, y2), Some(&container));
        session.pointer_end();
        match session.artifact() {
            Some(artifact) => {
                let region = session.crop_region();
                info!(
                    side = region.side,
                    jpeg_bytes = artifact.bytes.len(),
                    "Crop committed"
                );
            }
            None => bail!("Drag produced no crop region"),
        }
    }

    let mut config = DetectorConfig::from_env();
    if let Some(url) = args.service_url {
        config.base_url = url;
    }
    let client = DetectorClient::new(config)?;

    if !session.analyze(&client, mode).await {
        bail!("Nothing to analyze");
    }
    if let Some(message) = session.error_message() {
        bail!("{message}");
    }

    let result = session.result().expect("result set after successful analysis");
    println!("{}", present(result));
    Ok(())
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env();

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(false))
            .with(env_filter)
            .init();
    }
}

/// Parse "A<sep>B" into two floats.
fn parse_pair(value: &str, separator: char) -> Result<(f64, f64)> {
    let (a, b) = value
        .split_once(separator)
        .ok_or_else(|| anyhow!("Expected two values separated by '{separator}'"))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}

/// Parse "x1,y1:x2,y2" into start and end points.
fn parse_drag(value: &str) -> Result<((f64, f64), (f64, f64))> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid --drag, expected x1,y1:x2,y2"))?;
    Ok((
        parse_pair(start, ',').context("Invalid drag start point")?,
        parse_pair(end, ',').context("Invalid drag end point")?,
    ))
}
