/// Print the detected extension and MIME type of each input file.
///
/// ```text
/// cargo run --example sniff -- report.docx photo.webp
/// cargo run --example sniff -- --json --max-archive-bytes 1048576 bundle.zip
/// RUST_LOG=blob_sniffer=trace cargo run --example sniff -- book.epub
/// ```
use std::fs::File;
use std::path::PathBuf;

use blob_sniffer::{Detector, DetectorConfig, ReaderSource};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sniff",
    about = "Detect file types from magic numbers and ZIP container layout"
)]
struct Args {
    /// Files to inspect
    #[arg(value_name = "INPUT", required = true)]
    input: Vec<PathBuf>,

    /// Scratch buffer size used while walking ZIP archives
    #[arg(long, default_value_t = 4100)]
    scan_window: usize,

    /// Load at most this many bytes of a ZIP archive
    #[arg(long)]
    max_archive_bytes: Option<u64>,

    /// Print one JSON object per file
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = DetectorConfig::default().with_scan_window(args.scan_window);
    if let Some(limit) = args.max_archive_bytes {
        config = config.with_max_archive_bytes(limit);
    }
    let detector = Detector::new(config)?;

    for path in &args.input {
        let source = ReaderSource::new(File::open(path)?)?;
        let result = detector.detect(source)?;
        if args.json {
            let line = serde_json::json!({
                "path": path.display().to_string(),
                "result": result,
            });
            println!("{line}");
        } else {
            println!("{}: {}", path.display(), result);
        }
    }

    Ok(())
}
