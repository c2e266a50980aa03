//! File Point - resolve the file or URL reference under a cursor.
//!
//! Reads a buffer from a file (or stdin), places the cursor and prints the
//! references found there.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use file_point::config::{Args, Config, OutputFormat};
use file_point::error::{Error, Result};
use file_point::resolver::FilePoint;
use file_point::source::{BufferSource, IsfnameExtractor};
use file_point::VERSION;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging: warn+ to stderr, debug with --debug, RUST_LOG overrides
    let default_level = if args.debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to set tracing subscriber: {}", e)))?;

    let config: Config = args.into();

    debug!("File Point v{}", VERSION);
    debug!("Buffer: {:?}", config.buffer);
    debug!("Working directory: {:?}", config.cwd);

    let buffer = if config.reads_stdin() {
        BufferSource::from_stdin().await?
    } else {
        BufferSource::from_file(&config.buffer).await?
    };

    let mut buffer = buffer
        .with_cursor(config.line, config.col)
        .with_working_directory(&config.cwd)
        .with_window_width(config.width);
    if config.terminal {
        buffer = buffer.as_terminal(config.width);
    }
    buffer.validate_cursor()?;

    let engine = FilePoint::with_config(IsfnameExtractor::new(), config.resolver);
    let references = engine.resolve_at_cursor(&buffer).await;

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&references)?),
        OutputFormat::Text => {
            for reference in &references {
                println!("{}", reference);
            }
        }
    }

    Ok(())
}
