//! Configuration management for file-point.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{DEFAULT_FIND_DEPTH, DEFAULT_MAX_BACKWARD};

/// Command-line arguments for the file-point resolver.
#[derive(Parser, Debug, Clone)]
#[command(name = "file-point")]
#[command(author = "File Point Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve the file or URL reference under a cursor position")]
pub struct Args {
    /// Buffer file to read ("-" reads standard input)
    pub buffer: PathBuf,

    /// Cursor line (1-based)
    #[arg(short, long, default_value = "1")]
    pub line: usize,

    /// Cursor column (1-based byte column)
    #[arg(short, long, default_value = "1")]
    pub col: usize,

    /// Working directory used for relative paths
    #[arg(long, env = "FILE_POINT_CWD")]
    pub cwd: Option<PathBuf>,

    /// Treat the buffer as a terminal buffer (soft wrap reconstruction)
    #[arg(long, env = "FILE_POINT_TERMINAL")]
    pub terminal: bool,

    /// Window width used to detect soft-wrapped terminal lines
    #[arg(long, default_value = "80", env = "FILE_POINT_WIDTH")]
    pub width: usize,

    /// Maximum number of lines scanned upward for a file name
    #[arg(long, default_value = "100", env = "FILE_POINT_MAX_BACKWARD")]
    pub max_backward: usize,

    /// Directory depth for the recursive file search
    #[arg(long, default_value = "5", env = "FILE_POINT_FIND_DEPTH")]
    pub find_depth: usize,

    /// Output format: text or json
    #[arg(short, long, default_value = "text", env = "FILE_POINT_FORMAT")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, env = "FILE_POINT_DEBUG")]
    pub debug: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Tunables of the resolution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Lines walked upward for location-only matches
    pub max_backward: usize,
    /// Depth of the recursive directory search
    pub find_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_backward: DEFAULT_MAX_BACKWARD,
            find_depth: DEFAULT_FIND_DEPTH,
        }
    }
}

/// Invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Buffer file ("-" for stdin)
    pub buffer: PathBuf,
    /// Cursor line
    pub line: usize,
    /// Cursor column
    pub col: usize,
    /// Working directory
    pub cwd: PathBuf,
    /// Terminal buffer
    pub terminal: bool,
    /// Window width
    pub width: usize,
    /// Engine tunables
    pub resolver: ResolverConfig,
    /// Output format
    pub format: OutputFormat,
    /// Debug mode
    pub debug: bool,
}

impl Config {
    /// Whether the buffer is read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.buffer.as_os_str() == "-"
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            buffer: args.buffer,
            line: args.line,
            col: args.col,
            cwd: args.cwd.unwrap_or_else(current_dir),
            terminal: args.terminal,
            width: args.width,
            resolver: ResolverConfig {
                max_backward: args.max_backward,
                find_depth: args.find_depth,
            },
            format: args.format,
            debug: args.debug,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer: PathBuf::from("-"),
            line: 1,
            col: 1,
            cwd: current_dir(),
            terminal: false,
            width: 80,
            resolver: ResolverConfig::default(),
            format: OutputFormat::Text,
            debug: false,
        }
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
