//! Process configuration
//!
//! Values come from the command line, falling back to environment variables
//! (a `.env` file is loaded first). The result is frozen into [`Config`] and
//! shared read-only with every handler.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

/// Notion REST API root.
pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Largest accepted request body (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Command-line arguments for the annotator server
#[derive(Parser, Debug)]
#[command(name = "annotator-server")]
#[command(about = "View PDFs in the browser and send annotations to Notion")]
pub struct Args {
    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub notion_api_key: String,

    /// Page (or block) that annotations are appended to
    #[arg(long, env = "NOTION_PAGE_ID")]
    pub notion_page_id: String,

    /// Base URL of the Notion API
    #[arg(long, env = "NOTION_API_BASE", default_value = DEFAULT_NOTION_API_BASE)]
    pub notion_api_base: String,

    /// Directory uploaded PDFs are written to
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Maximum request body size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Immutable runtime configuration
#[derive(Clone)]
pub struct Config {
    pub notion_api_key: String,
    pub notion_page_id: String,
    pub notion_api_base: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            notion_api_key: args.notion_api_key,
            notion_page_id: args.notion_page_id,
            notion_api_base: args.notion_api_base,
            upload_dir: args.upload_dir,
            max_upload_bytes: args.max_upload_bytes,
        }
    }
}

// The API key must never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("notion_api_key", &"<redacted>")
            .field("notion_page_id", &self.notion_page_id)
            .field("notion_api_base", &self.notion_api_base)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}
