//! Minimal Notion REST client
//!
//! One call only: append children to the configured page. Single attempt,
//! no retry, no request timeout.

use notion_blocks::{AppendChildren, Block};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

/// API version pinned in every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Notion rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("request to Notion failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    page_id: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> Result<Self, NotionError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_base: config.notion_api_base.trim_end_matches('/').to_string(),
            api_key: config.notion_api_key.clone(),
            page_id: config.notion_page_id.clone(),
        })
    }

    fn children_url(&self) -> String {
        format!("{}/blocks/{}/children", self.api_base, self.page_id)
    }

    /// Append `blocks` to the configured page in a single PATCH.
    ///
    /// Only HTTP 200 counts as success; any other status returns the
    /// response body untouched.
    pub async fn append_children(&self, blocks: &[Block]) -> Result<(), NotionError> {
        debug!("PATCH {} ({} blocks)", self.children_url(), blocks.len());

        let response = self
            .http
            .patch(self.children_url())
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_API_VERSION)
            .json(&AppendChildren { children: blocks })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await?;
        warn!("Notion returned {}: {}", status, body);
        Err(NotionError::Rejected { status, body })
    }
}
