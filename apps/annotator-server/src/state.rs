//! Application state for the annotator server

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::notion::NotionClient;
use crate::storage::UploadStore;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub uploads: UploadStore,
    pub notion: NotionClient,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let uploads = UploadStore::new(&config.upload_dir);
        uploads.init().await?;
        tracing::info!("Upload directory: {}", uploads.dir().display());

        let notion = NotionClient::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            uploads,
            notion,
        })
    }
}
