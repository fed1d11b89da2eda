use std::sync::Arc;

use crate::services::providers::MetadataProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The movie metadata provider behind every remote call
    pub provider: Arc<dyn MetadataProvider>,
    /// Language applied when a request does not specify one
    pub default_language: String,
    /// Region applied when a request does not specify one
    pub default_region: Option<String>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        default_language: String,
        default_region: Option<String>,
    ) -> Self {
        Self {
            provider,
            default_language,
            default_region,
        }
    }
}
