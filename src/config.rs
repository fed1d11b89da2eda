use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::providers::tmdb::TmdbAuth;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB v3 API key (query-parameter auth)
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB v4 read access token (bearer auth, preferred when both are set)
    #[serde(default)]
    pub tmdb_bearer_token: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Default language for discovery and detail requests
    #[serde(default = "default_language")]
    pub language: String,

    /// Default region for discovery requests (e.g. KR, US)
    #[serde(default)]
    pub region: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_language() -> String {
    "ko-KR".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Resolves TMDB credentials, preferring the bearer token when both are set.
    ///
    /// Absence of both is a caller-facing validation error, not a fallback.
    pub fn tmdb_auth(&self) -> AppResult<TmdbAuth> {
        if let Some(token) = self.tmdb_bearer_token.as_deref() {
            if !token.trim().is_empty() {
                return Ok(TmdbAuth::Bearer(token.trim().to_string()));
            }
        }
        if let Some(key) = self.tmdb_api_key.as_deref() {
            if !key.trim().is_empty() {
                return Ok(TmdbAuth::ApiKey(key.trim().to_string()));
            }
        }
        Err(AppError::InvalidInput(
            "TMDB credentials missing: set TMDB_BEARER_TOKEN or TMDB_API_KEY".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            tmdb_api_key: None,
            tmdb_bearer_token: None,
            tmdb_api_url: default_tmdb_api_url(),
            redis_url: default_redis_url(),
            language: default_language(),
            region: None,
            host: default_host(),
            port: default_port(),
        }
    }

    #[test]
    fn test_auth_prefers_bearer_token() {
        let mut config = base_config();
        config.tmdb_api_key = Some("v3key".to_string());
        config.tmdb_bearer_token = Some("v4token".to_string());

        match config.tmdb_auth().unwrap() {
            TmdbAuth::Bearer(token) => assert_eq!(token, "v4token"),
            TmdbAuth::ApiKey(_) => panic!("bearer token must win when both are set"),
        }
    }

    #[test]
    fn test_auth_falls_back_to_api_key() {
        let mut config = base_config();
        config.tmdb_api_key = Some("v3key".to_string());

        match config.tmdb_auth().unwrap() {
            TmdbAuth::ApiKey(key) => assert_eq!(key, "v3key"),
            TmdbAuth::Bearer(_) => panic!("no bearer token was configured"),
        }
    }

    #[test]
    fn test_auth_missing_credentials_is_validation_error() {
        let config = base_config();
        let err = config.tmdb_auth().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_auth_ignores_blank_bearer_token() {
        let mut config = base_config();
        config.tmdb_bearer_token = Some("   ".to_string());
        config.tmdb_api_key = Some("v3key".to_string());

        match config.tmdb_auth().unwrap() {
            TmdbAuth::ApiKey(key) => assert_eq!(key, "v3key"),
            TmdbAuth::Bearer(_) => panic!("blank bearer token must not be used"),
        }
    }
}
