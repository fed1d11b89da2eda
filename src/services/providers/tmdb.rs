/// TMDB API provider
///
/// Endpoints used:
/// 1. Configuration: /configuration → image base URLs and size tokens
/// 2. Discovery: /discover/movie → one page of candidate summaries
/// 3. Detail: /movie/{id}?append_to_response=videos,credits
///
/// Every call is a GET behind a bounded retry (exponential backoff on
/// transient statuses and transport failures) and a per-endpoint-class
/// TTL cache.
use std::cmp;
use std::time::Duration;

use reqwest::Client as HttpClient;
use tokio::time::sleep;

use crate::{
    cache::{Cache, CacheKey},
    cached,
    error::{AppError, AppResult},
    models::{CandidateMovie, DiscoverResponse, ImageConfiguration, MovieDetails},
    services::providers::{DiscoveryQuery, MetadataProvider},
};

const CONFIG_CACHE_TTL: u64 = 3600; // 1 hour
const DISCOVER_CACHE_TTL: u64 = 600; // 10 minutes
const DETAIL_CACHE_TTL: u64 = 1800; // 30 minutes

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_MS: u64 = 4_000;
const RETRYABLE_STATUS: [u16; 5] = [429, 500, 502, 503, 504];

/// TMDB credentials. Bearer token wins when both are configured.
#[derive(Debug, Clone)]
pub enum TmdbAuth {
    Bearer(String),
    ApiKey(String),
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    auth: TmdbAuth,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(cache: Cache, auth: TmdbAuth, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            auth,
            api_url,
            cache,
        }
    }

    /// Issues one GET with the retry budget applied.
    ///
    /// Transient statuses and transport failures are retried with capped
    /// exponential backoff; everything else maps straight onto the error
    /// taxonomy.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);
        let mut attempt: u32 = 0;

        loop {
            let mut request = self
                .http_client
                .get(&url)
                .timeout(REQUEST_TIMEOUT)
                .query(params);

            request = match &self.auth {
                TmdbAuth::Bearer(token) => request.bearer_auth(token),
                TmdbAuth::ApiKey(key) => request.query(&[("api_key", key.as_str())]),
            };

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if response.status().is_success() {
                        return Ok(response.json().await?);
                    }

                    if RETRYABLE_STATUS.contains(&status) && attempt < MAX_RETRIES {
                        attempt += 1;
                        let backoff = backoff_ms(attempt);
                        tracing::warn!(
                            path = %path,
                            status = status,
                            attempt = attempt,
                            backoff_ms = backoff,
                            "Transient TMDB status, retrying"
                        );
                        sleep(Duration::from_millis(backoff)).await;
                        continue;
                    }

                    // Read the JSON error body so TMDB's own message can be
                    // surfaced for unclassified statuses.
                    let body: serde_json::Value =
                        response.json().await.unwrap_or(serde_json::Value::Null);
                    let status_message = body
                        .get("status_message")
                        .and_then(|v| v.as_str())
                        .map(str::to_string);

                    tracing::error!(
                        path = %path,
                        status = status,
                        message = ?status_message,
                        "TMDB request failed"
                    );

                    return Err(classify_status(status, status_message));
                }
                Err(e) if attempt < MAX_RETRIES => {
                    attempt += 1;
                    let backoff = backoff_ms(attempt);
                    tracing::warn!(
                        path = %path,
                        error = %e,
                        attempt = attempt,
                        backoff_ms = backoff,
                        "TMDB transport failure, retrying"
                    );
                    sleep(Duration::from_millis(backoff)).await;
                }
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "TMDB request exhausted retries");
                    return Err(e.into());
                }
            }
        }
    }
}

fn backoff_ms(attempt: u32) -> u64 {
    cmp::min(BASE_BACKOFF_MS << (attempt - 1), MAX_BACKOFF_MS)
}

/// Maps a non-success TMDB status onto the error taxonomy.
fn classify_status(status: u16, status_message: Option<String>) -> AppError {
    match status {
        401 => AppError::Authentication("인증 실패(401). API Key가 올바른지 확인해 주세요.".to_string()),
        404 => AppError::NotFound("리소스를 찾을 수 없어요(404).".to_string()),
        422 => AppError::InvalidInput("요청 파라미터가 올바르지 않아요(422).".to_string()),
        429 => AppError::RateLimit("요청이 너무 많아요(429). 잠시 후 다시 시도해 주세요.".to_string()),
        s if s >= 500 => {
            AppError::Upstream("TMDB 서버 오류(5xx). 잠시 후 다시 시도해 주세요.".to_string())
        }
        s => AppError::Upstream(
            status_message.unwrap_or_else(|| format!("TMDB 요청 실패 (HTTP {})", s)),
        ),
    }
}

/// Builds the discovery query parameters in a fixed order, so the joined
/// string doubles as the cache identity of the call.
fn build_discover_params(query: &DiscoveryQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("with_genres".to_string(), query.genre_filter()),
        ("language".to_string(), query.language.clone()),
        ("sort_by".to_string(), query.sort_by.as_str().to_string()),
        ("page".to_string(), query.page.to_string()),
        ("include_adult".to_string(), "false".to_string()),
        ("include_video".to_string(), "false".to_string()),
        (
            "vote_count.gte".to_string(),
            query.min_vote_count.to_string(),
        ),
    ];

    if let Some(region) = &query.region {
        params.push(("region".to_string(), region.clone()));
    }
    if let Some(min_rating) = query.min_rating {
        params.push(("vote_average.gte".to_string(), min_rating.to_string()));
    }
    if let Some(max_rating) = query.max_rating {
        params.push(("vote_average.lte".to_string(), max_rating.to_string()));
    }

    params
}

fn canonical_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_configuration(&self) -> AppResult<ImageConfiguration> {
        cached!(
            self.cache,
            CacheKey::Configuration,
            CONFIG_CACHE_TTL,
            async move {
                let config = self
                    .get_json::<ImageConfiguration>("/configuration", &[])
                    .await?;

                tracing::debug!(
                    poster_sizes = config.images.poster_sizes.len(),
                    "Configuration fetched"
                );

                Ok::<_, AppError>(config)
            }
        )
    }

    async fn discover_movies(&self, query: &DiscoveryQuery) -> AppResult<Vec<CandidateMovie>> {
        let params = build_discover_params(query);
        let cache_key = CacheKey::Discovery(canonical_params(&params));

        cached!(self.cache, cache_key, DISCOVER_CACHE_TTL, async move {
            let page = self
                .get_json::<DiscoverResponse>("/discover/movie", &params)
                .await?;

            tracing::info!(
                with_genres = %query.genre_filter(),
                results = page.results.len(),
                provider = "tmdb",
                "Discovery completed"
            );

            Ok::<_, AppError>(page.results)
        })
    }

    async fn movie_details(&self, movie_id: i64, language: &str) -> AppResult<MovieDetails> {
        let cache_key = CacheKey::Detail(movie_id, language.to_string());
        let params = vec![
            ("language".to_string(), language.to_string()),
            (
                "append_to_response".to_string(),
                "videos,credits".to_string(),
            ),
        ];

        cached!(self.cache, cache_key, DETAIL_CACHE_TTL, async move {
            let details = self
                .get_json::<MovieDetails>(&format!("/movie/{}", movie_id), &params)
                .await?;

            tracing::debug!(movie_id = movie_id, provider = "tmdb", "Detail fetched");

            Ok::<_, AppError>(details)
        })
    }
}
