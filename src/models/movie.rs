use serde::{Deserialize, Serialize};

use super::AgeBand;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /configuration. Cached long-lived; only the image
/// settings are consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfiguration {
    #[serde(default)]
    pub images: ImageSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub secure_base_url: Option<String>,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
}

/// One page from GET /discover/movie
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverResponse {
    #[serde(default)]
    pub results: Vec<CandidateMovie>,
}

/// Summary record from the discovery endpoint. Ephemeral; fetched per
/// request and cached by the HTTP layer for a bounded window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateMovie {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Full record from GET /movie/{id}?append_to_response=videos,credits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub videos: Option<VideoList>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, rename = "type")]
    pub video_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
}

// ============================================================================
// Discovery filters and assembled output
// ============================================================================

/// Discovery sort order accepted from the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "vote_average.desc")]
    VoteAverageDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PopularityDesc => "popularity.desc",
            SortOrder::VoteAverageDesc => "vote_average.desc",
        }
    }
}

/// Caller-supplied discovery constraints. Everything is optional; unset
/// language/region fall back to the service defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryFilters {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub sort_by: SortOrder,
    #[serde(default = "default_min_vote_count")]
    pub min_vote_count: u32,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub max_rating: Option<f64>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub age_band: Option<AgeBand>,
}

fn default_min_vote_count() -> u32 {
    50
}

fn default_limit() -> usize {
    5
}

impl Default for DiscoveryFilters {
    fn default() -> Self {
        Self {
            language: None,
            region: None,
            sort_by: SortOrder::default(),
            min_vote_count: default_min_vote_count(),
            min_rating: None,
            max_rating: None,
            limit: default_limit(),
            age_band: None,
        }
    }
}

/// One fully assembled recommendation returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub vote_average: f64,
    pub popularity: f64,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub cast: Vec<String>,
    pub reason: String,
}
