/// Movie metadata provider abstraction
///
/// The scorer and assembler never talk to the network directly; they go
/// through this trait. Tests swap in a mocked or scripted provider and the
/// hard logic runs against canned responses.
use crate::{
    error::AppResult,
    models::{CandidateMovie, Genre, ImageConfiguration, MovieDetails, SortOrder},
};

pub mod tmdb;

/// Fully resolved discovery request: the combined genre filter plus every
/// caller-supplied constraint. Also the cache identity of the call.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryQuery {
    pub genres: Vec<Genre>,
    pub language: String,
    pub region: Option<String>,
    pub sort_by: SortOrder,
    pub min_vote_count: u32,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub page: u32,
}

impl DiscoveryQuery {
    /// Comma-joined TMDB genre ids, e.g. "18,10749"
    pub fn genre_filter(&self) -> String {
        self.genres
            .iter()
            .map(|genre| genre.tmdb_id().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Trait for movie metadata providers
///
/// Three operations mirror the provider's endpoint classes: configuration
/// (image bases and size tokens), discovery (summary records by filter),
/// and detail (one movie with videos and credits appended).
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the provider configuration used for image URL resolution.
    async fn fetch_configuration(&self) -> AppResult<ImageConfiguration>;

    /// List candidate movies matching the query, one page of summaries.
    async fn discover_movies(&self, query: &DiscoveryQuery) -> AppResult<Vec<CandidateMovie>>;

    /// Fetch full detail for one movie, including videos and credits.
    async fn movie_details(&self, movie_id: i64, language: &str) -> AppResult<MovieDetails>;
}
