//! Recommendation assembly: discovery, fallback, dedup, enrichment.
//!
//! Takes the scorer's verdict, resolves it to a candidate list through the
//! metadata provider, and produces the enriched recommendations the client
//! renders. Per-candidate enrichment failures are skipped, never fatal;
//! only a failed configuration or initial discovery call aborts the run.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        CandidateMovie, DiscoveryFilters, Genre, GenreVerdict, ImageConfiguration, MovieDetails,
        Recommendation,
    },
    services::providers::{DiscoveryQuery, MetadataProvider},
};

/// Hard cap on the presentation size.
pub const MAX_LIMIT: usize = 9;

const HIGH_RATING_THRESHOLD: f64 = 7.5;
const HIGH_POPULARITY_THRESHOLD: f64 = 80.0;
const CAST_DISPLAY_LIMIT: usize = 5;

const DEFAULT_LANGUAGE: &str = "ko-KR";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";
const PREFERRED_POSTER_SIZE: &str = "w500";

const MISSING_TITLE: &str = "제목 정보 없음";
const MISSING_OVERVIEW: &str = "줄거리 정보가 없어요.";

/// Assembles enriched recommendations from a genre verdict.
pub struct RecommendationService {
    provider: Arc<dyn MetadataProvider>,
}

impl RecommendationService {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    pub async fn recommend(
        &self,
        verdict: &GenreVerdict,
        filters: &DiscoveryFilters,
    ) -> AppResult<Vec<Recommendation>> {
        let config = self.provider.fetch_configuration().await?;

        let limit = filters.limit.clamp(1, MAX_LIMIT);
        let language = filters
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let query = DiscoveryQuery {
            genres: verdict.chosen_genres(),
            language: language.clone(),
            region: filters.region.clone(),
            sort_by: filters.sort_by,
            min_vote_count: filters.min_vote_count,
            min_rating: filters.min_rating,
            max_rating: filters.max_rating,
            page: 1,
        };

        let mut candidates = self.provider.discover_movies(&query).await?;

        // A combined two-genre filter can be too narrow. Re-run with the
        // primary genre alone (and a relaxed vote floor) so the primary
        // signal is never starved.
        if candidates.len() < fallback_threshold(limit) && verdict.secondary.is_some() {
            tracing::info!(
                found = candidates.len(),
                primary = %verdict.primary,
                "Combined filter too narrow, falling back to primary genre"
            );

            let fallback_query = DiscoveryQuery {
                genres: vec![verdict.primary],
                min_vote_count: query.min_vote_count / 2,
                ..query.clone()
            };
            let more = self.provider.discover_movies(&fallback_query).await?;
            candidates.extend(more);
        }

        let floor = filters
            .age_band
            .map(|band| band.popularity_floor())
            .unwrap_or(0.0);

        let shortlist: Vec<CandidateMovie> = dedup_by_title(candidates)
            .into_iter()
            .filter(|candidate| candidate.popularity.unwrap_or(0.0) >= floor)
            .take(limit)
            .collect();

        self.enrich(shortlist, &config, verdict, &language).await
    }

    /// Fetches detail for each shortlisted candidate.
    ///
    /// Fetches run in parallel but results keep discovery order. A missing
    /// id or a failed fetch drops that one candidate with a log line.
    async fn enrich(
        &self,
        shortlist: Vec<CandidateMovie>,
        config: &ImageConfiguration,
        verdict: &GenreVerdict,
        language: &str,
    ) -> AppResult<Vec<Recommendation>> {
        let mut tasks = Vec::new();

        for candidate in shortlist {
            let Some(movie_id) = candidate.id.filter(|id| *id > 0) else {
                tracing::debug!(title = ?candidate.title, "Candidate without id, skipped");
                continue;
            };

            let provider = Arc::clone(&self.provider);
            let language = language.to_string();
            let task =
                tokio::spawn(async move { provider.movie_details(movie_id, &language).await });
            tasks.push((candidate, movie_id, task));
        }

        let mut recommendations = Vec::new();

        for (candidate, movie_id, task) in tasks {
            match task.await {
                Ok(Ok(details)) => {
                    recommendations.push(build_recommendation(candidate, details, config, verdict));
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        movie_id = movie_id,
                        error = %e,
                        "Detail fetch failed, skipping candidate"
                    );
                }
                Err(e) => {
                    tracing::warn!(movie_id = movie_id, error = %e, "Detail task join error");
                }
            }
        }

        tracing::info!(count = recommendations.len(), "Recommendations assembled");

        Ok(recommendations)
    }
}

/// Minimum candidate count below which the fallback discovery fires.
fn fallback_threshold(limit: usize) -> usize {
    if limit <= 5 {
        5
    } else {
        10
    }
}

/// Normalizes a title into its dedup key: trimmed, lowercased, punctuation
/// stripped (word and Hangul characters survive), whitespace collapsed.
pub fn normalize_title(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops candidates whose normalized title was already seen; first
/// occurrence wins, preserving the provider's relevance order.
pub fn dedup_by_title(candidates: Vec<CandidateMovie>) -> Vec<CandidateMovie> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();

    for candidate in candidates {
        let key = normalize_title(candidate.title.as_deref().unwrap_or(""));
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(candidate);
    }

    out
}

/// Resolves a poster path to a full image URL.
///
/// Uses the configured base URL with the preferred size token when the
/// provider lists it, otherwise the largest available size; with no usable
/// configuration at all, a hardcoded default base is the last resort.
pub fn build_poster_url(
    config: &ImageConfiguration,
    poster_path: Option<&str>,
    size_preference: &str,
) -> Option<String> {
    let path = poster_path?;

    let images = &config.images;
    let base_url = images
        .secure_base_url
        .as_deref()
        .or(images.base_url.as_deref());

    let Some(base_url) = base_url else {
        return Some(format!("{}{}{}", DEFAULT_IMAGE_BASE_URL, size_preference, path));
    };

    let size = if images.poster_sizes.iter().any(|s| s == size_preference) {
        size_preference
    } else {
        images
            .poster_sizes
            .last()
            .map(String::as_str)
            .unwrap_or(size_preference)
    };

    Some(format!("{}{}{}", base_url, size, path))
}

/// Picks a trailer link from a detail record's video list.
///
/// Prefers a YouTube entry typed as a trailer; falls back to any YouTube
/// entry with a key; yields nothing otherwise.
pub fn pick_trailer_url(details: &MovieDetails) -> Option<String> {
    let videos = &details.videos.as_ref()?.results;

    let trailer = videos
        .iter()
        .find(|v| {
            v.site.as_deref() == Some("YouTube")
                && v.video_type.as_deref().is_some_and(|t| t.contains("Trailer"))
                && v.key.is_some()
        })
        .or_else(|| {
            videos
                .iter()
                .find(|v| v.site.as_deref() == Some("YouTube") && v.key.is_some())
        })?;

    trailer
        .key
        .as_ref()
        .map(|key| format!("https://www.youtube.com/watch?v={}", key))
}

/// Synthesizes the per-item reason text. Never empty: when no clause
/// fires, a generic one is substituted.
pub fn movie_reason(genres: &[Genre], vote_average: f64, popularity: f64, has_trailer: bool) -> String {
    let mut bits: Vec<String> = Vec::new();

    if !genres.is_empty() {
        let labels = genres
            .iter()
            .map(|genre| genre.label())
            .collect::<Vec<_>>()
            .join(", ");
        bits.push(format!("당신의 취향 장르({})와 잘 맞아요.", labels));
    }
    if vote_average >= HIGH_RATING_THRESHOLD {
        bits.push("평점이 높은 편이라 만족도가 좋아요.".to_string());
    }
    if popularity >= HIGH_POPULARITY_THRESHOLD {
        bits.push("최근 인기도가 높아서 입문용으로 보기 좋아요.".to_string());
    }
    if has_trailer {
        bits.push("트레일러로 분위기를 바로 확인할 수 있어요.".to_string());
    }
    if bits.is_empty() {
        bits.push("지금 인기 있는 작품 중에서 취향에 맞는 후보로 골랐어요.".to_string());
    }

    bits.join(" ")
}

/// Merges the summary and detail records into one output item, preferring
/// detail fields and degrading missing values to placeholders.
fn build_recommendation(
    candidate: CandidateMovie,
    details: MovieDetails,
    config: &ImageConfiguration,
    verdict: &GenreVerdict,
) -> Recommendation {
    let trailer_url = pick_trailer_url(&details);
    let id = details.id.or(candidate.id).unwrap_or_default();
    let title = details
        .title
        .filter(|t| !t.is_empty())
        .or(candidate.title.filter(|t| !t.is_empty()))
        .unwrap_or_else(|| MISSING_TITLE.to_string());
    let overview = details
        .overview
        .filter(|o| !o.is_empty())
        .or(candidate.overview.filter(|o| !o.is_empty()))
        .unwrap_or_else(|| MISSING_OVERVIEW.to_string());
    let vote_average = details.vote_average.or(candidate.vote_average).unwrap_or(0.0);
    let popularity = details.popularity.or(candidate.popularity).unwrap_or(0.0);

    let poster_path = details.poster_path.or(candidate.poster_path);
    let poster_url = build_poster_url(config, poster_path.as_deref(), PREFERRED_POSTER_SIZE);

    let cast: Vec<String> = details
        .credits
        .map(|credits| {
            credits
                .cast
                .into_iter()
                .take(CAST_DISPLAY_LIMIT)
                .map(|member| member.name)
                .collect()
        })
        .unwrap_or_default();

    let reason = movie_reason(
        &verdict.chosen_genres(),
        vote_average,
        popularity,
        trailer_url.is_some(),
    );

    Recommendation {
        id,
        title,
        overview,
        vote_average,
        popularity,
        poster_url,
        trailer_url,
        cast,
        reason,
    }
}
