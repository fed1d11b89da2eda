use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{AgeBand, AnswerSet, DiscoveryFilters, Genre, Mood, Recommendation};
use crate::scoring::{self, rules};
use crate::services::assembler::RecommendationService;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub answers: AnswerSet,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub filters: Option<DiscoveryFilters>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub verdict: VerdictResponse,
    pub scores: Vec<GenreScore>,
    pub movies: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct VerdictResponse {
    pub primary: Genre,
    pub secondary: Option<Genre>,
    pub primary_reasons: Vec<String>,
    pub secondary_reasons: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GenreScore {
    pub genre: Genre,
    pub score: u32,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuestionResponse>,
    pub moods: Vec<&'static str>,
    pub age_bands: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: Vec<&'static str>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Returns the fixed quiz catalog so a client can render the questions.
pub async fn get_quiz() -> Json<QuizResponse> {
    let questions = rules::QUESTIONS
        .iter()
        .map(|question| QuestionResponse {
            id: question.id,
            prompt: question.prompt,
            options: question.options.iter().map(|rule| rule.option).collect(),
        })
        .collect();

    Json(QuizResponse {
        questions,
        moods: Mood::ALL.iter().map(|mood| mood.label()).collect(),
        age_bands: AgeBand::ALL.iter().map(|band| band.label()).collect(),
    })
}

/// Scores the submitted answers and assembles the recommendation list.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    scoring::validate_answers(&request.answers)?;

    let (board, verdict) = scoring::score(&request.answers, request.mood);

    tracing::info!(
        primary = %verdict.primary,
        secondary = ?verdict.secondary.map(|genre| genre.label()),
        "Quiz scored"
    );

    let mut filters = request.filters.unwrap_or_default();
    if filters.language.is_none() {
        filters.language = Some(state.default_language.clone());
    }
    if filters.region.is_none() {
        filters.region = state.default_region.clone();
    }

    let service = RecommendationService::new(Arc::clone(&state.provider));
    let movies = service.recommend(&verdict, &filters).await?;

    let scores = board
        .ranked()
        .into_iter()
        .map(|(genre, score)| GenreScore { genre, score })
        .collect();

    Ok(Json(RecommendationResponse {
        verdict: VerdictResponse {
            primary: verdict.primary,
            secondary: verdict.secondary,
            primary_reasons: verdict.primary_reasons,
            secondary_reasons: verdict.secondary_reasons,
        },
        scores,
        movies,
        generated_at: Utc::now(),
    }))
}
