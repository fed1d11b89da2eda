use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};

use cinematch_api::api::{create_router, AppState};
use cinematch_api::error::AppResult;
use cinematch_api::models::{
    CandidateMovie, Credits, CastMember, ImageConfiguration, ImageSettings, MovieDetails, Video,
    VideoList,
};
use cinematch_api::services::providers::{DiscoveryQuery, MetadataProvider};

/// Scripted provider: returns canned pages in order and records every
/// discovery query it sees.
struct ScriptedProvider {
    configuration: ImageConfiguration,
    discover_pages: Mutex<Vec<Vec<CandidateMovie>>>,
    seen_queries: Arc<Mutex<Vec<DiscoveryQuery>>>,
    details: HashMap<i64, MovieDetails>,
}

impl ScriptedProvider {
    fn new(pages: Vec<Vec<CandidateMovie>>) -> Self {
        let details = pages
            .iter()
            .flatten()
            .filter_map(|candidate| candidate.id)
            .map(|id| (id, detail_record(id)))
            .collect();

        Self {
            configuration: image_configuration(),
            discover_pages: Mutex::new(pages),
            seen_queries: Arc::new(Mutex::new(Vec::new())),
            details,
        }
    }

    fn queries(&self) -> Arc<Mutex<Vec<DiscoveryQuery>>> {
        Arc::clone(&self.seen_queries)
    }
}

#[async_trait]
impl MetadataProvider for ScriptedProvider {
    async fn fetch_configuration(&self) -> AppResult<ImageConfiguration> {
        Ok(self.configuration.clone())
    }

    async fn discover_movies(&self, query: &DiscoveryQuery) -> AppResult<Vec<CandidateMovie>> {
        self.seen_queries.lock().unwrap().push(query.clone());
        let mut pages = self.discover_pages.lock().unwrap();
        if pages.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(pages.remove(0))
        }
    }

    async fn movie_details(&self, movie_id: i64, _language: &str) -> AppResult<MovieDetails> {
        Ok(self
            .details
            .get(&movie_id)
            .cloned()
            .unwrap_or_else(|| detail_record(movie_id)))
    }
}

fn image_configuration() -> ImageConfiguration {
    ImageConfiguration {
        images: ImageSettings {
            base_url: Some("http://image.tmdb.org/t/p/".to_string()),
            secure_base_url: Some("https://image.tmdb.org/t/p/".to_string()),
            poster_sizes: vec!["w92".to_string(), "w154".to_string(), "w500".to_string()],
        },
    }
}

fn summary(id: i64, title: &str) -> CandidateMovie {
    CandidateMovie {
        id: Some(id),
        title: Some(title.to_string()),
        overview: Some(format!("{} 줄거리", title)),
        vote_average: Some(8.1),
        popularity: Some(90.0),
        poster_path: Some(format!("/poster{}.jpg", id)),
    }
}

fn detail_record(id: i64) -> MovieDetails {
    MovieDetails {
        id: Some(id),
        title: Some(format!("영화 {}", id)),
        overview: Some(format!("영화 {} 상세 줄거리", id)),
        vote_average: Some(8.1),
        popularity: Some(90.0),
        poster_path: Some(format!("/poster{}.jpg", id)),
        videos: Some(VideoList {
            results: vec![Video {
                site: Some("YouTube".to_string()),
                key: Some(format!("trailer{}", id)),
                video_type: Some("Trailer".to_string()),
            }],
        }),
        credits: Some(Credits {
            cast: vec![
                CastMember {
                    name: "배우 A".to_string(),
                },
                CastMember {
                    name: "배우 B".to_string(),
                },
            ],
        }),
    }
}

fn create_test_server(provider: ScriptedProvider) -> TestServer {
    let state = AppState::new(Arc::new(provider), "ko-KR".to_string(), Some("KR".to_string()));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn drama_answers() -> Value {
    json!({
        "q1": "집에서 휴식",
        "q2": "혼자 있기",
        "q3": "감동 스토리",
        "q4": "계획적",
        "q5": "듣는 역할"
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(ScriptedProvider::new(vec![]));
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_quiz_catalog_is_complete() {
    let server = create_test_server(ScriptedProvider::new(vec![]));
    let response = server.get("/api/v1/quiz").await;
    response.assert_status_ok();

    let quiz: Value = response.json();
    let questions = quiz["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    for question in questions {
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
    }
    assert_eq!(quiz["moods"].as_array().unwrap().len(), 5);
    assert_eq!(quiz["age_bands"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_recommendation_flow_all_drama() {
    let page: Vec<CandidateMovie> = (1..=6)
        .map(|i| summary(i, &format!("영화 {}", i)))
        .collect();
    let server = create_test_server(ScriptedProvider::new(vec![page]));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "answers": drama_answers() }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["verdict"]["primary"], "드라마");
    assert!(body["verdict"]["secondary"].is_null());
    assert!(!body["verdict"]["primary_reasons"].as_array().unwrap().is_empty());

    // Score board is complete and ranked: Drama leads with 10
    let scores = body["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 6);
    assert_eq!(scores[0]["genre"], "드라마");
    assert_eq!(scores[0]["score"], 10);

    // Truncated to the default presentation size, enriched in order
    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 5);
    let first = &movies[0];
    assert_eq!(first["id"], 1);
    assert_eq!(
        first["poster_url"],
        "https://image.tmdb.org/t/p/w500/poster1.jpg"
    );
    assert_eq!(
        first["trailer_url"],
        "https://www.youtube.com/watch?v=trailer1"
    );
    assert!(first["reason"].as_str().unwrap().contains("드라마"));
    assert!(first["reason"].as_str().unwrap().contains("트레일러"));
}

#[tokio::test]
async fn test_unknown_answer_is_rejected() {
    let server = create_test_server(ScriptedProvider::new(vec![]));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "answers": {
                "q1": "집에서 휴식",
                "q2": "등산하기",
                "q3": "감동 스토리",
                "q4": "계획적",
                "q5": "듣는 역할"
            }
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("q2"));
}

#[tokio::test]
async fn test_narrow_combined_filter_triggers_primary_fallback() {
    // Drama 6 / Romance 6: blended verdict. First discovery page has only
    // 3 titles, so the assembler must re-query with the primary alone.
    let provider = ScriptedProvider::new(vec![
        vec![summary(1, "a"), summary(2, "b"), summary(3, "c")],
        vec![summary(4, "d"), summary(5, "e")],
    ]);
    let queries = provider.queries();
    let server = create_test_server(provider);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "answers": {
                "q1": "집에서 휴식",
                "q2": "수다 떨기",
                "q3": "감동 스토리",
                "q4": "즉흥적",
                "q5": "듣는 역할"
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["verdict"]["primary"], "드라마");
    assert_eq!(body["verdict"]["secondary"], "로맨스");
    assert_eq!(body["movies"].as_array().unwrap().len(), 5);

    let seen = queries.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].genres.len(), 2);
    assert_eq!(seen[1].genres.len(), 1);
    assert_eq!(seen[1].min_vote_count, seen[0].min_vote_count / 2);
}

#[tokio::test]
async fn test_mood_and_filters_are_honored() {
    let page: Vec<CandidateMovie> = (1..=3)
        .map(|i| summary(i, &format!("영화 {}", i)))
        .collect();
    let provider = ScriptedProvider::new(vec![page]);
    let queries = provider.queries();
    let server = create_test_server(provider);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "answers": drama_answers(),
            "mood": "위로",
            "filters": {
                "language": "en-US",
                "sort_by": "vote_average.desc",
                "min_vote_count": 200,
                "limit": 2
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["movies"].as_array().unwrap().len(), 2);

    let seen = queries.lock().unwrap();
    assert_eq!(seen[0].language, "en-US");
    assert_eq!(seen[0].min_vote_count, 200);
    // Region falls back to the service default
    assert_eq!(seen[0].region.as_deref(), Some("KR"));
}
