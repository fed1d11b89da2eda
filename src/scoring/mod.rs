//! Answer-to-genre scoring.
//!
//! Pure and synchronous: a fixed rule table maps each answer to weighted
//! genre signals, the accumulated board is ranked, and ties fall to a fixed
//! preference order. Total over the option domains; never fails.

pub mod rules;

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::{AnswerSet, Genre, GenreVerdict, Mood};

const PRIMARY_REASON_CAP: usize = 3;
const SECONDARY_REASON_CAP: usize = 2;

/// Per-genre accumulated points. Always carries exactly one entry per
/// catalog genre; iteration follows the catalog's natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard(BTreeMap<Genre, u32>);

impl ScoreBoard {
    pub fn new() -> Self {
        Self(Genre::ALL.iter().map(|genre| (*genre, 0)).collect())
    }

    fn add(&mut self, genre: Genre, points: u32) {
        if let Some(score) = self.0.get_mut(&genre) {
            *score += points;
        }
    }

    pub fn score(&self, genre: Genre) -> u32 {
        self.0.get(&genre).copied().unwrap_or(0)
    }

    /// Genres with their scores, highest first. The sort is stable, so
    /// equal scores keep the catalog's natural order.
    pub fn ranked(&self) -> Vec<(Genre, u32)> {
        let mut entries: Vec<(Genre, u32)> = self.0.iter().map(|(g, s)| (*g, *s)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks every answer against the fixed option domains.
///
/// Scoring itself tolerates unknown options (they add nothing); this is the
/// HTTP-facing guard that turns a malformed submission into a 400.
pub fn validate_answers(answers: &AnswerSet) -> AppResult<()> {
    for (question_id, option) in answers.entries() {
        let known = rules::QUESTIONS
            .iter()
            .find(|question| question.id == question_id)
            .map(|question| question.options.iter().any(|rule| rule.option == option))
            .unwrap_or(false);

        if !known {
            return Err(AppError::InvalidInput(format!(
                "'{}' 질문의 답변이 올바르지 않아요: {}",
                question_id, option
            )));
        }
    }
    Ok(())
}

/// Scores one quiz submission and derives the genre verdict.
///
/// The age band is deliberately absent here: it only sets a popularity
/// floor during assembly and never moves a score.
pub fn score(answers: &AnswerSet, mood: Option<Mood>) -> (ScoreBoard, GenreVerdict) {
    let mut board = ScoreBoard::new();
    let mut reason_pools: BTreeMap<Genre, Vec<&'static str>> =
        Genre::ALL.iter().map(|genre| (*genre, Vec::new())).collect();

    for (question_id, option) in answers.entries() {
        if let Some(signals) = rules::signals_for(question_id, option) {
            for (genre, points, reason) in signals {
                board.add(*genre, *points);
                if let Some(pool) = reason_pools.get_mut(genre) {
                    pool.push(*reason);
                }
            }
        }
    }

    if let Some(mood) = mood {
        let (genres, reason) = rules::mood_bonus(mood);
        for genre in genres {
            board.add(*genre, 1);
            if let Some(pool) = reason_pools.get_mut(genre) {
                pool.push(reason);
            }
        }
    }

    let ranked = board.ranked();
    let top_score = ranked[0].1;

    let tied: Vec<Genre> = ranked
        .iter()
        .filter(|(_, score)| *score == top_score)
        .map(|(genre, _)| *genre)
        .collect();
    let primary = resolve_tie(&tied).unwrap_or(ranked[0].0);

    // Surface a blended recommendation only when preferences are genuinely
    // close: second entry within 1 point of the top and above zero.
    let second_score = ranked[1].1;
    let mut secondary = None;
    if top_score - second_score <= 1 && second_score > 0 {
        let candidates: Vec<Genre> = ranked
            .iter()
            .filter(|(genre, score)| *score == second_score && *genre != primary)
            .map(|(genre, _)| *genre)
            .collect();
        if let Some(first) = candidates.first() {
            secondary = Some(resolve_tie(&candidates).unwrap_or(*first));
        }
    }

    let primary_reasons = uniq_take(&reason_pools[&primary], PRIMARY_REASON_CAP);
    let secondary_reasons = match secondary {
        Some(genre) => uniq_take(&reason_pools[&genre], SECONDARY_REASON_CAP),
        None => Vec::new(),
    };

    let verdict = GenreVerdict {
        primary,
        secondary,
        primary_reasons,
        secondary_reasons,
    };

    (board, verdict)
}

/// First tie-break entry present among the candidates wins.
fn resolve_tie(candidates: &[Genre]) -> Option<Genre> {
    rules::TIE_BREAK
        .iter()
        .find(|genre| candidates.contains(genre))
        .copied()
}

/// Deduplicates reasons preserving first occurrence, caps the list, and
/// substitutes the generic sentence for an empty pool.
fn uniq_take(pool: &[&'static str], cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for reason in pool {
        if !out.iter().any(|seen| seen == reason) {
            out.push((*reason).to_string());
        }
        if out.len() == cap {
            break;
        }
    }
    if out.is_empty() {
        out.push(rules::GENERIC_REASON.to_string());
    }
    out
}
