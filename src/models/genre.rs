use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The fixed six-genre catalog supported by the quiz.
///
/// Variant order is the catalog's natural order; it decides the last-resort
/// winner when the tie-break list somehow produces no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "액션")]
    Action,
    #[serde(rename = "코미디")]
    Comedy,
    #[serde(rename = "드라마")]
    Drama,
    #[serde(rename = "SF")]
    SciFi,
    #[serde(rename = "로맨스")]
    Romance,
    #[serde(rename = "판타지")]
    Fantasy,
}

impl Genre {
    /// Every catalog genre, in natural order.
    pub const ALL: [Genre; 6] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::SciFi,
        Genre::Romance,
        Genre::Fantasy,
    ];

    /// TMDB genre identifier
    pub fn tmdb_id(&self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Comedy => 35,
            Genre::Drama => 18,
            Genre::SciFi => 878,
            Genre::Romance => 10749,
            Genre::Fantasy => 14,
        }
    }

    /// Human-readable label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Action => "액션",
            Genre::Comedy => "코미디",
            Genre::Drama => "드라마",
            Genre::SciFi => "SF",
            Genre::Romance => "로맨스",
            Genre::Fantasy => "판타지",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The scorer's final output: primary genre, optional secondary genre, and
/// the justification text for each. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreVerdict {
    pub primary: Genre,
    pub secondary: Option<Genre>,
    pub primary_reasons: Vec<String>,
    pub secondary_reasons: Vec<String>,
}

impl GenreVerdict {
    /// Selected genres in recommendation order: primary first, then the
    /// secondary when one was admitted.
    pub fn chosen_genres(&self) -> Vec<Genre> {
        let mut genres = vec![self.primary];
        if let Some(secondary) = self.secondary {
            genres.push(secondary);
        }
        genres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_ids_match_catalog() {
        assert_eq!(Genre::Action.tmdb_id(), 28);
        assert_eq!(Genre::Comedy.tmdb_id(), 35);
        assert_eq!(Genre::Drama.tmdb_id(), 18);
        assert_eq!(Genre::SciFi.tmdb_id(), 878);
        assert_eq!(Genre::Romance.tmdb_id(), 10749);
        assert_eq!(Genre::Fantasy.tmdb_id(), 14);
    }

    #[test]
    fn test_genre_serializes_as_label() {
        let json = serde_json::to_string(&Genre::Drama).unwrap();
        assert_eq!(json, "\"드라마\"");

        let parsed: Genre = serde_json::from_str("\"SF\"").unwrap();
        assert_eq!(parsed, Genre::SciFi);
    }

    #[test]
    fn test_chosen_genres_orders_primary_first() {
        let verdict = GenreVerdict {
            primary: Genre::Drama,
            secondary: Some(Genre::Romance),
            primary_reasons: vec![],
            secondary_reasons: vec![],
        };
        assert_eq!(verdict.chosen_genres(), vec![Genre::Drama, Genre::Romance]);

        let solo = GenreVerdict {
            primary: Genre::Comedy,
            secondary: None,
            primary_reasons: vec![],
            secondary_reasons: vec![],
        };
        assert_eq!(solo.chosen_genres(), vec![Genre::Comedy]);
    }
}
