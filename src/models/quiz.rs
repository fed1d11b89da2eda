use serde::{Deserialize, Serialize};

/// One quiz submission: the chosen option label for each of the five fixed
/// questions. Produced once per user interaction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub q1: String,
    pub q2: String,
    pub q3: String,
    pub q4: String,
    pub q5: String,
}

impl AnswerSet {
    /// Answers paired with their question identifiers, in evaluation order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("q1", self.q1.as_str()),
            ("q2", self.q2.as_str()),
            ("q3", self.q3.as_str()),
            ("q4", self.q4.as_str()),
            ("q5", self.q5.as_str()),
        ]
    }
}

/// "How do you want to feel" modifier. Adds a small bonus to a fixed set of
/// genres; never changes which questions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "설렘")]
    Flutter,
    #[serde(rename = "긴장감")]
    Thrill,
    #[serde(rename = "위로")]
    Comfort,
    #[serde(rename = "신남")]
    Excitement,
    #[serde(rename = "몽환")]
    Dreamy,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Flutter,
        Mood::Thrill,
        Mood::Comfort,
        Mood::Excitement,
        Mood::Dreamy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Flutter => "설렘",
            Mood::Thrill => "긴장감",
            Mood::Comfort => "위로",
            Mood::Excitement => "신남",
            Mood::Dreamy => "몽환",
        }
    }
}

/// Viewer age band. Only sets a popularity floor for discovery results;
/// it never contributes to genre scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "10대")]
    Teens,
    #[serde(rename = "20대")]
    Twenties,
    #[serde(rename = "30대")]
    Thirties,
    #[serde(rename = "40대 이상")]
    FortiesPlus,
}

impl AgeBand {
    pub const ALL: [AgeBand; 4] = [
        AgeBand::Teens,
        AgeBand::Twenties,
        AgeBand::Thirties,
        AgeBand::FortiesPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Teens => "10대",
            AgeBand::Twenties => "20대",
            AgeBand::Thirties => "30대",
            AgeBand::FortiesPlus => "40대 이상",
        }
    }

    /// Minimum TMDB popularity a candidate must carry to be shown to this
    /// age band. Younger viewers get more mainstream entry points.
    pub fn popularity_floor(&self) -> f64 {
        match self {
            AgeBand::Teens => 30.0,
            AgeBand::Twenties => 10.0,
            AgeBand::Thirties => 5.0,
            AgeBand::FortiesPlus => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_set_deserializes_from_question_keys() {
        let json = r#"{
            "q1": "집에서 휴식",
            "q2": "혼자 있기",
            "q3": "감동 스토리",
            "q4": "계획적",
            "q5": "듣는 역할"
        }"#;

        let answers: AnswerSet = serde_json::from_str(json).unwrap();
        assert_eq!(answers.q1, "집에서 휴식");
        assert_eq!(answers.entries()[4], ("q5", "듣는 역할"));
    }

    #[test]
    fn test_mood_deserializes_from_label() {
        let mood: Mood = serde_json::from_str("\"위로\"").unwrap();
        assert_eq!(mood, Mood::Comfort);
        assert_eq!(mood.label(), "위로");
    }

    #[test]
    fn test_age_band_floor_is_monotonic() {
        assert!(AgeBand::Teens.popularity_floor() > AgeBand::Twenties.popularity_floor());
        assert!(AgeBand::Twenties.popularity_floor() > AgeBand::Thirties.popularity_floor());
        assert_eq!(AgeBand::FortiesPlus.popularity_floor(), 0.0);
    }
}
