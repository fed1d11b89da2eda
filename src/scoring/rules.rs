use crate::models::{Genre, Mood};

/// A weighted genre signal attached to one answer option: the genre it
/// points at, the points it adds, and the justification shown to the user.
pub type Signal = (Genre, u32, &'static str);

/// One answer option and the signals it fires. Every option carries at
/// least one signal, which keeps the scorer total over the option domain.
pub struct AnswerRule {
    pub option: &'static str,
    pub signals: &'static [Signal],
}

/// One quiz question with its fixed four-option rule table.
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [AnswerRule],
}

/// Preference order for resolving equal scores. The first entry present in
/// a tied candidate set wins. Spans the whole catalog.
pub const TIE_BREAK: [Genre; 6] = [
    Genre::Drama,
    Genre::Romance,
    Genre::Action,
    Genre::SciFi,
    Genre::Fantasy,
    Genre::Comedy,
];

/// Fallback justification when a selected genre collected no reasons.
pub const GENERIC_REASON: &str = "당신의 답변 패턴이 이 장르 분위기와 잘 맞아요.";

pub const QUESTIONS: [Question; 5] = [
    Question {
        id: "q1",
        prompt: "1. 주말에 가장 하고 싶은 것은?",
        options: &[
            AnswerRule {
                option: "집에서 휴식",
                signals: &[
                    (Genre::Drama, 2, "주말엔 차분하게 쉬며 감정선 있는 이야기에 몰입하는 편이에요."),
                    (Genre::Romance, 1, "편안한 분위기의 관계 중심 스토리도 잘 맞아요."),
                ],
            },
            AnswerRule {
                option: "친구와 놀기",
                signals: &[(Genre::Comedy, 2, "사람들과 웃고 떠드는 에너지가 강해요.")],
            },
            AnswerRule {
                option: "새로운 곳 탐험",
                signals: &[
                    (Genre::Action, 2, "새로운 경험과 도전을 즐기는 편이에요."),
                    (Genre::Fantasy, 1, "낯선 세계를 탐험하는 설정에도 끌릴 수 있어요."),
                ],
            },
            AnswerRule {
                option: "혼자 취미생활",
                signals: &[
                    (Genre::SciFi, 2, "혼자 깊게 몰입할 수 있는 설정형 이야기가 잘 맞아요."),
                    (Genre::Fantasy, 1, "상상력 자극하는 세계관도 좋아할 가능성이 있어요."),
                ],
            },
        ],
    },
    Question {
        id: "q2",
        prompt: "2. 스트레스 받으면?",
        options: &[
            AnswerRule {
                option: "혼자 있기",
                signals: &[
                    (Genre::Drama, 2, "혼자만의 시간으로 감정을 정리하는 타입이에요."),
                    (Genre::SciFi, 1, "몰입감 있는 세계로 잠시 도피하는 것도 잘 맞아요."),
                ],
            },
            AnswerRule {
                option: "수다 떨기",
                signals: &[
                    (Genre::Comedy, 2, "대화와 웃음으로 스트레스를 푸는 편이에요."),
                    (Genre::Romance, 1, "사람 이야기 중심 장르에도 공감이 잘 가요."),
                ],
            },
            AnswerRule {
                option: "운동하기",
                signals: &[(Genre::Action, 2, "에너지와 속도감 있는 전개가 찰떡이에요.")],
            },
            AnswerRule {
                option: "맛있는 거 먹기",
                signals: &[
                    (Genre::Comedy, 2, "기분 전환은 '즐거움'이 중요한 편이에요."),
                    (Genre::Romance, 1, "소소한 행복을 담은 이야기에도 잘 끌려요."),
                ],
            },
        ],
    },
    Question {
        id: "q3",
        prompt: "3. 영화에서 중요한 것은?",
        options: &[
            AnswerRule {
                option: "감동 스토리",
                signals: &[
                    (Genre::Drama, 2, "여운이 남는 스토리를 중요하게 여겨요."),
                    (Genre::Romance, 1, "감정선이 탄탄한 영화가 잘 맞아요."),
                ],
            },
            AnswerRule {
                option: "시각적 영상미",
                signals: &[
                    (Genre::SciFi, 2, "스케일 큰 비주얼과 설정을 선호할 확률이 높아요."),
                    (Genre::Fantasy, 1, "환상적인 장면/세계관에 매력을 느껴요."),
                ],
            },
            AnswerRule {
                option: "깊은 메시지",
                signals: &[
                    (Genre::SciFi, 2, "'만약에?' 같은 질문을 던지는 작품을 좋아할 가능성이 커요."),
                    (Genre::Drama, 1, "현실을 비추는 묵직한 이야기에도 끌려요."),
                ],
            },
            AnswerRule {
                option: "웃는 재미",
                signals: &[(Genre::Comedy, 2, "재미와 웃음 포인트를 가장 중요하게 봐요.")],
            },
        ],
    },
    Question {
        id: "q4",
        prompt: "4. 여행 스타일?",
        options: &[
            AnswerRule {
                option: "계획적",
                signals: &[(Genre::Drama, 2, "차분하게 흐름을 따라가는 서사와 잘 맞아요.")],
            },
            AnswerRule {
                option: "즉흥적",
                signals: &[
                    (Genre::Romance, 2, "우연과 설렘이 있는 전개에 끌릴 가능성이 커요."),
                    (Genre::Comedy, 1, "즉흥에서 나오는 웃긴 상황도 좋아할 수 있어요."),
                ],
            },
            AnswerRule {
                option: "액티비티",
                signals: &[(Genre::Action, 2, "박진감 넘치는 전개를 선호할 가능성이 커요.")],
            },
            AnswerRule {
                option: "힐링",
                signals: &[
                    (Genre::Romance, 2, "따뜻하고 편안한 분위기의 영화가 잘 맞아요."),
                    (Genre::Drama, 1, "잔잔한 여운도 좋아할 수 있어요."),
                ],
            },
        ],
    },
    Question {
        id: "q5",
        prompt: "5. 친구 사이에서 나는?",
        options: &[
            AnswerRule {
                option: "듣는 역할",
                signals: &[
                    (Genre::Drama, 2, "인물의 감정과 관계를 세심하게 보는 편이에요."),
                    (Genre::Romance, 1, "관계 중심 이야기와도 잘 맞아요."),
                ],
            },
            AnswerRule {
                option: "주도하기",
                signals: &[(Genre::Action, 2, "주인공이 돌파하는 서사에 끌릴 가능성이 커요.")],
            },
            AnswerRule {
                option: "분위기 메이커",
                signals: &[(Genre::Comedy, 2, "유쾌한 에너지가 강해서 웃긴 영화가 찰떡이에요.")],
            },
            AnswerRule {
                option: "필요할 때 나타남",
                signals: &[
                    (Genre::SciFi, 2, "설정/반전/미스터리 요소에 끌릴 수 있어요."),
                    (Genre::Fantasy, 1, "숨겨진 능력/운명 같은 설정도 좋아할 수 있어요."),
                ],
            },
        ],
    },
];

/// Looks up the signals fired by one answer. Unknown question ids or
/// options return no signals; the scorer stays total either way.
pub fn signals_for(question_id: &str, option: &str) -> Option<&'static [Signal]> {
    QUESTIONS
        .iter()
        .find(|q| q.id == question_id)?
        .options
        .iter()
        .find(|rule| rule.option == option)
        .map(|rule| rule.signals)
}

/// Mood bonus table: the genres granted +1 and the reason appended to each.
pub fn mood_bonus(mood: Mood) -> (&'static [Genre], &'static str) {
    match mood {
        Mood::Flutter => (
            &[Genre::Romance, Genre::Comedy],
            "설레는 기분을 원해서 관계와 웃음이 있는 이야기에 가산점을 줬어요.",
        ),
        Mood::Thrill => (
            &[Genre::Action, Genre::SciFi],
            "긴장감을 원해서 속도감 있는 전개에 가산점을 줬어요.",
        ),
        Mood::Comfort => (
            &[Genre::Drama, Genre::Romance],
            "위로받고 싶은 기분이라 따뜻한 감정선에 가산점을 줬어요.",
        ),
        Mood::Excitement => (
            &[Genre::Comedy, Genre::Action],
            "신나는 기분을 원해서 에너지 넘치는 장르에 가산점을 줬어요.",
        ),
        Mood::Dreamy => (
            &[Genre::Fantasy, Genre::SciFi],
            "몽환적인 분위기를 원해서 상상력 자극 장르에 가산점을 줬어요.",
        ),
    }
}
