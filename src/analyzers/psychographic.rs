//! src/analyzers/psychographic.rs
//!
//! 性格、世界观、文化趣味和主题。全部是关键词计数差值或排名，属于启发式判断。

use log::debug;
use serde::{Deserialize, Serialize};

use super::lexicon::{
    AxisLexicon, CategoryLexicon, AGREEABLENESS, CONSCIENTIOUSNESS, CULTURAL_INTERESTS,
    EXTRAVERSION, FUTURE_WORDS, LIFE_ATTITUDE, OPENNESS, PAST_WORDS, PRESENT_WORDS,
    RELATIONSHIP_VIEW, STABILITY, THEMES, TOPIC_PREFERENCES, VALUE_ORIENTATION,
};
use super::profile::{
    AxisScore, CategoryScore, CulturalTaste, Personality, Themes, TimeOrientation, Worldview,
};

const TOP_THEMES: usize = 5;
pub const UNKNOWN_THEME: &str = "unknown";

/// 三态世界观维度的判定倍数：胜出一方的命中数必须超过另一方的这个倍数，
/// 否则记为中间态，避免小样本下的误判。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldviewThresholds {
    pub life_attitude_ratio: f64,
    pub value_orientation_ratio: f64,
    pub time_orientation_ratio: f64,
}

impl Default for WorldviewThresholds {
    fn default() -> Self {
        Self {
            life_attitude_ratio: 1.5,
            value_orientation_ratio: 1.2,
            time_orientation_ratio: 1.5,
        }
    }
}

struct Labels {
    positive: &'static str,
    negative: &'static str,
    neutral: &'static str,
}

fn counts(lexicon: &AxisLexicon, text: &str) -> (usize, usize) {
    (lexicon.positive.count(text), lexicon.negative.count(text))
}

fn axis(positive: usize, negative: usize, label: &str) -> AxisScore {
    AxisScore {
        positive,
        negative,
        score: positive as i64 - negative as i64,
        label: label.to_string(),
    }
}

/// 按差值符号取标签。
fn bipolar(lexicon: &AxisLexicon, text: &str, labels: Labels) -> AxisScore {
    let (positive, negative) = counts(lexicon, text);
    let label = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => labels.positive,
        std::cmp::Ordering::Less => labels.negative,
        std::cmp::Ordering::Equal => labels.neutral,
    };
    axis(positive, negative, label)
}

/// 胜出一方必须超过另一方 `ratio` 倍才取其标签。
fn tri_state(lexicon: &AxisLexicon, text: &str, ratio: f64, labels: Labels) -> AxisScore {
    let (positive, negative) = counts(lexicon, text);
    let label = if positive as f64 > negative as f64 * ratio {
        labels.positive
    } else if negative as f64 > positive as f64 * ratio {
        labels.negative
    } else {
        labels.neutral
    };
    axis(positive, negative, label)
}

pub fn analyze_personality(texts: &[&str]) -> Personality {
    let all_text = texts.join(" ");
    let personality = Personality {
        extraversion: bipolar(
            &EXTRAVERSION,
            &all_text,
            Labels { positive: "extraverted", negative: "introverted", neutral: "balanced" },
        ),
        openness: bipolar(
            &OPENNESS,
            &all_text,
            Labels { positive: "open", negative: "conservative", neutral: "balanced" },
        ),
        conscientiousness: bipolar(
            &CONSCIENTIOUSNESS,
            &all_text,
            Labels { positive: "conscientious", negative: "spontaneous", neutral: "balanced" },
        ),
        agreeableness: bipolar(
            &AGREEABLENESS,
            &all_text,
            Labels { positive: "agreeable", negative: "assertive", neutral: "balanced" },
        ),
        stability: bipolar(
            &STABILITY,
            &all_text,
            Labels { positive: "stable", negative: "sensitive", neutral: "balanced" },
        ),
    };
    debug!("性格维度: {:?}", personality);
    personality
}

fn time_orientation(text: &str, ratio: f64) -> TimeOrientation {
    let past = PAST_WORDS.count(text);
    let present = PRESENT_WORDS.count(text);
    let future = FUTURE_WORDS.count(text);

    let mut ranked = [("past", past), ("present", present), ("future", future)];
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let (leader, top) = ranked[0];
    let runner_up = ranked[1].1;

    let label = if top > 0 && top as f64 > runner_up as f64 * ratio {
        leader
    } else {
        "present"
    };

    TimeOrientation {
        past,
        present,
        future,
        score: future as i64 - past as i64,
        label: label.to_string(),
    }
}

pub fn analyze_worldview(texts: &[&str], thresholds: &WorldviewThresholds) -> Worldview {
    let all_text = texts.join(" ");

    let (related, independent) = counts(&RELATIONSHIP_VIEW, &all_text);
    let relationship_view = axis(
        related,
        independent,
        if related > independent { "collective" } else { "individual" },
    );

    Worldview {
        life_attitude: tri_state(
            &LIFE_ATTITUDE,
            &all_text,
            thresholds.life_attitude_ratio,
            Labels { positive: "optimistic", negative: "pessimistic", neutral: "realistic" },
        ),
        value_orientation: tri_state(
            &VALUE_ORIENTATION,
            &all_text,
            thresholds.value_orientation_ratio,
            Labels { positive: "idealistic", negative: "pragmatic", neutral: "balanced" },
        ),
        relationship_view,
        time_orientation: time_orientation(&all_text, thresholds.time_orientation_ratio),
    }
}

/// 按命中次数给类别排序，去掉零分类别；并列时保持词表顺序。
fn rank(categories: &[CategoryLexicon], text: &str) -> Vec<CategoryScore> {
    let mut ranked: Vec<CategoryScore> = categories
        .iter()
        .map(|c| CategoryScore {
            category: c.name.to_string(),
            score: c.keywords.count(text),
        })
        .filter(|c| c.score > 0)
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

pub fn analyze_cultural_taste(texts: &[&str]) -> CulturalTaste {
    let all_text = texts.join(" ");
    let interests = rank(&CULTURAL_INTERESTS, &all_text);
    let topics = rank(&TOPIC_PREFERENCES, &all_text);

    CulturalTaste {
        primary_interest: interests.first().map(|c| c.category.clone()),
        primary_topic: topics.first().map(|c| c.category.clone()),
        interests,
        topics,
    }
}

pub fn analyze_themes(texts: &[&str]) -> Themes {
    let all_text = texts.join(" ");
    let mut ranked = rank(&THEMES, &all_text);
    ranked.truncate(TOP_THEMES);

    Themes {
        dominant: ranked
            .first()
            .map(|c| c.category.clone())
            .unwrap_or_else(|| UNKNOWN_THEME.to_string()),
        ranked,
    }
}
