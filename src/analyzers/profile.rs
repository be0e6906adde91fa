//! src/analyzers/profile.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// --- 规则分析结果 ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseCount {
    pub phrase: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Formal,
    Humorous,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    First,
    Second,
    Third,
}

/// 人称分布，百分比保留一位小数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    pub first_person_pct: f64,
    pub second_person_pct: f64,
    pub third_person_pct: f64,
    pub dominant: Person,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diversity {
    Simple,
    Varied,
    Complex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complexity {
    pub simple_pct: f64,
    pub compound_pct: f64,
    pub complex_pct: f64,
    pub diversity: Diversity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Question,
    Story,
    Statement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningExamples {
    pub question: Vec<String>,
    pub story: Vec<String>,
    pub statement: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningPatterns {
    pub question: usize,
    pub story: usize,
    pub statement: usize,
    /// 严格最多的开头类型；并列或没有可识别的开头时为空。
    pub dominant: Option<OpeningKind>,
    pub examples: OpeningExamples,
}

/// 一个关键词差值维度：`score = positive - negative`，`label` 由符号（及阈值）决定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScore {
    pub positive: usize,
    pub negative: usize,
    pub score: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personality {
    pub extraversion: AxisScore,
    pub openness: AxisScore,
    pub conscientiousness: AxisScore,
    pub agreeableness: AxisScore,
    pub stability: AxisScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOrientation {
    pub past: usize,
    pub present: usize,
    pub future: usize,
    pub score: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worldview {
    pub life_attitude: AxisScore,
    pub value_orientation: AxisScore,
    pub relationship_view: AxisScore,
    pub time_orientation: TimeOrientation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalTaste {
    pub interests: Vec<CategoryScore>,
    pub topics: Vec<CategoryScore>,
    pub primary_interest: Option<String>,
    pub primary_topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Themes {
    pub ranked: Vec<CategoryScore>,
    pub dominant: String,
}

/// 规则分析得到的完整文风画像。每次分析都新建一份，之后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfile {
    pub keywords: Vec<KeywordCount>,
    pub common_phrases: Vec<PhraseCount>,
    pub avg_sentence_length: usize,
    pub punctuation_style: BTreeMap<String, usize>,
    pub tone: Tone,
    pub perspective: Perspective,
    pub complexity: Complexity,
    pub opening_patterns: OpeningPatterns,
    pub transitions: Vec<KeywordCount>,
    pub personality: Personality,
    pub worldview: Worldview,
    pub cultural_taste: CulturalTaste,
    pub themes: Themes,
    pub total_words: usize,
    pub analyzed_at: DateTime<Utc>,
}

// --- AI 分析结果 ---

/// 模型返回的文本字段。模型有时返回数字、数组或对象，这里统一压平成一段文字。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("、"),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k, flatten_value(v)))
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}：{}", k, v))
            .collect::<Vec<_>>()
            .join("；"),
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Text(flatten_value(&value)))
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// 模型返回的列表字段，也接受用顿号或逗号分隔的单个字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextList(pub Vec<String>);

impl TextList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let items = match &value {
            Value::Array(items) => items
                .iter()
                .map(flatten_value)
                .filter(|s| !s.is_empty())
                .collect(),
            Value::String(s) => s
                .split(['、', ',', '，', ';', '；', '\n'])
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect(),
            Value::Null => Vec::new(),
            other => vec![flatten_value(other)],
        };
        Ok(TextList(items))
    }
}

impl Serialize for TextList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// 标点习惯：规则分析得到的是各符号计数，AI 分析通常是一段描述。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunctuationStyle {
    Counts(BTreeMap<String, usize>),
    Description(String),
}

impl<'de> Deserialize<'de> for PunctuationStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Value::Object(map) = &value {
            let counts: Option<BTreeMap<String, usize>> = map
                .iter()
                .map(|(k, v)| v.as_u64().map(|n| (k.clone(), n as usize)))
                .collect();
            if let Some(counts) = counts {
                return Ok(PunctuationStyle::Counts(counts));
            }
        }
        Ok(PunctuationStyle::Description(flatten_value(&value)))
    }
}

impl Serialize for PunctuationStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PunctuationStyle::Counts(counts) => counts.serialize(serializer),
            PunctuationStyle::Description(text) => serializer.serialize_str(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiLanguageStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_sentence_length: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence_variety: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_level: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punctuation_style: Option<PunctuationStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiPerspective {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiPersonality {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraversion: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openness: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conscientiousness: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreeableness: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiWorldview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_attitude: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_orientation: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_view: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_orientation: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiCulturalTaste {
    pub interests: TextList,
    pub topics: TextList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiThemes {
    pub primary: TextList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiExpressionHabits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_style: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_style: Option<Text>,
    pub transitions: TextList,
    pub signature_phrases: TextList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence_patterns: Option<Text>,
}

/// 模型按约定 JSON 结构返回的分析内容。缺失的字段一律取默认值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiAnalysis {
    pub language_style: AiLanguageStyle,
    pub perspective: AiPerspective,
    pub personality: AiPersonality,
    pub worldview: AiWorldview,
    pub cultural_taste: AiCulturalTaste,
    pub themes: AiThemes,
    pub expression_habits: AiExpressionHabits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagery_system: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metaphor_style: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_structure: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rhythm_features: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_summary: Option<Text>,
    pub writing_guidance: TextList,
}

/// AI 分析画像：模型给出的分析，合并本地统计的关键词、短语和字数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStyleProfile {
    #[serde(flatten)]
    pub analysis: AiAnalysis,
    pub keywords: Vec<KeywordCount>,
    pub common_phrases: Vec<PhraseCount>,
    pub total_words: usize,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMethod {
    Regex,
    Ai,
}

impl fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMethod::Regex => write!(f, "regex"),
            AnalysisMethod::Ai => write!(f, "AI"),
        }
    }
}

/// 两种来源的文风画像。序列化时用 `analysisMethod` 字段区分。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analysisMethod")]
pub enum Profile {
    #[serde(rename = "regex")]
    Regex(StyleProfile),
    #[serde(rename = "AI")]
    Ai(AiStyleProfile),
}

impl Profile {
    pub fn method(&self) -> AnalysisMethod {
        match self {
            Profile::Regex(_) => AnalysisMethod::Regex,
            Profile::Ai(_) => AnalysisMethod::Ai,
        }
    }

    pub fn total_words(&self) -> usize {
        match self {
            Profile::Regex(p) => p.total_words,
            Profile::Ai(p) => p.total_words,
        }
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        match self {
            Profile::Regex(p) => p.analyzed_at,
            Profile::Ai(p) => p.analyzed_at,
        }
    }

    pub fn keywords(&self) -> &[KeywordCount] {
        match self {
            Profile::Regex(p) => &p.keywords,
            Profile::Ai(p) => &p.keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fields_accept_non_string_values() {
        let style: AiLanguageStyle = serde_json::from_str(
            r#"{"tone": ["口语化", "亲切"], "avgSentenceLength": 18, "vocabularyLevel": null}"#,
        )
        .unwrap();
        assert_eq!(style.tone, Some(Text("口语化、亲切".to_string())));
        assert_eq!(style.avg_sentence_length, Some(Text("18".to_string())));
        assert_eq!(style.vocabulary_level, None);
    }

    #[test]
    fn text_list_splits_plain_strings() {
        let list: TextList = serde_json::from_str(r#""但是、其实，所以""#).unwrap();
        assert_eq!(list.items(), ["但是", "其实", "所以"]);
    }

    #[test]
    fn punctuation_style_keeps_both_shapes() {
        let counts: PunctuationStyle = serde_json::from_str(r#"{"，": 12, "。": 4}"#).unwrap();
        assert!(matches!(counts, PunctuationStyle::Counts(ref m) if m["，"] == 12));

        let prose: PunctuationStyle = serde_json::from_str(r#""多用省略号""#).unwrap();
        assert_eq!(prose, PunctuationStyle::Description("多用省略号".to_string()));
    }
}
