//! src/analyzers/ai.rs
//!
//! 让大模型按固定 JSON 结构分析样本，再合并本地统计的关键词和短语。

use chrono::Utc;
use log::{debug, info, warn};

use super::lexical::{extract_common_phrases, extract_keywords};
use super::profile::{AiAnalysis, AiStyleProfile};
use super::usable_texts;
use crate::errors::StyleError;
use crate::library::SourceDocument;
use crate::llm::{ChatMessage, GenerationParams, LLMClient};

const SEGMENT_SEPARATOR: &str = "\n……\n";

#[derive(Debug, Clone, PartialEq)]
pub struct AiAnalysisOptions {
    /// 直接嵌入提示词的样本字符上限，超出后改为分段抽样。
    pub char_budget: usize,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_keywords: usize,
    pub top_phrases: usize,
}

impl Default for AiAnalysisOptions {
    fn default() -> Self {
        Self {
            char_budget: 100_000,
            temperature: 0.3,
            max_tokens: 4000,
            top_keywords: 20,
            top_phrases: 10,
        }
    }
}

pub const ANALYSIS_SYSTEM_PROMPT: &str = "你是一位资深的文学评论家和写作风格分析师，擅长从文本中提炼作者的语言习惯、\
思维方式和精神气质。你只输出合法的 JSON，不输出任何其他内容。";

const ANALYSIS_SCHEMA: &str = r#"{
  "languageStyle": {
    "tone": "整体语气，如：口语化、正式、幽默、冷静克制",
    "avgSentenceLength": "平均句长（字数），给出一个数字",
    "sentenceVariety": "句式特点：长短句搭配、排比、设问等",
    "vocabularyLevel": "用词层次：日常、书面、专业、古雅",
    "punctuationStyle": "标点使用习惯"
  },
  "perspective": {
    "dominant": "first / second / third",
    "description": "叙事视角的特点"
  },
  "personality": {
    "extraversion": "外向或内向，附简短依据",
    "openness": "开放或保守",
    "conscientiousness": "严谨或随性",
    "agreeableness": "温和或犀利",
    "stability": "情绪稳定或敏感",
    "summary": "一句话概括作者性格"
  },
  "worldview": {
    "lifeAttitude": "乐观 / 悲观 / 现实",
    "valueOrientation": "理想主义 / 实用主义 / 平衡",
    "relationshipView": "重视集体关系还是个人独立",
    "timeOrientation": "更关注过去、现在还是未来",
    "summary": "一句话概括作者的世界观"
  },
  "culturalTaste": {
    "interests": ["文化兴趣，如电影、文学、音乐"],
    "topics": ["偏好的话题领域"],
    "description": "文化趣味描述"
  },
  "themes": {
    "primary": ["主要主题"],
    "description": "主题特点"
  },
  "expressionHabits": {
    "openingStyle": "开头方式",
    "endingStyle": "结尾方式",
    "transitions": ["常用过渡词"],
    "signaturePhrases": ["标志性表达"],
    "sentencePatterns": "惯用句式"
  },
  "imagerySystem": "意象体系：常用的意象及其象征",
  "metaphorStyle": "比喻和修辞的风格",
  "emotionalTone": "情感基调与浓度",
  "narrativeStructure": "叙事结构与谋篇方式",
  "rhythmFeatures": "语言节奏与韵律",
  "overallSummary": "150 字以内的整体风格总结",
  "writingGuidance": ["模仿该风格写作时需要注意的要点，5 到 8 条"]
}"#;

fn truncate_chars(text: &str, start: usize, len: usize) -> String {
    text.chars().skip(start).take(len).collect()
}

/// 超长文章取开头、中间、结尾三段。
fn sample_segments(text: &str, budget: usize) -> String {
    let total = text.chars().count();
    if total <= budget {
        return text.to_string();
    }
    let segment = budget / 3;
    let middle_start = (total - segment) / 2;
    [
        truncate_chars(text, 0, segment),
        truncate_chars(text, middle_start, segment),
        truncate_chars(text, total - segment, segment),
    ]
    .join(SEGMENT_SEPARATOR)
}

/// 把样本嵌入分析提示词。总字数超过 `char_budget` 时，预算按篇平均分配，
/// 每篇超出部分只保留首、中、尾三段。
pub fn build_analysis_prompt(texts: &[&str], char_budget: usize) -> String {
    let total: usize = texts.iter().map(|t| t.chars().count()).sum();
    let sampled = total > char_budget && !texts.is_empty();
    let per_text = char_budget / texts.len().max(1);

    let body = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let content = if sampled {
                sample_segments(text, per_text)
            } else {
                text.to_string()
            };
            format!("【样本 {}】\n{}", i + 1, content)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let note = if sampled {
        format!(
            "（样本总计 {} 字，超出篇幅限制，以下为每篇的开头、中间和结尾片段。）\n\n",
            total
        )
    } else {
        String::new()
    };

    format!(
        "请深入分析以下 {} 篇写作样本，提炼作者的写作风格、性格特征和世界观。\n\
         {}{}\n\n\
         请严格按照下面的 JSON 结构返回分析结果，字段名保持不变，不要输出 JSON 以外的任何文字：\n{}",
        texts.len(),
        note,
        body,
        ANALYSIS_SCHEMA
    )
}

/// 去掉模型回复外层的 ``` 或 ```json 代码块标记。
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // 开头一行是语言标记
    let rest = match rest.find('\n') {
        Some(pos) if !rest[..pos].trim_start().starts_with(['{', '[']) => &rest[pos + 1..],
        Some(_) => rest,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    rest.trim()
}

pub fn parse_ai_response(response: &str) -> Result<AiAnalysis, StyleError> {
    let json = strip_code_fence(response);
    serde_json::from_str(json).map_err(|source| {
        warn!("AI 返回的内容不是合法的 JSON: {}", source);
        StyleError::MalformedResponse {
            source,
            raw: response.to_string(),
        }
    })
}

/// 调用大模型分析文风，只发送一次请求，失败直接返回错误。
pub async fn analyze_with_ai(
    client: &dyn LLMClient,
    sources: &[SourceDocument],
    options: &AiAnalysisOptions,
) -> Result<AiStyleProfile, StyleError> {
    let texts = usable_texts(sources);
    if texts.is_empty() {
        return Err(StyleError::EmptyInput);
    }

    let prompt = build_analysis_prompt(&texts, options.char_budget);
    info!(
        "使用 {} 进行 AI 文风分析，共 {} 篇样本，提示词 {} 字",
        client.name(),
        texts.len(),
        prompt.chars().count()
    );

    let messages = [
        ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ];
    let params = GenerationParams {
        temperature: options.temperature,
        max_tokens: options.max_tokens,
    };
    let response = client.chat(&messages, &params).await?;
    debug!("AI 分析原始回复: {}", response);

    let analysis = parse_ai_response(&response)?;
    Ok(AiStyleProfile {
        analysis,
        keywords: extract_keywords(&texts, options.top_keywords),
        common_phrases: extract_common_phrases(&texts, options.top_phrases),
        total_words: texts.iter().map(|t| t.chars().count()).sum(),
        analyzed_at: Utc::now(),
    })
}
