//! src/analyzers/mod.rs
//!
//! 文风分析引擎：分词、词频统计、风格分类、性格与世界观打分，
//! 以及把分析结果渲染成提示词描述。

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::library::SourceDocument;

pub mod ai;
pub mod cleaning;
pub mod describe;
pub mod lexical;
pub mod lexicon;
pub mod profile;
pub mod psychographic;
pub mod stylistic;
pub mod tokenizer;

pub use profile::{AiStyleProfile, AnalysisMethod, Profile, StyleProfile};
pub use psychographic::WorldviewThresholds;

/// 规则分析的可调参数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub top_keywords: usize,
    pub top_phrases: usize,
    pub thresholds: WorldviewThresholds,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_keywords: 20,
            top_phrases: 10,
            thresholds: WorldviewThresholds::default(),
        }
    }
}

/// 取出非空的样本正文。
pub fn usable_texts(sources: &[SourceDocument]) -> Vec<&str> {
    sources
        .iter()
        .map(|s| s.content.as_str())
        .filter(|c| !c.trim().is_empty())
        .collect()
}

/// 对文风库中的样本做规则分析。没有可用内容时返回 `None`。
pub fn analyze_writing_style(
    sources: &[SourceDocument],
    options: &AnalysisOptions,
) -> Option<StyleProfile> {
    analyze_texts(&usable_texts(sources), options)
}

/// 对一组文本做规则分析，各个维度相互独立，最后合并成一份画像。
pub fn analyze_texts(texts: &[&str], options: &AnalysisOptions) -> Option<StyleProfile> {
    let texts: Vec<&str> = texts
        .iter()
        .copied()
        .filter(|t| !t.trim().is_empty())
        .collect();
    if texts.is_empty() {
        debug!("没有可分析的文本，跳过规则分析");
        return None;
    }
    info!("开始规则分析，共 {} 篇样本", texts.len());

    let profile = StyleProfile {
        keywords: lexical::extract_keywords(&texts, options.top_keywords),
        common_phrases: lexical::extract_common_phrases(&texts, options.top_phrases),
        avg_sentence_length: lexical::calculate_avg_sentence_length(&texts),
        punctuation_style: lexical::analyze_punctuation(&texts),
        tone: stylistic::detect_tone(&texts),
        perspective: stylistic::analyze_perspective(&texts),
        complexity: stylistic::analyze_complexity(&texts),
        opening_patterns: stylistic::detect_opening_patterns(&texts),
        transitions: stylistic::analyze_transitions(&texts),
        personality: psychographic::analyze_personality(&texts),
        worldview: psychographic::analyze_worldview(&texts, &options.thresholds),
        cultural_taste: psychographic::analyze_cultural_taste(&texts),
        themes: psychographic::analyze_themes(&texts),
        total_words: texts.iter().map(|t| t.chars().count()).sum(),
        analyzed_at: Utc::now(),
    };
    Some(profile)
}

/// 唯一的最大值（且大于 0）对应的候选；并列或全为 0 时返回 `None`。
pub(crate) fn strict_max<T: Copy>(candidates: &[(T, usize)]) -> Option<T> {
    let max = candidates.iter().map(|(_, count)| *count).max()?;
    if max == 0 {
        return None;
    }
    let mut leaders = candidates.iter().filter(|(_, count)| *count == max);
    let first = leaders.next()?;
    match leaders.next() {
        Some(_) => None,
        None => Some(first.0),
    }
}

/// 百分比，保留一位小数；分母为 0 时为 0。
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}
