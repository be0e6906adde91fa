//! src/analyzers/lexical.rs

use std::collections::{BTreeMap, HashMap};

use super::lexicon::STOP_WORDS;
use super::profile::{KeywordCount, PhraseCount};
use super::tokenizer::{contains_cjk, tokenize};

/// 句子分隔符：中文句末标点、英文句末标点以及换行。
pub const SENTENCE_DELIMITERS: &[char] = &['。', '！', '？', '\n', '.', '!', '?'];

/// 统计的标点符号，结果中始终包含全部符号。
pub const PUNCTUATION_MARKS: &[char] = &[
    '。', '！', '？', '，', '；', '：', '.', '!', '?', ',', ';', ':', '、', '…', '—', '\u{201C}',
    '\u{201D}', '\u{2018}', '\u{2019}',
];

/// 按句末标点和换行切分句子，去掉首尾空白并丢弃空句。
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_DELIMITERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 计数并保留首次出现的顺序，供稳定排序打破并列。
fn count_in_order<I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts
}

fn top_by_count(mut counts: Vec<(String, usize)>, top_n: usize) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);
    counts
}

/// 基于词频提取关键词，并列时按首次出现的顺序排列。
pub fn extract_keywords(texts: &[&str], top_n: usize) -> Vec<KeywordCount> {
    let all_text = texts.join(" ");
    let tokens = tokenize(&all_text)
        .into_iter()
        .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(t.as_str()));

    top_by_count(count_in_order(tokens), top_n)
        .into_iter()
        .map(|(word, count)| KeywordCount { word, count })
        .collect()
}

fn sentence_phrases(sentence: &str, out: &mut Vec<String>) {
    if contains_cjk(sentence) {
        let chars: Vec<char> = sentence.chars().collect();
        for i in 0..chars.len().saturating_sub(1) {
            for len in 2..=3 {
                if i + len > chars.len() {
                    break;
                }
                let phrase: String = chars[i..i + len].iter().collect();
                if phrase.trim().chars().count() == len {
                    out.push(phrase);
                }
            }
        }
    } else {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        for i in 0..words.len().saturating_sub(1) {
            for len in 2..=3 {
                if i + len > words.len() {
                    break;
                }
                out.push(words[i..i + len].join(" "));
            }
        }
    }
}

/// 提取出现至少两次的 2–3 字（词）短语。
pub fn extract_common_phrases(texts: &[&str], top_n: usize) -> Vec<PhraseCount> {
    let all_text = texts.join(" ");
    let mut phrases = Vec::new();
    for sentence in split_sentences(&all_text) {
        sentence_phrases(sentence, &mut phrases);
    }

    let repeated: Vec<(String, usize)> = count_in_order(phrases)
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .collect();

    top_by_count(repeated, top_n)
        .into_iter()
        .map(|(phrase, count)| PhraseCount { phrase, count })
        .collect()
}

/// 平均句长（字符数，四舍五入）。没有句子时为 0。
pub fn calculate_avg_sentence_length(texts: &[&str]) -> usize {
    let all_text = texts.join(" ");
    let sentences = split_sentences(&all_text);
    if sentences.is_empty() {
        return 0;
    }

    let total: usize = sentences.iter().map(|s| s.chars().count()).sum();
    (total as f64 / sentences.len() as f64).round() as usize
}

/// 各标点符号的出现次数。
pub fn analyze_punctuation(texts: &[&str]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = PUNCTUATION_MARKS
        .iter()
        .map(|c| (c.to_string(), 0))
        .collect();

    for text in texts {
        for c in text.chars().filter(|c| PUNCTUATION_MARKS.contains(c)) {
            *counts.entry(c.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
