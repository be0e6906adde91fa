//! src/analyzers/tokenizer.rs

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// 是否为 CJK 统一汉字（基本区）。
pub fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// 分词：中文按单字切分，其余按空白切分并转小写。
///
/// 含有汉字的片段只保留其中的汉字，附着的标点和字母会被丢弃。
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = WHITESPACE.replace_all(text, " ");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    for chunk in normalized.split(' ') {
        if contains_cjk(chunk) {
            tokens.extend(chunk.chars().filter(|c| is_cjk(*c)).map(String::from));
        } else {
            tokens.push(chunk.to_lowercase());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_chinese_into_characters() {
        assert_eq!(tokenize("今天天气"), vec!["今", "天", "天", "气"]);
    }

    #[test]
    fn lowercases_latin_words() {
        assert_eq!(tokenize("Hello   World"), vec!["hello", "world"]);
    }

    #[test]
    fn drops_punctuation_attached_to_chinese() {
        assert_eq!(tokenize("你好，world! 再见。"), vec!["你", "好", "再", "见"]);
        assert_eq!(tokenize("hello, 世界"), vec!["hello,", "世", "界"]);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn tokens_are_never_blank_and_never_outnumber_characters() {
        let samples = [
            "混合 mixed 文本 text，带标点！",
            "  leading and trailing  ",
            "中文English混写 123 ...",
            "a b c d e",
        ];
        for sample in samples {
            let tokens = tokenize(sample);
            assert!(tokens.iter().all(|t| !t.trim().is_empty()), "{sample}");
            assert!(tokens.len() <= sample.chars().count(), "{sample}");
        }
    }
}
