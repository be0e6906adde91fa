//! src/analyzers/stylistic.rs

use log::debug;

use super::lexical::split_sentences;
use super::lexicon::{
    CASUAL_WORDS, FIRST_PERSON, FORMAL_WORDS, HUMOROUS_WORDS, SECOND_PERSON, STATEMENT_OPENERS,
    STORY_OPENERS, THIRD_PERSON, TRANSITION_WORDS,
};
use super::profile::{
    Complexity, Diversity, KeywordCount, OpeningKind, OpeningPatterns, Person, Perspective, Tone,
};
use super::{percentage, strict_max};

/// 开头段落至少要有这么多字才参与统计。
const MIN_OPENING_PARAGRAPH_CHARS: usize = 20;
const OPENING_PARAGRAPHS_PER_TEXT: usize = 3;
const OPENING_EXAMPLE_CHARS: usize = 30;
const MAX_OPENING_EXAMPLES: usize = 3;
const TOP_TRANSITIONS: usize = 5;

/// 判断整体语气：哪一类关键词严格最多就是哪一类，否则为中性。
pub fn detect_tone(texts: &[&str]) -> Tone {
    let all_text = texts.join(" ");
    let casual = CASUAL_WORDS.count(&all_text);
    let formal = FORMAL_WORDS.count(&all_text);
    let humorous = HUMOROUS_WORDS.count(&all_text);
    debug!("语气计数: casual={casual}, formal={formal}, humorous={humorous}");

    strict_max(&[
        (Tone::Casual, casual),
        (Tone::Formal, formal),
        (Tone::Humorous, humorous),
    ])
    .unwrap_or(Tone::Neutral)
}

/// 人称分布。没有任何人称词时百分比全为 0，主导视角记为第三人称。
pub fn analyze_perspective(texts: &[&str]) -> Perspective {
    let all_text = texts.join(" ");
    let first = FIRST_PERSON.count(&all_text);
    let second = SECOND_PERSON.count(&all_text);
    let third = THIRD_PERSON.count(&all_text);
    let total = first + second + third;

    let candidates = [
        (Person::First, first),
        (Person::Second, second),
        (Person::Third, third),
    ];
    let dominant = if total == 0 {
        Person::Third
    } else {
        strict_max(&candidates).unwrap_or_else(|| {
            // 并列时取排在前面的人称
            let max = first.max(second).max(third);
            candidates
                .iter()
                .find(|(_, count)| *count == max)
                .map(|(person, _)| *person)
                .unwrap_or(Person::Third)
        })
    };

    Perspective {
        first_person_pct: percentage(first, total),
        second_person_pct: percentage(second, total),
        third_person_pct: percentage(third, total),
        dominant,
    }
}

/// 句式复杂度：按句内逗号、分号数量和句长把句子分成简单句、复合句、复杂句。
pub fn analyze_complexity(texts: &[&str]) -> Complexity {
    let all_text = texts.join(" ");
    let (mut simple, mut compound, mut complex) = (0usize, 0usize, 0usize);

    for sentence in split_sentences(&all_text) {
        let length = sentence.chars().count();
        if length <= 5 {
            continue;
        }
        let commas = sentence
            .chars()
            .filter(|c| matches!(c, '，' | ',' | '；' | ';'))
            .count();

        if length < 15 && commas == 0 {
            simple += 1;
        } else if commas >= 3 {
            complex += 1;
        } else {
            compound += 1;
        }
    }

    let total = simple + compound + complex;
    let diversity = if compound > simple && compound > complex {
        Diversity::Varied
    } else if complex > simple {
        Diversity::Complex
    } else {
        Diversity::Simple
    };

    Complexity {
        simple_pct: percentage(simple, total),
        compound_pct: percentage(compound, total),
        complex_pct: percentage(complex, total),
        diversity,
    }
}

fn first_sentence(paragraph: &str) -> &str {
    match paragraph
        .char_indices()
        .find(|(_, c)| matches!(c, '。' | '！' | '？' | '.' | '!' | '?'))
    {
        Some((i, c)) => &paragraph[..i + c.len_utf8()],
        None => paragraph,
    }
}

fn classify_opening(sentence: &str) -> Option<OpeningKind> {
    if sentence.contains('？') || sentence.contains('?') {
        Some(OpeningKind::Question)
    } else if STORY_OPENERS.iter().any(|m| sentence.starts_with(m)) {
        Some(OpeningKind::Story)
    } else if STATEMENT_OPENERS.iter().any(|m| sentence.starts_with(m)) {
        Some(OpeningKind::Statement)
    } else {
        None
    }
}

/// 统计每篇文章前几段的开头方式，并保留少量例句供提示词引用。
pub fn detect_opening_patterns(texts: &[&str]) -> OpeningPatterns {
    let mut patterns = OpeningPatterns::default();

    for text in texts {
        let paragraphs = text
            .split('\n')
            .map(str::trim)
            .filter(|p| p.chars().count() > MIN_OPENING_PARAGRAPH_CHARS)
            .take(OPENING_PARAGRAPHS_PER_TEXT);

        for paragraph in paragraphs {
            let sentence = first_sentence(paragraph);
            let Some(kind) = classify_opening(sentence) else {
                continue;
            };

            let (count, examples) = match kind {
                OpeningKind::Question => (&mut patterns.question, &mut patterns.examples.question),
                OpeningKind::Story => (&mut patterns.story, &mut patterns.examples.story),
                OpeningKind::Statement => {
                    (&mut patterns.statement, &mut patterns.examples.statement)
                }
            };
            *count += 1;
            if examples.len() < MAX_OPENING_EXAMPLES {
                examples.push(sentence.chars().take(OPENING_EXAMPLE_CHARS).collect());
            }
        }
    }

    patterns.dominant = strict_max(&[
        (OpeningKind::Question, patterns.question),
        (OpeningKind::Story, patterns.story),
        (OpeningKind::Statement, patterns.statement),
    ]);
    patterns
}

/// 常用过渡词，取出现次数最多的前五个。
pub fn analyze_transitions(texts: &[&str]) -> Vec<KeywordCount> {
    let all_text = texts.join(" ");
    let mut used: Vec<KeywordCount> = TRANSITION_WORDS
        .iter()
        .map(|word| KeywordCount {
            word: word.to_string(),
            count: all_text.matches(word).count(),
        })
        .filter(|kw| kw.count > 0)
        .collect();

    used.sort_by(|a, b| b.count.cmp(&a.count));
    used.truncate(TOP_TRANSITIONS);
    used
}
