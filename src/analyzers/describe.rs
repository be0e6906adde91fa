//! src/analyzers/describe.rs
//!
//! 把文风画像渲染成一段可以直接放进系统提示词的中文说明。

use std::collections::BTreeMap;

use super::profile::{
    AiStyleProfile, AxisScore, CategoryScore, Diversity, KeywordCount, OpeningKind, PhraseCount,
    Person, Profile, PunctuationStyle, StyleProfile, Text, Tone,
};
use super::psychographic::UNKNOWN_THEME;

const TOP_KEYWORDS: usize = 10;
const TOP_PHRASES: usize = 5;
const TOP_PUNCTUATION: usize = 5;
const SENTENCE_BAND: usize = 5;

struct Section {
    title: &'static str,
    lines: Vec<String>,
}

impl Section {
    fn new(title: &'static str) -> Self {
        Self { title, lines: Vec::new() }
    }

    fn line(&mut self, label: &str, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.lines.push(format!("{}：{}", label, value));
        }
    }

    fn text(&mut self, label: &str, value: &Option<Text>) {
        if let Some(value) = value {
            self.line(label, value.as_str());
        }
    }

    fn list(&mut self, label: &str, items: &[String]) {
        self.line(label, items.join("、"));
    }

    fn bullet(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.lines.push(value);
        }
    }
}

fn tone_phrase(tone: Tone) -> &'static str {
    match tone {
        Tone::Casual => "轻松随意",
        Tone::Formal => "正式严谨",
        Tone::Humorous => "幽默风趣",
        Tone::Neutral => "中性客观",
    }
}

fn person_phrase(person: Person) -> &'static str {
    match person {
        Person::First => "第一人称，以“我”的视角讲述，亲切真实",
        Person::Second => "第二人称，直接对读者说话，互动感强",
        Person::Third => "第三人称，旁观叙述，相对客观",
    }
}

fn person_name(person: Person) -> &'static str {
    match person {
        Person::First => "第一人称",
        Person::Second => "第二人称",
        Person::Third => "第三人称",
    }
}

fn diversity_phrase(diversity: Diversity) -> &'static str {
    match diversity {
        Diversity::Simple => "以简单短句为主，干脆利落",
        Diversity::Varied => "长短句交错，以复合句为主",
        Diversity::Complex => "多用结构繁复的长句",
    }
}

fn opening_phrase(kind: OpeningKind) -> &'static str {
    match kind {
        OpeningKind::Question => "常以提问开头，引发读者思考",
        OpeningKind::Story => "常以讲故事开头，从具体场景切入",
        OpeningKind::Statement => "常以观点陈述开头，开门见山",
    }
}

/// 性格与世界观标签的中文说法；未知标签原样输出。
fn trait_phrase(label: &str) -> &str {
    match label {
        "extraverted" => "外向开朗，乐于分享",
        "introverted" => "内向沉静，偏爱独处和内省",
        "open" => "思想开放，喜欢新鲜事物",
        "conservative" => "稳重保守，珍视传统",
        "conscientious" => "严谨有条理",
        "spontaneous" => "随性自在",
        "agreeable" => "温和友善，善解人意",
        "assertive" => "直率犀利，敢于批评",
        "stable" => "情绪平稳，从容淡定",
        "sensitive" => "情感细腻敏感",
        "optimistic" => "乐观积极",
        "pessimistic" => "略带悲观和忧郁",
        "realistic" => "现实理性",
        "idealistic" => "理想主义，追求意义",
        "pragmatic" => "务实，重视实际",
        "collective" => "重视亲情友情和集体关系",
        "individual" => "强调个人独立与自我",
        "past" => "常回望过去，怀旧",
        "present" => "关注当下",
        "future" => "面向未来，充满期待",
        "balanced" => "较为均衡",
        other => other,
    }
}

fn axis_line(section: &mut Section, label: &str, axis: &AxisScore) {
    section.line(label, trait_phrase(&axis.label));
}

fn keyword_list(keywords: &[KeywordCount]) -> Vec<String> {
    keywords
        .iter()
        .take(TOP_KEYWORDS)
        .map(|k| k.word.clone())
        .collect()
}

fn phrase_list(phrases: &[PhraseCount]) -> Vec<String> {
    phrases
        .iter()
        .take(TOP_PHRASES)
        .map(|p| p.phrase.clone())
        .collect()
}

fn category_list(categories: &[CategoryScore]) -> Vec<String> {
    categories.iter().map(|c| c.category.clone()).collect()
}

fn punctuation_counts(counts: &BTreeMap<String, usize>) -> String {
    let mut used: Vec<(&String, &usize)> = counts.iter().filter(|(_, n)| **n > 0).collect();
    used.sort_by(|a, b| b.1.cmp(a.1));
    used.iter()
        .take(TOP_PUNCTUATION)
        .map(|(mark, n)| format!("“{}” {} 次", mark, n))
        .collect::<Vec<_>>()
        .join("、")
}

fn punctuation_summary(style: &PunctuationStyle) -> String {
    match style {
        PunctuationStyle::Counts(counts) => punctuation_counts(counts),
        PunctuationStyle::Description(text) => text.clone(),
    }
}

/// 取文本里的第一个整数，如 “约 18 字” → 18。
fn leading_number(text: &str) -> Option<usize> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// 没有句子时（平均句长为 0）不给区间。
fn sentence_band(avg: usize) -> Option<String> {
    if avg == 0 {
        return None;
    }
    Some(format!(
        "句子长度控制在 {}–{} 字之间",
        avg.saturating_sub(SENTENCE_BAND).max(1),
        avg + SENTENCE_BAND
    ))
}

fn render(sections: Vec<Section>) -> String {
    let body = sections
        .into_iter()
        .filter(|s| !s.lines.is_empty())
        .map(|s| {
            let lines = s
                .lines
                .iter()
                .map(|l| format!("- {}", l))
                .collect::<Vec<_>>()
                .join("\n");
            format!("【{}】\n{}", s.title, lines)
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("写作风格特征：\n\n{}", body)
}

fn describe_regex(p: &StyleProfile) -> Vec<Section> {
    let mut language = Section::new("语言风格");
    language.line("语气", tone_phrase(p.tone));
    language.line("平均句长", format!("{} 字", p.avg_sentence_length));
    let c = &p.complexity;
    language.line(
        "句式",
        format!(
            "{}（简单句 {}%，复合句 {}%，复杂句 {}%）",
            diversity_phrase(c.diversity),
            c.simple_pct,
            c.compound_pct,
            c.complex_pct
        ),
    );
    language.line("常用标点", punctuation_counts(&p.punctuation_style));
    language.line("总字数", format!("{} 字", p.total_words));

    let mut perspective = Section::new("叙事视角");
    let v = &p.perspective;
    perspective.line("主要视角", person_phrase(v.dominant));
    perspective.line(
        "人称分布",
        format!(
            "第一人称 {}%，第二人称 {}%，第三人称 {}%",
            v.first_person_pct, v.second_person_pct, v.third_person_pct
        ),
    );

    let mut habits = Section::new("表达习惯");
    if let Some(kind) = p.opening_patterns.dominant {
        habits.line("开头方式", opening_phrase(kind));
    }
    habits.list(
        "常用过渡词",
        &p.transitions.iter().map(|t| t.word.clone()).collect::<Vec<_>>(),
    );
    habits.list("常用词汇", &keyword_list(&p.keywords));
    habits.list("常用短语", &phrase_list(&p.common_phrases));

    let mut personality = Section::new("性格特征");
    let traits = &p.personality;
    axis_line(&mut personality, "社交倾向", &traits.extraversion);
    axis_line(&mut personality, "开放程度", &traits.openness);
    axis_line(&mut personality, "做事风格", &traits.conscientiousness);
    axis_line(&mut personality, "待人态度", &traits.agreeableness);
    axis_line(&mut personality, "情绪状态", &traits.stability);

    let mut worldview = Section::new("世界观");
    let w = &p.worldview;
    axis_line(&mut worldview, "人生态度", &w.life_attitude);
    axis_line(&mut worldview, "价值取向", &w.value_orientation);
    axis_line(&mut worldview, "人际关系", &w.relationship_view);
    worldview.line("时间取向", trait_phrase(&w.time_orientation.label));

    let mut taste = Section::new("文化趣味与主题");
    taste.list("文化兴趣", &category_list(&p.cultural_taste.interests));
    taste.list("话题偏好", &category_list(&p.cultural_taste.topics));
    if p.themes.dominant != UNKNOWN_THEME {
        taste.line("核心主题", &p.themes.dominant);
        taste.list("主题排名", &category_list(&p.themes.ranked));
    }

    let mut guidance = Section::new("模仿要点");
    if let Some(band) = sentence_band(p.avg_sentence_length) {
        guidance.bullet(band);
    }
    guidance.bullet(format!("整体语气保持{}", tone_phrase(p.tone)));
    guidance.bullet(format!("以{}为主", person_name(v.dominant)));
    let examples = &p.opening_patterns.examples;
    let samples: Vec<String> = examples
        .question
        .iter()
        .chain(&examples.story)
        .chain(&examples.statement)
        .map(|e| format!("“{}”", e))
        .collect();
    if !samples.is_empty() {
        guidance.bullet(format!("开头可以参考：{}", samples.join(" ")));
    }
    let favourite = keyword_list(&p.keywords);
    if !favourite.is_empty() {
        guidance.bullet(format!(
            "适当使用作者常用的词：{}",
            favourite.iter().take(3).cloned().collect::<Vec<_>>().join("、")
        ));
    }

    vec![language, perspective, habits, personality, worldview, taste, guidance]
}

fn ai_perspective(dominant: &str) -> &str {
    match dominant.trim().to_lowercase().as_str() {
        "first" => person_phrase(Person::First),
        "second" => person_phrase(Person::Second),
        "third" => person_phrase(Person::Third),
        _ => dominant,
    }
}

fn describe_ai(p: &AiStyleProfile) -> Vec<Section> {
    let a = &p.analysis;

    let mut language = Section::new("语言风格");
    let style = &a.language_style;
    language.text("语气", &style.tone);
    let avg = style
        .avg_sentence_length
        .as_ref()
        .and_then(|t| leading_number(t.as_str()));
    match avg {
        Some(n) => language.line("平均句长", format!("{} 字", n)),
        None => language.text("平均句长", &style.avg_sentence_length),
    }
    language.text("句式", &style.sentence_variety);
    language.text("用词", &style.vocabulary_level);
    if let Some(punctuation) = &style.punctuation_style {
        language.line("标点习惯", punctuation_summary(punctuation));
    }
    language.line("总字数", format!("{} 字", p.total_words));

    let mut perspective = Section::new("叙事视角");
    if let Some(dominant) = &a.perspective.dominant {
        perspective.line("主要视角", ai_perspective(dominant.as_str()));
    }
    perspective.text("视角特点", &a.perspective.description);

    let mut habits = Section::new("表达习惯");
    let h = &a.expression_habits;
    habits.text("开头方式", &h.opening_style);
    habits.text("结尾方式", &h.ending_style);
    habits.list("常用过渡词", h.transitions.items());
    habits.list("标志性表达", h.signature_phrases.items());
    habits.text("惯用句式", &h.sentence_patterns);
    habits.list("常用词汇", &keyword_list(&p.keywords));
    habits.list("常用短语", &phrase_list(&p.common_phrases));

    let mut personality = Section::new("性格特征");
    let traits = &a.personality;
    personality.text("社交倾向", &traits.extraversion);
    personality.text("开放程度", &traits.openness);
    personality.text("做事风格", &traits.conscientiousness);
    personality.text("待人态度", &traits.agreeableness);
    personality.text("情绪状态", &traits.stability);
    personality.text("概括", &traits.summary);

    let mut worldview = Section::new("世界观");
    let w = &a.worldview;
    worldview.text("人生态度", &w.life_attitude);
    worldview.text("价值取向", &w.value_orientation);
    worldview.text("人际关系", &w.relationship_view);
    worldview.text("时间取向", &w.time_orientation);
    worldview.text("概括", &w.summary);

    let mut taste = Section::new("文化趣味与主题");
    taste.list("文化兴趣", a.cultural_taste.interests.items());
    taste.list("话题偏好", a.cultural_taste.topics.items());
    taste.text("趣味特点", &a.cultural_taste.description);
    taste.list("核心主题", a.themes.primary.items());
    taste.text("主题特点", &a.themes.description);

    let mut literary = Section::new("文学特征");
    literary.text("意象体系", &a.imagery_system);
    literary.text("比喻风格", &a.metaphor_style);
    literary.text("情感基调", &a.emotional_tone);
    literary.text("叙事结构", &a.narrative_structure);
    literary.text("语言节奏", &a.rhythm_features);
    literary.text("整体风格", &a.overall_summary);

    let mut guidance = Section::new("模仿要点");
    if let Some(band) = avg.and_then(sentence_band) {
        guidance.bullet(band);
    }
    for item in a.writing_guidance.items() {
        guidance.bullet(item.clone());
    }

    vec![
        language,
        perspective,
        habits,
        personality,
        worldview,
        taste,
        literary,
        guidance,
    ]
}

/// 生成文风描述。输出只取决于画像内容，缺失的字段直接跳过。
pub fn generate_style_description(profile: &Profile) -> String {
    let sections = match profile {
        Profile::Regex(p) => describe_regex(p),
        Profile::Ai(p) => describe_ai(p),
    };
    render(sections)
}
