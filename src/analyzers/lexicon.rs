//! src/analyzers/lexicon.rs
//!
//! 各分析维度使用的固定词表。所有词表在首次使用时编译一次，之后只读共享。

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// 一组关键词编译成的单个正则，用于统计命中次数。
///
/// 长词排在前面，保证 "我们" 不会被拆成 "我" 计数；纯 ASCII 词加单词边界。
pub struct KeywordSet {
    regex: Regex,
}

impl KeywordSet {
    pub fn new(words: &[&str]) -> Self {
        let mut sorted: Vec<&str> = words.to_vec();
        sorted.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

        let alternatives: Vec<String> = sorted
            .iter()
            .map(|word| {
                let escaped = regex::escape(word);
                if word.is_ascii() {
                    format!(r"\b{}\b", escaped)
                } else {
                    escaped
                }
            })
            .collect();

        let pattern = format!("(?i)(?:{})", alternatives.join("|"));
        Self {
            regex: Regex::new(&pattern).expect("valid keyword pattern"),
        }
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// 双极维度：正向词表与反向词表。
pub struct AxisLexicon {
    pub positive: KeywordSet,
    pub negative: KeywordSet,
}

impl AxisLexicon {
    fn new(positive: &[&str], negative: &[&str]) -> Self {
        Self {
            positive: KeywordSet::new(positive),
            negative: KeywordSet::new(negative),
        }
    }
}

/// 排名类维度中的一个类别。
pub struct CategoryLexicon {
    pub name: &'static str,
    pub keywords: KeywordSet,
}

type CategoryTable = &'static [(&'static str, &'static [&'static str])];

fn categories(table: CategoryTable) -> Vec<CategoryLexicon> {
    table
        .iter()
        .map(|&(name, words)| CategoryLexicon {
            name,
            keywords: KeywordSet::new(words),
        })
        .collect()
}

/// 关键词统计时忽略的高频虚词和网页噪声词。
const STOP_WORD_LIST: &[&str] = &[
    // 中文
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
    "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这", "那",
    "他", "她", "它", "们", "个", "么", "吗", "吧", "呢", "啊", "把", "被", "让", "给", "从",
    "对", "而", "与", "及", "或", "但", "又", "还", "之", "其", "为", "以", "于", "所", "并",
    // English
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "could", "should", "may", "might", "can", "this", "that",
    "these", "those", "it", "its", "not", "so", "if", "then", "than", "there", "here",
    // 网页与排版噪声
    "http", "https", "www", "com", "html", "nbsp", "amp", "img", "png", "jpg",
];

/// 句中过渡词，按统计顺序排列。
pub const TRANSITION_WORDS: &[&str] = &[
    "但是", "然而", "不过", "所以", "因此", "而且", "另外", "其实", "当然", "首先", "其次",
    "最后", "总之", "比如", "例如", "同时", "于是",
];

/// 以叙事时间标记开头的段落视为故事式开头。
pub const STORY_OPENERS: &[&str] = &[
    "那天", "那年", "那时", "曾经", "记得", "小时候", "有一次", "有一天", "很久以前", "从前",
    "去年", "昨天", "前几天", "当年", "上周",
];

/// 以第一人称或观点标记开头的段落视为观点式开头。
pub const STATEMENT_OPENERS: &[&str] = &[
    "我认为", "我觉得", "我想", "在我看来", "说实话", "坦白说", "其实", "个人认为", "我一直",
    "我们", "我",
];

const CULTURAL_INTEREST_TABLE: CategoryTable = &[
    ("文学", &["小说", "诗", "作家", "阅读", "读书", "文学", "散文", "书"]),
    ("电影", &["电影", "导演", "影片", "剧", "镜头", "影院", "movie", "film"]),
    ("音乐", &["音乐", "歌", "旋律", "乐队", "演唱会", "专辑", "music", "song"]),
    ("艺术", &["艺术", "画", "展览", "美术", "设计", "摄影", "art"]),
    ("历史", &["历史", "朝代", "古代", "王朝", "史书", "文物", "history"]),
    ("哲学", &["哲学", "存在", "思考", "真理", "本质", "philosophy"]),
    ("科技", &["科技", "技术", "互联网", "人工智能", "算法", "手机", "数据", "AI"]),
    ("游戏", &["游戏", "玩家", "通关", "主机", "steam", "game"]),
];

const TOPIC_PREFERENCE_TABLE: CategoryTable = &[
    ("生活日常", &["生活", "日常", "做饭", "周末", "早餐", "家务"]),
    ("情感关系", &["爱情", "喜欢", "分手", "恋爱", "婚姻", "感情"]),
    ("职场成长", &["工作", "职场", "同事", "老板", "加班", "升职", "面试"]),
    ("社会观察", &["社会", "城市", "新闻", "现象", "时代", "年轻人"]),
    ("旅行见闻", &["旅行", "旅游", "风景", "出发", "远方", "飞机", "火车"]),
    ("美食", &["美食", "好吃", "味道", "餐厅", "火锅", "菜"]),
];

const THEME_TABLE: CategoryTable = &[
    ("成长", &["成长", "长大", "改变", "学会", "经历", "蜕变"]),
    ("爱情", &["爱情", "爱", "恋人", "心动", "思念", "告白"]),
    ("亲情", &["父亲", "母亲", "爸爸", "妈妈", "家人", "家"]),
    ("友情", &["朋友", "友谊", "兄弟", "闺蜜", "伙伴"]),
    ("时间与记忆", &["时间", "记忆", "回忆", "岁月", "青春", "时光"]),
    ("自然", &["自然", "山", "海", "树", "花", "天空", "风", "雨"]),
    ("孤独", &["孤独", "寂寞", "一个人", "独处", "沉默"]),
    ("梦想", &["梦想", "理想", "目标", "追求", "奋斗"]),
];

lazy_static! {
    pub static ref STOP_WORDS: HashSet<&'static str> = STOP_WORD_LIST.iter().copied().collect();

    pub static ref CASUAL_WORDS: KeywordSet = KeywordSet::new(&[
        "哈哈", "哈", "嘿", "喂", "哎", "啊", "呀", "嘛", "吧", "呢", "哦", "啦", "呗", "咋",
        "嗯", "emmm", "hhh", "lol", "yeah", "gonna", "wanna",
    ]);
    pub static ref FORMAL_WORDS: KeywordSet = KeywordSet::new(&[
        "因此", "所以", "综上", "综上所述", "总之", "从而", "鉴于", "基于", "此外", "故而",
        "由此可见", "therefore", "moreover", "furthermore", "consequently", "hence", "thus",
    ]);
    pub static ref HUMOROUS_WORDS: KeywordSet = KeywordSet::new(&[
        "搞笑", "好笑", "笑死", "幽默", "有趣", "尴尬", "段子", "逗", "调侃", "吐槽",
        "funny", "hilarious", "joke",
    ]);

    pub static ref FIRST_PERSON: KeywordSet = KeywordSet::new(&[
        "我们", "咱们", "我", "咱", "i", "me", "my", "mine", "we", "us", "our",
    ]);
    pub static ref SECOND_PERSON: KeywordSet = KeywordSet::new(&[
        "你们", "您", "你", "you", "your", "yours",
    ]);
    pub static ref THIRD_PERSON: KeywordSet = KeywordSet::new(&[
        "他们", "她们", "它们", "他", "她", "它", "he", "she", "they", "him", "her", "them",
        "his", "their",
    ]);

    pub static ref EXTRAVERSION: AxisLexicon = AxisLexicon::new(
        &["聚会", "朋友们", "一起", "热闹", "分享", "聊天", "社交", "大家", "party", "friends"],
        &["独处", "安静", "一个人", "独自", "沉思", "内心", "孤独", "宅", "alone", "quiet"],
    );
    pub static ref OPENNESS: AxisLexicon = AxisLexicon::new(
        &["新鲜", "尝试", "探索", "好奇", "创意", "想象", "冒险", "改变", "explore", "curious"],
        &["传统", "稳妥", "规矩", "保守", "按部就班", "老样子", "守旧", "tradition"],
    );
    pub static ref CONSCIENTIOUSNESS: AxisLexicon = AxisLexicon::new(
        &["计划", "目标", "坚持", "认真", "努力", "规划", "效率", "自律", "准时", "plan", "goal"],
        &["随性", "随便", "随意", "即兴", "看心情", "顺其自然", "拖延", "懒", "whatever"],
    );
    pub static ref AGREEABLENESS: AxisLexicon = AxisLexicon::new(
        &["理解", "包容", "温柔", "体谅", "感谢", "善良", "帮助", "谢谢", "关心"],
        &["必须", "绝对", "坚决", "反对", "批评", "不能", "凭什么", "受不了"],
    );
    pub static ref STABILITY: AxisLexicon = AxisLexicon::new(
        &["平静", "淡定", "从容", "冷静", "放松", "释然", "坦然", "稳定"],
        &["焦虑", "担心", "害怕", "紧张", "难过", "崩溃", "失落", "敏感", "委屈"],
    );

    pub static ref LIFE_ATTITUDE: AxisLexicon = AxisLexicon::new(
        &["希望", "美好", "相信", "阳光", "乐观", "期待", "幸福", "值得", "温暖"],
        &["绝望", "无奈", "悲观", "失望", "没意思", "痛苦", "迷茫", "遗憾", "黑暗"],
    );
    pub static ref VALUE_ORIENTATION: AxisLexicon = AxisLexicon::new(
        &["理想", "梦想", "意义", "信念", "追求", "热爱", "精神", "初心"],
        &["现实", "赚钱", "实际", "收入", "成本", "利益", "工资", "房子", "性价比"],
    );
    pub static ref RELATIONSHIP_VIEW: AxisLexicon = AxisLexicon::new(
        &["家人", "陪伴", "一起", "彼此", "团队", "家庭", "集体", "我们"],
        &["自己", "独立", "自由", "个人", "边界", "自我"],
    );

    pub static ref PAST_WORDS: KeywordSet = KeywordSet::new(&[
        "过去", "曾经", "以前", "回忆", "怀念", "小时候", "当年", "那时",
    ]);
    pub static ref PRESENT_WORDS: KeywordSet = KeywordSet::new(&[
        "现在", "此刻", "当下", "今天", "眼前", "如今",
    ]);
    pub static ref FUTURE_WORDS: KeywordSet = KeywordSet::new(&[
        "未来", "将来", "明天", "以后", "憧憬", "展望", "期待",
    ]);

    pub static ref CULTURAL_INTERESTS: Vec<CategoryLexicon> = categories(CULTURAL_INTEREST_TABLE);
    pub static ref TOPIC_PREFERENCES: Vec<CategoryLexicon> = categories(TOPIC_PREFERENCE_TABLE);
    pub static ref THEMES: Vec<CategoryLexicon> = categories(THEME_TABLE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_words_win_over_their_prefixes() {
        let set = KeywordSet::new(&["我", "我们"]);
        assert_eq!(set.count("我们和我"), 2);
    }

    #[test]
    fn ascii_words_respect_word_boundaries() {
        let set = KeywordSet::new(&["he"]);
        assert_eq!(set.count("the hero said he would"), 1);
        assert_eq!(set.count("HE left"), 1);
    }

    #[test]
    fn stop_words_cover_both_languages() {
        assert!(STOP_WORDS.contains("的"));
        assert!(STOP_WORDS.contains("the"));
        assert!(!STOP_WORDS.contains("writing"));
    }
}
