//! src/analyzers/cleaning.rs
//!
//! 清理抓取文章中的平台噪声（关注引导、二维码、版权声明等）。

use lazy_static::lazy_static;
use regex::Regex;

/// 少于这个字数的非空行视为噪声行。
const MIN_LINE_CHARS: usize = 5;

lazy_static! {
    /// 整行都是平台噪声时才匹配，命中的行整体丢弃。
    static ref NOISE_LINES: Vec<Regex> = [
        r"^长按(识别)?(图中)?二维码.{0,20}$",
        r"^扫(描|一扫)?(下方|上方|图中)?二维码.{0,20}$",
        r"^扫码(关注|加入|添加).{0,20}$",
        r"^(欢迎)?关注(我们|本?公众号|本号|作者)([:：].{0,20})?[！!。~～]*$",
        r"^(点赞|在看|转发|分享|收藏)([、，,/｜|\s]*(点赞|在看|转发|分享|收藏))*[！!~～。]*$",
        r"^(阅读|在看|赞|喜欢)\s*\d+.{0,6}$",
        r"^阅读原文.{0,10}$",
        r"^(往期|推荐|精彩)(回顾|阅读|推荐|精选)([:：|｜].*)?$",
        r"^喜欢(这篇文章|本文)?(就|请)?(点个|记得).{0,12}$",
        r"^本文(来源|转载自|首发于|经授权转载).*$",
        r"^(作者|来源|编辑|责任编辑|排版|校对|审核|图片来源|封面来源)\s*[:：|｜].*$",
        r"^版权(声明|归.{1,20}所有).*$",
        r"^(本文)?未经(作者)?(授权|许可)[，,]?(不得|禁止|严禁|谢绝)(转载|转发|复制|使用).*$",
        r"^(如需)?转载请(联系|注明|私信|后台|与).*$",
        r"^免责声明.*$",
        r"^微信号\s*[:：].*$",
        r"^©.*$",
        r"(?i)^copyright\b.*$",
        r"(?i)^.{0,40}all rights reserved\.?$",
        r"(?i)^read more\b.{0,40}$",
        r"(?i)^follow us\b.{0,40}$",
        r"(?i)^(subscribe|sign up) (to|for) (our|the) newsletter.{0,40}$",
        r"(?i)^click here\b.{0,40}$",
        r"(?i)^share (this article|on (facebook|twitter|wechat|weibo))\b.{0,20}$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// 混在正文行里的固定引导语，只删除短语本身。
    static ref NOISE_PHRASES: Vec<Regex> = [
        r"点击(上方|下方|文末)?(蓝字|“[^”]{1,12}”)(关注|订阅)(我们|公众号)?",
        r"长按(识别)?(图中)?二维码关注(我们|公众号)?",
        r"扫码关注(我们|公众号)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref EXTRA_BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

fn clean_line(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return Some(String::new());
    }
    if NOISE_LINES.iter().any(|p| p.is_match(line.trim())) {
        return None;
    }

    let mut cleaned = line.to_string();
    for pattern in NOISE_PHRASES.iter() {
        if pattern.is_match(&cleaned) {
            cleaned = pattern.replace_all(&cleaned, "").into_owned();
        }
    }

    let trimmed = cleaned.trim_end();
    if trimmed.trim_start().chars().count() < MIN_LINE_CHARS {
        return None;
    }
    Some(trimmed.to_string())
}

/// 删除噪声片段和过短的行，连续空行压缩为一个空行。
pub fn clean_content(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let lines: Vec<String> = normalized.split('\n').filter_map(clean_line).collect();
    let joined = lines.join("\n");
    EXTRA_BLANK_LINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}
