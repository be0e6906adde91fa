//! src/errors.rs

use thiserror::Error;

/// 文风分析与模型调用过程中的错误。
#[derive(Debug, Error)]
pub enum StyleError {
    /// 过滤掉空内容后没有任何可分析的样本。
    #[error("没有可分析的内容，请先向文风库添加写作样本")]
    EmptyInput,

    #[error("请先配置 API Key（config.toml 中的 llm.api_key，或环境变量 DEEPSEEK_API_KEY）")]
    MissingApiKey,

    /// 429 请求过于频繁，或 402 余额不足。
    #[error("API 请求受限或额度不足 ({status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("API 调用失败 ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("API 请求超时，请检查网络后重试")]
    Timeout,

    #[error("网络请求失败: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API 调用成功，但返回的内容为空")]
    EmptyResponse,

    /// 模型返回的内容（去掉代码块包裹后）仍然不是合法 JSON。
    #[error("AI 返回的分析结果不是有效的 JSON（{source}）")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("不支持的文件格式: {0}（目前只支持 .txt 和 .md）")]
    UnsupportedFormat(String),

    #[error("文件过大（{size} 字节），最大支持 {limit} 字节（10 MB）")]
    FileTooLarge { size: u64, limit: u64 },
}

impl From<reqwest::Error> for StyleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StyleError::Timeout
        } else {
            StyleError::Transport(err)
        }
    }
}

impl StyleError {
    /// Maps a non-2xx chat-completions response to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("API 调用失败: {}", status)
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            402 | 429 => StyleError::RateLimited { status, message },
            _ => StyleError::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_is_extracted() {
        let err = StyleError::from_status(400, r#"{"error":{"message":"bad model"}}"#);
        match err {
            StyleError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad model");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn quota_and_rate_limits_are_distinct() {
        assert!(matches!(
            StyleError::from_status(429, "{}"),
            StyleError::RateLimited { status: 429, .. }
        ));
        assert!(matches!(
            StyleError::from_status(402, r#"{"error":{"message":"Insufficient Balance"}}"#),
            StyleError::RateLimited { status: 402, .. }
        ));
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let err = StyleError::from_status(500, "");
        assert_eq!(err.to_string(), "API 调用失败 (500): API 调用失败: 500");
    }
}
