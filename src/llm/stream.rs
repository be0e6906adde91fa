//! src/llm/stream.rs
//!
//! 解析 chat-completions 的 server-sent events 流。

use log::warn;
use serde::Deserialize;

/// 流结束标记。
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Delta(String),
    Done,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    content: Option<String>,
}

/// 按行切分字节流。不完整的行（包括被截断的 UTF-8 字符）留在缓冲区等下一块。
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = parse_line(line.trim()) {
                let done = event == SseEvent::Done;
                events.push(event);
                if done {
                    self.buffer.clear();
                    break;
                }
            }
        }
        events
    }

    /// 流关闭时处理缓冲区里最后一行。
    pub fn finish(&mut self) -> Option<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&rest);
        parse_line(line.trim())
    }
}

fn parse_line(line: &str) -> Option<SseEvent> {
    let data = line.strip_prefix("data:")?.trim();
    if data == DONE_SENTINEL {
        return Some(SseEvent::Done);
    }

    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|s| !s.is_empty())
            .map(SseEvent::Delta),
        Err(e) => {
            warn!("解析流式响应失败: {} ({})", e, data);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_deltas_and_done() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\n\n\
              data: {\"choices\":[{\"delta\":{\"content\":\" world\"}}]}\n\n\
              data: [DONE]\n\n",
        );
        assert_eq!(
            events,
            vec![
                SseEvent::Delta("Hello".into()),
                SseEvent::Delta(" world".into()),
                SseEvent::Done
            ]
        );
    }

    #[test]
    fn keeps_partial_lines_and_split_characters() {
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"你好\"}}]}\n".as_bytes();
        // 在“你”的 UTF-8 字节中间切开
        let cut = line.iter().position(|b| *b == 0xE4).unwrap() + 1;
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(&line[..cut]).is_empty());
        assert_eq!(decoder.push(&line[cut..]), vec![SseEvent::Delta("你好".into())]);
    }

    #[test]
    fn ignores_comments_and_garbage() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b": keep-alive\ndata: not json\ndata: {\"choices\":[]}\n");
        assert!(events.is_empty());
    }

    #[test]
    fn finish_flushes_last_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), Some(SseEvent::Done));
    }
}
