//! src/library.rs
//!
//! 文风库：用户提供的写作样本和最近一次分析结果，保存在配置目录下的 library.json。

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::analyzers::Profile;
use crate::config::{get_config_dir, LlmConfig};
use crate::errors::StyleError;

pub const LIBRARY_FILE: &str = "library.json";
pub const EXPORT_VERSION: &str = "1.0";
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];
/// 上传文件的大小上限。
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Paste,
    Upload,
    Web,
    Wechat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub source: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// 一篇写作样本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: SourceMetadata,
}

impl SourceDocument {
    pub fn new(id: i64, content: impl Into<String>, metadata: SourceMetadata) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            content: content.into(),
            metadata,
        }
    }

    pub fn word_count(&self) -> usize {
        self.content.chars().count()
    }

    /// 列表里显示的名字：标题、文件名或正文开头。
    pub fn display_title(&self) -> String {
        self.metadata
            .title
            .clone()
            .or_else(|| self.metadata.file_name.clone())
            .unwrap_or_else(|| {
                let head: String = self.content.trim().chars().take(20).collect();
                if self.content.trim().chars().count() > 20 {
                    format!("{}…", head)
                } else {
                    head
                }
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleLibrary {
    pub sources: Vec<SourceDocument>,
    pub analysis: Option<Profile>,
    pub total_words: usize,
}

/// 导出文件。设置里的 API Key 不会被导出。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub data: ExportData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub style_library: StyleLibrary,
    #[serde(default)]
    pub settings: Option<LlmConfig>,
}

pub async fn get_library_path() -> Result<PathBuf> {
    Ok(get_config_dir().await?.join(LIBRARY_FILE))
}

impl StyleLibrary {
    /// 文件不存在时返回空库。
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("文风库文件不存在，使用空库: {:?}", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取文风库: {}", path.display()))?;
        let library: StyleLibrary = serde_json::from_str(&content)
            .with_context(|| format!("文风库文件格式错误: {}", path.display()))?;
        Ok(library)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .with_context(|| format!("无法写入文风库: {}", path.display()))?;
        Ok(())
    }

    fn recount(&mut self) {
        self.total_words = self.sources.iter().map(SourceDocument::word_count).sum();
    }

    /// 添加样本。id 取当前毫秒时间戳，与已有 id 冲突时递增。
    pub fn add(&mut self, content: impl Into<String>, metadata: SourceMetadata) -> &SourceDocument {
        let mut id = Utc::now().timestamp_millis();
        while self.sources.iter().any(|s| s.id == id) {
            id += 1;
        }
        self.sources.push(SourceDocument::new(id, content, metadata));
        self.recount();
        &self.sources[self.sources.len() - 1]
    }

    pub fn get(&self, id: i64) -> Option<&SourceDocument> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn remove(&mut self, id: i64) -> Option<SourceDocument> {
        let index = self.sources.iter().position(|s| s.id == id)?;
        let removed = self.sources.remove(index);
        self.recount();
        Some(removed)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_analysis(&mut self, profile: Profile) {
        self.analysis = Some(profile);
    }

    pub fn export(&self, settings: Option<&LlmConfig>) -> ExportBundle {
        let settings = settings.map(|s| LlmConfig {
            api_key: String::new(),
            ..s.clone()
        });
        ExportBundle {
            version: EXPORT_VERSION.to_string(),
            export_date: Utc::now(),
            data: ExportData {
                style_library: self.clone(),
                settings,
            },
        }
    }

    /// 校验版本后取出导入的数据。
    pub fn import(bundle: ExportBundle) -> Result<(Self, Option<LlmConfig>)> {
        if bundle.version != EXPORT_VERSION {
            return Err(anyhow!("不支持的数据版本: {}", bundle.version));
        }
        let mut library = bundle.data.style_library;
        library.recount();
        Ok((library, bundle.data.settings))
    }
}

/// 读取上传的样本文件，只支持纯文本和 Markdown。
pub async fn read_source_file(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(StyleError::UnsupportedFormat(extension).into());
    }
    let size = fs::metadata(path)
        .await
        .with_context(|| format!("文件读取失败: {}", path.display()))?
        .len();
    if size > MAX_FILE_BYTES {
        return Err(StyleError::FileTooLarge { size, limit: MAX_FILE_BYTES }.into());
    }
    fs::read_to_string(path)
        .await
        .with_context(|| format!("文件读取失败: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{analyze_texts, AnalysisOptions};

    #[test]
    fn ids_stay_unique_within_the_same_millisecond() {
        let mut library = StyleLibrary::default();
        let first = library.add("第一篇", SourceMetadata::default()).id;
        let second = library.add("第二篇", SourceMetadata::default()).id;
        assert_ne!(first, second);
        assert_eq!(library.total_words, 6);
    }

    #[test]
    fn remove_and_clear_keep_totals_in_sync() {
        let mut library = StyleLibrary::default();
        let id = library.add("你好世界", SourceMetadata::default()).id;
        library.add("abc", SourceMetadata::default());
        assert_eq!(library.remove(id).map(|d| d.content), Some("你好世界".to_string()));
        assert_eq!(library.total_words, 3);
        assert!(library.remove(id).is_none());

        library.clear();
        assert!(library.sources.is_empty());
        assert_eq!(library.total_words, 0);
        assert!(library.analysis.is_none());
    }

    #[test]
    fn display_title_prefers_metadata() {
        let doc = SourceDocument::new(
            1,
            "正文",
            SourceMetadata { file_name: Some("a.md".into()), ..Default::default() },
        );
        assert_eq!(doc.display_title(), "a.md");

        let long = SourceDocument::new(2, "一".repeat(30), SourceMetadata::default());
        assert_eq!(long.display_title(), format!("{}…", "一".repeat(20)));
    }

    #[test]
    fn export_blanks_the_api_key() {
        let mut library = StyleLibrary::default();
        library.add("样本", SourceMetadata::default());
        let settings = LlmConfig { api_key: "sk-secret".into(), ..Default::default() };

        let bundle = library.export(Some(&settings));
        assert_eq!(bundle.version, "1.0");
        let exported = bundle.data.settings.as_ref().unwrap();
        assert!(exported.api_key.is_empty());
        assert_eq!(exported.model, settings.model);
    }

    #[test]
    fn import_rejects_other_versions() {
        let library = StyleLibrary::default();
        let mut bundle = library.export(None);
        bundle.version = "2.0".to_string();
        let err = StyleLibrary::import(bundle).unwrap_err();
        assert!(err.to_string().contains("不支持的数据版本"));
    }

    #[tokio::test]
    async fn library_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LIBRARY_FILE);

        let mut library = StyleLibrary::default();
        library.add(
            "那天我们一起去看海。",
            SourceMetadata {
                title: Some("看海".into()),
                source: SourceKind::Upload,
                ..Default::default()
            },
        );
        let texts: Vec<&str> = library.sources.iter().map(|s| s.content.as_str()).collect();
        let profile = analyze_texts(&texts, &AnalysisOptions::default()).unwrap();
        library.set_analysis(Profile::Regex(profile));
        library.save(&path).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"analysisMethod\": \"regex\""));
        assert!(raw.contains("\"source\": \"upload\""));

        let loaded = StyleLibrary::load(&path).await.unwrap();
        assert_eq!(loaded, library);
    }

    #[tokio::test]
    async fn missing_library_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = StyleLibrary::load(&dir.path().join("nope.json")).await.unwrap();
        assert_eq!(loaded, StyleLibrary::default());
    }

    #[tokio::test]
    async fn only_text_formats_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let md = dir.path().join("note.MD");
        std::fs::write(&md, "# 标题").unwrap();
        assert_eq!(read_source_file(&md).await.unwrap(), "# 标题");

        let pdf = dir.path().join("paper.pdf");
        std::fs::write(&pdf, "%PDF").unwrap();
        let err = read_source_file(&pdf).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StyleError>(),
            Some(StyleError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
    }

    #[tokio::test]
    async fn oversized_files_are_rejected_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.txt");
        std::fs::File::create(&big)
            .unwrap()
            .set_len(MAX_FILE_BYTES + 1)
            .unwrap();
        let err = read_source_file(&big).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StyleError>(),
            Some(StyleError::FileTooLarge { size, .. }) if *size == MAX_FILE_BYTES + 1
        ));

        let edge = dir.path().join("edge.txt");
        std::fs::File::create(&edge).unwrap().set_len(MAX_FILE_BYTES).unwrap();
        assert_eq!(read_source_file(&edge).await.unwrap().len() as u64, MAX_FILE_BYTES);
    }
}
