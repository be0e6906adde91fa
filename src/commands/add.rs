//! src/commands/add.rs

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use stylemate::analyzers::cleaning::clean_content;
use stylemate::library::{read_source_file, SourceKind, SourceMetadata};

use super::load_library;

pub async fn handle_add(
    file: Option<PathBuf>,
    text: Option<String>,
    title: Option<String>,
    clean: bool,
) -> Result<()> {
    let (content, mut metadata) = match (file, text) {
        (Some(path), _) => {
            let content = read_source_file(&path).await?;
            let metadata = SourceMetadata {
                source: SourceKind::Upload,
                file_name: path.file_name().map(|n| n.to_string_lossy().to_string()),
                ..Default::default()
            };
            (content, metadata)
        }
        (None, Some(text)) => (text, SourceMetadata::default()),
        (None, None) => {
            let text = edit::edit("").context("无法打开编辑器")?;
            (text, SourceMetadata::default())
        }
    };
    metadata.title = title;

    let content = if clean {
        clean_content(&content)
    } else {
        content.trim().to_string()
    };
    if content.is_empty() {
        bail!("内容为空，未添加。");
    }

    let (mut library, path) = load_library().await?;
    let (id, words) = {
        let doc = library.add(content, metadata);
        (doc.id, doc.word_count())
    };
    library.save(&path).await?;

    println!(
        "{} #{}（{} 字），文风库共 {} 篇、{} 字",
        "✅ 已添加样本".green(),
        id,
        words,
        library.sources.len(),
        library.total_words
    );
    Ok(())
}
