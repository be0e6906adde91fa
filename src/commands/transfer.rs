//! src/commands/transfer.rs

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use stylemate::config::{load_config, load_file_config, save_config, LlmConfig};
use stylemate::library::{get_library_path, ExportBundle, StyleLibrary};
use tokio::fs;

use super::load_library;

pub async fn handle_export(path: &Path) -> Result<()> {
    let (library, _) = load_library().await?;
    let config = load_config().await?;

    let bundle = library.export(Some(&config.llm));
    let content = serde_json::to_string_pretty(&bundle)?;
    fs::write(path, content)
        .await
        .with_context(|| format!("无法写入导出文件: {}", path.display()))?;

    println!(
        "{} {}（{} 篇样本，不含 API Key）",
        "📦 已导出到".green(),
        path.display(),
        library.sources.len()
    );
    Ok(())
}

pub async fn handle_import(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取导入文件: {}", path.display()))?;
    let bundle: ExportBundle =
        serde_json::from_str(&content).context("导入文件格式错误")?;

    let (library, settings) = StyleLibrary::import(bundle)?;
    let library_path = get_library_path().await?;
    library.save(&library_path).await?;

    if let Some(settings) = settings {
        // 导出文件不含 API Key，保留本地的
        let mut config = load_file_config().await?;
        config.llm = LlmConfig {
            api_key: config.llm.api_key,
            ..settings
        };
        save_config(&config).await?;
    }

    println!(
        "{} {} 篇样本，{} 字",
        "📥 已导入".green(),
        library.sources.len(),
        library.total_words
    );
    Ok(())
}
