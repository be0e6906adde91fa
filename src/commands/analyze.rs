//! src/commands/analyze.rs

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use stylemate::analyzers::ai::analyze_with_ai;
use stylemate::analyzers::describe::generate_style_description;
use stylemate::analyzers::{analyze_writing_style, Profile};
use stylemate::config::load_config;
use stylemate::errors::StyleError;
use stylemate::library::{read_source_file, SourceDocument, SourceKind, SourceMetadata};
use stylemate::llm::create_llm_client;

use super::{load_library, spinner};

async fn read_files(files: &[PathBuf]) -> Result<Vec<SourceDocument>> {
    let mut sources = Vec::with_capacity(files.len());
    for (i, path) in files.iter().enumerate() {
        let content = read_source_file(path).await?;
        let metadata = SourceMetadata {
            source: SourceKind::Upload,
            file_name: path.file_name().map(|n| n.to_string_lossy().to_string()),
            ..Default::default()
        };
        sources.push(SourceDocument::new(i as i64 + 1, content, metadata));
    }
    Ok(sources)
}

/// 分析指定文件或整个文风库。分析文风库时结果会写回库中。
pub async fn handle_analyze(files: &[PathBuf], ai: bool, json: bool) -> Result<()> {
    let config = load_config().await?;
    let from_library = files.is_empty();

    let (mut library, library_path) = load_library().await?;
    let sources = if from_library {
        library.sources.clone()
    } else {
        read_files(files).await?
    };

    let profile = if ai {
        let client = create_llm_client(&config.llm)?;
        let progress_bar = spinner("AI 正在分析你的文风...");
        let result = analyze_with_ai(client.as_ref(), &sources, &config.analysis.ai_options()).await;
        progress_bar.finish_and_clear();
        match result {
            Ok(profile) => Profile::Ai(profile),
            Err(err @ StyleError::MalformedResponse { .. }) => {
                return Err(anyhow::Error::new(err)
                    .context("AI 分析失败，可以重试，或去掉 --ai 改用规则分析"));
            }
            Err(err) => return Err(err.into()),
        }
    } else {
        match analyze_writing_style(&sources, &config.analysis.options()) {
            Some(profile) => Profile::Regex(profile),
            None => {
                println!(
                    "{}",
                    "没有可分析的内容，请先使用 `stylemate add` 添加写作样本。".yellow()
                );
                return Ok(());
            }
        }
    };

    if from_library {
        library.set_analysis(profile.clone());
        library.save(&library_path).await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!(
        "{}（{}，{} 篇样本，{} 字）",
        "📊 文风分析完成".green().bold(),
        profile.method(),
        sources.len(),
        profile.total_words()
    );
    println!("\n{}\n", "=".repeat(60));
    println!("{}", generate_style_description(&profile));
    println!("\n{}\n", "=".repeat(60));
    Ok(())
}
