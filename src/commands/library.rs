//! src/commands/library.rs

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};

use super::load_library;

pub async fn handle_list() -> Result<()> {
    let (library, _) = load_library().await?;

    if library.sources.is_empty() {
        println!(
            "{}",
            "文风库为空，使用 `stylemate add` 添加写作样本。".yellow()
        );
        return Ok(());
    }

    println!("{}", "📚 文风库".bold());
    println!("{}", "-".repeat(60));
    for doc in &library.sources {
        println!(
            "{}  {}  {} 字  {}",
            doc.id.to_string().cyan(),
            doc.display_title(),
            doc.word_count(),
            doc.timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
    }
    println!("{}", "-".repeat(60));
    println!("共 {} 篇，{} 字", library.sources.len(), library.total_words);

    match &library.analysis {
        Some(profile) => println!(
            "最近一次分析: {}（{}）",
            profile.method().to_string().green(),
            profile
                .analyzed_at()
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
        ),
        None => println!("{}", "尚未分析，运行 `stylemate analyze` 生成文风画像。".yellow()),
    }
    Ok(())
}

pub async fn handle_remove(id: i64, yes: bool) -> Result<()> {
    let (mut library, path) = load_library().await?;

    let Some(doc) = library.get(id) else {
        println!("{} {}", "没有找到样本:".yellow(), id);
        return Ok(());
    };

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("确认删除「{}」吗?", doc.display_title()))
            .default(false)
            .interact()?
    {
        println!("好的，操作已取消。");
        return Ok(());
    }

    library.remove(id);
    library.save(&path).await?;
    println!("{} #{}", "🗑️ 已删除样本".green(), id);
    Ok(())
}

pub async fn handle_clear(yes: bool) -> Result<()> {
    let (mut library, path) = load_library().await?;

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "确认清空文风库吗？将删除 {} 篇样本和分析结果",
                library.sources.len()
            ))
            .default(false)
            .interact()?
    {
        println!("好的，操作已取消。");
        return Ok(());
    }

    library.clear();
    library.save(&path).await?;
    println!("{}", "🗑️ 文风库已清空".green());
    Ok(())
}
