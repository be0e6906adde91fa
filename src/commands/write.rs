//! src/commands/write.rs

use anyhow::Result;
use colored::Colorize;
use futures::StreamExt;
use log::info;
use std::io::Write;
use stylemate::analyzers::describe::generate_style_description;
use stylemate::config::load_config;
use stylemate::llm::create_llm_client;
use stylemate::llm::prompt::build_styled_prompt;

use super::{load_library, spinner};

/// 按文风库中的画像构造提示词，把写作要求发给模型。
pub async fn handle_write(message: &str, no_style: bool, stream: bool) -> Result<()> {
    let config = load_config().await?;
    let enable_style_transfer = config.llm.enable_style_transfer && !no_style;

    let description = if enable_style_transfer {
        let (library, _) = load_library().await?;
        match library.analysis {
            Some(profile) => Some(generate_style_description(&profile)),
            None => {
                println!(
                    "{}",
                    "提示：文风库还没有分析结果，本次将不附带文风。".yellow()
                );
                None
            }
        }
    } else {
        None
    };
    info!("文风迁移: {}", description.is_some());

    let messages = build_styled_prompt(message, description.as_deref(), enable_style_transfer);
    let params = config.llm.generation_params();
    let client = create_llm_client(&config.llm)?;

    if stream {
        let mut deltas = client.chat_stream(&messages, &params).await?;
        let mut stdout = std::io::stdout();
        while let Some(delta) = deltas.next().await {
            write!(stdout, "{}", delta?)?;
            stdout.flush()?;
        }
        writeln!(stdout)?;
    } else {
        let progress_bar = spinner("AI 正在写作...");
        let reply = client.chat(&messages, &params).await;
        progress_bar.finish_and_clear();
        println!("{}", reply?);
    }
    Ok(())
}
