use anyhow::{anyhow, Context, Result};
use std::path::Path;
use stylemate::analyzers::describe::generate_style_description;
use stylemate::analyzers::Profile;
use tokio::fs;

use super::load_library;

pub async fn handle_describe(profile_path: Option<&Path>) -> Result<()> {
    let profile: Profile = match profile_path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .await
                .with_context(|| format!("无法读取画像文件: {}", path.display()))?;
            serde_json::from_str(&content).context("画像文件格式错误")?
        }
        None => {
            let (library, _) = load_library().await?;
            library
                .analysis
                .ok_or_else(|| anyhow!("还没有分析结果，请先运行 `stylemate analyze`。"))?
        }
    };

    println!("{}", generate_style_description(&profile));
    Ok(())
}
