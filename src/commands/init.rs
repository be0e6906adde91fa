use anyhow::{Context, Result};
use colored::Colorize;
use stylemate::config;

pub async fn handle_init(force: bool) -> Result<()> {
    let config_path = config::get_config_path().await?;
    if config_path.exists() && !force {
        println!(
            "{} {}",
            "配置文件已存在，使用 --force 覆盖:".yellow(),
            config_path.display()
        );
        show_api_key(&config::load_config().await?.llm.api_key);
        return Ok(());
    }

    let config_path = config::create_default_config()
        .await
        .context("无法初始化配置。")?;
    println!("{} {}", "✅ 已创建配置文件:".green(), config_path.display());
    println!("请在其中填写 llm.api_key，或设置环境变量 DEEPSEEK_API_KEY。");
    Ok(())
}

fn show_api_key(api_key: &str) {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        println!("{}", "API Key: 未设置".yellow());
    } else if config::validate_api_key(api_key) {
        println!("API Key: {}", config::mask_api_key(api_key).green());
    } else {
        println!(
            "API Key: {} {}",
            config::mask_api_key(api_key),
            "(格式可疑，DeepSeek 的 Key 以 sk- 开头)".yellow()
        );
    }
}
