//! src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => commands::init::handle_init(force).await?,
        Commands::Add {
            file,
            text,
            title,
            clean,
        } => commands::add::handle_add(file, text, title, clean).await?,
        Commands::List => commands::library::handle_list().await?,
        Commands::Remove { id, yes } => commands::library::handle_remove(id, yes).await?,
        Commands::Clear { yes } => commands::library::handle_clear(yes).await?,
        Commands::Export { path } => commands::transfer::handle_export(&path).await?,
        Commands::Import { path } => commands::transfer::handle_import(&path).await?,
        Commands::Analyze { files, ai, json } => {
            commands::analyze::handle_analyze(&files, ai, json).await?
        }
        Commands::Describe { profile } => {
            commands::describe::handle_describe(profile.as_deref()).await?
        }
        Commands::Clean { file } => commands::clean::handle_clean(&file).await?,
        Commands::Write {
            message,
            no_style,
            stream,
        } => commands::write::handle_write(&message, no_style, stream).await?,
    }

    Ok(())
}
