use anyhow::Result;
use std::path::Path;
use stylemate::analyzers::cleaning::clean_content;
use stylemate::library::read_source_file;

pub async fn handle_clean(file: &Path) -> Result<()> {
    let content = read_source_file(file).await?;
    println!("{}", clean_content(&content));
    Ok(())
}
