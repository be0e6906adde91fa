pub mod add;
pub mod analyze;
pub mod clean;
pub mod describe;
pub mod init;
pub mod library;
pub mod transfer;
pub mod write;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use stylemate::library::{get_library_path, StyleLibrary};

/// 等待模型返回时显示的进度提示。
pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    progress_bar.set_message(message);
    progress_bar.enable_steady_tick(std::time::Duration::from_millis(100));
    progress_bar
}

pub(crate) async fn load_library() -> Result<(StyleLibrary, PathBuf)> {
    let path = get_library_path().await?;
    let library = StyleLibrary::load(&path).await?;
    Ok((library, path))
}
