//! src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 一个分析写作样本文风并让 AI 模仿该文风写作的 CLI 工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 初始化配置文件
    #[command(alias = "i")]
    Init {
        /// 覆盖已有的配置文件
        #[arg(short, long)]
        force: bool,
    },

    /// 向文风库添加写作样本，不指定来源时打开编辑器
    #[command(alias = "a")]
    Add {
        /// 从 .txt 或 .md 文件读取
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// 直接传入文本
        #[arg(short, long)]
        text: Option<String>,

        /// 样本标题
        #[arg(long)]
        title: Option<String>,

        /// 添加前清理公众号等平台的引导关注、分享之类的噪音
        #[arg(short, long)]
        clean: bool,
    },

    /// 列出文风库中的样本
    #[command(alias = "ls")]
    List,

    /// 删除一篇样本
    #[command(alias = "rm")]
    Remove {
        id: i64,

        /// 跳过确认
        #[arg(short, long)]
        yes: bool,
    },

    /// 清空文风库
    Clear {
        /// 跳过确认
        #[arg(short, long)]
        yes: bool,
    },

    /// 导出文风库和设置（不含 API Key）
    Export { path: PathBuf },

    /// 从导出文件恢复文风库和设置
    Import { path: PathBuf },

    /// 分析文风。不指定文件时分析文风库并保存结果
    Analyze {
        /// 只分析这些文件，不读写文风库
        files: Vec<PathBuf>,

        /// 使用大模型做深度分析
        #[arg(long)]
        ai: bool,

        /// 以 JSON 输出分析结果
        #[arg(long)]
        json: bool,
    },

    /// 输出用于提示词的文风描述
    #[command(alias = "d")]
    Describe {
        /// 使用 `analyze --json` 导出的画像文件，而不是文风库中的结果
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// 清理文章中的平台噪音并输出
    Clean { file: PathBuf },

    /// 让 AI 按你的文风写作
    #[command(alias = "w")]
    Write {
        /// 写作要求
        message: String,

        /// 不附带文风描述
        #[arg(long)]
        no_style: bool,

        /// 逐字输出
        #[arg(short, long)]
        stream: bool,
    },
}
