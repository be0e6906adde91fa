//! src/lib.rs

pub mod analyzers;
pub mod config;
pub mod errors;
pub mod library;
pub mod llm;

pub use analyzers::{analyze_texts, analyze_writing_style, Profile, StyleProfile};
pub use errors::StyleError;
pub use library::{SourceDocument, StyleLibrary};
