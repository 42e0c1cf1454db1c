//! Social-media summary scaffolding.
//!
//! Produces a Markdown skeleton from chapter info; the prose itself comes
//! from the text-generation collaborator, which fills the placeholder
//! sections outside this crate.

use crate::error::{ClipError, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One chapter as selected for clipping, the input to summary generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub title: String,
    /// Display range like `"00:00 - 03:15"`.
    pub time_range: String,
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

impl ChapterInfo {
    pub fn new(
        title: impl Into<String>,
        time_range: impl Into<String>,
        summary: impl Into<String>,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            time_range: time_range.into(),
            summary: summary.into(),
            keywords,
            generated_at: Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// Load chapter info from a JSON file.
pub fn load_chapter_info(path: &Path) -> Result<ChapterInfo> {
    if !path.exists() {
        return Err(ClipError::FileNotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Render the Markdown summary scaffold for one chapter.
pub fn render_summary(info: &ChapterInfo) -> String {
    let hashtags = info
        .keywords
        .iter()
        .map(|k| format!("#{k}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "# {title}\n\n\
         ## Chapter\n\n\
         - Time range: {range}\n\
         - Summary: {summary}\n\
         - Keywords: {keywords}\n\n\
         ## Key points\n\n\
         [to be filled in]\n\n\
         ## Platform versions\n\n\
         ### Short-form (300 chars)\n\n\
         [to be filled in]\n\n\
         ### Long-form\n\n\
         [to be filled in]\n\n\
         ## Tags\n\n\
         {hashtags}\n\n\
         ---\n\n\
         Generated: {generated}\n",
        title = info.title,
        range = info.time_range,
        summary = info.summary,
        keywords = info.keywords.join(", "),
        hashtags = hashtags,
        generated = info.generated_at.as_deref().unwrap_or("N/A"),
    )
}

/// Render and write the scaffold to a file.
pub fn write_summary(info: &ChapterInfo, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_summary(info))?;
    info!("Summary scaffold written to {}", path.display());
    Ok(())
}
