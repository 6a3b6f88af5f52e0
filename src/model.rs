use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::util::{join_non_empty, word_count};

/// Raw span document as written by the PDF extraction stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSpanDocument {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<serde_json::Value>>,
}

/// One span entry before validation. Every field is optional so a single bad
/// entry never rejects the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpan {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub italic: Option<bool>,
    /// Font flag bits as emitted by the PDF extractor: 2 is bold, 1 is italic.
    #[serde(default)]
    pub flags: Option<u32>,
}

const FLAG_ITALIC: u32 = 1;
const FLAG_BOLD: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub font: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Span {
    pub fn new(text: &str, font: &str, size: f64, bold: bool) -> Self {
        Self {
            text: text.to_string(),
            font: font.to_string(),
            size,
            bold,
            italic: false,
        }
    }

    pub fn from_raw(raw: RawSpan) -> Option<Self> {
        let flags = raw.flags.unwrap_or(0);
        Some(Self {
            text: raw.text?,
            font: raw.font.unwrap_or_default(),
            size: raw.size.unwrap_or(0.0),
            bold: raw.bold.unwrap_or(flags & FLAG_BOLD != 0),
            italic: raw.italic.unwrap_or(flags & FLAG_ITALIC != 0),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyContext {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub section: String,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    #[default]
    LegalArticles,
    GenericParagraphs,
}

impl ExtractionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LegalArticles => "legal_articles",
            Self::GenericParagraphs => "generic_paragraphs",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Title,
    Chapter,
    Section,
    Article,
    Content,
}

impl ChunkType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChunkType::Title => "title",
            ChunkType::Chapter => "chapter",
            ChunkType::Section => "section",
            ChunkType::Article => "article",
            ChunkType::Content => "content",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default)]
    pub importance_score: f64,
    #[serde(default)]
    pub spans_count: usize,
    #[serde(default)]
    pub requires_review: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corrections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub chunk_type: ChunkType,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_content: Option<String>,
    #[serde(default)]
    pub context: HierarchyContext,
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn is_article(&self) -> bool {
        self.chunk_type == ChunkType::Article && self.article_number.is_some()
    }

    /// Text a consumer indexes on: the article body for article chunks,
    /// the whole content otherwise.
    pub fn body(&self) -> &str {
        self.article_content.as_deref().unwrap_or(&self.content)
    }

    /// `number + title + body` with empty fields omitted.
    pub fn reconstruct_article_text(&self) -> String {
        join_non_empty(&[
            self.article_number.as_deref().unwrap_or(""),
            self.article_title.as_deref().unwrap_or(""),
            self.article_content.as_deref().unwrap_or(""),
        ])
    }

    /// Rebuilds `content` and `word_count` from the article triple. The
    /// no-title sentinel never lands in the indexed content.
    pub fn refresh_article_text(&mut self, no_title_sentinel: &str) {
        if !self.is_article() {
            self.word_count = word_count(&self.content);
            return;
        }

        let title = self
            .article_title
            .as_deref()
            .filter(|title| *title != no_title_sentinel)
            .unwrap_or("");
        self.content = join_non_empty(&[
            self.article_number.as_deref().unwrap_or(""),
            title,
            self.article_content.as_deref().unwrap_or(""),
        ]);
        self.word_count = word_count(&self.content);
    }

    pub fn label(&self, index: usize) -> String {
        self.article_number
            .clone()
            .filter(|number| !number.trim().is_empty())
            .unwrap_or_else(|| format!("Chunk {}", index + 1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub original_spans: usize,
    pub malformed_spans: usize,
    pub filtered_spans: usize,
    pub grouped_units: usize,
    pub extracted_articles: usize,
    pub orphan_spans: usize,
    pub final_chunks: usize,
    pub processing_method: String,
}

/// Hand-off artifact between the chunking, fixup, analysis and editing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkDocument {
    pub source_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sha256: Option<String>,
    pub generated_at: String,
    pub extraction_mode: ExtractionMode,
    pub total_chunks: usize,
    pub chunks: Vec<Chunk>,
    pub stats: ProcessingStats,
}

impl ChunkDocument {
    pub fn sync_counts(&mut self) {
        self.total_chunks = self.chunks.len();
        self.stats.final_chunks = self.chunks.len();
    }
}
