use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::util::read_json;

/// Per-document typography and wording calibration. Every heuristic the
/// engine applies reads its pattern or threshold from here, so a new corpus
/// only needs a new profile file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentProfile {
    pub patterns: PatternSet,
    /// Font face used for article numbers and title headings.
    pub emphasis_font: String,
    /// Emphasis-font spans above this size are headings.
    pub title_size_threshold: f64,
    /// Upper-case spans above this size update the section context.
    pub section_header_size: f64,
    /// Spans above this size always open a new paragraph.
    pub large_text_size: f64,
    /// Maximum lines (start line included) coalesced into one title.
    pub title_max_lines: usize,
    pub title_size_tolerance: f64,
    pub min_span_chars: usize,
    pub short_upper_title_chars: usize,
    pub format_size_delta: f64,
    pub article_keyword: String,
    pub title_policy: TitlePolicy,
    pub chunking: ChunkLimits,
    pub analyzer: AnalyzerThresholds,
    pub importance_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSet {
    pub title: String,
    pub chapter: String,
    pub section: String,
    pub article: String,
    pub article_split: String,
    pub article_ordinal: String,
    pub loose_article: String,
    pub list_item: String,
    pub subitem: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePolicy {
    pub no_title_sentinel: String,
    /// Look-ahead titles at or above this length are body text.
    pub max_lookahead_title_chars: usize,
    pub max_title_chars: usize,
    pub max_title_commas: usize,
    pub content_verbs: Vec<String>,
    pub dangling_endings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkLimits {
    pub max_chunk_words: usize,
    pub split_overlap_words: usize,
    pub long_article_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerThresholds {
    pub incomplete_min_chars: usize,
    pub long_chunk_words: usize,
    pub short_chunk_words: usize,
    pub numbering_window_chars: usize,
}

impl Default for DocumentProfile {
    fn default() -> Self {
        Self {
            patterns: PatternSet::default(),
            emphasis_font: "Arial-BoldMT".to_string(),
            title_size_threshold: 13.0,
            section_header_size: 12.0,
            large_text_size: 16.0,
            title_max_lines: 3,
            title_size_tolerance: 1.0,
            min_span_chars: 2,
            short_upper_title_chars: 100,
            format_size_delta: 3.0,
            article_keyword: "Artículo".to_string(),
            title_policy: TitlePolicy::default(),
            chunking: ChunkLimits::default(),
            analyzer: AnalyzerThresholds::default(),
            importance_keywords: [
                "artículo",
                "capítulo",
                "título",
                "sección",
                "obligatorio",
                "requisito",
                "derecho",
                "deber",
                "universidad",
                "estudiante",
                "docente",
                "investigación",
            ]
            .iter()
            .map(|keyword| keyword.to_string())
            .collect(),
        }
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            title: r"(?i)^t[íi]tulo\s+[ivxlc\d]+\b".to_string(),
            chapter: r"(?i)^cap[íi]tulo\s+[ivxlc\d]+\b".to_string(),
            section: r"(?i)^(?:secci[óo]n|sec\.?)\s*[ivxlc\d]+\b".to_string(),
            article: r"(?i)^art[íi]culo\s+\d+\s*[°º]".to_string(),
            article_split: r"^(?P<number>(?i:art[íi]culo)\s+\d+\s*[°º])(?P<rest>.*)$".to_string(),
            article_ordinal: r"(?i)art[íi]culo\s+(\d+)".to_string(),
            loose_article: r"(?i)^(?:art[íi]culo|art\.?)\s*\d+[°º]?\s*[.-]?".to_string(),
            list_item: r"^(?:[•\-*·]|\d+[.)]\s|[a-z][.)]\s)".to_string(),
            subitem: r"^\d+\.\d+\.".to_string(),
        }
    }
}

impl Default for TitlePolicy {
    fn default() -> Self {
        let verbs = [
            "son", "está", "están", "puede", "pueden", "tiene", "tienen", "debe", "deben",
            "será", "serán", "es", "comprende", "comprenden", "corresponde", "corresponden",
            "requiere", "requieren", "incluye", "incluyen", "establece", "establecen",
            "especifica", "especifican", "realiza", "realizan", "desarrolla", "desarrollan",
            "ejecuta", "ejecutan", "proporciona", "proporcionan", "ofrece", "ofrecen", "brinda",
            "brindan", "permite", "permiten", "garantiza", "garantizan", "asegura", "aseguran",
            "designa", "designan", "elige", "eligen", "nombra", "nombran",
        ];
        let endings = [
            "a", "de", "en", "la", "el", "y", "que", "son", "para", "con", "del", "las", "los",
            "una", "un",
        ];

        Self {
            no_title_sentinel: "No tienen título".to_string(),
            max_lookahead_title_chars: 200,
            max_title_chars: 80,
            max_title_commas: 3,
            content_verbs: verbs.iter().map(|verb| verb.to_string()).collect(),
            dangling_endings: endings.iter().map(|word| word.to_string()).collect(),
        }
    }
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            max_chunk_words: 600,
            split_overlap_words: 0,
            long_article_words: 800,
        }
    }
}

impl Default for AnalyzerThresholds {
    fn default() -> Self {
        Self {
            incomplete_min_chars: 50,
            long_chunk_words: 800,
            short_chunk_words: 10,
            numbering_window_chars: 50,
        }
    }
}

impl DocumentProfile {
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let profile: Self = read_json(path)?;
        info!(
            path = %path.display(),
            emphasis_font = %profile.emphasis_font,
            title_size_threshold = profile.title_size_threshold,
            "loaded document profile"
        );
        Ok(profile)
    }
}

/// Regexes compiled once from a [`DocumentProfile`].
#[derive(Debug)]
pub struct CompiledPatterns {
    pub title: Regex,
    pub chapter: Regex,
    pub section: Regex,
    pub article: Regex,
    pub article_split: Regex,
    pub article_ordinal: Regex,
    pub loose_article: Regex,
    pub list_item: Regex,
    pub subitem: Regex,
    pub content_verb: Regex,
    pub dangling_ending: Regex,
}

impl CompiledPatterns {
    pub fn compile(profile: &DocumentProfile) -> Result<Self> {
        let patterns = &profile.patterns;
        let policy = &profile.title_policy;

        Ok(Self {
            title: Regex::new(&patterns.title).context("failed to compile title regex")?,
            chapter: Regex::new(&patterns.chapter).context("failed to compile chapter regex")?,
            section: Regex::new(&patterns.section).context("failed to compile section regex")?,
            article: Regex::new(&patterns.article).context("failed to compile article regex")?,
            article_split: Regex::new(&patterns.article_split)
                .context("failed to compile article split regex")?,
            article_ordinal: Regex::new(&patterns.article_ordinal)
                .context("failed to compile article ordinal regex")?,
            loose_article: Regex::new(&patterns.loose_article)
                .context("failed to compile loose article regex")?,
            list_item: Regex::new(&patterns.list_item)
                .context("failed to compile list item regex")?,
            subitem: Regex::new(&patterns.subitem).context("failed to compile subitem regex")?,
            content_verb: Regex::new(&word_alternation(r"\b(?:", &policy.content_verbs, r")\b"))
                .context("failed to compile content verb regex")?,
            dangling_ending: Regex::new(&word_alternation(
                r"\s(?:",
                &policy.dangling_endings,
                r")$",
            ))
            .context("failed to compile dangling ending regex")?,
        })
    }
}

impl CompiledPatterns {
    /// Splits `Artículo 4° Fines de la universidad` into the clean number and
    /// the trailing text (separator punctuation dropped).
    pub fn split_article_number(&self, text: &str) -> Option<(String, String)> {
        let trimmed = text.trim();
        let captures = self.article_split.captures(trimmed)?;
        let number = captures.name("number")?.as_str().trim().to_string();
        let rest = captures
            .name("rest")
            .map(|value| {
                value
                    .as_str()
                    .trim_start_matches(|ch: char| {
                        ch.is_whitespace() || matches!(ch, '.' | '-' | '–' | '—' | ':')
                    })
                    .trim_end()
                    .to_string()
            })
            .unwrap_or_default();
        Some((number, rest))
    }

    pub fn article_ordinal(&self, number: &str) -> Option<u32> {
        self.article_ordinal
            .captures(number)
            .and_then(|captures| captures.get(1))
            .and_then(|value| value.as_str().parse::<u32>().ok())
    }
}

fn word_alternation(prefix: &str, words: &[String], suffix: &str) -> String {
    let alternation = words
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .map(regex::escape)
        .collect::<Vec<String>>()
        .join("|");

    if alternation.is_empty() {
        // Never matches: an empty policy list disables the rule.
        return r"\b\B".to_string();
    }

    format!("(?i){prefix}{alternation}{suffix}")
}
