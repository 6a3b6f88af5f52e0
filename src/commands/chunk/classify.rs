use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UnitKind {
    Title,
    Chapter,
    Section,
    Article,
    ListItem,
    Content,
}

impl UnitKind {
    pub(super) fn chunk_type(self) -> ChunkType {
        match self {
            UnitKind::Title => ChunkType::Title,
            UnitKind::Chapter => ChunkType::Chapter,
            UnitKind::Section => ChunkType::Section,
            UnitKind::Article => ChunkType::Article,
            UnitKind::ListItem | UnitKind::Content => ChunkType::Content,
        }
    }

    pub(super) fn opens_chunk(self) -> bool {
        matches!(self, UnitKind::Title | UnitKind::Chapter)
    }

    fn importance_weight(self) -> f64 {
        match self {
            UnitKind::Title => 5.0,
            UnitKind::Chapter => 4.0,
            UnitKind::Section | UnitKind::Article => 3.5,
            UnitKind::ListItem => 2.0,
            UnitKind::Content => 1.0,
        }
    }
}

/// Dominant typography of one span or a run of spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct FormatSummary {
    pub(super) font: String,
    pub(super) size: f64,
    pub(super) bold: bool,
    pub(super) italic: bool,
    pub(super) span_count: usize,
}

impl FormatSummary {
    pub(super) fn of(spans: &[Span]) -> Self {
        if spans.is_empty() {
            return Self::default();
        }

        let bold_count = spans.iter().filter(|span| span.bold).count();
        let italic_count = spans.iter().filter(|span| span.italic).count();

        Self {
            font: modal_value(spans.iter().map(|span| span.font.clone())).unwrap_or_default(),
            // Sizes are compared at centipoint resolution so f64 noise does not split modes.
            size: modal_value(spans.iter().map(|span| (span.size * 100.0).round() as i64))
                .map(|centi| centi as f64 / 100.0)
                .unwrap_or(0.0),
            bold: bold_count * 2 > spans.len(),
            italic: italic_count * 2 > spans.len(),
            span_count: spans.len(),
        }
    }
}

/// Most frequent value; ties go to the value seen first.
fn modal_value<T: PartialEq>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut counts = Vec::<(T, usize)>::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let best = counts.iter().map(|(_, count)| *count).max()?;
    counts
        .into_iter()
        .find(|(_, count)| *count == best)
        .map(|(value, _)| value)
}

type RulePredicate = fn(&SpanClassifier, &Span) -> bool;

#[derive(Clone, Copy)]
pub(super) struct ClassifierRule {
    pub(super) name: &'static str,
    pub(super) kind: UnitKind,
    predicate: RulePredicate,
}

impl std::fmt::Debug for ClassifierRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierRule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Evaluated top to bottom; the first matching rule labels the span.
fn default_rules() -> Vec<ClassifierRule> {
    vec![
        ClassifierRule {
            name: "title_keyword",
            kind: UnitKind::Title,
            predicate: |classifier, span| classifier.patterns.title.is_match(&span.text),
        },
        ClassifierRule {
            name: "chapter_keyword",
            kind: UnitKind::Chapter,
            predicate: |classifier, span| classifier.is_chapter(&span.text),
        },
        ClassifierRule {
            name: "article_keyword",
            kind: UnitKind::Article,
            predicate: |classifier, span| classifier.is_article_start(span),
        },
        ClassifierRule {
            name: "section_keyword",
            kind: UnitKind::Section,
            predicate: |classifier, span| classifier.patterns.section.is_match(&span.text),
        },
        ClassifierRule {
            name: "short_uppercase",
            kind: UnitKind::Title,
            predicate: |classifier, span| {
                span.text.chars().count() < classifier.profile.short_upper_title_chars
                    && is_upper_text(&span.text)
            },
        },
        ClassifierRule {
            name: "emphasis_heading",
            kind: UnitKind::Title,
            predicate: |classifier, span| {
                classifier.is_emphasis(span) && span.size > classifier.profile.title_size_threshold
            },
        },
        ClassifierRule {
            name: "list_marker",
            kind: UnitKind::ListItem,
            predicate: |classifier, span| classifier.patterns.list_item.is_match(&span.text),
        },
    ]
}

#[derive(Debug)]
pub(super) struct SpanClassifier {
    pub(super) profile: DocumentProfile,
    pub(super) patterns: CompiledPatterns,
    rules: Vec<ClassifierRule>,
}

impl SpanClassifier {
    pub(super) fn new(profile: &DocumentProfile) -> Result<Self> {
        Ok(Self {
            profile: profile.clone(),
            patterns: CompiledPatterns::compile(profile)?,
            rules: default_rules(),
        })
    }

    pub(super) fn classify(&self, span: &Span) -> UnitKind {
        self.matching_rule(span)
            .map(|rule| rule.kind)
            .unwrap_or(UnitKind::Content)
    }

    pub(super) fn matching_rule(&self, span: &Span) -> Option<&ClassifierRule> {
        self.rules.iter().find(|rule| (rule.predicate)(self, span))
    }

    pub(super) fn is_emphasis(&self, span: &Span) -> bool {
        span.font == self.profile.emphasis_font
    }

    /// The keyword alone is not enough: body text cites other articles, so the
    /// span must also be set in the emphasis font.
    pub(super) fn is_article_start(&self, span: &Span) -> bool {
        self.patterns.article.is_match(&span.text) && self.is_emphasis(span)
    }

    pub(super) fn is_title_start(&self, span: &Span) -> bool {
        self.patterns.title.is_match(&span.text)
            && self.is_emphasis(span)
            && span.size > self.profile.title_size_threshold
    }

    pub(super) fn is_chapter(&self, text: &str) -> bool {
        self.patterns.chapter.is_match(text)
    }

    pub(super) fn is_section_header(&self, span: &Span) -> bool {
        if self.patterns.section.is_match(&span.text) {
            return true;
        }

        span.text.chars().count() < 200
            && is_upper_text(&span.text)
            && span.size > self.profile.section_header_size
    }

    /// Paragraph-boundary test for the generic grouping strategy.
    pub(super) fn is_title_or_header(&self, span: &Span) -> bool {
        let text = span.text.trim();
        if text.chars().count() > 3 && is_upper_text(text) {
            return true;
        }
        if span.size > self.profile.large_text_size {
            return true;
        }
        if span.bold && word_count(text) <= 10 {
            return true;
        }

        self.patterns.chapter.is_match(text)
            || self.patterns.title.is_match(text)
            || self.patterns.section.is_match(text)
    }

    pub(super) fn is_loose_article(&self, text: &str) -> bool {
        self.patterns.loose_article.is_match(text.trim())
    }

    pub(super) fn format_changed(&self, previous: &Span, current: &Span) -> bool {
        (previous.size - current.size).abs() > self.profile.format_size_delta
            || previous.bold != current.bold
            || previous.font != current.font
    }

    pub(super) fn importance_score(&self, text: &str, format: &FormatSummary, kind: UnitKind) -> f64 {
        let mut score = kind.importance_weight();

        if format.bold {
            score *= 1.5;
        }
        if format.size > 14.0 {
            score *= 1.2;
        }
        if format.size > 18.0 {
            score *= 1.5;
        }

        let lowered = text.to_lowercase();
        let keyword_hits = self
            .profile
            .importance_keywords
            .iter()
            .filter(|keyword| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()))
            .count();
        if keyword_hits > 0 {
            score *= 1.0 + keyword_hits as f64 * 0.1;
        }

        score.min(10.0)
    }
}
