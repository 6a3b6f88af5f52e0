use super::*;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ClassifiedUnit {
    pub(super) kind: UnitKind,
    pub(super) text: String,
    pub(super) importance_score: f64,
    pub(super) spans_count: usize,
}

/// One chunk per article. Long articles are kept whole and flagged for review
/// so a legal provision is never cut mid-sentence.
pub(super) fn article_chunks(articles: Vec<ArticleRecord>, classifier: &SpanClassifier) -> Vec<Chunk> {
    let long_article_words = classifier.profile.chunking.long_article_words;
    let article_format = FormatSummary::default();

    articles
        .into_iter()
        .map(|article| {
            let content = article.full_text();
            let requires_review = article.word_count > long_article_words;
            let importance_score =
                classifier.importance_score(&content, &article_format, UnitKind::Article);

            Chunk {
                content,
                title: None,
                chunk_type: ChunkType::Article,
                word_count: article.word_count,
                article_number: Some(article.number),
                article_title: Some(article.title),
                article_content: Some(article.body),
                context: article.context,
                metadata: ChunkMetadata {
                    importance_score,
                    spans_count: article.spans_count,
                    requires_review,
                    review_reason: requires_review.then(|| "long_article".to_string()),
                    corrections: Vec::new(),
                },
            }
        })
        .collect()
}

#[derive(Debug)]
struct ActiveChunk {
    content: String,
    title: Option<String>,
    chunk_type: ChunkType,
    word_count: usize,
    importance_score: f64,
    spans_count: usize,
    context: HierarchyContext,
}

impl ActiveChunk {
    fn finalize(self) -> Chunk {
        Chunk {
            content: self.content,
            title: self.title,
            chunk_type: self.chunk_type,
            word_count: self.word_count,
            article_number: None,
            article_title: None,
            article_content: None,
            context: self.context,
            metadata: ChunkMetadata {
                importance_score: self.importance_score,
                spans_count: self.spans_count,
                ..ChunkMetadata::default()
            },
        }
    }
}

/// Packs classified units into retrieval chunks. Titles and chapters open a
/// new chunk; other units are appended until the word ceiling would be
/// exceeded, at which point a continuation chunk inherits the running title.
#[derive(Debug)]
pub(super) struct ChunkAssembler {
    max_words: usize,
    overlap_words: usize,
    tracker: HierarchyTracker,
    current: Option<ActiveChunk>,
    chunks: Vec<Chunk>,
}

impl ChunkAssembler {
    pub(super) fn new(limits: &ChunkLimits) -> Self {
        Self {
            max_words: limits.max_chunk_words.max(1),
            overlap_words: limits.split_overlap_words,
            tracker: HierarchyTracker::default(),
            current: None,
            chunks: Vec::new(),
        }
    }

    pub(super) fn push(&mut self, unit: ClassifiedUnit) {
        match unit.kind {
            UnitKind::Title => self.tracker.enter(HierarchyLevel::Title, &unit.text),
            UnitKind::Chapter => self.tracker.enter(HierarchyLevel::Chapter, &unit.text),
            UnitKind::Section => self.tracker.enter(HierarchyLevel::Section, &unit.text),
            _ => {}
        }

        if unit.kind.opens_chunk() {
            self.flush();
            self.current = Some(ActiveChunk {
                word_count: word_count(&unit.text),
                content: unit.text.clone(),
                title: Some(unit.text),
                chunk_type: unit.kind.chunk_type(),
                importance_score: unit.importance_score,
                spans_count: unit.spans_count,
                context: self.tracker.snapshot(),
            });
            return;
        }

        let pieces = if word_count(&unit.text) > self.max_words {
            split_words_with_overlap(&unit.text, self.max_words, self.overlap_words)
        } else {
            vec![unit.text.clone()]
        };

        for piece in pieces {
            let piece_words = word_count(&piece);
            let overflows = self
                .current
                .as_ref()
                .map(|active| {
                    active.word_count > 0 && active.word_count + piece_words > self.max_words
                })
                .unwrap_or(false);
            if overflows {
                self.start_continuation();
            }

            let active = self.current.get_or_insert_with(|| ActiveChunk {
                content: String::new(),
                title: None,
                chunk_type: ChunkType::Content,
                word_count: 0,
                importance_score: 0.0,
                spans_count: 0,
                context: self.tracker.snapshot(),
            });

            if !active.content.is_empty() {
                active.content.push_str("\n\n");
            }
            active.content.push_str(&piece);
            active.word_count += piece_words;
            active.importance_score = active.importance_score.max(unit.importance_score);
            active.spans_count += unit.spans_count;
        }
    }

    pub(super) fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }

    fn flush(&mut self) {
        if let Some(active) = self.current.take() {
            if !active.content.trim().is_empty() {
                self.chunks.push(active.finalize());
            }
        }
    }

    fn start_continuation(&mut self) {
        let inherited_title = self.current.as_ref().and_then(|active| active.title.clone());
        self.flush();
        self.current = Some(ActiveChunk {
            content: String::new(),
            title: inherited_title,
            chunk_type: ChunkType::Content,
            word_count: 0,
            importance_score: 0.0,
            spans_count: 0,
            context: self.tracker.snapshot(),
        });
    }
}

pub(super) fn split_words_with_overlap(text: &str, max_words: usize, overlap_words: usize) -> Vec<String> {
    let words = text.split_whitespace().collect::<Vec<&str>>();
    if words.is_empty() {
        return vec![String::new()];
    }
    if words.len() <= max_words {
        return vec![words.join(" ")];
    }

    let mut segments = Vec::<String>::new();
    let mut start = 0usize;

    while start < words.len() {
        let end = (start + max_words).min(words.len());
        segments.push(words[start..end].join(" "));

        if end == words.len() {
            break;
        }

        let mut next_start = end.saturating_sub(overlap_words);
        if next_start <= start {
            next_start = end;
        }
        start = next_start;
    }

    segments
}
