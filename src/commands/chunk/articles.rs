use super::*;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ArticleRecord {
    pub(super) number: String,
    pub(super) title: String,
    pub(super) body: String,
    pub(super) context: HierarchyContext,
    pub(super) word_count: usize,
    pub(super) spans_count: usize,
}

impl ArticleRecord {
    pub(super) fn full_text(&self) -> String {
        join_non_empty(&[&self.number, &self.title, &self.body])
    }
}

#[derive(Debug, Default)]
pub(super) struct ArticleExtraction {
    pub(super) articles: Vec<ArticleRecord>,
    pub(super) orphan_spans: usize,
}

#[derive(Debug)]
struct ActiveArticle {
    number: String,
    title: String,
    body_parts: Vec<String>,
    context: HierarchyContext,
    spans_count: usize,
}

impl ActiveArticle {
    fn push_body(&mut self, text: &str) {
        self.body_parts.push(text.to_string());
        self.spans_count += 1;
    }
}

fn finalize(active: ActiveArticle) -> ArticleRecord {
    let mut record = ArticleRecord {
        number: active.number,
        title: active.title,
        body: active.body_parts.join(" "),
        context: active.context,
        word_count: 0,
        spans_count: active.spans_count,
    };
    record.word_count = word_count(&record.full_text());
    record
}

/// Single forward pass: `idle -> in_article -> idle`. An article closes on the
/// next article start, on a title or chapter marker, or at end of input.
/// Section headers met inside an article update the context and stay in the
/// body.
pub(super) fn extract_articles(spans: &[Span], classifier: &SpanClassifier) -> ArticleExtraction {
    let mut extraction = ArticleExtraction::default();
    let mut tracker = HierarchyTracker::default();
    let mut current: Option<ActiveArticle> = None;
    let mut index = 0usize;

    while index < spans.len() {
        let span = &spans[index];

        if classifier.is_article_start(span) {
            if let Some(active) = current.take() {
                extraction.articles.push(finalize(active));
            }

            let (active, consumed) = open_article(classifier, spans, index, tracker.snapshot());
            current = Some(active);
            index += consumed;
            continue;
        }

        if let Some(marker) = tracker.observe(classifier, spans, index) {
            if marker.level == HierarchyLevel::Section {
                if let Some(active) = current.as_mut() {
                    active.push_body(&span.text);
                }
            } else if let Some(active) = current.take() {
                extraction.articles.push(finalize(active));
            }
            index += marker.consumed.max(1);
            continue;
        }

        match current.as_mut() {
            Some(active) => active.push_body(&span.text),
            None => extraction.orphan_spans += 1,
        }
        index += 1;
    }

    if let Some(active) = current.take() {
        extraction.articles.push(finalize(active));
    }

    extraction
}

/// Builds the article opened at `spans[index]` and returns how many spans
/// were used for its number and title.
fn open_article(
    classifier: &SpanClassifier,
    spans: &[Span],
    index: usize,
    context: HierarchyContext,
) -> (ActiveArticle, usize) {
    let span = &spans[index];
    let (number, inline_rest) = classifier
        .patterns
        .split_article_number(&span.text)
        .unwrap_or_else(|| (span.text.trim().to_string(), String::new()));

    let mut active = ActiveArticle {
        number,
        title: String::new(),
        body_parts: Vec::new(),
        context,
        spans_count: 1,
    };

    if !inline_rest.is_empty() {
        if looks_like_title(classifier, &inline_rest) {
            active.title = inline_rest;
        } else {
            active.body_parts.push(inline_rest);
        }
        return (active, 1);
    }

    let Some(next) = spans.get(index + 1) else {
        return (active, 1);
    };

    let next_is_structural = classifier.is_article_start(next)
        || classifier.is_title_start(next)
        || classifier.is_chapter(&next.text);
    if next_is_structural || !looks_like_title(classifier, &next.text) {
        return (active, 1);
    }

    active.title = next.text.clone();
    active.spans_count += 1;
    (active, 2)
}

/// Titles are terse noun phrases; bodies are full sentences.
fn looks_like_title(classifier: &SpanClassifier, text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && text.chars().count() < classifier.profile.title_policy.max_lookahead_title_chars
        && !text.ends_with('.')
}
