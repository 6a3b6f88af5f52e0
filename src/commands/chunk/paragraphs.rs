use super::*;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Paragraph {
    pub(super) text: String,
    pub(super) format: FormatSummary,
}

impl Paragraph {
    /// The paragraph seen as one span carrying its dominant format, so the
    /// span rules can classify it.
    pub(super) fn as_span(&self) -> Span {
        Span {
            italic: self.format.italic,
            ..Span::new(&self.text, &self.format.font, self.format.size, self.format.bold)
        }
    }
}

/// Greedy forward merge. A new paragraph starts when the previous span ends a
/// sentence, the current span is a heading or an article number, or the
/// typography changes.
pub(super) fn group_paragraphs(spans: &[Span], classifier: &SpanClassifier) -> Vec<Paragraph> {
    fn finalize(text: String, members: &[Span]) -> Paragraph {
        Paragraph {
            text: text.trim().to_string(),
            format: FormatSummary::of(members),
        }
    }

    let mut paragraphs = Vec::<Paragraph>::new();
    let mut current = String::new();
    let mut members = Vec::<Span>::new();

    for (index, span) in spans.iter().enumerate() {
        let text = span.text.as_str();
        if text.trim().is_empty() {
            continue;
        }

        if current.is_empty() {
            current.push_str(text);
            members.push(span.clone());
            continue;
        }

        let previous = index.checked_sub(1).and_then(|prev| spans.get(prev));
        let previous_ends_sentence = previous
            .map(|prev| ends_sentence(&prev.text))
            .unwrap_or(false);
        let format_changed = previous
            .map(|prev| classifier.format_changed(prev, span))
            .unwrap_or(false);

        let starts_new = previous_ends_sentence
            || classifier.is_title_or_header(span)
            || classifier.is_loose_article(text)
            || format_changed;

        if starts_new {
            paragraphs.push(finalize(std::mem::take(&mut current), &members));
            members.clear();
            current.push_str(text);
            members.push(span.clone());
            continue;
        }

        if !current.ends_with(' ') && !text.starts_with(' ') {
            current.push(' ');
        }
        current.push_str(text);
        members.push(span.clone());
    }

    if !current.trim().is_empty() {
        paragraphs.push(finalize(current, &members));
    }

    paragraphs
}

fn ends_sentence(text: &str) -> bool {
    let text = text.trim_end();
    text.ends_with('.') || text.ends_with('!') || text.ends_with('?')
}
