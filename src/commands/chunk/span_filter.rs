use super::*;

#[derive(Debug, Default)]
pub(super) struct DecodedSpans {
    pub(super) spans: Vec<Span>,
    pub(super) original_count: usize,
    pub(super) malformed_count: usize,
}

/// Reads span entries one by one; entries without a text string are counted
/// and dropped instead of failing the document.
pub(super) fn decode_spans(raw: &RawSpanDocument) -> DecodedSpans {
    let Some(entries) = raw.content.as_ref() else {
        return DecodedSpans::default();
    };

    let mut decoded = DecodedSpans {
        original_count: entries.len(),
        ..DecodedSpans::default()
    };

    for entry in entries {
        let span = serde_json::from_value::<RawSpan>(entry.clone())
            .ok()
            .and_then(Span::from_raw);
        match span {
            Some(span) => decoded.spans.push(span),
            None => decoded.malformed_count += 1,
        }
    }

    decoded
}

pub(super) fn filter_spans(spans: Vec<Span>, min_chars: usize) -> Vec<Span> {
    spans
        .into_iter()
        .filter_map(|mut span| {
            span.text = normalize_span_text(&span.text);
            if span.text.chars().count() < min_chars.max(1) {
                return None;
            }
            Some(span)
        })
        .collect()
}

pub(super) fn normalize_span_text(text: &str) -> String {
    let cleaned = text
        .chars()
        .filter(|ch| !ch.is_control() || ch.is_whitespace())
        .map(|ch| match ch {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect::<String>();

    cleaned.split_whitespace().collect::<Vec<&str>>().join(" ")
}
