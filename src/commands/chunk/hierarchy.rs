use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HierarchyLevel {
    Title,
    Chapter,
    Section,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct StructuralMarker {
    pub(super) level: HierarchyLevel,
    pub(super) text: String,
    /// Spans covered by the marker, the marker span included.
    pub(super) consumed: usize,
}

/// Running title/chapter/section state for one forward scan. Levels are
/// overwritten, never stacked: a title clears chapter and section, a chapter
/// clears section.
#[derive(Debug, Default)]
pub(super) struct HierarchyTracker {
    context: HierarchyContext,
}

impl HierarchyTracker {
    pub(super) fn snapshot(&self) -> HierarchyContext {
        self.context.clone()
    }

    pub(super) fn enter(&mut self, level: HierarchyLevel, text: &str) {
        match level {
            HierarchyLevel::Title => {
                self.context.title = text.to_string();
                self.context.chapter.clear();
                self.context.section.clear();
            }
            HierarchyLevel::Chapter => {
                self.context.chapter = text.to_string();
                self.context.section.clear();
            }
            HierarchyLevel::Section => {
                self.context.section = text.to_string();
            }
        }
    }

    /// Checks `spans[index]` for a structural marker and updates the context.
    /// Title starts pull in up to `title_max_lines - 1` following spans that
    /// share the title's font and size.
    pub(super) fn observe(
        &mut self,
        classifier: &SpanClassifier,
        spans: &[Span],
        index: usize,
    ) -> Option<StructuralMarker> {
        let span = spans.get(index)?;

        let marker = if classifier.is_title_start(span) {
            let (text, consumed) = coalesce_title(classifier, spans, index);
            StructuralMarker {
                level: HierarchyLevel::Title,
                text,
                consumed,
            }
        } else if classifier.is_chapter(&span.text) {
            StructuralMarker {
                level: HierarchyLevel::Chapter,
                text: span.text.clone(),
                consumed: 1,
            }
        } else if classifier.is_section_header(span) {
            StructuralMarker {
                level: HierarchyLevel::Section,
                text: span.text.clone(),
                consumed: 1,
            }
        } else {
            return None;
        };

        self.enter(marker.level, &marker.text);
        Some(marker)
    }
}

fn coalesce_title(classifier: &SpanClassifier, spans: &[Span], index: usize) -> (String, usize) {
    let start = &spans[index];
    let tolerance = classifier.profile.title_size_tolerance;
    let window_end = index + classifier.profile.title_max_lines.max(1);

    let mut text = start.text.clone();
    let mut next = index + 1;

    while next < spans.len() && next < window_end {
        let candidate = &spans[next];
        let same_format =
            candidate.font == start.font && (candidate.size - start.size).abs() < tolerance;
        if !same_format
            || classifier.patterns.title.is_match(&candidate.text)
            || classifier.is_chapter(&candidate.text)
            || classifier.is_article_start(candidate)
        {
            break;
        }

        text.push(' ');
        text.push_str(&candidate.text);
        next += 1;
    }

    (text, next - index)
}
