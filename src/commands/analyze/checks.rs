use super::*;

const PREVIEW_CHARS: usize = 150;
const TAIL_PREVIEW_CHARS: usize = 100;
/// Gaps wider than this list only their first numbers.
const MISSING_NUMBERS_LIMIT: usize = 50;

/// Read-only quality pass over a finished chunk list.
pub fn analyze_chunks(
    chunks: &[Chunk],
    patterns: &CompiledPatterns,
    profile: &DocumentProfile,
) -> Vec<Issue> {
    let thresholds = &profile.analyzer;
    let keyword = profile.article_keyword.as_str();

    let mut issues = Vec::new();
    issues.extend(missing_articles(chunks, patterns));
    issues.extend(merged_articles(chunks, keyword));
    issues.extend(incomplete_content(chunks, thresholds));
    issues.extend(long_chunks(chunks, thresholds));
    issues.extend(short_chunks(chunks, thresholds));
    issues.extend(inconsistent_numbering(chunks, keyword, thresholds));
    issues
}

pub(super) fn missing_articles(chunks: &[Chunk], patterns: &CompiledPatterns) -> Vec<Issue> {
    let mut numbered = chunks
        .iter()
        .enumerate()
        .filter_map(|(index, chunk)| {
            let number = chunk.article_number.as_deref()?;
            patterns.article_ordinal(number).map(|ordinal| (ordinal, index))
        })
        .collect::<Vec<(u32, usize)>>();
    numbered.sort();

    numbered
        .windows(2)
        .filter_map(|pair| {
            let (previous, _) = pair[0];
            let (current, index) = pair[1];
            let first_missing = previous.checked_add(1)?;
            if current <= first_missing {
                return None;
            }

            let gap = current - first_missing;
            let missing = (first_missing..current)
                .take(MISSING_NUMBERS_LIMIT)
                .collect::<Vec<u32>>();
            let description = if gap as usize > missing.len() {
                format!(
                    "possible missing articles: {gap} numbers from {first_missing} to {}",
                    current - 1
                )
            } else {
                format!("possible missing articles: {missing:?}")
            };

            let mut issue = Issue::new(IssueType::MissingArticles, index, &chunks[index], description);
            issue.missing_numbers = missing;
            issue.missing_total = Some(gap);
            Some(issue)
        })
        .collect()
}

pub(super) fn merged_articles(chunks: &[Chunk], keyword: &str) -> Vec<Issue> {
    if keyword.is_empty() {
        return Vec::new();
    }

    chunks
        .iter()
        .enumerate()
        .filter_map(|(index, chunk)| {
            let occurrences = chunk.content.matches(keyword).count();
            if occurrences <= 1 {
                return None;
            }

            let mut issue = Issue::new(
                IssueType::MergedArticles,
                index,
                chunk,
                format!("chunk contains {occurrences} occurrences of {keyword:?}"),
            );
            issue.preview = Some(char_prefix(&chunk.content, PREVIEW_CHARS).to_string());
            Some(issue)
        })
        .collect()
}

pub(super) fn incomplete_content(chunks: &[Chunk], thresholds: &AnalyzerThresholds) -> Vec<Issue> {
    chunks
        .iter()
        .enumerate()
        .filter_map(|(index, chunk)| {
            let content = chunk.content.trim();
            if content.chars().count() <= thresholds.incomplete_min_chars
                || content.ends_with(['.', ':', ';'])
            {
                return None;
            }

            let mut issue = Issue::new(
                IssueType::IncompleteContent,
                index,
                chunk,
                "content may be truncated".to_string(),
            );
            issue.preview = Some(char_suffix(content, TAIL_PREVIEW_CHARS).to_string());
            Some(issue)
        })
        .collect()
}

pub(super) fn long_chunks(chunks: &[Chunk], thresholds: &AnalyzerThresholds) -> Vec<Issue> {
    chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| chunk.word_count > thresholds.long_chunk_words)
        .map(|(index, chunk)| {
            let mut issue = Issue::new(
                IssueType::LongChunk,
                index,
                chunk,
                format!("chunk is very long ({} words)", chunk.word_count),
            );
            issue.word_count = Some(chunk.word_count);
            issue
        })
        .collect()
}

pub(super) fn short_chunks(chunks: &[Chunk], thresholds: &AnalyzerThresholds) -> Vec<Issue> {
    chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| chunk.word_count < thresholds.short_chunk_words)
        .map(|(index, chunk)| {
            let mut issue = Issue::new(
                IssueType::ShortChunk,
                index,
                chunk,
                format!("chunk is very short ({} words)", chunk.word_count),
            );
            issue.word_count = Some(chunk.word_count);
            issue.preview = Some(char_prefix(&chunk.content, PREVIEW_CHARS).to_string());
            issue
        })
        .collect()
}

/// Only article-like numbers in chunks that mention the keyword are checked.
pub(super) fn inconsistent_numbering(
    chunks: &[Chunk],
    keyword: &str,
    thresholds: &AnalyzerThresholds,
) -> Vec<Issue> {
    chunks
        .iter()
        .enumerate()
        .filter_map(|(index, chunk)| {
            let number = chunk.article_number.as_deref()?.trim();
            if keyword.is_empty() || !number.contains(keyword) || !chunk.content.contains(keyword) {
                return None;
            }

            let window = char_prefix(&chunk.content, thresholds.numbering_window_chars);
            if window.contains(number) {
                return None;
            }

            let mut issue = Issue::new(
                IssueType::InconsistentNumbering,
                index,
                chunk,
                format!("article number {number:?} not found at the start of the content"),
            );
            issue.preview = Some(window.to_string());
            Some(issue)
        })
        .collect()
}
