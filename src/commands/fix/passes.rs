use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    pub pass: FixPass,
    pub examined: usize,
    pub corrected: usize,
}

/// Runs the passes in the given order. Each pass only touches article chunks
/// and leaves chunks it cannot repair unchanged.
pub fn apply_passes(
    chunks: &mut [Chunk],
    passes: &[FixPass],
    patterns: &CompiledPatterns,
    policy: &TitlePolicy,
) -> Vec<PassOutcome> {
    passes
        .iter()
        .map(|pass| apply_pass(chunks, *pass, patterns, policy))
        .collect()
}

pub(super) fn apply_pass(
    chunks: &mut [Chunk],
    pass: FixPass,
    patterns: &CompiledPatterns,
    policy: &TitlePolicy,
) -> PassOutcome {
    let mut outcome = PassOutcome {
        pass,
        examined: 0,
        corrected: 0,
    };

    for chunk in chunks.iter_mut().filter(|chunk| chunk.is_article()) {
        outcome.examined += 1;

        let changed = match pass {
            FixPass::Structure => split_number_fragment(chunk, patterns, policy),
            FixPass::ContentShift => shift_subitem_title(chunk, patterns),
            FixPass::ProblematicTitles => reclassify_title(chunk, patterns, policy),
        };

        if changed {
            outcome.corrected += 1;
            if !chunk.metadata.corrections.iter().any(|name| name == pass.as_str()) {
                chunk.metadata.corrections.push(pass.as_str().to_string());
            }
            chunk.refresh_article_text(&policy.no_title_sentinel);
        }
    }

    outcome
}

/// `Artículo 4° Fines de la UNSAAC` stored as the number becomes a clean
/// number plus a title. A title already present moves to the front of the body.
fn split_number_fragment(chunk: &mut Chunk, patterns: &CompiledPatterns, policy: &TitlePolicy) -> bool {
    let Some(number) = chunk.article_number.as_deref() else {
        return false;
    };
    let Some((clean_number, fragment)) = patterns.split_article_number(number) else {
        return false;
    };
    if fragment.is_empty() {
        return false;
    }

    let previous_title = chunk.article_title.take().unwrap_or_default();
    if !previous_title.trim().is_empty() && previous_title != policy.no_title_sentinel {
        let body = chunk.article_content.as_deref().unwrap_or("");
        chunk.article_content = Some(join_non_empty(&[&previous_title, body]));
    }

    chunk.article_number = Some(clean_number);
    chunk.article_title = Some(fragment);
    true
}

/// A title starting with `4.1.` is the first numbered item of the body.
fn shift_subitem_title(chunk: &mut Chunk, patterns: &CompiledPatterns) -> bool {
    let Some(title) = chunk.article_title.as_deref().map(str::trim) else {
        return false;
    };
    if !patterns.subitem.is_match(title) {
        return false;
    }

    let body = chunk.article_content.as_deref().unwrap_or("");
    chunk.article_content = Some(join_non_empty(&[title, body]));
    chunk.article_title = Some(String::new());
    true
}

fn reclassify_title(chunk: &mut Chunk, patterns: &CompiledPatterns, policy: &TitlePolicy) -> bool {
    let Some(title) = chunk.article_title.clone() else {
        return false;
    };

    if is_legacy_no_title_marker(&title) {
        chunk.article_title = Some(policy.no_title_sentinel.clone());
        return true;
    }

    if title_problem(&title, patterns, policy).is_none() {
        return false;
    }

    let title = title.trim();
    let body = chunk.article_content.as_deref().unwrap_or("");
    chunk.article_content = Some(join_non_empty(&[title, body]));
    chunk.article_title = Some(policy.no_title_sentinel.clone());
    true
}

fn is_legacy_no_title_marker(title: &str) -> bool {
    title.trim().eq_ignore_ascii_case("no tiene")
}

/// Reason a title reads like body text, if any.
pub(super) fn title_problem(
    title: &str,
    patterns: &CompiledPatterns,
    policy: &TitlePolicy,
) -> Option<&'static str> {
    let title = title.trim();
    if title.is_empty() || title == policy.no_title_sentinel {
        return None;
    }

    if title.chars().count() > policy.max_title_chars {
        return Some("too_long");
    }
    if patterns.content_verb.is_match(title) {
        return Some("content_verb");
    }
    if title.ends_with(',') {
        return Some("trailing_comma");
    }
    if title.ends_with(':') {
        return Some("trailing_colon");
    }
    if policy.max_title_commas > 0 && title.matches(',').count() >= policy.max_title_commas {
        return Some("too_many_commas");
    }
    if patterns.dangling_ending.is_match(title) {
        return Some("dangling_ending");
    }

    None
}
