use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::{EditAction, EditArgs};
use crate::model::{Chunk, ChunkDocument, ChunkMetadata, ChunkType};
use crate::profile::DocumentProfile;
use crate::util::{char_prefix, join_non_empty, read_json, word_count, write_json_pretty};

const MANUAL_PROCESSING_METHOD: &str = "manual_editing";
const LIST_PREVIEW_CHARS: usize = 60;

pub fn run(args: EditArgs) -> Result<()> {
    let Some(input) = args.input.clone() else {
        bail!("edit requires --input <chunk document>");
    };
    let profile = DocumentProfile::load_or_default(args.profile.as_deref())?;
    let sentinel = profile.title_policy.no_title_sentinel.as_str();
    let mut document: ChunkDocument = read_json(&input)?;

    match args.action {
        EditAction::List => {
            for line in list_lines(&document) {
                println!("{line}");
            }
            return Ok(());
        }
        EditAction::Show { index } => {
            let chunk = chunk_at(&document, index)?;
            let rendered =
                serde_json::to_string_pretty(chunk).context("failed to render chunk as json")?;
            println!("{rendered}");
            return Ok(());
        }
        EditAction::Delete { index } => {
            let removed = delete_chunk(&mut document, index)?;
            info!(index, chunk = %removed.label(index), "deleted chunk");
        }
        EditAction::Merge { index } => {
            merge_with_next(&mut document, index, sentinel)?;
            info!(index, "merged chunk with next");
        }
        EditAction::Split { index, at } => {
            split_chunk(&mut document, index, &SplitPoint::parse(&at), sentinel)?;
            info!(index, at = %at, "split chunk");
        }
        EditAction::Set {
            index,
            number,
            title,
            content,
        } => {
            let edit = ChunkEdit {
                number,
                title,
                content,
            };
            if edit.is_empty() {
                bail!("set requires at least one of --number, --title or --content");
            }
            set_fields(&mut document, index, edit, sentinel)?;
            info!(index, "updated chunk fields");
        }
    }

    mark_manually_edited(&mut document);
    let output_path = args.output.clone().unwrap_or(input);
    write_json_pretty(&output_path, &document)?;

    info!(
        path = %output_path.display(),
        chunks = document.total_chunks,
        "saved edited chunk document"
    );
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SplitPoint {
    CharPosition(usize),
    Before(String),
}

impl SplitPoint {
    fn parse(raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(position) => Self::CharPosition(position),
            Err(_) => Self::Before(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ChunkEdit {
    number: Option<String>,
    title: Option<String>,
    content: Option<String>,
}

impl ChunkEdit {
    fn is_empty(&self) -> bool {
        self.number.is_none() && self.title.is_none() && self.content.is_none()
    }
}

fn list_lines(document: &ChunkDocument) -> Vec<String> {
    document
        .chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            format!(
                "{index:>4}  {:<8} {:>5}w  {}  {}",
                chunk.chunk_type.as_str(),
                chunk.word_count,
                chunk.label(index),
                char_prefix(chunk.body(), LIST_PREVIEW_CHARS)
            )
        })
        .collect()
}

fn chunk_at(document: &ChunkDocument, index: usize) -> Result<&Chunk> {
    let total = document.chunks.len();
    document
        .chunks
        .get(index)
        .with_context(|| format!("chunk index {index} out of range ({total} chunks)"))
}

fn delete_chunk(document: &mut ChunkDocument, index: usize) -> Result<Chunk> {
    chunk_at(document, index)?;
    Ok(document.chunks.remove(index))
}

/// Appends the next chunk's full content to the body of chunk `index`.
fn merge_with_next(document: &mut ChunkDocument, index: usize, sentinel: &str) -> Result<()> {
    chunk_at(document, index)?;
    if index + 1 >= document.chunks.len() {
        bail!("chunk {index} has no following chunk to merge with");
    }

    let next = document.chunks.remove(index + 1);
    let chunk = &mut document.chunks[index];

    if chunk.is_article() {
        let body = chunk.article_content.as_deref().unwrap_or("");
        chunk.article_content = Some(join_non_empty(&[body, &next.content]));
    } else {
        chunk.content = join_non_empty(&[&chunk.content, &next.content]);
    }

    chunk.metadata.spans_count += next.metadata.spans_count;
    chunk.metadata.requires_review |= next.metadata.requires_review;
    record_correction(chunk, "manual_merge");
    chunk.refresh_article_text(sentinel);
    Ok(())
}

/// Splits the chunk body. The tail becomes a content chunk right after the
/// original, keeping its title and hierarchy context.
fn split_chunk(
    document: &mut ChunkDocument,
    index: usize,
    point: &SplitPoint,
    sentinel: &str,
) -> Result<()> {
    let chunk = chunk_at(document, index)?;
    let body = chunk.body().to_string();

    let byte_index = match point {
        SplitPoint::CharPosition(position) => {
            let total = body.chars().count();
            if *position == 0 || *position >= total {
                bail!("split position {position} must be inside the body (1..{total})");
            }
            body.char_indices()
                .nth(*position)
                .map(|(byte, _)| byte)
                .with_context(|| format!("split position {position} is out of range"))?
        }
        SplitPoint::Before(needle) => body
            .find(needle.as_str())
            .with_context(|| format!("text {needle:?} not found in chunk {index}"))?,
    };

    let head = body[..byte_index].trim().to_string();
    let tail = body[byte_index..].trim().to_string();
    if head.is_empty() || tail.is_empty() {
        bail!("split of chunk {index} would leave an empty part");
    }

    let chunk = &mut document.chunks[index];
    if chunk.is_article() {
        chunk.article_content = Some(head);
    } else {
        chunk.content = head;
    }
    record_correction(chunk, "manual_split");
    chunk.refresh_article_text(sentinel);

    let tail_chunk = Chunk {
        word_count: word_count(&tail),
        content: tail,
        title: chunk.title.clone(),
        chunk_type: ChunkType::Content,
        article_number: None,
        article_title: None,
        article_content: None,
        context: chunk.context.clone(),
        metadata: ChunkMetadata {
            importance_score: chunk.metadata.importance_score,
            corrections: vec!["manual_split".to_string()],
            ..ChunkMetadata::default()
        },
    };
    document.chunks.insert(index + 1, tail_chunk);
    Ok(())
}

fn set_fields(
    document: &mut ChunkDocument,
    index: usize,
    edit: ChunkEdit,
    sentinel: &str,
) -> Result<()> {
    chunk_at(document, index)?;
    let chunk = &mut document.chunks[index];

    if let Some(number) = edit.number {
        chunk.article_number = Some(number);
        if chunk.article_content.is_none() {
            chunk.article_content = Some(chunk.content.clone());
            if chunk.article_title.is_none() {
                chunk.article_title = Some(String::new());
            }
        }
        chunk.chunk_type = ChunkType::Article;
    }
    if let Some(title) = edit.title {
        if chunk.is_article() {
            chunk.article_title = Some(title);
        } else {
            chunk.title = Some(title);
        }
    }
    if let Some(content) = edit.content {
        if chunk.is_article() {
            chunk.article_content = Some(content);
        } else {
            chunk.content = content;
        }
    }

    record_correction(chunk, "manual_edit");
    chunk.refresh_article_text(sentinel);
    Ok(())
}

fn record_correction(chunk: &mut Chunk, name: &str) {
    if !chunk.metadata.corrections.iter().any(|existing| existing == name) {
        chunk.metadata.corrections.push(name.to_string());
    }
}

fn mark_manually_edited(document: &mut ChunkDocument) {
    document.sync_counts();
    document.stats.processing_method = MANUAL_PROCESSING_METHOD.to_string();
}
