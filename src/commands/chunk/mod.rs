use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::{ChunkArgs, FixPass};
use crate::commands::fix;
use crate::model::{
    Chunk, ChunkDocument, ChunkMetadata, ChunkType, ExtractionMode, HierarchyContext,
    ProcessingStats, RawSpan, RawSpanDocument, Span,
};
use crate::profile::{ChunkLimits, CompiledPatterns, DocumentProfile};
use crate::util::{
    is_upper_text, join_non_empty, now_utc_string, read_json, sha256_file, word_count,
    write_json_pretty,
};

mod articles;
mod assemble;
mod classify;
mod hierarchy;
mod paragraphs;
mod pipeline;
mod run;
mod span_filter;

pub use run::run;

use articles::*;
use assemble::*;
use classify::*;
use hierarchy::*;
use paragraphs::*;
use pipeline::*;
use span_filter::*;
