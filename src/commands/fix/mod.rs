use anyhow::Result;
use tracing::info;

use crate::cli::{FixArgs, FixPass};
use crate::model::{Chunk, ChunkDocument};
use crate::profile::{CompiledPatterns, DocumentProfile, TitlePolicy};
use crate::util::{join_non_empty, read_json, write_json_pretty};

mod passes;
mod run;

pub use passes::apply_passes;
pub use run::run;

use passes::*;
