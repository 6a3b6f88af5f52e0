use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cli::AnalyzeArgs;
use crate::model::{Chunk, ChunkDocument};
use crate::profile::{AnalyzerThresholds, CompiledPatterns, DocumentProfile};
use crate::util::{char_prefix, char_suffix, now_utc_string, read_json, write_json_pretty};

mod checks;
mod run;
#[cfg(test)]
mod tests;
mod types;

pub use run::run;

use checks::*;
use types::*;
