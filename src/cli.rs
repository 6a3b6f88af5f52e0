use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::ExtractionMode;

#[derive(Parser, Debug)]
#[command(
    name = "legal-chunker",
    version,
    about = "Structural chunking of legal documents from typed PDF spans"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Chunk(ChunkArgs),
    Fix(FixArgs),
    Analyze(AnalyzeArgs),
    Edit(EditArgs),
    Profile(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ChunkArgs {
    #[arg(long = "input")]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = ExtractionMode::LegalArticles)]
    pub mode: ExtractionMode,

    #[arg(long)]
    pub profile: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub apply_fixups: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FixPass {
    Structure,
    ContentShift,
    ProblematicTitles,
}

impl FixPass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::ContentShift => "content_shift",
            Self::ProblematicTitles => "problematic_titles",
        }
    }

    pub fn all() -> &'static [FixPass] {
        &[Self::Structure, Self::ContentShift, Self::ProblematicTitles]
    }
}

#[derive(Args, Debug, Clone)]
pub struct FixArgs {
    #[arg(long)]
    pub input: PathBuf,

    /// Defaults to rewriting the input in place.
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long = "pass", value_enum)]
    pub passes: Vec<FixPass>,

    #[arg(long)]
    pub profile: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub detailed: bool,

    #[arg(long)]
    pub profile: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Defaults to rewriting the input in place.
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    #[command(subcommand)]
    pub action: EditAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EditAction {
    /// Print one line per chunk.
    List,
    /// Print one chunk as JSON.
    Show {
        #[arg(long)]
        index: usize,
    },
    Delete {
        #[arg(long)]
        index: usize,
    },
    /// Join a chunk with the one after it.
    Merge {
        #[arg(long)]
        index: usize,
    },
    /// Split a chunk at a character position or before a substring.
    Split {
        #[arg(long)]
        index: usize,

        #[arg(long)]
        at: String,
    },
    Set {
        #[arg(long)]
        index: usize,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value = "document_profile.json")]
    pub output: PathBuf,
}
