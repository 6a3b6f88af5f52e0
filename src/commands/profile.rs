use anyhow::Result;
use tracing::info;

use crate::cli::ProfileArgs;
use crate::profile::{CompiledPatterns, DocumentProfile};
use crate::util::write_json_pretty;

/// Writes the default profile as a starting point for per-corpus calibration.
pub fn run(args: ProfileArgs) -> Result<()> {
    let profile = DocumentProfile::default();
    CompiledPatterns::compile(&profile)?;

    write_json_pretty(&args.output, &profile)?;
    info!(
        path = %args.output.display(),
        emphasis_font = %profile.emphasis_font,
        "wrote default document profile"
    );
    Ok(())
}
