use super::*;

pub fn run(args: FixArgs) -> Result<()> {
    let profile = DocumentProfile::load_or_default(args.profile.as_deref())?;
    let patterns = CompiledPatterns::compile(&profile)?;

    let mut document: ChunkDocument = read_json(&args.input)?;
    let passes = if args.passes.is_empty() {
        FixPass::all().to_vec()
    } else {
        args.passes.clone()
    };

    info!(
        path = %args.input.display(),
        chunks = document.chunks.len(),
        passes = passes.len(),
        "starting fixup passes"
    );

    let outcomes = apply_passes(
        &mut document.chunks,
        &passes,
        &patterns,
        &profile.title_policy,
    );

    let mut corrected = 0usize;
    for outcome in &outcomes {
        corrected += outcome.corrected;
        info!(
            pass = outcome.pass.as_str(),
            examined = outcome.examined,
            corrected = outcome.corrected,
            "fixup pass completed"
        );
    }

    document.sync_counts();

    let output_path = args.output.clone().unwrap_or_else(|| args.input.clone());
    write_json_pretty(&output_path, &document)?;

    info!(
        path = %output_path.display(),
        corrected,
        "wrote corrected chunk document"
    );

    Ok(())
}
