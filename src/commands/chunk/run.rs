use super::*;

pub fn run(args: ChunkArgs) -> Result<()> {
    let profile = DocumentProfile::load_or_default(args.profile.as_deref())?;
    let engine = ChunkingEngine::new(&profile, args.mode)?;

    let mut inputs = args.inputs.clone();
    if let Some(input_dir) = args.input_dir.as_deref() {
        inputs.extend(discover_span_documents(input_dir)?);
    }
    if inputs.is_empty() {
        bail!("no span documents given; pass --input or --input-dir");
    }

    info!(
        documents = inputs.len(),
        mode = args.mode.as_str(),
        output_dir = %args.output_dir.display(),
        "starting chunking"
    );

    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut total_chunks = 0usize;

    for input in &inputs {
        match chunk_document(&engine, &profile, input, &args) {
            Ok((output_path, document)) => {
                written += 1;
                total_chunks += document.total_chunks;
                info!(
                    path = %output_path.display(),
                    chunks = document.total_chunks,
                    articles = document.stats.extracted_articles,
                    orphan_spans = document.stats.orphan_spans,
                    malformed_spans = document.stats.malformed_spans,
                    "wrote chunk document"
                );
                if document.stats.malformed_spans > 0 {
                    warn!(
                        path = %input.display(),
                        malformed_spans = document.stats.malformed_spans,
                        "dropped span entries without text"
                    );
                }
            }
            Err(err) => {
                skipped += 1;
                warn!(path = %input.display(), error = %err, "skipping document");
            }
        }
    }

    info!(written, skipped, chunks = total_chunks, "chunking completed");

    if written == 0 {
        bail!("no span document could be chunked");
    }

    Ok(())
}

fn chunk_document(
    engine: &ChunkingEngine,
    profile: &DocumentProfile,
    input: &Path,
    args: &ChunkArgs,
) -> Result<(PathBuf, ChunkDocument)> {
    let raw: RawSpanDocument = read_json(input)?;
    let source_sha256 = sha256_file(input)?;

    let mut outcome = engine.run(&raw);
    if args.apply_fixups {
        let outcomes = fix::apply_passes(
            &mut outcome.chunks,
            FixPass::all(),
            engine.patterns(),
            &profile.title_policy,
        );
        for pass in outcomes {
            info!(
                pass = pass.pass.as_str(),
                examined = pass.examined,
                corrected = pass.corrected,
                "applied fixup pass"
            );
        }
    }

    let mut document = ChunkDocument {
        source_file: raw
            .file
            .clone()
            .filter(|file| !file.trim().is_empty())
            .unwrap_or_else(|| input.display().to_string()),
        source_sha256: Some(source_sha256),
        generated_at: now_utc_string(),
        extraction_mode: args.mode,
        total_chunks: 0,
        chunks: outcome.chunks,
        stats: outcome.stats,
    };
    document.sync_counts();

    let output_path = args.output_dir.join(output_file_name(input));
    write_json_pretty(&output_path, &document)?;

    Ok((output_path, document))
}

pub(super) fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("document");
    let stem = stem.strip_suffix("_processed").unwrap_or(stem);
    format!("{stem}_chunks.json")
}

pub(super) fn discover_span_documents(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", input_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let is_chunk_output = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with("_chunks.json"))
            .unwrap_or(false);

        if is_json && !is_chunk_output {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}
