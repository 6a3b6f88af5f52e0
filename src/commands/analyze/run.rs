use super::*;

const HIGH_SEVERITY_LOG_LIMIT: usize = 5;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let profile = DocumentProfile::load_or_default(args.profile.as_deref())?;
    let patterns = CompiledPatterns::compile(&profile)?;
    let document: ChunkDocument = read_json(&args.input)?;

    let issues = analyze_chunks(&document.chunks, &patterns, &profile);
    let report = AnalysisReport::from_issues(&document.source_file, document.chunks.len(), issues);

    log_summary(&args.input, &report);
    if args.detailed {
        log_details(&report);
    }

    let report_path = args
        .report_path
        .clone()
        .unwrap_or_else(|| default_report_path(&args.input));
    write_json_pretty(&report_path, &report)?;

    info!(path = %report_path.display(), "wrote analysis report");
    Ok(())
}

fn log_summary(input: &Path, report: &AnalysisReport) {
    info!(
        path = %input.display(),
        chunks = report.total_chunks,
        issues = report.total_issues,
        high = report.issues_by_severity.high,
        medium = report.issues_by_severity.medium,
        low = report.issues_by_severity.low,
        "analysis completed"
    );

    for (issue_type, count) in &report.issues_by_type {
        info!(issue_type = %issue_type, count, "issues by type");
    }

    for issue in report
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::High)
        .take(HIGH_SEVERITY_LOG_LIMIT)
    {
        warn!(
            issue_type = issue.issue_type.as_str(),
            chunk = %issue.chunk_label,
            preview = issue.preview.as_deref().unwrap_or(""),
            "{}",
            issue.description
        );
    }
}

fn log_details(report: &AnalysisReport) {
    for issue in &report.issues {
        info!(
            issue_type = issue.issue_type.as_str(),
            severity = issue.severity.as_str(),
            chunk_index = issue.chunk_index,
            chunk = %issue.chunk_label,
            "{}",
            issue.description
        );
    }
}

pub(super) fn default_report_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("chunks");
    input.with_file_name(format!("{stem}_analysis.json"))
}
