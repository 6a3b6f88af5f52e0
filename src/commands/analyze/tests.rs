use super::*;
use super::run::default_report_path;

use crate::model::{ChunkMetadata, ChunkType, HierarchyContext};
use crate::util::join_non_empty;

fn patterns() -> CompiledPatterns {
    CompiledPatterns::compile(&DocumentProfile::default()).expect("default patterns compile")
}

fn article(number: &str, body: &str) -> Chunk {
    let content = join_non_empty(&[number, body]);
    Chunk {
        word_count: content.split_whitespace().count(),
        content,
        title: None,
        chunk_type: ChunkType::Article,
        article_number: Some(number.to_string()),
        article_title: Some(String::new()),
        article_content: Some(body.to_string()),
        context: HierarchyContext::default(),
        metadata: ChunkMetadata::default(),
    }
}

fn plain(content: &str, word_count: usize) -> Chunk {
    Chunk {
        content: content.to_string(),
        title: None,
        chunk_type: ChunkType::Content,
        word_count,
        article_number: None,
        article_title: None,
        article_content: None,
        context: HierarchyContext::default(),
        metadata: ChunkMetadata::default(),
    }
}

const BODY: &str = "El consejo universitario aprueba el plan anual de funcionamiento y desarrollo.";

#[test]
fn gap_in_article_numbers_is_reported_once() {
    let chunks = vec![
        article("Artículo 1°", BODY),
        article("Artículo 2°", BODY),
        article("Artículo 4°", BODY),
    ];

    let issues = missing_articles(&chunks, &patterns());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue_type, IssueType::MissingArticles);
    assert_eq!(issues[0].severity, Severity::High);
    assert_eq!(issues[0].missing_numbers, vec![3]);
    assert_eq!(issues[0].chunk_index, 2);
    assert_eq!(issues[0].chunk_label, "Artículo 4°");
}

#[test]
fn extreme_article_numbers_do_not_overflow_or_list_every_gap() {
    let at_max = vec![
        article("Artículo 4294967295°", BODY),
        article("Artículo 4294967295°", BODY),
    ];
    assert!(missing_articles(&at_max, &patterns()).is_empty());

    let wide_gap = vec![
        article("Artículo 1°", BODY),
        article("Artículo 900000000°", BODY),
    ];
    let issues = missing_articles(&wide_gap, &patterns());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].missing_total, Some(899_999_998));
    assert_eq!(issues[0].missing_numbers.len(), 50);
    assert_eq!(issues[0].missing_numbers[0], 2);
    assert_eq!(issues[0].missing_numbers[49], 51);
    assert!(issues[0].description.contains("from 2 to 899999999"));
}

#[test]
fn unordered_or_duplicate_numbers_are_sorted_before_gap_check() {
    let chunks = vec![
        article("Artículo 3°", BODY),
        article("Artículo 1°", BODY),
        article("Artículo 2°", BODY),
        article("Artículo 2°", BODY),
        plain("Disposición complementaria final.", 3),
    ];

    assert!(missing_articles(&chunks, &patterns()).is_empty());
}

#[test]
fn two_article_keywords_in_one_chunk_flag_merged_articles() {
    let chunks = vec![article(
        "Artículo 5°",
        "Los docentes son ordinarios. Artículo 6° Los docentes contratados se rigen por contrato.",
    )];

    let issues = merged_articles(&chunks, "Artículo");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue_type, IssueType::MergedArticles);
    assert_eq!(issues[0].severity, Severity::High);
    assert!(issues[0].preview.as_deref().unwrap_or("").starts_with("Artículo 5°"));

    let single = vec![article("Artículo 7°", BODY)];
    assert!(merged_articles(&single, "Artículo").is_empty());
}

#[test]
fn unterminated_long_content_is_incomplete() {
    let thresholds = AnalyzerThresholds::default();
    let chunks = vec![
        article(
            "Artículo 8°",
            "El rector es elegido por la asamblea universitaria para un periodo de",
        ),
        article("Artículo 9°", BODY),
        article("Artículo 10°", "Son atribuciones del rector:"),
        plain("corto sin punto", 3),
    ];

    let issues = incomplete_content(&chunks, &thresholds);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].chunk_index, 0);
    assert_eq!(issues[0].severity, Severity::Medium);
    assert!(issues[0].preview.as_deref().unwrap_or("").ends_with("periodo de"));
}

#[test]
fn size_outliers_are_reported_with_word_counts() {
    let thresholds = AnalyzerThresholds::default();
    let chunks = vec![
        plain("texto largo", 801),
        plain("texto normal", 120),
        plain("breve", 4),
    ];

    let long = long_chunks(&chunks, &thresholds);
    assert_eq!(long.len(), 1);
    assert_eq!(long[0].word_count, Some(801));
    assert_eq!(long[0].severity, Severity::Medium);
    assert_eq!(long[0].chunk_label, "Chunk 1");

    let short = short_chunks(&chunks, &thresholds);
    assert_eq!(short.len(), 1);
    assert_eq!(short[0].chunk_index, 2);
    assert_eq!(short[0].severity, Severity::Low);
    assert_eq!(short[0].chunk_label, "Chunk 3");
}

#[test]
fn number_missing_from_content_start_is_inconsistent() {
    let thresholds = AnalyzerThresholds::default();
    let mut drifted = article("Artículo 11°", BODY);
    drifted.content = format!("{BODY} Artículo 12° Del vicerrector académico.");

    let chunks = vec![article("Artículo 13°", BODY), drifted];
    let issues = inconsistent_numbering(&chunks, "Artículo", &thresholds);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].chunk_index, 1);
    assert_eq!(issues[0].issue_type, IssueType::InconsistentNumbering);
}

#[test]
fn analysis_never_mutates_chunks_and_counts_by_severity() {
    let chunks = vec![
        article("Artículo 1°", BODY),
        article("Artículo 3°", "Artículo 4° fusionado con el anterior y sin punto final que"),
        plain("breve", 1),
    ];
    let before = chunks.clone();

    let profile = DocumentProfile::default();
    let issues = analyze_chunks(&chunks, &patterns(), &profile);
    assert_eq!(chunks, before);

    let report = AnalysisReport::from_issues("reglamento.pdf", chunks.len(), issues);
    assert_eq!(report.total_chunks, 3);
    assert_eq!(report.total_issues, report.issues.len());
    assert_eq!(
        report.issues_by_severity.high
            + report.issues_by_severity.medium
            + report.issues_by_severity.low,
        report.total_issues
    );
    assert_eq!(report.issues_by_type.get("missing_articles"), Some(&1));
    assert_eq!(report.issues_by_type.get("merged_articles"), Some(&1));
    assert_eq!(report.issues_by_type.get("short_chunk"), Some(&1));
    assert_eq!(report.issues_by_type.get("incomplete_content"), Some(&1));
}

#[test]
fn report_serializes_issue_type_under_type_key() {
    let chunks = vec![plain("breve", 1)];
    let issues = short_chunks(&chunks, &AnalyzerThresholds::default());
    let report = AnalysisReport::from_issues("reglamento.pdf", 1, issues);

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["issues"][0]["type"], "short_chunk");
    assert_eq!(value["issues"][0]["severity"], "low");
    assert_eq!(value["issues_by_severity"]["low"], 1);
}

#[test]
fn run_writes_report_next_to_input_by_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("estatuto_chunks.json");
    let document = ChunkDocument {
        source_file: "estatuto.pdf".to_string(),
        source_sha256: None,
        generated_at: now_utc_string(),
        extraction_mode: crate::model::ExtractionMode::LegalArticles,
        total_chunks: 2,
        chunks: vec![article("Artículo 1°", BODY), article("Artículo 3°", BODY)],
        stats: crate::model::ProcessingStats::default(),
    };
    write_json_pretty(&input, &document).expect("write chunk document");

    run(AnalyzeArgs {
        input: input.clone(),
        report_path: None,
        detailed: true,
        profile: None,
    })
    .expect("analysis succeeds");

    let report_path = default_report_path(&input);
    assert_eq!(report_path, dir.path().join("estatuto_chunks_analysis.json"));
    let report: AnalysisReport = read_json(&report_path).expect("report exists");
    assert_eq!(report.issues_by_type.get("missing_articles"), Some(&1));

    let reloaded: ChunkDocument = read_json(&input).expect("input still readable");
    assert_eq!(reloaded, document);
}
