use super::*;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    MissingArticles,
    MergedArticles,
    IncompleteContent,
    LongChunk,
    ShortChunk,
    InconsistentNumbering,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::MissingArticles => "missing_articles",
            IssueType::MergedArticles => "merged_articles",
            IssueType::IncompleteContent => "incomplete_content",
            IssueType::LongChunk => "long_chunk",
            IssueType::ShortChunk => "short_chunk",
            IssueType::InconsistentNumbering => "inconsistent_numbering",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            IssueType::MissingArticles | IssueType::MergedArticles => Severity::High,
            IssueType::IncompleteContent
            | IssueType::LongChunk
            | IssueType::InconsistentNumbering => Severity::Medium,
            IssueType::ShortChunk => Severity::Low,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub chunk_index: usize,
    pub chunk_label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_numbers: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

impl Issue {
    pub(super) fn new(issue_type: IssueType, chunk_index: usize, chunk: &Chunk, description: String) -> Self {
        Self {
            issue_type,
            severity: issue_type.severity(),
            chunk_index,
            chunk_label: chunk.label(chunk_index),
            description,
            preview: None,
            missing_numbers: Vec::new(),
            missing_total: None,
            word_count: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub source_file: String,
    pub total_chunks: usize,
    pub total_issues: usize,
    pub issues_by_severity: SeverityCounts,
    pub issues_by_type: BTreeMap<String, usize>,
    pub issues: Vec<Issue>,
}

impl AnalysisReport {
    pub(super) fn from_issues(source_file: &str, total_chunks: usize, issues: Vec<Issue>) -> Self {
        let mut issues_by_severity = SeverityCounts::default();
        let mut issues_by_type = BTreeMap::<String, usize>::new();

        for issue in &issues {
            match issue.severity {
                Severity::High => issues_by_severity.high += 1,
                Severity::Medium => issues_by_severity.medium += 1,
                Severity::Low => issues_by_severity.low += 1,
            }
            *issues_by_type
                .entry(issue.issue_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            generated_at: now_utc_string(),
            source_file: source_file.to_string(),
            total_chunks,
            total_issues: issues.len(),
            issues_by_severity,
            issues_by_type,
            issues,
        }
    }
}
