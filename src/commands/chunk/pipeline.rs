use super::*;

#[derive(Debug)]
pub(super) struct ChunkingOutcome {
    pub(super) chunks: Vec<Chunk>,
    pub(super) stats: ProcessingStats,
}

/// One configured pipeline. Building it compiles the profile; running it is
/// total over any span document.
#[derive(Debug)]
pub(super) struct ChunkingEngine {
    classifier: SpanClassifier,
    mode: ExtractionMode,
}

impl ChunkingEngine {
    pub(super) fn new(profile: &DocumentProfile, mode: ExtractionMode) -> Result<Self> {
        Ok(Self {
            classifier: SpanClassifier::new(profile)?,
            mode,
        })
    }

    pub(super) fn patterns(&self) -> &CompiledPatterns {
        &self.classifier.patterns
    }

    pub(super) fn run(&self, raw: &RawSpanDocument) -> ChunkingOutcome {
        let decoded = decode_spans(raw);
        let mut stats = ProcessingStats {
            original_spans: decoded.original_count,
            malformed_spans: decoded.malformed_count,
            processing_method: format!("{}_v1", self.mode.as_str()),
            ..ProcessingStats::default()
        };

        let spans = filter_spans(decoded.spans, self.classifier.profile.min_span_chars);
        stats.filtered_spans = spans.len();

        let chunks = self.chunk_spans(&spans, &mut stats);
        stats.final_chunks = chunks.len();

        ChunkingOutcome { chunks, stats }
    }

    pub(super) fn chunk_spans(&self, spans: &[Span], stats: &mut ProcessingStats) -> Vec<Chunk> {
        match self.mode {
            ExtractionMode::LegalArticles => {
                let extraction = extract_articles(spans, &self.classifier);
                stats.grouped_units = extraction.articles.len();
                stats.extracted_articles = extraction.articles.len();
                stats.orphan_spans = extraction.orphan_spans;
                article_chunks(extraction.articles, &self.classifier)
            }
            ExtractionMode::GenericParagraphs => {
                let paragraphs = group_paragraphs(spans, &self.classifier);
                stats.grouped_units = paragraphs.len();

                let mut assembler = ChunkAssembler::new(&self.classifier.profile.chunking);
                for paragraph in paragraphs {
                    let unit = self.classify_paragraph(paragraph);
                    if unit.kind == UnitKind::Article {
                        stats.extracted_articles += 1;
                    }
                    assembler.push(unit);
                }
                assembler.finish()
            }
        }
    }

    fn classify_paragraph(&self, paragraph: Paragraph) -> ClassifiedUnit {
        let kind = self.classifier.classify(&paragraph.as_span());
        let importance_score =
            self.classifier
                .importance_score(&paragraph.text, &paragraph.format, kind);

        ClassifiedUnit {
            kind,
            importance_score,
            spans_count: paragraph.format.span_count,
            text: paragraph.text,
        }
    }
}
