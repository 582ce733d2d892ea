// src/pipeline.rs
use std::path::{Path, PathBuf};

use crate::extractors::segment;
use crate::models::{DocumentOutcome, ResultRecord};
use crate::persona::Persona;
use crate::reader;
use crate::scoring;
use crate::utils::error::ReadError;
use crate::validation;

pub const DEFAULT_TOP_N: usize = 10;

/// Settings shared by every document in one batch run.
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub persona: Persona,
    pub job_to_be_done: String,
    pub top_n: usize,
}

impl ProcessingConfig {
    pub fn new(persona: Persona) -> Self {
        Self {
            persona,
            job_to_be_done: default_job(persona),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_job(mut self, job: Option<String>) -> Self {
        if let Some(job) = job {
            self.job_to_be_done = job;
        }
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

pub fn default_job(persona: Persona) -> String {
    format!(
        "Prioritize document sections for {} persona based on relevance and importance",
        persona
    )
}

/// Runs segmentation, scoring, ranking and validation over already
/// extracted text. Empty text yields a failed outcome, never an error.
pub fn process_text(document: &str, text: &str, config: &ProcessingConfig) -> DocumentOutcome {
    if text.trim().is_empty() {
        tracing::warn!("No text extracted from {}", document);
        return DocumentOutcome::Failed {
            document: document.to_string(),
            error: format!("Could not extract text from {}", document),
        };
    }

    let sections = segment(text);
    let total_sections = sections.len();
    let mut ranked = scoring::rank(sections, config.persona.as_str());

    // Rank checks only hold over the full ranking, so validate before truncating.
    for finding in validation::validate_sections(&ranked) {
        tracing::warn!("Section validation in {}: {}", document, finding);
    }
    ranked.truncate(config.top_n);

    let record = ResultRecord {
        document: document.to_string(),
        persona: config.persona,
        job_to_be_done: config.job_to_be_done.clone(),
        processing_timestamp: chrono::Utc::now().to_rfc3339(),
        total_sections,
        sections: ranked,
    };

    for finding in validation::validate_record(&record) {
        tracing::warn!("Structure validation in {}: {}", document, finding);
    }

    tracing::info!(
        "Ranked {} sections in {} for {} persona (kept {})",
        total_sections,
        document,
        config.persona,
        record.sections.len()
    );
    DocumentOutcome::Processed(record)
}

/// Reads one document from disk and processes it. Read failures become a
/// failed outcome so the batch can continue.
pub fn process_document(path: &Path, config: &ProcessingConfig) -> DocumentOutcome {
    let document = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::info!("Processing {} for {} persona...", document, config.persona);

    match reader::extract_text(path) {
        Ok(text) => process_text(&document, &text, config),
        Err(e) => {
            tracing::error!("Error extracting text from {}: {}", document, e);
            DocumentOutcome::Failed {
                error: format!("Could not extract text from {}", document),
                document,
            }
        }
    }
}

/// Processes every supported document in `input_dir`, in file-name order.
pub fn process_all(
    input_dir: &Path,
    config: &ProcessingConfig,
) -> Result<Vec<(PathBuf, DocumentOutcome)>, ReadError> {
    let docs = reader::list_documents(input_dir)?;
    if docs.is_empty() {
        tracing::warn!("No documents found in {}", input_dir.display());
    }

    Ok(docs
        .into_iter()
        .map(|path| {
            let outcome = process_document(&path, config);
            (path, outcome)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn long_document(sections: usize) -> String {
        (0..sections)
            .map(|i| format!("SECTION {}\nbody text for section number {} about growth\n", i, i))
            .collect()
    }

    fn unwrap_record(outcome: DocumentOutcome) -> ResultRecord {
        match outcome {
            DocumentOutcome::Processed(record) => record,
            DocumentOutcome::Failed { error, .. } => panic!("unexpected failure: {}", error),
        }
    }

    #[test]
    fn test_default_job_text() {
        let config = ProcessingConfig::new(Persona::Technical);
        assert_eq!(
            config.job_to_be_done,
            "Prioritize document sections for technical persona based on relevance and importance"
        );
        let config = config.with_job(Some("Review the API".to_string())).with_top_n(3);
        assert_eq!(config.job_to_be_done, "Review the API");
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn test_truncation_keeps_ranks_and_total() {
        let config = ProcessingConfig::new(Persona::Executive);
        let record = unwrap_record(process_text("long.txt", &long_document(15), &config));

        assert_eq!(record.total_sections, 15);
        assert_eq!(record.sections.len(), 10);
        let ranks: Vec<u32> = record.sections.iter().map(|s| s.importance_rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
        assert!(record.sections.iter().all(|s| (1..=15).contains(&s.importance_rank)));
        assert!(validation::validate_record(&record).is_empty());
    }

    #[test]
    fn test_tied_scores_follow_extraction_order() {
        let config = ProcessingConfig::new(Persona::Executive);
        let record = unwrap_record(process_text("long.txt", &long_document(12), &config));
        // Every section scores 0.1 from one "growth"; order is extraction order
        let titles: Vec<&str> = record.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles[0], "SECTION 0");
        assert_eq!(titles[9], "SECTION 9");
    }

    #[test]
    fn test_empty_text_is_a_failed_outcome() {
        let config = ProcessingConfig::new(Persona::Investor);
        let outcome = process_text("blank.pdf", "  \n ", &config);
        assert_eq!(
            outcome,
            DocumentOutcome::Failed {
                document: "blank.pdf".to_string(),
                error: "Could not extract text from blank.pdf".to_string(),
            }
        );
    }

    #[test]
    fn test_text_without_sections_is_still_processed() {
        let config = ProcessingConfig::new(Persona::Marketing);
        let record = unwrap_record(process_text("tiny.txt", "short", &config));
        assert_eq!(record.total_sections, 0);
        assert!(record.sections.is_empty());
    }

    #[test]
    fn test_process_all_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "MARKETING STRATEGY\nOur brand reaches every customer.\n").unwrap();
        fs::write(dir.path().join("b.pdf"), b"garbage").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let config = ProcessingConfig::new(Persona::Marketing);
        let outcomes = process_all(dir.path(), &config).unwrap();
        assert_eq!(outcomes.len(), 3);

        let record = match &outcomes[0].1 {
            DocumentOutcome::Processed(record) => record,
            other => panic!("expected a record, got {:?}", other),
        };
        assert_eq!(record.document, "a.txt");
        assert_eq!(record.sections[0].title, "MARKETING STRATEGY");
        // "marketing" in title 0.3, priority phrase 0.2, "brand" + "customer" in content 0.2
        assert_eq!(record.sections[0].relevance_score, 0.7);

        assert!(outcomes[1].1.is_failed());
        assert!(outcomes[2].1.is_failed());
    }

    #[test]
    fn test_pdf_extractor_panic_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), reader::fixtures::pdf_with_missing_font()).unwrap();
        fs::write(dir.path().join("b.txt"), "TECHNICAL ARCHITECTURE\nThe api layer and the code layout.\n").unwrap();

        let config = ProcessingConfig::new(Persona::Technical);
        let outcomes = process_all(dir.path(), &config).unwrap();
        assert_eq!(outcomes.len(), 2);

        assert_eq!(
            outcomes[0].1,
            DocumentOutcome::Failed {
                document: "a.pdf".to_string(),
                error: "Could not extract text from a.pdf".to_string(),
            }
        );
        match &outcomes[1].1 {
            DocumentOutcome::Processed(record) => {
                assert_eq!(record.document, "b.txt");
                assert_eq!(record.sections[0].title, "TECHNICAL ARCHITECTURE");
            }
            other => panic!("expected a record, got {:?}", other),
        }
    }
}
