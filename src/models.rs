// src/models.rs
use serde::{Deserialize, Serialize};

use crate::persona::Persona;

/// One logical document unit produced by the segmenter.
/// Title and content are already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
    pub page_number: u32, // Estimated from line position, >= 1
}

/// A section after scoring and ranking for one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    pub title: String,
    pub content: String,
    pub page_number: u32,
    pub relevance_score: f64, // [0, 1], two decimals
    pub importance_rank: u32, // 1-based over the full ranked set
}

/// Output for one successfully processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub document: String,
    pub persona: Persona,
    pub job_to_be_done: String,
    pub processing_timestamp: String, // RFC 3339
    pub total_sections: usize,        // Count before truncation
    pub sections: Vec<RankedSection>,
}

/// What the batch writes for each document: either a full record or
/// an error marker when no text could be extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentOutcome {
    Processed(ResultRecord),
    Failed { document: String, error: String },
}

impl DocumentOutcome {
    pub fn document(&self) -> &str {
        match self {
            DocumentOutcome::Processed(record) => &record.document,
            DocumentOutcome::Failed { document, .. } => document,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentOutcome::Failed { .. })
    }
}
