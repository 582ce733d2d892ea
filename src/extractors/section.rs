// src/extractors/section.rs

// --- Imports ---
use crate::extractors::normalize::normalize;
use crate::models::Section;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
// Page boundaries are lost by the text reader, so pages are synthetic.
const LINES_PER_PAGE: usize = 50;
// Lines ending in a colon count as headers only when shorter than this (in chars)
const MAX_COLON_HEADER_LEN: usize = 100;
// Sections whose cleaned content is this short (in chars) or shorter are dropped
const MIN_CONTENT_LEN: usize = 10;
const DEFAULT_TITLE: &str = "Introduction";

// --- Regex Patterns for Header Matching (Lazy Static) ---
static HEADER_LINE_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Numbered heading: "1. Overview", "12. Risk Factors"
        r"^\d+\.\s+[A-Z]",
        // Capitalized word run closed by a colon: "Market analysis:"
        r"^[A-Z][a-z]+.*:$",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

/// The section being filled while lines are scanned.
#[derive(Debug)]
struct Accumulator {
    title: String,
    content: String,
    page_number: u32,
}

impl Accumulator {
    fn new(title: &str, page_number: u32) -> Self {
        Self {
            title: title.to_string(),
            content: String::new(),
            page_number,
        }
    }

    /// Normalizes the accumulated text into a `Section`, or `None` when
    /// nothing but whitespace was collected.
    fn finish(self) -> Option<Section> {
        if self.content.trim().is_empty() {
            return None;
        }
        Some(Section {
            title: normalize(&self.title),
            content: normalize(&self.content),
            page_number: self.page_number,
        })
    }
}

/// Splits page-ordered document text into titled sections using line heuristics.
#[derive(Debug, Default)]
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Segments `text` into sections in encounter order. That order is the
    /// tie-break order used by the ranker, so it must not be changed here.
    pub fn extract_sections(&self, text: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current = Accumulator::new(DEFAULT_TITLE, 1);

        for (index, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if is_header_line(line) {
                tracing::trace!("Header at line {}: '{}'", index, line);
                let next = Accumulator::new(line.trim_end_matches(':'), estimate_page(index));
                if let Some(section) = std::mem::replace(&mut current, next).finish() {
                    sections.push(section);
                }
            } else {
                current.content.push_str(line);
                current.content.push('\n');
            }
        }

        if let Some(section) = current.finish() {
            sections.push(section);
        }

        let found = sections.len();
        sections.retain(is_substantial);
        tracing::debug!(
            "Segmented {} candidate sections, kept {} after filtering",
            found,
            sections.len()
        );
        sections
    }
}

/// Convenience wrapper around `SectionExtractor::extract_sections`.
pub fn segment(text: &str) -> Vec<Section> {
    SectionExtractor::new().extract_sections(text)
}

/// Header heuristics, applied to a trimmed, non-empty line.
fn is_header_line(line: &str) -> bool {
    is_all_upper(line)
        || HEADER_LINE_RE.iter().any(|re| re.is_match(line))
        || (line.chars().count() < MAX_COLON_HEADER_LEN && line.ends_with(':'))
}

// True when the line has at least one cased character and none are lower-case.
fn is_all_upper(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn estimate_page(line_index: usize) -> u32 {
    (line_index / LINES_PER_PAGE + 1) as u32
}

fn is_substantial(section: &Section) -> bool {
    !section.title.trim().is_empty()
        && !section.content.trim().is_empty()
        && section.content.chars().count() > MIN_CONTENT_LEN
}
