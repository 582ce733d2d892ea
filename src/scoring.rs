// src/scoring.rs
use crate::models::{RankedSection, Section};
use crate::persona::profile_for;

// --- Score weights ---
const TITLE_HIT_WEIGHT: f64 = 0.3;
const CONTENT_HIT_WEIGHT: f64 = 0.1;
const CONTENT_KEYWORD_CAP: f64 = 0.5; // Per keyword, so one repeated term can't dominate
const PRIORITY_BONUS: f64 = 0.2;
const MAX_SCORE: f64 = 1.0;

/// Relevance of `section` for the named persona, in `[0, 1]`.
///
/// All matching is case-insensitive substring matching. Unknown persona
/// names score 0.0; callers are expected to validate names upstream.
pub fn score(section: &Section, persona: &str) -> f64 {
    let Some(profile) = profile_for(persona) else {
        return 0.0;
    };

    let title = section.title.to_lowercase();
    let content = section.content.to_lowercase();

    let title_term: f64 = profile
        .keywords
        .iter()
        .filter(|kw| title.contains(*kw))
        .map(|_| TITLE_HIT_WEIGHT)
        .sum();

    let content_term: f64 = profile
        .keywords
        .iter()
        .map(|kw| (content.matches(kw).count() as f64 * CONTENT_HIT_WEIGHT).min(CONTENT_KEYWORD_CAP))
        .sum();

    // Only the first matching priority phrase counts.
    let mut priority_bonus = 0.0;
    for phrase in profile.priority_sections {
        if title.contains(phrase) {
            priority_bonus = PRIORITY_BONUS;
            break;
        }
    }

    (title_term + content_term + priority_bonus).min(MAX_SCORE)
}

/// Scores every section, orders them by descending score and assigns
/// 1-based ranks. The sort is stable, so equal scores keep extraction order.
/// Ranks cover the whole input; truncation is left to the caller.
pub fn rank(sections: Vec<Section>, persona: &str) -> Vec<RankedSection> {
    let mut scored: Vec<(f64, Section)> = sections
        .into_iter()
        .map(|section| (score(&section, persona), section))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, section))| RankedSection {
            title: section.title,
            content: section.content,
            page_number: section.page_number,
            relevance_score: round_to_hundredths(score),
            importance_rank: (i + 1) as u32,
        })
        .collect()
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
