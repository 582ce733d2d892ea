// src/extractors/normalize.rs
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE")
});

// Anything outside word chars, whitespace and the kept punctuation set
static DISALLOWED_CHAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^\w\s.,;:!?\-()\[\]{}"']"#).expect("Failed to compile DISALLOWED_CHAR_RE")
});

static REPEATED_PUNCT_RE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [(r"\.{2,}", "."), (r"!{2,}", "!"), (r"\?{2,}", "?")]
        .iter()
        .map(|(pat, rep)| (Regex::new(pat).expect("Failed to compile REPEATED_PUNCT_RE"), *rep))
        .collect()
});

static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+([.,;:!?])").expect("Failed to compile SPACE_BEFORE_PUNCT_RE")
});

static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s{2,}").expect("Failed to compile MULTI_SPACE_RE")
});

/// Cleans raw extracted text into a canonical single-line form.
///
/// Whitespace runs become one space, characters outside the allow-list are
/// dropped, repeated `.`/`!`/`?` collapse to one and whitespace before
/// punctuation is removed. Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let text = WHITESPACE_RUN_RE.replace_all(trimmed, " ");
    let mut text = DISALLOWED_CHAR_RE.replace_all(&text, "").into_owned();

    // Removing a space can join two periods (". ." -> ".."), so repeat until stable.
    loop {
        let mut next = text.clone();
        for (re, rep) in REPEATED_PUNCT_RE.iter() {
            next = re.replace_all(&next, *rep).into_owned();
        }
        next = SPACE_BEFORE_PUNCT_RE.replace_all(&next, "$1").into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    MULTI_SPACE_RE.replace_all(&text, " ").trim().to_string()
}
