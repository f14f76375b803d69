//! Reply post-processing: normalization and the concise-mode word budget.
//!
//! Both functions are pure; the orchestrator applies normalize first, then
//! the budget.

use std::sync::LazyLock;

use regex::Regex;

/// Word cap applied to replies while concise mode is on.
pub const CONCISE_WORD_LIMIT: usize = 180;

/// Marker appended when the budget truncates a reply.
const TRUNCATION_MARKER: &str = "…";

static DELIMITER_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[|｜][^<>]*[|｜]>").expect("valid pattern"));
static NUMBERED_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").expect("valid pattern"));
static BULLET_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*•]\s+").expect("valid pattern"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid pattern"));
static PERIOD_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}").expect("valid pattern"));
static SPLIT_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^.\n])\n([^.\n])").expect("valid pattern"));

/// Clean a raw model reply into inline prose.
///
/// Strips `<|...|>`-style control tokens, removes leading list markers,
/// collapses 3+ newlines to a blank line and runs of periods to `...`, and
/// rejoins sentence fragments split by a lone newline between two
/// non-terminal characters.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let text = DELIMITER_TOKENS.replace_all(raw, "");
    let text = NUMBERED_MARKERS.replace_all(&text, "");
    let text = BULLET_MARKERS.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    let text = PERIOD_RUNS.replace_all(&text, "...");
    let trimmed = text.trim();
    // Two passes: adjacent split points share a boundary character, and
    // regex replacement is non-overlapping.
    let text = SPLIT_SENTENCE.replace_all(trimmed, "${1}. ${2}");
    SPLIT_SENTENCE.replace_all(&text, "${1}. ${2}").into_owned()
}

/// Cap `text` at `word_limit` whitespace-separated words.
///
/// Disabled concise mode or an in-budget reply passes through unchanged;
/// otherwise the first `word_limit` words are kept and the truncation
/// marker appended.
#[must_use]
pub fn enforce_budget(text: &str, word_limit: usize, concise_mode: bool) -> String {
    if !concise_mode {
        return text.to_string();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= word_limit {
        return text.to_string();
    }
    format!("{} {TRUNCATION_MARKER}", words[..word_limit].join(" "))
}
