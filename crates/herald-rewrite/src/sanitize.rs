//! Completion output sanitation.
//!
//! LLM rewrites arrive contaminated with reasoning artifacts: `<think>`
//! blocks, "here is the rewritten text:" boilerplate, parenthetical asides,
//! stray quoting. [`sanitize`] runs a fixed pipeline of ordered stages that
//! strips them while guarding against eating genuine short articles.
//!
//! The pipeline is pure and deterministic: same input, same output, no
//! errors. Already-clean text passes through unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Reasoning container tags stripped by stages 1 and 2.
const REASONING_TAGS: &[&str] = &["think", "reasoning", "thinking"];

/// Boilerplate prefixes stripped from the start of the text, tried in order.
/// Longer variants precede the shorter ones they contain.
const BOILERPLATE_PREFIXES: &[&str] = &[
    "here is the rewritten text:",
    "here's the rewritten text:",
    "here is the rewritten version:",
    "rewritten text:",
    "rewritten version:",
    "вот переписанный текст:",
    "вот переписанная версия:",
    "переписанный текст:",
    "переписанная версия:",
    "вот текст:",
    "i think:",
    "think:",
    "думаю:",
];

/// Thought vocabulary: a parenthesized span containing any of these is an
/// aside, not article content. `переписан` is a stem so inflected forms
/// match.
const THOUGHT_VOCABULARY: &[&str] = &[
    "i think",
    "think",
    "option",
    "rewritten",
    "думаю",
    "вариант",
    "переписан",
];

/// Discourse openers: a short line starting with one of these is connective
/// tissue left over from the model talking to itself.
const DISCOURSE_OPENERS: &[&str] = &[
    "so",
    "for example",
    "that is",
    "итак",
    "например",
    "то есть",
];

/// Results shorter than this many characters trigger the fallback guard.
const MIN_KEEP_CHARS: usize = 20;

/// Only lines shorter than this many characters are eligible for
/// thought-line filtering.
const SHORT_LINE_CHARS: usize = 150;

static REASONING_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = REASONING_TAGS
        .iter()
        .map(|tag| format!("<{tag}>.*?</{tag}>"))
        .collect();
    Regex::new(&format!("(?is){}", alternatives.join("|"))).expect("invalid regex")
});

static ORPHAN_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?i)</?(?:{})>", REASONING_TAGS.join("|"))).expect("invalid regex")
});

static PREFIX_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    BOILERPLATE_PREFIXES
        .iter()
        .map(|phrase| {
            Regex::new(&format!("(?i)^{}", regex::escape(phrase))).expect("invalid regex")
        })
        .collect()
});

static ASIDE_RE: Lazy<Regex> = Lazy::new(|| {
    let vocabulary = THOUGHT_VOCABULARY
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\([^()]*(?:{vocabulary})[^()]*\)")).expect("invalid regex")
});

static THOUGHT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    let indicators = THOUGHT_VOCABULARY
        .iter()
        .chain(DISCOURSE_OPENERS.iter())
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(?:{indicators})\b")).expect("invalid regex")
});

/// Stage 1: remove complete reasoning blocks, including their contents.
/// Case-insensitive, spans lines, non-greedy.
fn strip_reasoning_blocks(text: &str) -> String {
    REASONING_BLOCK_RE.replace_all(text, "").into_owned()
}

/// Stage 2: remove bare open/close reasoning tags whose pair never appeared.
fn strip_orphan_tags(text: &str) -> String {
    ORPHAN_TAG_RE.replace_all(text, "").into_owned()
}

/// Stage 3: strip known boilerplate prefixes anchored at the start of the
/// trimmed text. Each table entry is tried once, in order, trimming again
/// after every removal.
fn strip_boilerplate_prefixes(text: &str) -> String {
    let mut out = text.trim().to_string();
    for re in PREFIX_RES.iter() {
        if let Some(m) = re.find(&out) {
            let rest = out[m.end()..].trim().to_string();
            out = rest;
        }
    }
    out
}

/// Stage 4: delete parenthesized spans whose contents mention the thought
/// vocabulary.
fn strip_parenthetical_asides(text: &str) -> String {
    ASIDE_RE.replace_all(text, "").into_owned()
}

/// Stage 5: peel exactly one layer of matching surrounding quotes.
fn strip_surrounding_quotes(text: &str) -> String {
    const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('«', '»'), ('“', '”')];

    let trimmed = text.trim();
    for (open, close) in QUOTE_PAIRS {
        if let Some(inner) = trimmed
            .strip_prefix(*open)
            .and_then(|s| s.strip_suffix(*close))
        {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

/// Stage 6: drop empty lines and short lines that open with a thought
/// indicator or discourse opener.
fn filter_thought_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            if line.is_empty() {
                return false;
            }
            if line.chars().count() < SHORT_LINE_CHARS && THOUGHT_LINE_RE.is_match(line) {
                return false;
            }
            true
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean one LLM completion.
///
/// Runs the stages in order: reasoning blocks, orphan tags, boilerplate
/// prefixes, parenthetical asides, surrounding quotes, thought lines.
///
/// The fallback guard protects genuine short content from the heuristic
/// stages: when the filtered result drops under [`MIN_KEEP_CHARS`]
/// characters, the text as it stood after artifact stripping is returned
/// instead. If even that is empty — the input was nothing but artifacts —
/// the trimmed original comes back, so non-empty input always produces
/// non-empty output.
pub fn sanitize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    // Stages 1-3: precise artifact removal.
    let text = strip_reasoning_blocks(raw);
    let text = strip_orphan_tags(&text);
    let text = strip_boilerplate_prefixes(&text);

    // The guard rolls back to this point.
    let artifact_free = text.trim().to_string();

    // Stages 4-6: heuristic cleanup.
    let text = strip_parenthetical_asides(&text);
    let text = strip_surrounding_quotes(&text);
    let text = filter_thought_lines(&text);

    let result = text.trim().to_string();

    if result.chars().count() >= MIN_KEEP_CHARS {
        return result;
    }
    if !artifact_free.is_empty() {
        return artifact_free;
    }
    raw.trim().to_string()
}
