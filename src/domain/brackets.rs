// ============================================================
// Layer 3 — Bracket Normalizer
// ============================================================
// Constituency parsers emit brackets as placeholder tokens:
//
//   (  → -LRB-      )  → -RRB-
//   [  → -LSB-      ]  → -RSB-
//   {  → -LCB-      }  → -RCB-
//
// Summary sentences come out of the tokenizer in that form, while
// questions are raw text. Every string that takes part in a substring
// comparison is wrapped in `NormalizedText`, which can only be built
// through `normalize`, so raw and normalized text never meet.
//
// Offsets into a paragraph context are never computed on normalized
// text: contexts stay raw and answer offsets are checked against them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal bracket characters and their parser-token equivalents.
pub const BRACKET_TOKENS: [(char, &str); 6] = [
    ('(', "-LRB-"),
    (')', "-RRB-"),
    ('[', "-LSB-"),
    (']', "-RSB-"),
    ('{', "-LCB-"),
    ('}', "-RCB-"),
];

/// Replace every literal bracket with its parser token.
///
/// The output never contains a bracket character, so applying this twice
/// gives the same result as applying it once.
pub fn normalize(text: &str) -> NormalizedText {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match BRACKET_TOKENS.iter().find(|(b, _)| *b == c) {
            Some((_, token)) => out.push_str(token),
            None => out.push(c),
        }
    }
    NormalizedText(out)
}

/// Map parser tokens back to literal brackets.
///
/// Lossless for any text whose raw form did not already contain one of
/// the token spellings.
pub fn denormalize(text: &NormalizedText) -> String {
    BRACKET_TOKENS
        .iter()
        .fold(text.0.clone(), |acc, (c, token)| acc.replace(token, &c.to_string()))
}

/// Text that has been through `normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// Split at the first occurrence of `marker` into (left, right).
    pub fn split_once<'a>(&'a self, marker: &NormalizedText) -> Option<(&'a str, &'a str)> {
        self.0.split_once(marker.as_str())
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

// Deserialised text is re-normalised; `normalize` is idempotent so cached
// summaries come back unchanged.
impl From<String> for NormalizedText {
    fn from(s: String) -> Self {
        normalize(&s)
    }
}

impl From<NormalizedText> for String {
    fn from(t: NormalizedText) -> Self {
        t.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
