//! Struct and function signature extraction from raw C-like source text.
//!
//! This is surface-level pattern matching, not parsing:
//! - `struct <Name> { ... };` — the body may not contain `}` at all, so it ends at
//!   the first `};` and an inner `};` truncates the capture. A body whose first
//!   `}` is followed by something else (`} a;`) is not a struct definition
//! - `def <signature> {` — everything between the marker and the brace, as long as
//!   it contains only word characters, whitespace, `*`, `(`, `)` and `,`
//!
//! Comments and string literals are not special: a `struct` or `def` inside them
//! is matched like any other text.
//!
//! Scanning works on raw bytes so struct bodies are copied verbatim even when the
//! source is not valid UTF-8.

use crate::model::*;
use regex::bytes::Regex;
use std::sync::LazyLock;

static RE_STRUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"struct\s+([A-Za-z_][A-Za-z_0-9]*)\s*\{(?-u:[^}])*\};").unwrap()
});

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"def\s+([A-Za-z_][\w\s*(),]*?)\s*\{").unwrap());

/// Extract all struct definitions and `def` signatures from `source`.
///
/// Both scans run independently over the whole text, so the relative order of
/// structs and functions in the source does not matter.
pub fn extract(source: &[u8]) -> Extraction {
    let structs = RE_STRUCT
        .captures_iter(source)
        .map(|caps| StructDef {
            text: caps[0].to_vec(),
            name: String::from_utf8_lossy(&caps[1]).into_owned(),
        })
        .collect();

    let functions = RE_DEF
        .captures_iter(source)
        .map(|caps| FunctionSig {
            // only word characters, whitespace and `*(),` can match, all valid UTF-8
            raw: String::from_utf8_lossy(&caps[1]).into_owned(),
        })
        .collect();

    Extraction { structs, functions }
}

/// Collapse every whitespace run (newlines included) to a single space.
pub fn clean_signature(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
