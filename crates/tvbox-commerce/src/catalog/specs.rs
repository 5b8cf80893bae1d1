//! Parsing of free-text capability lines.
//!
//! Products describe their hardware as human-written lines such as
//! `"Оперативная память: 4 ГБ"`. Two readings exist:
//!
//! - the keyword heuristic the catalog filter has always used
//!   ([`find_spec_line`], [`extract_size_tokens`], [`legacy_spec_matches`]);
//! - [`SpecAttributes`], which only trusts lines that start with a known
//!   label and keeps numeric gigabyte values.
//!
//! The heuristic has known quirks (RAM and storage figures leak into each
//! other, `"2 ГБ"` matches `"12 ГБ"`). They are pinned by the tests below so
//! any change to them is deliberate.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CYRILLIC_GB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9]+\s*ГБ").expect("valid regex"));

static LATIN_GB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9]+\s*GB").expect("valid regex"));

// Word boundaries are ASCII-only: a Cyrillic letter counts as a non-word
// character, so "4Г" yields "4".
static LOOSE_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?-u:\b)[0-9]+\s*[ГG]?[БB]?(?-u:\b)").expect("valid regex")
});

static LABELLED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(ТБ|TB|ГБ|GB|МБ|MB)?").expect("valid regex")
});

/// Which capability a spec line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecKind {
    /// Operating memory.
    Ram,
    /// Built-in storage.
    Storage,
}

impl SpecKind {
    /// Lower-case keywords that select a line for this kind.
    ///
    /// `"память"` is shared by both lists, so a storage lookup usually lands
    /// on the RAM line when that line comes first.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            SpecKind::Ram => &["оперативная память", "память", "ram"],
            SpecKind::Storage => &["встроенная память", "память", "storage", "rom"],
        }
    }

    /// Labels a line must start with to feed [`SpecAttributes`].
    fn labels(&self) -> &'static [&'static str] {
        match self {
            SpecKind::Ram => &["оперативная память", "ram"],
            SpecKind::Storage => &["встроенная память", "rom", "storage"],
        }
    }
}

/// Return the first line containing any keyword of `kind`, case-insensitively.
pub fn find_spec_line<S: AsRef<str>>(specs: &[S], kind: SpecKind) -> Option<&str> {
    let keywords = kind.keywords();
    specs.iter().map(AsRef::as_ref).find(|line| {
        let lower = line.to_lowercase();
        keywords.iter().any(|kw| lower.contains(kw))
    })
}

/// Extract size tokens such as `"4 ГБ"` or `"32GB"` from a spec line.
///
/// Patterns are tried in order (Cyrillic unit, Latin unit, bare number) and
/// the first one producing any match wins.
pub fn extract_size_tokens(line: &str) -> Vec<String> {
    for pattern in [&*CYRILLIC_GB, &*LATIN_GB, &*LOOSE_SIZE] {
        let tokens: Vec<String> = pattern
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect();
        if !tokens.is_empty() {
            return tokens;
        }
    }
    Vec::new()
}

/// Keyword-heuristic match used by the catalog filter.
///
/// True when the line selected for `kind` yields a token that contains one
/// of the `requested` values. An empty `requested` list is not a constraint
/// and callers skip the check entirely in that case.
pub fn legacy_spec_matches<S: AsRef<str>>(specs: &[S], kind: SpecKind, requested: &[String]) -> bool {
    let Some(line) = find_spec_line(specs, kind) else {
        return false;
    };
    let tokens = extract_size_tokens(line);
    tokens
        .iter()
        .any(|token| requested.iter().any(|value| token.contains(value.as_str())))
}

/// Gigabyte figures read from explicitly labelled spec lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecAttributes {
    pub ram_gb: Vec<u32>,
    pub storage_gb: Vec<u32>,
}

impl SpecAttributes {
    /// Parse labelled lines; anything else is ignored.
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Self {
        let mut attrs = SpecAttributes::default();
        for line in specs.iter().map(AsRef::as_ref) {
            let lower = line.trim().to_lowercase();
            for kind in [SpecKind::Ram, SpecKind::Storage] {
                let Some(label) = kind.labels().iter().find(|l| lower.starts_with(*l)) else {
                    continue;
                };
                if let Some(value) = first_gigabytes(&lower[label.len()..]) {
                    match kind {
                        SpecKind::Ram => attrs.ram_gb.push(value),
                        SpecKind::Storage => attrs.storage_gb.push(value),
                    }
                }
                break;
            }
        }
        attrs
    }

    pub fn is_empty(&self) -> bool {
        self.ram_gb.is_empty() && self.storage_gb.is_empty()
    }

    /// Compact "4/32 ГБ" style summary, if both figures are known.
    pub fn summary(&self) -> Option<String> {
        match (self.ram_gb.first(), self.storage_gb.first()) {
            (Some(ram), Some(rom)) => Some(format!("{ram}/{rom} ГБ")),
            (Some(ram), None) => Some(format!("{ram} ГБ RAM")),
            (None, Some(rom)) => Some(format!("{rom} ГБ ROM")),
            (None, None) => None,
        }
    }
}

/// First value after a label, in gigabytes. Megabyte figures are skipped.
fn first_gigabytes(rest: &str) -> Option<u32> {
    let caps = LABELLED_VALUE.captures(rest)?;
    let value: u32 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|u| u.as_str().to_lowercase()) {
        Some(unit) if unit == "мб" || unit == "mb" => None,
        Some(unit) if unit == "тб" || unit == "tb" => value.checked_mul(1024),
        _ => Some(value),
    }
}
