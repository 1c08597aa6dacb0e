//! Header title text and script detection.
//!
//! The header may mix scripts for decorative effect; `title_scripts` reports
//! which ones appear so a UI shell can load fallback fonts up front.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Unicode scripts the header is checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Latin,
    Han,
    Hiragana,
    Katakana,
    Hangul,
    Cyrillic,
    Greek,
    Arabic,
}

static SCRIPT_PATTERNS: Lazy<Vec<(Script, Regex)>> = Lazy::new(|| {
    [
        (Script::Latin, r"\p{Latin}"),
        (Script::Han, r"\p{Han}"),
        (Script::Hiragana, r"\p{Hiragana}"),
        (Script::Katakana, r"\p{Katakana}"),
        (Script::Hangul, r"\p{Hangul}"),
        (Script::Cyrillic, r"\p{Cyrillic}"),
        (Script::Greek, r"\p{Greek}"),
        (Script::Arabic, r"\p{Arabic}"),
    ]
    .into_iter()
    .map(|(script, pattern)| (script, Regex::new(pattern).expect("valid script regex")))
    .collect()
});

/// Returns the scripts present in `title`, in declaration order.
pub fn title_scripts(title: &str) -> Vec<Script> {
    SCRIPT_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(title))
        .map(|(script, _)| *script)
        .collect()
}
