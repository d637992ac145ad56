//! Text cleanup helpers for ratio-clause candidates
//!
//! Titles decorate the clause with brackets, quotes, lead-in phrases and
//! stray punctuation; these helpers strip that noise before morphological
//! validation. Every function is idempotent: re-running it on an already
//! cleaned string is a no-op.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled patterns, shared across all parse calls
static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[「」『』【】()（）\[\]"']"#).unwrap());

static MANGA_LEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(漫画|まんが)で.+?る").unwrap());

static COORDINATION_LEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+?も.+?も").unwrap());

/// Remove bracket and quote characters anywhere in the text
///
/// Strips 「」『』【】()（）[] plus straight double and single quotes.
///
/// # Examples
///
/// ```
/// use wariai::parser::cleanup::strip_brackets;
///
/// assert_eq!(strip_brackets("「時間の使い方」"), "時間の使い方");
/// assert_eq!(strip_brackets("メンタル"), "メンタル");
/// ```
pub fn strip_brackets(text: &str) -> String {
    BRACKET_REGEX.replace_all(text, "").into_owned()
}

/// Trim Japanese and ASCII punctuation from the start of the text
///
/// Only leading 、。，．,. are removed; interior punctuation stays.
///
/// # Examples
///
/// ```
/// use wariai::parser::cleanup::strip_leading_punctuation;
///
/// assert_eq!(strip_leading_punctuation("、仕組み"), "仕組み");
/// assert_eq!(strip_leading_punctuation("仕組み、全部"), "仕組み、全部");
/// ```
pub fn strip_leading_punctuation(text: &str) -> String {
    text.trim_start_matches(['、', '。', '，', '．', ',', '.'])
        .to_string()
}

/// Remove throwaway lead-in phrases from a subject candidate
///
/// Two lead-in shapes are stripped, in order:
///
/// 1. 漫画で…る / まんがで…る ("explained-in-manga" framing), keeping what
///    follows: 漫画で分かる株 -> 株
/// 2. a double …も…も coordination, keeping only the final coordinated
///    term: 日本も世界もマスコミ -> マスコミ
pub fn strip_lead_in_phrases(text: &str) -> String {
    let text = MANGA_LEAD_REGEX.replace(text, "");
    let text = COORDINATION_LEAD_REGEX.replace(&text, "");
    text.trim().to_string()
}
