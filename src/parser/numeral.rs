//! Ratio-token numeral normalization
//!
//! A matched ratio token carries its value as half-width digits (9割, 10割),
//! full-width digits (９割, １０割) or a single kanji numeral (九割). This
//! module collapses all three systems to an integer 1-10. Kanji 十 for ten is
//! deliberately not recognized; only the digit forms of 10 are.

use regex::Regex;
use std::sync::LazyLock;

static HALFWIDTH_RATIO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(10|[1-9])\s*割").unwrap());

static FULLWIDTH_RATIO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(１０|[１-９])\s*割").unwrap());

static KANJI_RATIO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([一二三四五六七八九])割").unwrap());

/// Convert a ratio token such as 9割, ９ 割 or 九割 to its integer value
///
/// Numeral systems are tried in priority order: half-width digits,
/// full-width digits, kanji digits. Whitespace between a digit and 割 is
/// tolerated for the digit forms. Returns `None` for anything else,
/// including 0割 and 十割.
///
/// # Examples
///
/// ```
/// use wariai::parser::numeral::to_ratio;
///
/// assert_eq!(to_ratio("9割"), Some(9));
/// assert_eq!(to_ratio("１０割"), Some(10));
/// assert_eq!(to_ratio("九割"), Some(9));
/// assert_eq!(to_ratio("十割"), None);
/// ```
pub fn to_ratio(token: &str) -> Option<u8> {
    if let Some(cap) = HALFWIDTH_RATIO_REGEX.captures(token) {
        return cap[1].parse().ok();
    }

    if let Some(cap) = FULLWIDTH_RATIO_REGEX.captures(token) {
        return fullwidth_value(&cap[1]);
    }

    if let Some(cap) = KANJI_RATIO_REGEX.captures(token) {
        return kanji_value(&cap[1]);
    }

    None
}

fn fullwidth_value(digits: &str) -> Option<u8> {
    match digits {
        "１" => Some(1),
        "２" => Some(2),
        "３" => Some(3),
        "４" => Some(4),
        "５" => Some(5),
        "６" => Some(6),
        "７" => Some(7),
        "８" => Some(8),
        "９" => Some(9),
        "１０" => Some(10),
        _ => None,
    }
}

fn kanji_value(digit: &str) -> Option<u8> {
    match digit {
        "一" => Some(1),
        "二" => Some(2),
        "三" => Some(3),
        "四" => Some(4),
        "五" => Some(5),
        "六" => Some(6),
        "七" => Some(7),
        "八" => Some(8),
        "九" => Some(9),
        _ => None,
    }
}
