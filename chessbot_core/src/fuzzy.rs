//! Fuzzy string similarity scores in the range `0..=100`.
//!
//! The base score is `rapidfuzz`'s normalized Indel similarity
//! `2 * lcs(a, b) / (|a| + |b|)` over `char`s, rounded to the nearest
//! integer. This module only composes it into partial and token-set scores.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;
use rapidfuzz::fuzz;

/// Whole-string similarity.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    to_score(fuzz::ratio(a.chars(), b.chars()))
}

/// Best similarity between the shorter string and any equally long window of
/// the longer one.
///
/// Windows that run off either end of the longer string are also tried, so
/// a query that is a slightly garbled prefix or suffix still scores well.
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return 0;
    }
    if short.len() == long.len() {
        return to_score(similarity(&short, &long));
    }

    let n = short.len();
    let last_full = long.len() - n;
    let mut best = 0.0_f64;

    let windows = (1..n)
        .map(|len| &long[..len])
        .chain((0..=last_full).map(|start| &long[start..start + n]))
        .chain((last_full + 1..long.len()).map(|start| &long[start..]));

    for window in windows {
        best = best.max(similarity(&short, window));
        if best >= 1.0 {
            break;
        }
    }

    to_score(best)
}

/// Similarity of two strings viewed as sets of words.
///
/// Punctuation is treated as whitespace and case is ignored. Word order and
/// repeated words do not affect the score.
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = tokens(a);
    let b = tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let shared = join(a.intersection(&b));
    let only_a = join(a.difference(&b));
    let only_b = join(b.difference(&a));

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100;
    }

    let with_a = format!("{shared} {only_a}").trim().to_string();
    let with_b = format!("{shared} {only_b}").trim().to_string();

    [
        ratio_or_zero(&shared, &with_a),
        ratio_or_zero(&shared, &with_b),
        ratio_or_zero(&with_a, &with_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn ratio_or_zero(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        0
    } else {
        ratio(a, b)
    }
}

fn tokens(s: &str) -> BTreeSet<String> {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn join<'a>(words: impl Iterator<Item = &'a String>) -> String {
    words.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn similarity(a: &[char], b: &[char]) -> f64 {
    indel::normalized_similarity(a.iter().copied(), b.iter().copied())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round() as u8
}
