use std::sync::LazyLock;

use regex::Regex;

use crate::{
    discogs::API_LIMIT,
    types::{ArtistCredit, Currency, Format, Label},
};

static ARTIST_DISAMBIGUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("static regex"));

static GRADE_ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \(.*\)").expect("static regex"));

/// Capitalizes the first cased character of every word and lower-cases the
/// rest. A word starts after any character that has no case, so
/// `"AC/DC"` becomes `"Ac/Dc"` and `"don't"` becomes `"Don'T"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }

    out
}

/// Builds the aggregate key for a list of credited artists.
///
/// Discogs appends `(2)`, `(3)`, ... to tell apart artists sharing a name;
/// those suffixes are dropped before the names are joined.
pub fn artist_name(artists: &[ArtistCredit]) -> String {
    let joined = artists
        .iter()
        .map(|a| ARTIST_DISAMBIGUATION.replace_all(&a.name, "").trim().to_string())
        .collect::<Vec<String>>()
        .join(" - ");

    title_case(&joined)
}

/// Summarizes the formats of a release as `(format, quantity)`.
///
/// Format names keep the order of their first appearance. Quantities of a
/// format listed more than once are summed into that format's slot.
/// Returns `None` when a quantity is not a number.
pub fn format_summary(formats: &[Format]) -> Option<(String, String)> {
    let mut totals: Vec<(String, u64)> = Vec::new();

    for format in formats {
        let name = format.name.trim().to_uppercase();
        let qty = format.qty.value()?;
        match totals.iter_mut().find(|(n, _)| *n == name) {
            Some((_, total)) => *total += qty,
            None => totals.push((name, qty)),
        }
    }

    let names = totals
        .iter()
        .map(|(n, _)| n.as_str())
        .collect::<Vec<&str>>()
        .join(" - ");
    let quantities = totals
        .iter()
        .map(|(_, q)| q.to_string())
        .collect::<Vec<String>>()
        .join(" - ");

    Some((names, quantities))
}

pub fn catalog_numbers(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|l| l.catno.trim())
        .collect::<Vec<&str>>()
        .join(" - ")
        .to_uppercase()
}

pub fn styles(styles: &[String]) -> String {
    let joined = styles
        .iter()
        .map(|s| s.trim())
        .collect::<Vec<&str>>()
        .join(", ");

    title_case(&joined)
}

/// Turns a price-suggestion label into a column key:
/// `"Very Good Plus (VG+)"` becomes `very_good_plus`.
pub fn grade_key(label: &str) -> String {
    GRADE_ABBREVIATION
        .replace_all(label, "")
        .to_lowercase()
        .replace(' ', "_")
}

/// Formats a price with two decimals and `,` thousands separators.
pub fn format_price(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{decimals}")
}

/// Number of collection pages to walk for a folder holding `count` items.
///
/// One page more than the item count requires; the extra page is a guard
/// against a stale count and is expected to come back empty. Returns `None`
/// when the page number does not fit a `u32`.
pub fn collection_page_count(count: u64) -> Option<u32> {
    u32::try_from(count.div_ceil(API_LIMIT as u64))
        .ok()?
        .checked_add(1)
}

/// Number of wantlist pages to walk given the reported `pagination.pages`,
/// including the same trailing guard page as collections.
pub fn wantlist_page_count(pages: u32) -> u32 {
    pages.saturating_add(1)
}

pub fn parse_currency(s: &str) -> Result<Currency, String> {
    let code = s.trim();
    if code.is_empty() {
        return Err("currency cannot be empty".to_string());
    }

    Currency::ALL
        .iter()
        .copied()
        .find(|c| c.code().eq_ignore_ascii_case(code))
        .ok_or_else(|| {
            format!(
                "invalid value '{}' (expected one of {})",
                code,
                Currency::ALL
                    .iter()
                    .map(|c| c.code())
                    .collect::<Vec<&str>>()
                    .join(", ")
            )
        })
}
