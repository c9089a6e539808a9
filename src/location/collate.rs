//! Locale-aware ordering for Spanish place names.
//!
//! Primary order ignores case and diacritics so "Ábrego" sits next to
//! "Abejorral" instead of after "Zipaquirá". `ñ` is kept as its own letter
//! between `n` and `o`. Ties fall back to the accented form and finally to
//! raw code points, which keeps the order total.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sorts after every other letter that shares its base `n`.
const ENYE_WEIGHT: char = '\u{10FFFF}';

/// Builds the primary collation key: lower-case, accents removed, `ñ` kept.
///
/// Input is composed first so a decomposed `n` + U+0303 still counts as `ñ`.
fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.nfc().flat_map(char::to_lowercase) {
        if c == 'ñ' {
            key.push('n');
            key.push(ENYE_WEIGHT);
            continue;
        }
        key.extend(c.to_string().nfd().filter(|m| !is_combining_mark(*m)));
    }
    key
}

/// Secondary key: lower-case only, accents preserved.
fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Compares two names the way a Spanish-locale collator would.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| a.cmp(b))
}

/// Sorts and deduplicates names in place.
pub fn sort_dedup(names: &mut Vec<String>) {
    names.sort_by(|a, b| compare(a, b));
    names.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accented_initial_sorts_with_plain_letter() {
        let mut names = vec![
            "Zipaquirá".to_string(),
            "Ábrego".to_string(),
            "Abejorral".to_string(),
            "Bogotá".to_string(),
        ];
        sort_dedup(&mut names);
        assert_eq!(names, ["Abejorral", "Ábrego", "Bogotá", "Zipaquirá"]);
    }

    #[test]
    fn enye_sorts_after_n() {
        let mut names = vec![
            "Ocaña".to_string(),
            "Nariño".to_string(),
            "Ñátaga".to_string(),
            "Nuquí".to_string(),
        ];
        sort_dedup(&mut names);
        assert_eq!(names, ["Nariño", "Nuquí", "Ñátaga", "Ocaña"]);
    }

    #[test]
    fn decomposed_enye_sorts_like_composed() {
        let decomposed = "Nari\u{6e}\u{303}o";
        assert_eq!(primary_key(decomposed), primary_key("Nariño"));
        assert_eq!(compare("Narinz", decomposed), Ordering::Less);
        assert_eq!(compare("N\u{303}ataga", "Nuquí"), Ordering::Greater);
    }

    #[test]
    fn case_is_ignored_at_primary_level() {
        assert_eq!(compare("cali", "Cartago"), Ordering::Less);
        assert_eq!(compare("CALI", "cartago"), Ordering::Less);
    }

    #[test]
    fn distinct_strings_never_compare_equal() {
        assert_ne!(compare("Bolívar", "Bolivar"), Ordering::Equal);
        assert_ne!(compare("cali", "Cali"), Ordering::Equal);
        assert_eq!(compare("Cali", "Cali"), Ordering::Equal);
    }

    #[test]
    fn dedup_removes_exact_duplicates_only() {
        let mut names = vec![
            "Bolívar".to_string(),
            "Bolivar".to_string(),
            "Bolívar".to_string(),
        ];
        sort_dedup(&mut names);
        assert_eq!(names.len(), 2);
    }
}
