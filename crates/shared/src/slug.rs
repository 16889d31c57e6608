//! URL-safe slug generation.
//!
//! Titles and category names are mostly Russian, so slugification starts
//! with a Cyrillic-to-Latin transliteration pass before the usual
//! lowercase/strip/dash steps.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9\s-]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref DASHES: Regex = Regex::new(r"-+").expect("valid regex");
}

fn transliterate(c: char) -> &'static str {
    match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => "\0",
    }
}

/// Derives a URL-safe slug from free text.
///
/// Cyrillic letters are transliterated, everything else is lowercased,
/// non-alphanumeric characters are dropped, and whitespace runs collapse to
/// single dashes. May return an empty string for input with no usable
/// characters; callers provide their own fallback in that case.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        let mapped = transliterate(c);
        if mapped == "\0" {
            out.push(c);
        } else {
            out.push_str(mapped);
        }
    }

    let out = NON_SLUG.replace_all(&out, "");
    let out = WHITESPACE.replace_all(out.trim(), "-");
    let out = DASHES.replace_all(&out, "-");
    out.trim_matches('-').to_string()
}

/// Derives a slug with a base-36 millisecond-timestamp suffix.
///
/// Used for article slugs: the suffix makes collisions between equal titles
/// negligible without a uniqueness retry loop.
pub fn unique_slug(text: &str, timestamp_millis: i64) -> String {
    let base = slugify(text);
    let suffix = to_base36(timestamp_millis.max(0) as u64);
    if base.is_empty() {
        suffix
    } else {
        format!("{}-{}", base, suffix)
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ascii")
}
