use regex::Regex;
use std::sync::OnceLock;

static NON_ALNUM_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_non_alnum_regex() -> &'static Regex {
    NON_ALNUM_REGEX.get_or_init(|| Regex::new(r"[^a-z0-9]").unwrap())
}

/// Turn a free-text artist or song name into an AZLyrics URL key.
///
/// Lowercases, then drops everything outside `[a-z0-9]`. "AC/DC" becomes
/// "acdc".
pub fn normalize(name: &str) -> String {
    get_non_alnum_regex()
        .replace_all(&name.to_lowercase(), "")
        .into_owned()
}

/// Title-case a display name: a cased letter is upper-cased when it starts
/// the string or follows anything that is not a cased letter, every other
/// cased letter is lower-cased. Uncased scripts such as CJK act as breaks.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_is_cased = false;

    for c in name.chars() {
        if c.is_lowercase() || c.is_uppercase() {
            if prev_is_cased {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_is_cased = true;
        } else {
            result.push(c);
            prev_is_cased = false;
        }
    }

    result
}
