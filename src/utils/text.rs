use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Upper-cases `text`, strips diacritics and keeps only `A-Z0-9`.
pub fn fold_alphanumeric(text: &str) -> String {
    text.trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

pub fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default())
        .trim()
        .to_string()
}

pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
