// crates/geopath-core/src/text.rs

/// Derive a URL slug from a display name.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Nuevo León` -> `Nuevo Leon`)
/// 2\) Lowercase
/// 3\) Collapse every run of non-alphanumerics into a single `-`
///
/// Used by the catalog loader for rows that carry no stored slug. Stored
/// slugs are never rewritten, so existing links keep working.
///
/// # Examples
///
/// ```rust
/// use geopath_core::text::slugify;
///
/// assert_eq!(slugify("Nuevo León"), "nuevo-leon");
/// assert_eq!(slugify("  Los Ángeles, CA "), "los-angeles-ca");
/// assert_eq!(slugify("Zürich"), "zurich");
/// ```
pub fn slugify(name: &str) -> String {
    let ascii = deunicode::deunicode(name).to_lowercase();
    let mut out = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::slugify;
    use rstest::rstest;

    #[rstest]
    #[case("California", "california")]
    #[case("São Paulo", "sao-paulo")]
    #[case("Baja California Sur", "baja-california-sur")]
    #[case("--Ciudad de México--", "ciudad-de-mexico")]
    #[case("Straße", "strasse")]
    #[case("", "")]
    fn slugify_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }
}
