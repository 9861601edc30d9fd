//! Slug derivation and validation for listing identifiers.
//!
//! Slugs are non-empty identifiers composed of lowercase ASCII letters,
//! digits, and hyphens. Upstream slugs are kept when they already satisfy
//! that shape; otherwise one is derived from the title by lower-casing and
//! collapsing every run of non-alphanumeric characters into a single hyphen.

/// Return `true` when `value` is a valid listing slug.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Derive a slug from free text.
///
/// Lowercases the input and collapses non-alphanumeric runs into single
/// hyphens, trimming leading and trailing hyphens. Returns an empty string
/// when the input carries no alphanumeric characters at all; callers must
/// substitute their own fallback identifier in that case.
///
/// # Examples
/// ```
/// use backend::domain::slug::slugify;
///
/// assert_eq!(slugify("Paris Design Gig"), "paris-design-gig");
/// assert_eq!(slugify("  UI/UX -- Kit! "), "ui-ux-kit");
/// assert_eq!(slugify("???"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
