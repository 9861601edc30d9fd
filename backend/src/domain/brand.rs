//! Best-effort brand derivation for offers that omit an explicit brand.
//!
//! The heuristic is cosmetic: it feeds a display badge and a filter facet,
//! not any data-integrity-bearing computation. Order of preference:
//! explicit brand field, first tag, a known-brand token in the title,
//! and finally the first capitalised word of the title.

/// Fixed vocabulary scanned for in titles, matched case-sensitively on
/// whole words.
const KNOWN_BRANDS: [&str; 14] = [
    "Apple",
    "Samsung",
    "Sony",
    "Microsoft",
    "Google",
    "Adobe",
    "Figma",
    "Dell",
    "Lenovo",
    "Asus",
    "Canon",
    "Nikon",
    "Logitech",
    "Nvidia",
];

/// Scan a title for a known-brand token.
///
/// Tokens are whitespace-separated words with surrounding punctuation
/// stripped; the comparison is case-sensitive so "apple pie recipe" does
/// not become an Apple listing.
#[must_use]
pub fn known_brand_in_title(title: &str) -> Option<&'static str> {
    title
        .split_whitespace()
        .map(trim_word_punctuation)
        .find_map(|word| KNOWN_BRANDS.into_iter().find(|brand| *brand == word))
}

/// First title token shaped like a brand name: an uppercase ASCII letter
/// followed by one or more alphanumerics.
#[must_use]
pub fn capitalized_word_in_title(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .map(trim_word_punctuation)
        .find(|word| looks_like_brand_word(word))
        .map(str::to_owned)
}

fn looks_like_brand_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_uppercase() && chars.clone().count() >= 1 && chars.all(|c| c.is_ascii_alphanumeric())
}

fn trim_word_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

/// Apply the full derivation chain.
///
/// # Examples
/// ```
/// use backend::domain::brand::derive_brand;
///
/// assert_eq!(
///     derive_brand(Some("Acme"), &[], "whatever"),
///     Some("Acme".to_owned()),
/// );
/// assert_eq!(
///     derive_brand(None, &[], "Refurbished Samsung Galaxy S23"),
///     Some("Samsung".to_owned()),
/// );
/// assert_eq!(derive_brand(None, &[], "a lowercase title"), None);
/// ```
#[must_use]
pub fn derive_brand(explicit: Option<&str>, tags: &[String], title: &str) -> Option<String> {
    if let Some(brand) = explicit {
        let trimmed = brand.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_owned());
        }
    }
    if let Some(first_tag) = tags.first() {
        return Some(first_tag.clone());
    }
    if let Some(known) = known_brand_in_title(title) {
        return Some(known.to_owned());
    }
    capitalized_word_in_title(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_brand_wins_over_everything() {
        let tags = vec!["figma".to_owned()];
        let brand = derive_brand(Some(" Sony "), &tags, "Apple something");
        assert_eq!(brand, Some("Sony".to_owned()));
    }

    #[rstest]
    fn first_tag_beats_title_scan() {
        let tags = vec!["ui-kit".to_owned(), "design".to_owned()];
        let brand = derive_brand(None, &tags, "Apple Watch Strap");
        assert_eq!(brand, Some("ui-kit".to_owned()));
    }

    #[rstest]
    #[case::plain("Refurbished Apple MacBook", Some("Apple"))]
    #[case::punctuated("Brand new: Nikon, barely used", Some("Nikon"))]
    #[case::lowercase_vocabulary_word("fresh apple pie recipe", None)]
    #[case::no_brand("plain second hand desk", None)]
    fn title_scan_matches_whole_words_case_sensitively(
        #[case] title: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(known_brand_in_title(title), expected);
    }

    #[rstest]
    fn capitalized_fallback_requires_two_characters() {
        assert_eq!(
            capitalized_word_in_title("a Zebra print"),
            Some("Zebra".to_owned())
        );
        // Single capitals like "A" are not brand-shaped.
        assert_eq!(capitalized_word_in_title("A plain thing"), None);
    }

    #[rstest]
    fn empty_explicit_brand_falls_through() {
        let brand = derive_brand(Some("   "), &[], "Lenovo ThinkPad");
        assert_eq!(brand, Some("Lenovo".to_owned()));
    }
}
