//! Free-text location normalization.
//!
//! Sellers type locations however they like ("Bruxelles", "são paulo",
//! "New York"). Normalization strips diacritics, removes whitespace, and
//! lower-cases the text before looking it up in a fixed city/country-name
//! table, so the rest of the system only ever sees resolved [`Country`]
//! codes. The original wording is preserved separately as the city field.

use super::country::Country;

/// Fold a location string into its lookup key: diacritics stripped,
/// whitespace removed, lower-cased.
///
/// # Examples
/// ```
/// use backend::domain::localization::location_key;
///
/// assert_eq!(location_key("São Paulo"), "saopaulo");
/// assert_eq!(location_key("  Genève "), "geneve");
/// ```
#[must_use]
pub fn location_key(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(fold_diacritic)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve free-text location into a country code, when the table knows it.
#[must_use]
pub fn resolve_location(text: &str) -> Option<Country> {
    lookup(location_key(text).as_str())
}

// Diacritic folding for the Latin-1 / Latin Extended-A range the
// marketplace actually sees. Unknown characters pass through unchanged and
// simply fail the table lookup.
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' | 'À' | 'Á' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'a',
        'ç' | 'Ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ñ' | 'Ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' | 'Ò' | 'Ó' | 'Ô' | 'Ö' | 'Õ' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        other => other,
    }
}

fn lookup(key: &str) -> Option<Country> {
    let country = match key {
        // France
        "paris" | "lyon" | "marseille" | "toulouse" | "bordeaux" | "nice" | "france" => {
            Country::Fr
        }
        // Belgium
        "bruxelles" | "brussels" | "anvers" | "antwerp" | "gand" | "ghent" | "liege"
        | "belgique" | "belgium" => Country::Be,
        // United Kingdom
        "london" | "londres" | "manchester" | "birmingham" | "edinburgh" | "royaumeuni"
        | "unitedkingdom" | "england" | "angleterre" => Country::Gb,
        // United States
        "newyork" | "losangeles" | "sanfrancisco" | "chicago" | "miami" | "austin"
        | "etatsunis" | "unitedstates" | "usa" => Country::Us,
        // Canada
        "toronto" | "montreal" | "vancouver" | "quebec" | "canada" => Country::Ca,
        // Germany
        "berlin" | "munich" | "munchen" | "hamburg" | "frankfurt" | "cologne" | "koln"
        | "allemagne" | "germany" => Country::De,
        // Italy
        "rome" | "roma" | "milan" | "milano" | "turin" | "torino" | "naples" | "napoli"
        | "italie" | "italy" => Country::It,
        // Spain
        "madrid" | "barcelona" | "barcelone" | "valencia" | "seville" | "sevilla"
        | "espagne" | "spain" => Country::Es,
        // Switzerland
        "zurich" | "geneve" | "geneva" | "lausanne" | "bale" | "basel" | "suisse"
        | "switzerland" => Country::Ch,
        // Netherlands
        "amsterdam" | "rotterdam" | "lahaye" | "thehague" | "utrecht" | "paysbas"
        | "netherlands" => Country::Nl,
        // Australia
        "sydney" | "melbourne" | "brisbane" | "perth" | "australie" | "australia" => Country::Au,
        // Japan
        "tokyo" | "osaka" | "kyoto" | "japon" | "japan" => Country::Jp,
        // United Arab Emirates
        "dubai" | "abudhabi" | "uae" => Country::Ae,
        // Brazil
        "saopaulo" | "riodejaneiro" | "brasilia" | "bresil" | "brazil" => Country::Br,
        // India
        "mumbai" | "delhi" | "newdelhi" | "bangalore" | "bengaluru" | "inde" | "india" => {
            Country::In
        }
        _ => return None,
    };
    Some(country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("Bruxelles", Some(Country::Be))]
    #[case::accented("Genève", Some(Country::Ch))]
    #[case::spaced("New York", Some(Country::Us))]
    #[case::country_name("Belgique", Some(Country::Be))]
    #[case::folded("São Paulo", Some(Country::Br))]
    #[case::unknown("Atlantis", None)]
    #[case::empty("", None)]
    fn resolves_known_locations(#[case] input: &str, #[case] expected: Option<Country>) {
        assert_eq!(resolve_location(input), expected);
    }

    #[rstest]
    #[case("MONTRÉAL", "montreal")]
    #[case("  Zürich  ", "zurich")]
    #[case("la haye", "lahaye")]
    fn keys_fold_case_space_and_accents(#[case] input: &str, #[case] key: &str) {
        assert_eq!(location_key(input), key);
    }
}
