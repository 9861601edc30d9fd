//! Country codes recognised by the marketplace.
//!
//! Location normalization always resolves to one of these codes; free-form
//! location text never survives past the offer adapter (the city keeps the
//! seller's wording, the country does not).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// ISO 3166-1 alpha-2 codes the marketplace enumerates, plus a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    /// France.
    Fr,
    /// United States.
    Us,
    /// United Kingdom.
    Gb,
    /// Germany.
    De,
    /// Canada.
    Ca,
    /// Italy.
    It,
    /// Spain.
    Es,
    /// Switzerland.
    Ch,
    /// Belgium.
    Be,
    /// Netherlands.
    Nl,
    /// Australia.
    Au,
    /// Japan.
    Jp,
    /// United Arab Emirates.
    Ae,
    /// Brazil.
    Br,
    /// India.
    In,
    /// Any country outside the enumerated set.
    #[default]
    Other,
}

impl Country {
    /// Two-letter code, or `OTHER` for the catch-all.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fr => "FR",
            Self::Us => "US",
            Self::Gb => "GB",
            Self::De => "DE",
            Self::Ca => "CA",
            Self::It => "IT",
            Self::Es => "ES",
            Self::Ch => "CH",
            Self::Be => "BE",
            Self::Nl => "NL",
            Self::Au => "AU",
            Self::Jp => "JP",
            Self::Ae => "AE",
            Self::Br => "BR",
            Self::In => "IN",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCountryError {
    /// The rejected input.
    pub input: String,
}

impl std::fmt::Display for ParseCountryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown country code: {}", self.input)
    }
}

impl std::error::Error for ParseCountryError {}

impl std::str::FromStr for Country {
    type Err = ParseCountryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FR" => Ok(Self::Fr),
            "US" => Ok(Self::Us),
            "GB" => Ok(Self::Gb),
            "DE" => Ok(Self::De),
            "CA" => Ok(Self::Ca),
            "IT" => Ok(Self::It),
            "ES" => Ok(Self::Es),
            "CH" => Ok(Self::Ch),
            "BE" => Ok(Self::Be),
            "NL" => Ok(Self::Nl),
            "AU" => Ok(Self::Au),
            "JP" => Ok(Self::Jp),
            "AE" => Ok(Self::Ae),
            "BR" => Ok(Self::Br),
            "IN" => Ok(Self::In),
            "OTHER" => Ok(Self::Other),
            _ => Err(ParseCountryError {
                input: s.to_owned(),
            }),
        }
    }
}
