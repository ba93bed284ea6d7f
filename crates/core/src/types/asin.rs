//! Amazon Standard Identification Number.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Asin`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsinError {
    /// The input is empty or whitespace only.
    #[error("ASIN cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("ASIN must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or control characters.
    #[error("ASIN contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// An ASIN, the primary grouping key for products.
///
/// Parent ASINs (product families) and child ASINs (size/colour variations)
/// share this type. Surrounding whitespace is trimmed on parse; the value is
/// otherwise kept as given so it matches the upstream catalog exactly.
///
/// ## Examples
///
/// ```
/// use profitlens_core::Asin;
///
/// let asin = Asin::parse(" B08N5WRWNW ").unwrap();
/// assert_eq!(asin.as_str(), "B08N5WRWNW");
///
/// assert!(Asin::parse("").is_err());
/// assert!(Asin::parse("B08 N5").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asin(String);

impl Asin {
    /// Maximum accepted length. Real ASINs are 10 characters; ISBN-style
    /// identifiers used by some marketplaces are 13.
    pub const MAX_LENGTH: usize = 32;

    /// Parse an `Asin` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, AsinError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AsinError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(AsinError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AsinError::InvalidCharacter(c));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the ASIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for Asin {
    type Err = AsinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Asin {
    type Error = AsinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Asin> for String {
    fn from(asin: Asin) -> Self {
        asin.0
    }
}

impl AsRef<str> for Asin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
