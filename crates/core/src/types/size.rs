//! Size codes identifying a product variant.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SizeCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeCodeError {
    /// The input string is empty (or only whitespace).
    #[error("size code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("size code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The identifier of a sizable variant, as carried in a size control's
/// `data-size` attribute (e.g. `"M"`, `"38.5"`).
///
/// ```
/// use maison_core::SizeCode;
///
/// assert_eq!(SizeCode::parse(" XL ").unwrap().as_str(), "XL");
/// assert!(SizeCode::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SizeCode(String);

impl SizeCode {
    /// Maximum length of a size code.
    pub const MAX_LENGTH: usize = 8;

    /// Parse a `SizeCode`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, SizeCodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SizeCodeError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(SizeCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the size code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SizeCode {
    type Err = SizeCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SizeCode {
    type Error = SizeCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SizeCode> for String {
    fn from(size: SizeCode) -> Self {
        size.0
    }
}
