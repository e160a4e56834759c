//! Parsing and normalisation of `user@host` account identifiers.
//!
//! An identifier is accepted in one of three shapes (quoted, bare
//! alphanumeric, bare symbolic) and, when the server version is known, its
//! user part is checked against the length limit of that server family. The
//! normalised form keeps the user part verbatim, quotes included, and lower
//! cases the host.

mod limits;
mod shapes;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::version::MySqlVersion;

use self::shapes::{SHAPES, Split};

/// Errors raised while validating an account identifier.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum AccountError {
    /// Raised when the identifier matches none of the accepted shapes.
    #[error("Invalid database user {value}.")]
    InvalidIdentifier {
        /// Identifier as supplied by the caller.
        value: String,
    },
    /// Raised when the user part exceeds the server's length limit.
    #[error("MySQL usernames are limited to a maximum of {max} characters.")]
    NameTooLong {
        /// Limit that applies to the supplied server version.
        max: usize,
        /// Length of the rejected user part, in characters.
        length: usize,
    },
}

/// Quote character that delimited a quoted user part.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// `'user'@host`
    Single,
    /// `` `user`@host ``
    Backtick,
    /// `"user"@host`
    Double,
}

impl QuoteStyle {
    /// Maps a quote character to its style.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Self::Single),
            '`' => Some(Self::Backtick),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns the quote character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Backtick => '`',
            Self::Double => '"',
        }
    }
}

/// A validated account identifier with its host lower-cased.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct AccountIdentifier {
    user: String,
    host: String,
    quote: Option<QuoteStyle>,
}

impl AccountIdentifier {
    /// Parses `raw` and, when `version` is supplied, enforces the user-part
    /// length limit for that server.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidIdentifier`] when no accepted shape
    /// matches and [`AccountError::NameTooLong`] when the user part is too
    /// long for `version`.
    pub fn parse(raw: &str, version: Option<&MySqlVersion>) -> Result<Self, AccountError> {
        let Some((shape, split)) = SHAPES
            .iter()
            .find_map(|shape| (shape.matcher)(raw).map(|split| (shape.name, split)))
        else {
            debug!(identifier = raw, "identifier matched no accepted shape");
            return Err(AccountError::InvalidIdentifier {
                value: raw.to_owned(),
            });
        };
        debug!(identifier = raw, shape, "matched account identifier shape");

        check_length(&split, version)?;

        Ok(Self {
            user: split.user.to_owned(),
            host: split.host.to_lowercase(),
            quote: split.quote,
        })
    }

    /// User part without its delimiting quotes.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Lower-cased host part.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Quote style of the user part, if it was quoted.
    #[must_use]
    pub const fn quote(&self) -> Option<QuoteStyle> {
        self.quote
    }

    /// Returns `true` when the user part was delimited by quotes.
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        self.quote.is_some()
    }

    /// User part as it appeared in the input, quotes included.
    #[must_use]
    pub fn user_part(&self) -> String {
        self.quote.map_or_else(
            || self.user.clone(),
            |quote| format!("{q}{user}{q}", q = quote.as_char(), user = self.user),
        )
    }

    /// Normalised `user_part@host` string.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user_part(), self.host)
    }
}

impl FromStr for AccountIdentifier {
    type Err = AccountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value, None)
    }
}

/// Parses and normalises `raw` against an optional server version.
///
/// # Errors
///
/// See [`AccountIdentifier::parse`].
pub fn parse_and_normalize(
    raw: &str,
    version: Option<&MySqlVersion>,
) -> Result<AccountIdentifier, AccountError> {
    AccountIdentifier::parse(raw, version)
}

fn check_length(split: &Split<'_>, version: Option<&MySqlVersion>) -> Result<(), AccountError> {
    let Some(max) = limits::max_user_length(version) else {
        return Ok(());
    };
    let length = split.user.chars().count();
    if length > max {
        debug!(user = split.user, length, max, "user part exceeds length limit");
        return Err(AccountError::NameTooLong { max, length });
    }
    Ok(())
}
