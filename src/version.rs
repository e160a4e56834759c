//! MySQL and MariaDB server versions with package-style ordering.
//!
//! Versions are compared token by token rather than lexically, so `5.7.10`
//! sorts after `5.7.8` and `10.3.39-MariaDB` sorts after `5.7.44`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

#[expect(
    clippy::expect_used,
    reason = "the token pattern is a compile-time constant"
)]
static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-.]|[0-9]+|[^-.0-9]+").expect("version token pattern"));

/// Errors raised while parsing a server version.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum VersionError {
    /// Raised when the version string is empty or only whitespace.
    #[error("server version must not be empty")]
    Empty,
    /// Raised when the version contains control characters.
    #[error("server version `{value}` contains control characters")]
    ControlCharacters {
        /// Version string as supplied by the caller.
        value: String,
    },
}

/// A server version string, ordered with package-version semantics.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct MySqlVersion {
    raw: String,
}

impl MySqlVersion {
    /// Parses a version string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Empty`] for blank input and
    /// [`VersionError::ControlCharacters`] when the value spans lines or
    /// carries other control characters.
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(VersionError::ControlCharacters {
                value: value.to_owned(),
            });
        }
        Ok(Self {
            raw: trimmed.to_owned(),
        })
    }

    /// Returns the version as supplied, minus surrounding whitespace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` when this version sorts strictly before `other`.
    #[must_use]
    pub fn is_older_than(&self, other: &str) -> bool {
        versioncmp(&self.raw, other) == Ordering::Less
    }
}

impl fmt::Display for MySqlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for MySqlVersion {
    type Err = VersionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl PartialEq for MySqlVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MySqlVersion {}

impl PartialOrd for MySqlVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MySqlVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        versioncmp(&self.raw, &other.raw)
    }
}

/// Compares two version strings the way package managers do.
///
/// Both sides are split into `-`, `.`, digit runs and other runs. Separators
/// sort below everything else (`-` below `.`), digit runs compare
/// numerically unless one of them carries a leading zero, and everything else
/// compares case-insensitively. When one side runs out of tokens the raw
/// strings decide.
///
/// Tokens that differ only in case do not end the comparison, unlike the
/// package-tool convention of reporting them equal: the next token is
/// compared instead, so `Ord` agrees with `Eq` on [`MySqlVersion`].
#[must_use]
pub fn versioncmp(left: &str, right: &str) -> Ordering {
    let mut left_tokens = VERSION_TOKEN.find_iter(left);
    let mut right_tokens = VERSION_TOKEN.find_iter(right);

    loop {
        let (Some(left_token), Some(right_token)) = (left_tokens.next(), right_tokens.next())
        else {
            return left.cmp(right);
        };
        match compare_tokens(left_token.as_str(), right_token.as_str()) {
            Ordering::Equal => {}
            decided => return decided,
        }
    }
}

fn compare_tokens(left: &str, right: &str) -> Ordering {
    if left == right {
        return Ordering::Equal;
    }
    match (left, right) {
        ("-", _) => Ordering::Less,
        (_, "-") => Ordering::Greater,
        (".", _) => Ordering::Less,
        (_, ".") => Ordering::Greater,
        _ if is_digit_run(left) && is_digit_run(right) => {
            if left.starts_with('0') || right.starts_with('0') {
                compare_text(left, right)
            } else {
                left.len().cmp(&right.len()).then_with(|| left.cmp(right))
            }
        }
        _ => compare_text(left, right),
    }
}

fn is_digit_run(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|byte| byte.is_ascii_digit())
}

fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_uppercase().cmp(&right.to_uppercase())
}
