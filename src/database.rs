//! Declared properties of a managed database.

use serde::Serialize;
use thiserror::Error;

/// Character set applied when none is declared.
pub const DEFAULT_CHARSET: &str = "utf8";

/// Collation applied when none is declared.
pub const DEFAULT_COLLATE: &str = "utf8_general_ci";

/// Errors raised while validating a database declaration.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DatabaseError {
    /// Raised when the database name is empty.
    #[error("database name must not be empty")]
    MissingName,
    /// Raised when the character set is empty or contains whitespace.
    #[error("invalid CHARACTER SET `{value}` for database {name}: expected a single word")]
    InvalidCharset {
        /// Database being declared.
        name: String,
        /// Rejected character set.
        value: String,
    },
    /// Raised when the collation is empty or contains whitespace.
    #[error("invalid COLLATE `{value}` for database {name}: expected a single word")]
    InvalidCollate {
        /// Database being declared.
        name: String,
        /// Rejected collation.
        value: String,
    },
}

/// A validated database declaration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DatabaseSpec {
    /// Database name.
    pub name: String,
    /// `CHARACTER SET` of the database.
    pub charset: String,
    /// `COLLATE` setting of the database.
    pub collate: String,
}

impl DatabaseSpec {
    /// Starts a builder with the default character set and collation.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> DatabaseSpecBuilder {
        DatabaseSpecBuilder {
            name: name.into(),
            charset: DEFAULT_CHARSET.to_owned(),
            collate: DEFAULT_COLLATE.to_owned(),
        }
    }
}

/// Builder for [`DatabaseSpec`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatabaseSpecBuilder {
    name: String,
    charset: String,
    collate: String,
}

impl DatabaseSpecBuilder {
    /// Overrides the character set.
    #[must_use]
    pub fn charset(mut self, value: impl Into<String>) -> Self {
        self.charset = value.into();
        self
    }

    /// Overrides the collation.
    #[must_use]
    pub fn collate(mut self, value: impl Into<String>) -> Self {
        self.collate = value.into();
        self
    }

    /// Validates and builds the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`] when the name is empty or the character set
    /// or collation is not a single whitespace-free word.
    pub fn build(self) -> Result<DatabaseSpec, DatabaseError> {
        if self.name.is_empty() {
            return Err(DatabaseError::MissingName);
        }
        if !is_single_word(&self.charset) {
            return Err(DatabaseError::InvalidCharset {
                name: self.name,
                value: self.charset,
            });
        }
        if !is_single_word(&self.collate) {
            return Err(DatabaseError::InvalidCollate {
                name: self.name,
                value: self.collate,
            });
        }
        Ok(DatabaseSpec {
            name: self.name,
            charset: self.charset,
            collate: self.collate,
        })
    }
}

fn is_single_word(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}
