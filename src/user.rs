//! Declared properties of a managed database user.
//!
//! A [`UserSpec`] pairs a validated [`AccountIdentifier`] with the optional
//! properties the user resource manages: password hash, authentication
//! plugin, per-user resource limits and TLS requirements.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use crate::account::AccountIdentifier;

#[expect(
    clippy::expect_used,
    reason = "the plugin pattern is a compile-time constant"
)]
static PLUGIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9A-Za-z_]+\z").expect("plugin name pattern"));

#[expect(
    clippy::expect_used,
    reason = "the TLS option pattern is a compile-time constant"
)]
static TLS_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A(CIPHER|ISSUER|SUBJECT)").expect("TLS option pattern"));

/// TLS requirements that must be used on their own.
pub const EXCLUSIVE_TLS_OPTIONS: [&str; 3] = ["NONE", "SSL", "X509"];

/// Errors raised while validating a user declaration.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum UserError {
    /// Raised when the plugin name is not a single word.
    #[error("invalid authentication plugin `{value}`")]
    InvalidPlugin {
        /// Rejected plugin name.
        value: String,
    },
    /// Raised when `NONE`, `SSL` or `X509` is combined with other options.
    #[error(
        "`tls_options` `property`: The values NONE, SSL and X509 cannot be used with other options, you may only pick one of them."
    )]
    ExclusiveTlsOption,
    /// Raised when a TLS option is not a `CIPHER`, `ISSUER` or `SUBJECT`
    /// requirement.
    #[error("Invalid tls option {option}.")]
    InvalidTlsOption {
        /// Rejected option.
        option: String,
    },
}

/// A password hash, redacted whenever it is displayed or debugged.
#[derive(Debug)]
pub struct PasswordHash(SecretString);

impl PasswordHash {
    /// Wraps a hash as produced by the server's password function.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(SecretString::from(hash.into()))
    }

    /// Returns the hash for use in a statement.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Describes a change to the hash without revealing either value.
    #[must_use]
    pub const fn change_description(current: Option<&Self>) -> &'static str {
        if current.is_none() {
            "created password"
        } else {
            "changed password"
        }
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[password hash redacted]")
    }
}

/// Per-user resource limits; `0` means no (or the global) limit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ResourceLimits {
    /// Maximum concurrent connections.
    pub max_user_connections: Option<u32>,
    /// Maximum connections per hour.
    pub max_connections_per_hour: Option<u32>,
    /// Maximum queries per hour.
    pub max_queries_per_hour: Option<u32>,
    /// Maximum updates per hour.
    pub max_updates_per_hour: Option<u32>,
}

/// Validated TLS requirements for a user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TlsOptions(Vec<String>);

impl TlsOptions {
    /// Validates a list of TLS requirements.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::ExclusiveTlsOption`] when `NONE`, `SSL` or `X509`
    /// is combined with anything else, and [`UserError::InvalidTlsOption`]
    /// when an option is not a `CIPHER`, `ISSUER` or `SUBJECT` requirement.
    pub fn new<I, S>(values: I) -> Result<Self, UserError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = values.into_iter().map(Into::into).collect();
        let has_exclusive = options
            .iter()
            .any(|option| EXCLUSIVE_TLS_OPTIONS.contains(&option.as_str()));

        if has_exclusive {
            if options.len() > 1 {
                return Err(UserError::ExclusiveTlsOption);
            }
        } else if let Some(invalid) = options
            .iter()
            .find(|option| !TLS_ATTRIBUTE.is_match(option))
        {
            return Err(UserError::InvalidTlsOption {
                option: invalid.clone(),
            });
        }
        Ok(Self(options))
    }

    /// Returns the options in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` when `current` holds the same options in any order.
    #[must_use]
    pub fn is_in_sync(&self, current: &[String]) -> bool {
        let mut wanted: Vec<&str> = self.0.iter().map(String::as_str).collect();
        let mut actual: Vec<&str> = current.iter().map(String::as_str).collect();
        wanted.sort_unstable();
        actual.sort_unstable();
        wanted == actual
    }
}

/// A validated user declaration.
#[derive(Debug)]
pub struct UserSpec {
    /// Normalised account identifier.
    pub account: AccountIdentifier,
    /// Password hash, if managed.
    pub password_hash: Option<PasswordHash>,
    /// Authentication plugin, if managed.
    pub plugin: Option<String>,
    /// Resource limits.
    pub limits: ResourceLimits,
    /// TLS requirements, if managed.
    pub tls_options: Option<TlsOptions>,
}

impl UserSpec {
    /// Starts a builder for `account`.
    #[must_use]
    pub fn builder(account: AccountIdentifier) -> UserSpecBuilder {
        UserSpecBuilder {
            account,
            password_hash: None,
            plugin: None,
            limits: ResourceLimits::default(),
            tls_options: None,
        }
    }
}

/// Builder for [`UserSpec`] that defers validation to [`build`](Self::build).
#[derive(Debug)]
pub struct UserSpecBuilder {
    account: AccountIdentifier,
    password_hash: Option<PasswordHash>,
    plugin: Option<String>,
    limits: ResourceLimits,
    tls_options: Option<Vec<String>>,
}

impl UserSpecBuilder {
    /// Sets the password hash.
    #[must_use]
    pub fn password_hash(mut self, value: Option<PasswordHash>) -> Self {
        self.password_hash = value;
        self
    }

    /// Sets the authentication plugin.
    #[must_use]
    pub fn plugin(mut self, value: Option<String>) -> Self {
        self.plugin = value;
        self
    }

    /// Sets the resource limits.
    #[must_use]
    pub const fn limits(mut self, value: ResourceLimits) -> Self {
        self.limits = value;
        self
    }

    /// Sets the TLS requirements.
    #[must_use]
    pub fn tls_options(mut self, value: Option<Vec<String>>) -> Self {
        self.tls_options = value;
        self
    }

    /// Validates and builds the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`UserError`] when the plugin or TLS options are invalid.
    pub fn build(self) -> Result<UserSpec, UserError> {
        if let Some(plugin) = self
            .plugin
            .as_deref()
            .filter(|name| !PLUGIN_NAME.is_match(name))
        {
            return Err(UserError::InvalidPlugin {
                value: plugin.to_owned(),
            });
        }
        let tls_options = self.tls_options.map(TlsOptions::new).transpose()?;
        Ok(UserSpec {
            account: self.account,
            password_hash: self.password_hash,
            plugin: self.plugin,
            limits: self.limits,
            tls_options,
        })
    }
}
