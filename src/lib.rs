//! Core library for the Myrig MySQL provisioning helpers.
//!
//! The crate validates and normalises `user@host` account identifiers against
//! the server's username limits, assembles the argument string for the backup
//! utility, and checks the declared properties of databases, users and the
//! backup account's grant.

pub mod account;
pub mod backup;
pub mod config;
pub mod database;
pub mod grant;
#[cfg(test)]
pub mod test_helpers;
pub mod user;
pub mod version;

pub use account::{AccountError, AccountIdentifier, QuoteStyle, parse_and_normalize};
pub use backup::{BackupArgs, DumpOptions, build_args, rotate_index};
pub use config::{BackupConfig, ConfigError};
pub use database::{DatabaseError, DatabaseSpec};
pub use grant::{BackupGrant, Privilege};
pub use user::{PasswordHash, ResourceLimits, TlsOptions, UserError, UserSpec};
pub use version::{MySqlVersion, VersionError, versioncmp};
