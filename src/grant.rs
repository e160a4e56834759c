//! Grant planned for the backup account.

use std::fmt;

use serde::Serialize;

use crate::account::{AccountError, AccountIdentifier};
use crate::version::MySqlVersion;

/// Host the backup account connects from.
pub const BACKUP_HOST: &str = "localhost";

/// Grant target covering every table of every database.
pub const ALL_TABLES: &str = "*.*";

/// Privileges that may be granted to the backup account.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "&'static str")]
pub enum Privilege {
    /// `SELECT`
    Select,
    /// `RELOAD`
    Reload,
    /// `LOCK TABLES`
    LockTables,
    /// `SHOW VIEW`
    ShowView,
    /// `PROCESS`
    Process,
    /// `TRIGGER`
    Trigger,
}

impl Privilege {
    /// SQL spelling of the privilege.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Reload => "RELOAD",
            Self::LockTables => "LOCK TABLES",
            Self::ShowView => "SHOW VIEW",
            Self::Process => "PROCESS",
            Self::Trigger => "TRIGGER",
        }
    }
}

impl From<Privilege> for &'static str {
    fn from(value: Privilege) -> Self {
        value.as_str()
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BASE_PRIVILEGES: [Privilege; 5] = [
    Privilege::Select,
    Privilege::Reload,
    Privilege::LockTables,
    Privilege::ShowView,
    Privilege::Process,
];

/// The grant that lets the backup account read everything it dumps.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BackupGrant {
    account: AccountIdentifier,
    privileges: Vec<Privilege>,
}

impl BackupGrant {
    /// Plans the grant for `user` connecting from [`BACKUP_HOST`]. `TRIGGER`
    /// is added when triggers are part of the backup.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] when `user@localhost` is not a valid account
    /// for `version`.
    pub fn plan(
        user: &str,
        include_triggers: bool,
        version: Option<&MySqlVersion>,
    ) -> Result<Self, AccountError> {
        let account = AccountIdentifier::parse(&format!("{user}@{BACKUP_HOST}"), version)?;
        let mut privileges = BASE_PRIVILEGES.to_vec();
        if include_triggers {
            privileges.push(Privilege::Trigger);
        }
        Ok(Self {
            account,
            privileges,
        })
    }

    /// Account receiving the grant.
    #[must_use]
    pub const fn account(&self) -> &AccountIdentifier {
        &self.account
    }

    /// Granted privileges in declaration order.
    #[must_use]
    pub fn privileges(&self) -> &[Privilege] {
        &self.privileges
    }

    /// Resource key of the grant: `user@host/*.*`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{ALL_TABLES}", self.account)
    }
}
