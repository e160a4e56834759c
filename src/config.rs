//! Backup configuration loading via `ortho-config`.

use std::fmt;

use ortho_config::OrthoConfig;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::backup::{BackupArgs, DumpOptions};

/// Backup settings derived from defaults, configuration files, and
/// environment variables.
#[derive(Clone, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "MYRIG_BACKUP",
    discovery(
        app_name = "myrig",
        env_var = "MYRIG_CONFIG_PATH",
        config_file_name = "myrig.toml",
        dotfile_name = ".myrig.toml",
        project_file_name = "myrig.toml"
    )
)]
pub struct BackupConfig {
    /// Account used by the backup job.
    pub user: Option<String>,
    /// Password of the backup account.
    pub password: Option<String>,
    /// Whether backups are compressed. Unset means compressed; read it
    /// through [`BackupConfig::compress`].
    pub compress: Option<bool>,
    /// Databases to back up; empty means all of them.
    #[serde(default)]
    pub databases: Vec<String>,
    /// Extra arguments passed verbatim to the backup utility.
    #[serde(default)]
    pub optional_args: Vec<String>,
    /// Number of backups to keep.
    #[ortho_config(default = 30)]
    pub rotate: u32,
    /// Skip the `mysql.event` table instead of dumping events. Unset means
    /// skipped; read it through [`BackupConfig::ignore_events`].
    pub ignore_events: Option<bool>,
    /// Dump triggers alongside per-database backups.
    #[ortho_config(default = false)]
    pub include_triggers: bool,
    /// Dump stored routines alongside per-database backups.
    #[ortho_config(default = false)]
    pub include_routines: bool,
    /// Write one dump file per database.
    #[ortho_config(default = false)]
    pub file_per_database: bool,
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Raised when only one half of the backup credentials is configured.
    #[error("missing {field}: set MYRIG_BACKUP_{env_suffix} or add {field} to myrig.toml", env_suffix = .field.to_uppercase())]
    IncompleteCredentials {
        /// Credential field that is missing.
        field: String,
    },
    /// Raised when a list entry is empty or only whitespace.
    #[error("{field} entries must not be blank: fix MYRIG_BACKUP_{env_suffix} or {field} in myrig.toml", env_suffix = .field.to_uppercase())]
    BlankEntry {
        /// List field holding the blank entry.
        field: String,
    },
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}

impl fmt::Debug for BackupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackupConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("compress", &self.compress)
            .field("databases", &self.databases)
            .field("optional_args", &self.optional_args)
            .field("rotate", &self.rotate)
            .field("ignore_events", &self.ignore_events)
            .field("include_triggers", &self.include_triggers)
            .field("include_routines", &self.include_routines)
            .field("file_per_database", &self.file_per_database)
            .finish()
    }
}

impl BackupConfig {
    /// Whether backups are compressed; `true` unless configured otherwise.
    #[must_use]
    pub fn compress(&self) -> bool {
        self.compress.unwrap_or(true)
    }

    /// Whether `mysql.event` is skipped; `true` unless configured otherwise.
    #[must_use]
    pub fn ignore_events(&self) -> bool {
        self.ignore_events.unwrap_or(true)
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("myrig")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Checks that credentials come in pairs and list entries are not blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteCredentials`] when only the user or
    /// only the password is set, and [`ConfigError::BlankEntry`] for blank
    /// database names or extra arguments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (is_set(self.user.as_deref()), is_set(self.password.as_deref())) {
            (true, false) => return Err(Self::incomplete("password")),
            (false, true) => return Err(Self::incomplete("user")),
            _ => {}
        }
        Self::require_entries(&self.databases, "databases")?;
        Self::require_entries(&self.optional_args, "optional_args")?;
        Ok(())
    }

    /// Builds the backup utility arguments from the configured values.
    #[must_use]
    pub fn backup_args(&self) -> BackupArgs {
        BackupArgs::new()
            .user(self.user.clone())
            .password(self.password.clone().map(SecretString::from))
            .compress(self.compress())
            .databases(self.databases.iter().cloned())
            .extra_args(self.optional_args.iter().cloned())
    }

    /// Builds the additional `mysqldump` options from the configured toggles.
    #[must_use]
    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            ignore_events: self.ignore_events(),
            include_triggers: self.include_triggers,
            include_routines: self.include_routines,
            file_per_database: self.file_per_database,
            databases_selected: !self.databases.is_empty(),
        }
    }

    fn incomplete(field: &str) -> ConfigError {
        ConfigError::IncompleteCredentials {
            field: field.to_owned(),
        }
    }

    fn require_entries(values: &[String], field: &str) -> Result<(), ConfigError> {
        if values.iter().any(|value| value.trim().is_empty()) {
            return Err(ConfigError::BlankEntry {
                field: field.to_owned(),
            });
        }
        Ok(())
    }
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|inner| !inner.trim().is_empty())
}
