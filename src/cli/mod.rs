//! Command-line interface definitions for the `myrig` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI for the `myrig` binary.
#[derive(Debug, Parser)]
#[command(
    name = "myrig",
    about = "Validate MySQL accounts and assemble backup arguments",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Validate and normalise a `user@host` account.
    #[command(name = "user", about = "Validate and normalise a user@host account")]
    User(UserCommand),
    /// Validate a database declaration.
    #[command(name = "database", about = "Validate a database declaration")]
    Database(DatabaseCommand),
    /// Assemble backup command lines from configuration.
    #[command(name = "backup", about = "Assemble backup command lines")]
    Backup(BackupCommand),
}

/// Arguments for the `myrig user` subcommand.
#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    /// Account identifier, for example `'app'@localhost`.
    pub(crate) name: String,
    /// Server version used to pick the username length limit.
    ///
    /// No limit is enforced when the version is unknown.
    #[arg(long, value_name = "VERSION", env = "MYRIG_MYSQL_VERSION")]
    pub(crate) mysql_version: Option<String>,
    /// Password hash as produced by the server's password function.
    #[arg(long, value_name = "HASH")]
    pub(crate) password_hash: Option<String>,
    /// Authentication plugin for the account.
    #[arg(long, value_name = "PLUGIN")]
    pub(crate) plugin: Option<String>,
    /// TLS requirement (`NONE`, `SSL`, `X509`, or `CIPHER`/`ISSUER`/`SUBJECT`
    /// clauses); repeat for several clauses.
    #[arg(long = "tls-option", value_name = "OPTION")]
    pub(crate) tls_options: Vec<String>,
    /// Maximum concurrent connections; 0 means no limit.
    #[arg(long, value_name = "N")]
    pub(crate) max_user_connections: Option<u32>,
    /// Maximum connections per hour; 0 means no limit.
    #[arg(long, value_name = "N")]
    pub(crate) max_connections_per_hour: Option<u32>,
    /// Maximum queries per hour; 0 means no limit.
    #[arg(long, value_name = "N")]
    pub(crate) max_queries_per_hour: Option<u32>,
    /// Maximum updates per hour; 0 means no limit.
    #[arg(long, value_name = "N")]
    pub(crate) max_updates_per_hour: Option<u32>,
    /// Print the validated declaration as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for the `myrig database` subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseCommand {
    /// Database name.
    pub(crate) name: String,
    /// CHARACTER SET of the database (defaults to `utf8`).
    #[arg(long, value_name = "CHARSET")]
    pub(crate) charset: Option<String>,
    /// COLLATE setting of the database (defaults to `utf8_general_ci`).
    #[arg(long, value_name = "COLLATION")]
    pub(crate) collate: Option<String>,
    /// Print the validated declaration as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for the `myrig backup` subcommand.
#[derive(Debug, Args)]
pub(crate) struct BackupCommand {
    #[command(subcommand)]
    pub(crate) action: BackupAction,
}

/// Backup outputs that can be rendered.
#[derive(Debug, Subcommand)]
pub(crate) enum BackupAction {
    /// Print the argument string for the backup utility.
    #[command(name = "args", about = "Print the argument string for the backup utility")]
    Args(BackupArgsCommand),
    /// Print the grant planned for the backup account.
    #[command(name = "grant", about = "Print the grant planned for the backup account")]
    Grant(BackupGrantCommand),
    /// Print the additional mysqldump options and rotation index.
    #[command(
        name = "dump-options",
        about = "Print the additional mysqldump options and rotation index"
    )]
    DumpOptions(DumpOptionsCommand),
}

/// Arguments for `myrig backup args`. Flags override configured values.
#[derive(Debug, Args)]
pub(crate) struct BackupArgsCommand {
    /// Backup account name.
    #[arg(long, value_name = "USER")]
    pub(crate) user: Option<String>,
    /// Backup account password.
    #[arg(long, value_name = "PASSWORD")]
    pub(crate) password: Option<String>,
    /// Compress the backup.
    #[arg(long, conflicts_with = "no_compress")]
    pub(crate) compress: bool,
    /// Do not compress the backup.
    #[arg(long)]
    pub(crate) no_compress: bool,
    /// Database to back up; repeat for several databases.
    #[arg(long = "database", value_name = "NAME")]
    pub(crate) databases: Vec<String>,
    /// Extra arguments for the backup utility (after `--`); each one is
    /// shell-escaped before it is appended.
    #[arg(last = true, value_name = "EXTRA")]
    pub(crate) extra: Vec<String>,
}

/// Arguments for `myrig backup grant`.
#[derive(Debug, Args)]
pub(crate) struct BackupGrantCommand {
    /// Backup account name; overrides the configured user.
    #[arg(long, value_name = "USER")]
    pub(crate) user: Option<String>,
    /// Grant TRIGGER so triggers can be dumped.
    #[arg(long)]
    pub(crate) include_triggers: bool,
    /// Server version used to pick the username length limit.
    #[arg(long, value_name = "VERSION", env = "MYRIG_MYSQL_VERSION")]
    pub(crate) mysql_version: Option<String>,
    /// Print the grant as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for `myrig backup dump-options`.
#[derive(Debug, Args)]
pub(crate) struct DumpOptionsCommand {
    /// Dump events instead of skipping `mysql.event`.
    #[arg(long)]
    pub(crate) events: bool,
    /// Dump triggers with per-database backups.
    #[arg(long)]
    pub(crate) include_triggers: bool,
    /// Dump stored routines with per-database backups.
    #[arg(long)]
    pub(crate) include_routines: bool,
    /// Write one dump file per database.
    #[arg(long)]
    pub(crate) file_per_database: bool,
}
