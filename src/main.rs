//! Binary entry point for the Myrig CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use serde_json::json;
use shell_escape::unix::escape;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use myrig::{
    AccountError, AccountIdentifier, BackupConfig, BackupGrant, ConfigError, DatabaseError,
    DatabaseSpec, MySqlVersion, PasswordHash, ResourceLimits, UserError, UserSpec, VersionError,
    rotate_index,
};

mod cli;

use cli::{
    BackupAction, BackupArgsCommand, BackupGrantCommand, Cli, DatabaseCommand,
    DumpOptionsCommand, UserCommand,
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("invalid server version: {0}")]
    Version(#[from] VersionError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("no backup user configured: pass --user or set MYRIG_BACKUP_USER")]
    MissingBackupUser,
    #[error("failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli, &mut io::stdout().lock()) {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn dispatch(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    match cli {
        Cli::User(command) => run_user(&command, out),
        Cli::Database(command) => run_database(&command, out),
        Cli::Backup(command) => match command.action {
            BackupAction::Args(args) => run_backup_args(&args, out),
            BackupAction::Grant(args) => run_backup_grant(&args, out),
            BackupAction::DumpOptions(args) => run_dump_options(&args, out),
        },
    }
}

fn parse_version(raw: Option<&str>) -> Result<Option<MySqlVersion>, CliError> {
    Ok(raw.map(MySqlVersion::parse).transpose()?)
}

fn run_user(command: &UserCommand, out: &mut impl Write) -> Result<(), CliError> {
    let version = parse_version(command.mysql_version.as_deref())?;
    let account = AccountIdentifier::parse(&command.name, version.as_ref())?;
    let tls_options = (!command.tls_options.is_empty()).then(|| command.tls_options.clone());
    let spec = UserSpec::builder(account)
        .password_hash(command.password_hash.as_deref().map(PasswordHash::new))
        .plugin(command.plugin.clone())
        .limits(ResourceLimits {
            max_user_connections: command.max_user_connections,
            max_connections_per_hour: command.max_connections_per_hour,
            max_queries_per_hour: command.max_queries_per_hour,
            max_updates_per_hour: command.max_updates_per_hour,
        })
        .tls_options(tls_options)
        .build()?;
    debug!(account = %spec.account, "validated user declaration");

    if command.json {
        let document = json!({
            "normalized": spec.account.normalized(),
            "account": spec.account,
            "password_hash": spec.password_hash.as_ref().map(ToString::to_string),
            "plugin": spec.plugin,
            "limits": spec.limits,
            "tls_options": spec.tls_options,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
    } else {
        writeln!(out, "{}", spec.account)?;
    }
    Ok(())
}

fn run_database(command: &DatabaseCommand, out: &mut impl Write) -> Result<(), CliError> {
    let mut builder = DatabaseSpec::builder(command.name.as_str());
    if let Some(charset) = &command.charset {
        builder = builder.charset(charset.as_str());
    }
    if let Some(collate) = &command.collate {
        builder = builder.collate(collate.as_str());
    }
    let spec = builder.build()?;

    if command.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&spec)?)?;
    } else {
        writeln!(
            out,
            "{} CHARACTER SET {} COLLATE {}",
            spec.name, spec.charset, spec.collate
        )?;
    }
    Ok(())
}

fn load_backup_config() -> Result<BackupConfig, CliError> {
    let config = BackupConfig::load_without_cli_args()?;
    debug!(databases = ?config.databases, compress = config.compress(), "loaded backup configuration");
    Ok(config)
}

fn run_backup_args(command: &BackupArgsCommand, out: &mut impl Write) -> Result<(), CliError> {
    let mut config = load_backup_config()?;
    apply_backup_overrides(&mut config, command);
    config.validate()?;

    let mut extra_args = config.optional_args.clone();
    extra_args.extend(command.extra.iter().map(|arg| escape_arg(arg)));
    let rendered = config.backup_args().extra_args(extra_args).render();

    writeln!(out, "{rendered}")?;
    Ok(())
}

fn apply_backup_overrides(config: &mut BackupConfig, command: &BackupArgsCommand) {
    if let Some(user) = &command.user {
        config.user = Some(user.clone());
    }
    if let Some(password) = &command.password {
        config.password = Some(password.clone());
    }
    if command.compress {
        config.compress = Some(true);
    }
    if command.no_compress {
        config.compress = Some(false);
    }
    if !command.databases.is_empty() {
        config.databases.clone_from(&command.databases);
    }
}

fn escape_arg(arg: &str) -> String {
    escape(arg.into()).into_owned()
}

fn run_backup_grant(command: &BackupGrantCommand, out: &mut impl Write) -> Result<(), CliError> {
    let config = load_backup_config()?;
    let user = command
        .user
        .clone()
        .or(config.user)
        .ok_or(CliError::MissingBackupUser)?;
    let version = parse_version(command.mysql_version.as_deref())?;
    let include_triggers = command.include_triggers || config.include_triggers;
    let grant = BackupGrant::plan(&user, include_triggers, version.as_ref())?;

    if command.json {
        let document = json!({
            "key": grant.key(),
            "account": grant.account().normalized(),
            "privileges": grant.privileges(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
    } else {
        let privileges: Vec<&str> = grant.privileges().iter().map(|p| p.as_str()).collect();
        writeln!(out, "{} {}", grant.key(), privileges.join(","))?;
    }
    Ok(())
}

fn run_dump_options(command: &DumpOptionsCommand, out: &mut impl Write) -> Result<(), CliError> {
    let config = load_backup_config()?;
    let mut options = config.dump_options();
    options.ignore_events = options.ignore_events && !command.events;
    options.include_triggers |= command.include_triggers;
    options.include_routines |= command.include_routines;
    options.file_per_database |= command.file_per_database;

    writeln!(out, "ADDITIONAL_OPTIONS=\"{}\"", options.render())?;
    writeln!(out, "ROTATE={}", rotate_index(config.rotate))?;
    Ok(())
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        let mut buffer = Vec::new();
        dispatch(cli, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("utf8"))
    }

    #[test]
    fn user_prints_normalised_identifier() {
        let output = run(&["myrig", "user", "'a.b'@LocalHost"]).expect("valid user");
        assert_eq!(output, "'a.b'@localhost\n");
    }

    #[test]
    fn user_enforces_version_limit() {
        let err = run(&[
            "myrig",
            "user",
            "seventeen_chars_x@localhost",
            "--mysql-version",
            "5.7.0",
        ])
        .expect_err("name should be too long");
        assert!(matches!(
            err,
            CliError::Account(AccountError::NameTooLong { max: 16, .. })
        ));
    }

    #[test]
    fn user_json_redacts_password_hash() {
        let output = run(&[
            "myrig",
            "user",
            "app@LOCALHOST",
            "--password-hash",
            "*ABCDEF",
            "--tls-option",
            "SSL",
            "--json",
        ])
        .expect("valid user");
        let document: serde_json::Value = serde_json::from_str(&output).expect("json output");
        assert_eq!(document["normalized"], "app@localhost");
        assert_eq!(document["password_hash"], "[password hash redacted]");
        assert_eq!(document["tls_options"], json!(["SSL"]));
        assert!(!output.contains("ABCDEF"));
    }

    #[test]
    fn user_rejects_bad_version() {
        let err = run(&["myrig", "user", "app@localhost", "--mysql-version", " "])
            .expect_err("blank version");
        assert!(matches!(err, CliError::Version(VersionError::Empty)));
    }

    #[test]
    fn database_prints_defaults() {
        let output = run(&["myrig", "database", "app"]).expect("valid database");
        assert_eq!(output, "app CHARACTER SET utf8 COLLATE utf8_general_ci\n");
    }

    #[test]
    fn compress_flags_conflict() {
        let result = Cli::try_parse_from([
            "myrig",
            "backup",
            "args",
            "--compress",
            "--no-compress",
        ]);
        assert!(result.is_err());
    }

    fn unset_config() -> BackupConfig {
        BackupConfig {
            user: None,
            password: None,
            compress: None,
            databases: Vec::new(),
            optional_args: Vec::new(),
            rotate: 30,
            ignore_events: None,
            include_triggers: false,
            include_routines: false,
            file_per_database: false,
        }
    }

    fn args_command(flags: &[&str]) -> BackupArgsCommand {
        let mut argv = vec!["myrig", "backup", "args"];
        argv.extend_from_slice(flags);
        match Cli::try_parse_from(argv).expect("arguments should parse") {
            Cli::Backup(cli::BackupCommand {
                action: BackupAction::Args(command),
            }) => command,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn compression_stays_on_without_flags() {
        let mut config = unset_config();
        apply_backup_overrides(&mut config, &args_command(&[]));
        assert!(config.compress());
        assert_eq!(config.backup_args().render(), "--compress");
    }

    #[test]
    fn no_compress_flag_disables_compression() {
        let mut config = unset_config();
        apply_backup_overrides(&mut config, &args_command(&["--no-compress"]));
        assert_eq!(config.compress, Some(false));
        assert_eq!(config.backup_args().render(), "");
    }

    #[test]
    fn escape_arg_quotes_unsafe_values() {
        assert_eq!(escape_arg("--no-lock"), "--no-lock");
        assert_eq!(escape_arg("--extra-lsndir=/var/tmp/a b"), "'--extra-lsndir=/var/tmp/a b'");
    }

    #[test]
    fn write_error_writes_cli_error() {
        let mut buf = Vec::new();
        write_error(&mut buf, &CliError::MissingBackupUser);
        let rendered = String::from_utf8(buf).expect("utf8");
        assert!(rendered.contains("MYRIG_BACKUP_USER"), "rendered: {rendered}");
    }
}
