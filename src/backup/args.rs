//! Argument string for the `innobackupex`/`xtrabackup` backup utility.
//!
//! Downstream script templates pattern-match on the exact flag spelling, so
//! segment order and quoting are fixed: credentials, compression, database
//! list, then caller-supplied extras.

use secrecy::{ExposeSecret, SecretString};

/// Inputs for the backup utility's argument string.
///
/// The password is held as a secret and never appears in `Debug` output.
#[derive(Debug, Default)]
pub struct BackupArgs {
    user: Option<String>,
    password: Option<SecretString>,
    compress: bool,
    databases: Vec<String>,
    extra_args: Vec<String>,
}

impl BackupArgs {
    /// Creates an empty argument set that renders to an empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backup user.
    #[must_use]
    pub fn user(mut self, value: Option<String>) -> Self {
        self.user = value;
        self
    }

    /// Sets the backup password.
    #[must_use]
    pub fn password(mut self, value: Option<SecretString>) -> Self {
        self.password = value;
        self
    }

    /// Enables or disables `--compress`.
    #[must_use]
    pub const fn compress(mut self, value: bool) -> Self {
        self.compress = value;
        self
    }

    /// Sets the databases to back up, in order.
    #[must_use]
    pub fn databases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.databases = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the extra arguments appended verbatim after the fixed segments.
    ///
    /// Arguments are not quoted or escaped here; callers must pre-escape any
    /// value that needs it.
    #[must_use]
    pub fn extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Renders the argument string.
    #[must_use]
    pub fn render(&self) -> String {
        build_args(
            self.user.as_deref(),
            self.password.as_ref().map(|secret| secret.expose_secret()),
            self.compress,
            &self.databases,
            &self.extra_args,
        )
    }
}

/// Concatenates the backup utility arguments.
///
/// Credentials are emitted only when both user and password are non-empty.
/// Empty database names and empty extra arguments are skipped. Segments are
/// separated by a single space and the result carries no leading space.
#[must_use]
pub fn build_args<D, E>(
    user: Option<&str>,
    password: Option<&str>,
    compress: bool,
    databases: &[D],
    extra_args: &[E],
) -> String
where
    D: AsRef<str>,
    E: AsRef<str>,
{
    let mut segments: Vec<String> = Vec::new();

    if let (Some(name), Some(secret)) = (non_empty(user), non_empty(password)) {
        segments.push(format!("--user=\"{name}\" --password=\"{secret}\""));
    }

    if compress {
        segments.push(String::from("--compress"));
    }

    let names: Vec<&str> = databases
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.is_empty())
        .collect();
    if !names.is_empty() {
        segments.push(format!("--databases=\"{}\"", names.join(" ")));
    }

    segments.extend(
        extra_args
            .iter()
            .map(AsRef::as_ref)
            .filter(|arg| !arg.is_empty())
            .map(str::to_owned),
    );

    segments.join(" ")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|inner| !inner.is_empty())
}
