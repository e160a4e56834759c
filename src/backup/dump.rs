//! Additional `mysqldump` options used by the dump-based backup provider.

use serde::Serialize;

/// Event table skipped unless events are backed up explicitly.
pub const EVENT_TABLE: &str = "mysql.event";

/// Toggles that decide which additional `mysqldump` options are emitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each field mirrors an independent user-facing backup toggle"
)]
pub struct DumpOptions {
    /// Skip `mysql.event` instead of dumping events.
    pub ignore_events: bool,
    /// Dump triggers when databases are dumped individually.
    pub include_triggers: bool,
    /// Dump stored routines when databases are dumped individually.
    pub include_routines: bool,
    /// Write one dump file per database.
    pub file_per_database: bool,
    /// An explicit database list was configured.
    pub databases_selected: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            ignore_events: true,
            include_triggers: false,
            include_routines: false,
            file_per_database: false,
            databases_selected: false,
        }
    }
}

impl DumpOptions {
    /// Returns the options in emission order.
    ///
    /// Trigger and routine flags only appear when databases are dumped
    /// individually, either from an explicit list or one file per database.
    #[must_use]
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(3);
        if self.ignore_events {
            flags.push(format!("--ignore-table={EVENT_TABLE}"));
        } else {
            flags.push(String::from("--events"));
        }

        if self.databases_selected || self.file_per_database {
            flags.push(String::from(if self.include_triggers {
                "--triggers"
            } else {
                "--skip-triggers"
            }));
            flags.push(String::from(if self.include_routines {
                "--routines"
            } else {
                "--skip-routines"
            }));
        }
        flags
    }

    /// Renders the options as a single space-separated string.
    #[must_use]
    pub fn render(&self) -> String {
        self.flags().join(" ")
    }
}

/// Zero-based index of the oldest backup kept for a retention of
/// `retention` backups.
#[must_use]
pub const fn rotate_index(retention: u32) -> u32 {
    retention.saturating_sub(1)
}
