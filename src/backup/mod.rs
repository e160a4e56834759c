//! Backup command-line assembly.
//!
//! [`args`] renders the argument string for the backup utility and [`dump`]
//! the additional options for dump-based backups.

pub mod args;
pub mod dump;

pub use args::{BackupArgs, build_args};
pub use dump::{DumpOptions, rotate_index};
