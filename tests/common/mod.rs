#![allow(dead_code)]

use assert_cmd::cargo_bin;
use chrono::{Datelike, Local};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

/// Writes an actions CSV with the standard header followed by `rows`.
pub fn actions_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action,movie,seats,price").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// A `ticketbook` command bound to the given data directory.
pub fn ticketbook(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("ticketbook"));
    cmd.arg("--data-dir").arg(data_dir).env_remove("TICKETBOOK_DB_PATH");
    cmd
}

/// The current local month as `YYYY-MM`.
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// The month before the current one as `YYYY-MM`.
pub fn previous_month() -> String {
    let today = Local::now().date_naive();
    if today.month() == 1 {
        format!("{:04}-12", today.year() - 1)
    } else {
        format!("{:04}-{:02}", today.year(), today.month() - 1)
    }
}
