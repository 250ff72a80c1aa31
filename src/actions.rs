// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! GitHub Actions workflow commands used to surface results to the runner.
//!
//! Diagnostics go through `tracing`; the runner additionally receives an
//! `::error::` command so failures show up as annotations on the job.

use std::{
    io::{self, Write},
    process,
};

use tracing::error;

use crate::error::Error;

/// Escapes a message for use as workflow command data.
///
/// # Examples
///
/// ```
/// use commit_status::actions::escape_data;
///
/// assert_eq!(escape_data("50%\nnext"), "50%25%0Anext");
/// ```
pub fn escape_data(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for ch in message.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            other => escaped.push(other)
        }
    }
    escaped
}

/// Formats an `::error::` workflow command for `message`.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Writes an `::error::` workflow command for `message` to `writer`.
///
/// # Errors
///
/// Propagates I/O errors raised by `writer`.
pub fn write_error<W: Write>(writer: &mut W, message: &str) -> io::Result<()> {
    writeln!(writer, "{}", error_command(message))
}

/// Reports `error` to the runner and terminates the process with status 1.
pub fn fatal(error: &Error) -> ! {
    let message = error.to_display_string();
    error!("{}", message);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_error(&mut handle, &message).ok();
    handle.flush().ok();

    process::exit(1);
}
