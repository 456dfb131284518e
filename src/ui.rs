/// Status and failure output for the bug-match binary
///
/// Reports go to stdout through `console_format`. Everything else the binary
/// says goes through here: export confirmations on stdout, and errors on
/// stderr with a colored prefix. A failed lookup is logged with its kind and
/// shown to the user as an internal error.
use crate::error::LookupFailure;
use lazy_static::lazy_static;
use log::error;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Prefix for status lines
const STATUS_PREFIX: &str = "bug-match: ";

/// Serialize console writes so lines from concurrent callers never interleave
fn with_console_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Status line as printed, without the trailing newline
pub fn status_line(s: &str) -> String {
    format!("{}{}", STATUS_PREFIX, s)
}

/// Print a status message to stdout
pub fn status(s: &str) {
    with_console_lock(|| println!("{}", status_line(s)));
}

/// Confirmation for a finished export, e.g. `JSON report saved to: out.json`
pub fn export_message(format: &str, path: &Path) -> String {
    format!("{} report saved to: {}", format, path.display())
}

/// Report the outcome of an export: confirmation on stdout, warning on stderr
pub fn export_outcome(format: &str, path: &Path, result: io::Result<()>) {
    match result {
        Ok(()) => status(&export_message(format, path)),
        Err(e) => with_console_lock(|| eprintln!("Warning: Failed to save {} report: {}", format, e)),
    }
}

/// What the user sees when a store lookup fails
pub fn failure_message(failure: &LookupFailure) -> String {
    format!("Internal error: {}", failure)
}

/// Log a failed lookup with its kind and print the generic message
pub fn report_failure(context: &str, failure: &LookupFailure) {
    error!("{} failed ({}): {}", context, failure.code(), failure);
    print_error(&failure_message(failure));
}

/// Print an error message to stderr with a colored "error" prefix
pub fn print_error(msg: &str) {
    with_console_lock(|| {
        if !write_colored_prefix("error", term::color::BRIGHT_RED) {
            eprint!("error");
        }
        eprintln!(": {}", msg);
    });
}

/// Colored write to the stderr terminal; false when there is none
fn write_colored_prefix(s: &str, fg: term::color::Color) -> bool {
    let Some(mut t) = term::stderr() else {
        return false;
    };
    if t.fg(fg).is_err() {
        return false;
    }
    let _ = t.attr(term::Attr::Bold);
    if write!(t, "{}", s).is_err() {
        return false;
    }
    let _ = t.reset();
    true
}
