/// Console formatting module - Pure rendering concerns
///
/// This module handles all console output of a report:
/// - Section headers with underlines
/// - Color terminal output
/// - Converting the body's line break tokens into real lines
/// - Word wrapping to the terminal width
///
/// It accepts a finished ReportBundle and renders it to any `std::io::Write`
/// destination.
use crate::report::split_lines;
use crate::types::{ReportBundle, ReportSection};
use std::io::{self, Write};
use term::Terminal;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width used when the terminal size cannot be detected
pub const DEFAULT_CONSOLE_WIDTH: usize = 100;

/// Writer for report output - configurable for color/plain text
pub struct ReportWriter<W: Write> {
    writer: W,
    use_colors: bool,
    width: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Create a new report writer wrapping at `width` columns
    pub fn new(writer: W, use_colors: bool, width: usize) -> Self {
        Self { writer, use_colors, width: width.max(20) }
    }

    /// Write formatted text, optionally with color
    ///
    /// Color codes go to the wrapped writer, never straight to stdout.
    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors {
            if let Some(styled) = styled_bytes(text, color) {
                return self.writer.write_all(&styled);
            }
        }
        write!(self.writer, "{}", text)
    }

    /// Write one section: header, underline, then wrapped text lines
    pub fn write_section(&mut self, section: &ReportSection, line_break: &str) -> io::Result<()> {
        if !section.header.is_empty() {
            self.write_colored(&section.header, term::color::BRIGHT_CYAN)?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "─".repeat(display_width(&section.header)))?;
        }

        for line in split_lines(&section.text, line_break) {
            for wrapped in wrap_text(line, self.width) {
                writeln!(self.writer, "{}", wrapped)?;
            }
        }
        writeln!(self.writer)
    }

    /// Write all four sections in display order
    pub fn write_report(&mut self, bundle: &ReportBundle, line_break: &str) -> io::Result<()> {
        for section in bundle.sections() {
            self.write_section(section, line_break)?;
        }
        self.writer.flush()
    }
}

/// Bold colored `text` using the current terminal's escape sequences
///
/// None when no terminfo entry is available for `$TERM`.
fn styled_bytes(text: &str, color: Color) -> Option<Vec<u8>> {
    let mut t = term::TerminfoTerminal::new(Vec::new())?;
    t.fg(color).ok()?;
    let _ = t.attr(term::Attr::Bold);
    t.write_all(text.as_bytes()).ok()?;
    let _ = t.reset();
    Some(t.into_inner())
}

/// Get terminal width or fall back to the default
pub fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() { w as usize } else { DEFAULT_CONSOLE_WIDTH }
}

/// Render a report to a plain string (no colors)
pub fn format_report(bundle: &ReportBundle, line_break: &str, width: usize) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = ReportWriter::new(&mut buffer, false, width).write_report(bundle, line_break);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Print a report to stdout
pub fn print_report(bundle: &ReportBundle, line_break: &str, width: Option<usize>, use_colors: bool) {
    let width = width.unwrap_or_else(get_terminal_width);
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), use_colors, width);
    if let Err(e) = writer.write_report(bundle, line_break) {
        eprintln!("Warning: Failed to write report: {}", e);
    }
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Greedy word wrap by display width.
///
/// Words wider than `width` are split across lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        let needed = if current.is_empty() { word_width } else { current_width + 1 + word_width };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for c in word.chars() {
                let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
                if current_width + c_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += c_width;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
