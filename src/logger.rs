//! Terminal logging with colored prefixes and a per-stage progress line.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `StageProgress` for a single in-place progress line while a pipeline
//!   stage walks the document set
//!
//! # Example
//!
//! ```ignore
//! log!("render"; "rendering {} documents", count);
//!
//! let progress = StageProgress::start("render", docs.len());
//! for doc in docs {
//!     // ...
//!     progress.inc();
//! }
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    cell::Cell,
    io::{IsTerminal, Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

// ============================================================================
// Layout Constants
// ============================================================================
//
// Progress line format: "[render] [████░░░░] 42/100"
//                        ^------^ ^-------^ ^----^
//                        prefix   bar       count

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;
/// Bar wrapper: " []" (space + brackets around progress bar)
const BAR_WRAPPER_LEN: usize = 3;
/// Space before count: "...] 42/100" <- this space
const SPACE_BEFORE_COUNT: usize = 1;
/// Minimum progress bar width in characters
const MIN_BAR_WIDTH: usize = 10;
/// Maximum progress bar width in characters
const MAX_BAR_WIDTH: usize = 40;

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for `[`, `]`, and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Stage Progress
// ============================================================================

/// A single progress line for one pipeline stage.
///
/// The pipeline is sequential, so at most one line is live at a time and it
/// is redrawn in place with a carriage return. Nothing is drawn when stdout
/// is not a terminal.
pub struct StageProgress {
    /// Colored prefix string (e.g., "[render]" in yellow)
    prefix: ColoredString,
    /// Pre-calculated display length of prefix
    prefix_len: usize,
    /// Total number of documents in this stage
    total: usize,
    current: Cell<usize>,
    finished: Cell<bool>,
}

impl StageProgress {
    /// Start a progress line for `stage`.
    ///
    /// Returns `None` when there is nothing worth tracking (one item or
    /// fewer) or when stdout is not a terminal.
    pub fn start(stage: &str, total: usize) -> Option<Self> {
        if total <= 1 || !stdout().is_terminal() {
            return None;
        }

        Some(Self {
            prefix: colorize_prefix(stage, &stage.to_ascii_lowercase()),
            prefix_len: calc_prefix_len(stage.len()),
            total,
            current: Cell::new(0),
            finished: Cell::new(false),
        })
    }

    /// Advance the line by one item and redraw it.
    pub fn inc(&self) {
        let current = self.current.get() + 1;
        self.current.set(current);
        self.display(current);
    }

    fn display(&self, current: usize) {
        let width = get_terminal_width() as usize;

        let progress_text = format!("{}/{}", current, self.total);
        let overhead =
            self.prefix_len + BAR_WRAPPER_LEN + SPACE_BEFORE_COUNT + progress_text.len();
        let bar_width = width
            .saturating_sub(overhead)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

        let filled = bar_fill(current, self.total, bar_width);
        let progress_bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

        let mut stdout = stdout().lock();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "\r{} [{}] {}", self.prefix, progress_bar, progress_text).ok();
        stdout.flush().ok();
    }

    /// Erase the progress line.
    pub fn finish(&self) {
        if self.finished.replace(true) {
            return;
        }
        let mut stdout = stdout().lock();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "\r").ok();
        stdout.flush().ok();
    }
}

impl Drop for StageProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Number of filled cells for `current` out of `total` in a bar `width` wide.
#[inline]
fn bar_fill(current: usize, total: usize, width: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (current.min(total) * width) / total
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to fit the terminal width.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    if stdout.is_terminal() {
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "\r").ok();
    }

    let message = if message.contains('\n') {
        message
    } else {
        let width = get_terminal_width() as usize;
        let max_msg_len = width.saturating_sub(calc_prefix_len(module.len()));
        truncate_str(message, max_msg_len)
    };

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "history" => prefix.bright_blue().bold(),
        "persist" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_prefix_len() {
        // "render" -> "[render] " = 6 + 2 + 1 = 9
        assert_eq!(calc_prefix_len(6), 9);
        assert_eq!(calc_prefix_len(0), 3);
    }

    #[test]
    fn test_truncate_str_fits() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_cuts() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_truncate_str_unicode_boundary() {
        // "é" is 2 bytes; cutting at 3 must not split the second one
        let s = "éé";
        assert_eq!(truncate_str(s, 3), "é");
        assert_eq!(truncate_str(s, 4), "éé");
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar_fill(0, 10, 20), 0);
        assert_eq!(bar_fill(5, 10, 20), 10);
        assert_eq!(bar_fill(10, 10, 20), 20);
        // overshoot is clamped
        assert_eq!(bar_fill(12, 10, 20), 20);
        assert_eq!(bar_fill(3, 0, 20), 0);
    }

    #[test]
    fn test_stage_progress_skips_single_item() {
        assert!(StageProgress::start("render", 0).is_none());
        assert!(StageProgress::start("render", 1).is_none());
    }

    #[test]
    fn test_bar_width_constraints() {
        assert!(MIN_BAR_WIDTH < MAX_BAR_WIDTH);
    }
}
