// Console formatting helpers

pub mod screenshots;

pub use screenshots::Screenshots;

use console::Style;

/// Status glyphs used in one-line test output.
pub mod symbols {
    pub const OK: &str = "✔";
    pub const FAIL: &str = "✖";
}

/// Formats a millisecond duration for console output.
pub fn format_elapsed_time(elapsed_ms: u64, include_ms: bool) -> String {
    let seconds = elapsed_ms / 1000;

    if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else if seconds < 60 {
        if include_ms && elapsed_ms % 1000 != 0 {
            format!("{}.{:03}s", seconds, elapsed_ms % 1000)
        } else {
            format!("{}s", seconds)
        }
    } else {
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}

/// Prints a stack trace indented and muted, one line at a time.
pub fn show_stack_trace(message: &str) {
    let style = Style::new().dim();
    for line in message.lines() {
        println!("   {}", style.apply_to(line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_time_sub_second() {
        assert_eq!(format_elapsed_time(0, true), "0ms");
        assert_eq!(format_elapsed_time(999, true), "999ms");
    }

    #[test]
    fn test_format_elapsed_time_seconds() {
        assert_eq!(format_elapsed_time(1234, true), "1.234s");
        assert_eq!(format_elapsed_time(1234, false), "1s");
        assert_eq!(format_elapsed_time(2000, true), "2s");
    }

    #[test]
    fn test_format_elapsed_time_minutes() {
        assert_eq!(format_elapsed_time(61_000, true), "1m 1s");
        assert_eq!(format_elapsed_time(125_500, true), "2m 5s");
    }
}
