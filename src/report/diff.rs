use console::Style;
use dissimilar::{Chunk, diff};
use std::fmt::Write;

/// Renders a colored character diff between an assertion's expected and
/// actual values.
pub fn render_diff(expected: &str, actual: &str) -> String {
    let chunks = diff(expected, actual);

    let mut output = String::new();
    let _ = writeln!(output, "Diff (Expected - / Actual +):");

    for chunk in chunks {
        match chunk {
            Chunk::Equal(text) => {
                let style = Style::new().dim();
                let _ = write!(output, "{}", style.apply_to(text));
            }
            Chunk::Delete(text) => {
                let style = Style::new().red();
                let _ = write!(output, "{}", style.apply_to(text));
            }
            Chunk::Insert(text) => {
                let style = Style::new().green();
                let _ = write!(output, "{}", style.apply_to(text));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_diff_shows_both_values() {
        let output = render_diff("Welcome back", "Welcome home");

        assert!(output.contains("Diff (Expected - / Actual +):"));
        assert!(output.contains("back"));
        assert!(output.contains("home"));
    }
}
