//! Styled terminal text helpers.

use console::style;

pub fn header(text: &str) -> String {
    style(format!("=== {} ===", text)).green().bold().to_string()
}

pub fn sub_header(text: &str) -> String {
    style(text).cyan().bold().to_string()
}

/// Player or server names.
pub fn entity(text: &str) -> String {
    style(text).cyan().to_string()
}

pub fn warning(text: &str) -> String {
    style(text).yellow().to_string()
}

pub fn error(text: &str) -> String {
    style(text).red().to_string()
}

pub fn secondary(text: &str) -> String {
    style(text).dim().to_string()
}

pub fn success(text: &str) -> String {
    style(text).green().to_string()
}

pub fn label(text: &str) -> String {
    style(text).bold().to_string()
}

pub fn flavor(text: &str) -> String {
    style(text).yellow().italic().to_string()
}
