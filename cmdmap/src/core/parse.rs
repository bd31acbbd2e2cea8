//! Raw command line parsing.
//!
//! Parsing is deliberately minimal: each command interprets its own
//! arguments, so this module only splits off the label.

/// A command line split into its label and raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub label: String,
    pub args: Vec<String>,
}

/// Split a raw line into label and arguments.
///
/// Returns `None` for blank input. A single leading non-alphabetic character
/// (a trigger symbol such as `/` or `!`) is dropped. Arguments are split on
/// single spaces, so consecutive spaces produce empty arguments.
pub fn parse_line(raw: &str) -> Option<ParsedLine> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let body = if first.is_alphabetic() {
        trimmed
    } else {
        chars.as_str()
    };

    let mut parts = body.split(' ');
    // `split` always yields at least one item, even for an empty body.
    let label = parts.next().unwrap_or_default().to_string();
    let args = parts.map(str::to_string).collect();
    Some(ParsedLine { label, args })
}
