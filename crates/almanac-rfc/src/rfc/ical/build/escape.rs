//! iCalendar text escaping utilities.

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes: backslash, comma, semicolon, and newlines.
///
/// Line breaks are normalized to LF before escaping: a CRLF pair becomes a
/// single `\n`, so unescaping yields `\n` where the input held `\r\n`. A CR
/// outside a pair is kept as is. The inverse holds exactly for LF-only text.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' if chars.peek() == Some(&'\n') => {}
            _ => result.push(c),
        }
    }
    result
}

/// Escapes a parameter value for output.
///
/// Applies RFC 6868 caret encoding, then double-quotes the value when it
/// contains a structural separator or whitespace.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '^' => encoded.push_str("^^"),
            '\n' => encoded.push_str("^n"),
            '"' => encoded.push_str("^'"),
            '\r' => {}
            _ => encoded.push(c),
        }
    }

    if needs_quoting(s) {
        format!("\"{encoded}\"")
    } else {
        encoded
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.chars()
        .any(|c| matches!(c, ':' | ';' | ',') || c.is_whitespace())
}
