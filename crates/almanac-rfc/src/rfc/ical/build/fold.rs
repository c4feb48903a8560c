//! Content line folding for iCalendar (RFC 5545 §3.1).

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a logical line into CRLF-terminated physical lines.
///
/// Every physical line, including its leading continuation space, stays
/// within 75 octets. Breaks never fall inside a UTF-8 sequence.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}\r\n");
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS + 1) * 3);
    let mut current_len = 0;

    for c in line.chars() {
        let char_len = c.len_utf8();
        if current_len + char_len > MAX_LINE_OCTETS {
            result.push_str("\r\n ");
            current_len = 1;
        }
        result.push(c);
        current_len += char_len;
    }
    result.push_str("\r\n");

    result
}
