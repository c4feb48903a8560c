//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Splits raw text into logical lines and tokenizes each content line.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter, Parameters};

/// Splits input into logical lines, merging folded continuations.
///
/// Handles both CRLF and bare LF line endings. Lines starting with SP/HTAB are
/// continuations of the previous line; unfolding removes the line break and
/// exactly one whitespace character. Blank lines are skipped.
///
/// Each logical line is paired with the physical line number it started on.
///
/// ## Errors
/// Returns `EmptyContinuation` for a continuation holding only its whitespace
/// octet, and `OrphanContinuation` for a continuation with nothing before it.
pub fn split_lines(input: &str) -> ParseResult<Vec<(usize, String)>> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line_num = i + 1;
        let line = raw_line.trim_end_matches('\r');

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if continuation.is_empty() {
                let folded_into = lines.last().map_or(line, |(_, prev)| prev.as_str());
                return Err(
                    ParseError::new(ParseErrorKind::EmptyContinuation, line_num, 1)
                        .with_context(folded_into),
                );
            }
            let Some((_, prev)) = lines.last_mut() else {
                return Err(
                    ParseError::new(ParseErrorKind::OrphanContinuation, line_num, 1)
                        .with_context(continuation),
                );
            };
            prev.push_str(continuation);
        } else if !line.is_empty() {
            lines.push((line_num, line.to_string()));
        }
    }

    Ok(lines)
}

/// Unfolds raw iCalendar text into content lines.
///
/// Parameter names pass through verbatim; deciding whether they are known is
/// left to the property accessors.
///
/// ## Errors
/// Returns the first structural error found.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn unfold_lines(input: &str) -> ParseResult<Vec<ContentLine>> {
    let lines = split_lines(input)?;
    tracing::trace!(count = lines.len(), "Split logical lines");

    lines
        .iter()
        .map(|(line_num, line)| parse_content_line(line, *line_num))
        .collect()
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut chars = line.char_indices().peekable();
    let mut name_end = None;
    let mut colon_pos = None;

    // Find the property name (ends at ';' or ':')
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            name_end = Some(i);
            if c == ':' {
                colon_pos = Some(i);
            }
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(
                ParseError::new(ParseErrorKind::InvalidPropertyName, line_num, i + 1)
                    .with_context(line),
            );
        }
        chars.next();
    }

    let name_end = match name_end {
        Some(0) => {
            return Err(
                ParseError::new(ParseErrorKind::MissingPropertyName, line_num, 1)
                    .with_context(line),
            );
        }
        Some(end) => end,
        None => {
            return Err(
                ParseError::new(ParseErrorKind::MissingColon, line_num, line.len())
                    .with_context(line),
            );
        }
    };

    let name = line[..name_end].to_ascii_uppercase();

    // Parse parameters if we stopped at ';'
    let mut params = Parameters::new();
    if colon_pos.is_none() {
        chars.next(); // consume the ';'
        loop {
            let (param, colon) = parse_parameter(&mut chars, line, line_num)?;
            params.merge(param);
            if colon.is_some() {
                colon_pos = colon;
                break;
            }
        }
    }

    let colon_pos = colon_pos.ok_or_else(|| {
        ParseError::new(ParseErrorKind::MissingColon, line_num, line.len()).with_context(line)
    })?;

    Ok(ContentLine {
        name,
        params,
        raw_value: line[colon_pos + 1..].to_string(),
    })
}

/// Parses a single parameter from the character stream.
///
/// Returns the parameter and, when it was the last one, the position of the
/// `:` that ends the parameter list.
fn parse_parameter(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<(Parameter, Option<usize>)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parse parameter name (up to '=')
    let mut name_end = start;
    while let Some(&(i, c)) = chars.peek() {
        if c == '=' {
            name_end = i;
            chars.next(); // consume '='
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(
                ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                    .with_context(line),
            );
        }
        chars.next();
    }

    if name_end == start {
        return Err(
            ParseError::new(ParseErrorKind::InvalidParameter, line_num, start + 1)
                .with_context(line),
        );
    }

    let param_name = line[start..name_end].to_ascii_uppercase();

    // Parse parameter values (comma-separated, may be quoted)
    let mut values = Vec::new();
    loop {
        let value = parse_param_value(chars, line, line_num)?;
        values.push(value);

        match chars.next() {
            Some((_, ',')) => {}
            Some((_, ';')) => return Ok((Parameter::with_values(param_name, values), None)),
            Some((i, ':')) => return Ok((Parameter::with_values(param_name, values), Some(i))),
            Some((i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}' in {line}")),
                );
            }
            None => {
                return Err(
                    ParseError::new(ParseErrorKind::MissingColon, line_num, line.len())
                        .with_context(line),
                );
            }
        }
    }
}

/// Parses a parameter value (possibly quoted).
fn parse_param_value(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<String> {
    let Some(&(start, first)) = chars.peek() else {
        return Err(
            ParseError::new(ParseErrorKind::InvalidParameter, line_num, line.len())
                .with_context(line),
        );
    };

    if first == '"' {
        chars.next(); // consume opening quote
        let mut raw = String::new();

        for (_, c) in chars.by_ref() {
            if c == '"' {
                return Ok(decode_caret(&raw));
            }
            raw.push(c);
        }

        Err(
            ParseError::new(ParseErrorKind::UnclosedQuote, line_num, start + 1)
                .with_context(line),
        )
    } else {
        // Unquoted value (ends at ',' ';' or ':')
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c == ',' || c == ';' || c == ':' {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        Ok(decode_caret(&line[start..end]))
    }
}

/// Decodes RFC 6868 caret escapes (`^^`, `^n`, `^'`).
///
/// Unknown sequences are preserved as-is.
fn decode_caret(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '^' {
            value.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                value.push('^');
                chars.next();
            }
            Some('n' | 'N') => {
                value.push('\n');
                chars.next();
            }
            Some('\'') => {
                value.push('"');
                chars.next();
            }
            _ => value.push('^'),
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_merges_continuations() {
        let lines = split_lines("SUMMARY:a\r\n b\nDTSTART:20220403\r\n\r\n").unwrap();
        assert_eq!(
            lines,
            vec![(1, "SUMMARY:ab".to_string()), (3, "DTSTART:20220403".to_string())]
        );
    }

    #[test]
    fn split_lines_rejects_empty_continuation() {
        let err = split_lines("SUMMARY:a\r\n \r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyContinuation);
        assert_eq!(err.line, 2);
        assert_eq!(err.context.as_deref(), Some("SUMMARY:a"));
    }

    #[test]
    fn split_lines_keeps_multibyte_text() {
        let lines = split_lines("SUMMARY:Möte i Göteborg\r\n på fredag").unwrap();
        assert_eq!(lines, vec![(1, "SUMMARY:Möte i Göteborgpå fredag".to_string())]);
    }

    #[test]
    fn split_lines_rejects_orphan_continuation() {
        let err = split_lines(" SUMMARY:a\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OrphanContinuation);
    }

    #[test]
    fn parse_simple_line() {
        let line = "SUMMARY:Team Meeting";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.name, "SUMMARY");
        assert!(result.params.is_empty());
        assert_eq!(result.raw_value, "Team Meeting");
    }

    #[test]
    fn parse_line_with_params() {
        let line = "DTSTART;TZID=America/New_York:20260123T120000";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.name, "DTSTART");
        assert_eq!(result.params.len(), 1);
        assert_eq!(result.get_param_value("TZID"), Some("America/New_York"));
        assert_eq!(result.raw_value, "20260123T120000");
    }

    #[test]
    fn parse_line_with_quoted_param() {
        let line = "ATTENDEE;CN=\"Doe, Jane\":mailto:jane@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.get_param_value("CN"), Some("Doe, Jane"));
        assert_eq!(result.raw_value, "mailto:jane@example.com");
    }

    #[test]
    fn parse_line_with_multiple_param_values() {
        let line = "ATTENDEE;ROLE=REQ-PARTICIPANT,OPT-PARTICIPANT:mailto:test@example.com";
        let result = parse_content_line(line, 1).unwrap();
        let role = result.get_param("ROLE").unwrap();
        assert_eq!(role.values, ["REQ-PARTICIPANT", "OPT-PARTICIPANT"]);
    }

    #[test]
    fn parse_line_with_caret_encoding() {
        let line = "ATTENDEE;CN=\"Test^nName ^'Q^'\":mailto:test@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.get_param_value("CN"), Some("Test\nName \"Q\""));
    }

    #[test]
    fn parse_line_with_params_and_empty_value() {
        let result = parse_content_line("ATTACH;FMTTYPE=text/plain:", 1).unwrap();
        assert_eq!(result.raw_value, "");
        assert_eq!(result.get_param_value("FMTTYPE"), Some("text/plain"));
    }

    #[test]
    fn parse_line_keeps_unknown_params() {
        let result = parse_content_line("SUMMARY;X-FOO=bar:Hello", 1).unwrap();
        assert_eq!(result.get_param_value("x-foo"), Some("bar"));
    }

    #[test]
    fn parse_line_unclosed_quote() {
        let line = "ATTENDEE;CN=\"Unclosed:mailto:test@example.com";
        let err = parse_content_line(line, 3).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedQuote);
        assert_eq!(err.line, 3);
        assert_eq!(err.context.as_deref(), Some(line));
    }

    #[test]
    fn parse_line_invalid_parameter_name() {
        let err = parse_content_line("SUMMARY;X F=1:v", 3).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidParameter);
        assert_eq!(err.col, 10);
        assert_eq!(err.context.as_deref(), Some("SUMMARY;X F=1:v"));
    }

    #[test]
    fn parse_line_merges_repeated_params() {
        let result = parse_content_line("X-FOO;X-A=1;TZID=UTC;X-A=2,3:v", 1).unwrap();
        assert_eq!(result.params.len(), 2);
        assert_eq!(result.get_param("X-A").unwrap().values, ["1", "2", "3"]);
        assert_eq!(result.raw_value, "v");
    }

    #[test]
    fn parse_line_missing_colon() {
        let err = parse_content_line("INVALID", 4).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingColon);
        assert_eq!(err.line, 4);
        assert_eq!(err.context.as_deref(), Some("INVALID"));
    }

    #[test]
    fn parse_line_missing_name() {
        let err = parse_content_line(":value", 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingPropertyName);
    }

    #[test]
    fn unfold_lines_reports_first_malformed_line() {
        let err = unfold_lines("SUMMARY:ok\r\nbroken line\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidPropertyName);
        assert_eq!(err.line, 2);
    }
}
