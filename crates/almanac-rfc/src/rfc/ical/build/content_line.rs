//! Content line rendering (RFC 5545 §3.1).

use super::escape::escape_param_value;
use super::fold::fold_line;
use crate::rfc::ical::core::{ContentLine, Parameter, Parameters};

/// Renders one parameter as `NAME=value[,value...]`.
///
/// Values are escaped and quoted individually, then comma-joined.
#[must_use]
pub fn render_parameter(param: &Parameter) -> String {
    let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
    format!("{}={}", param.name, values.join(","))
}

/// Renders a parameter set as a sequence of `;NAME=value` segments.
///
/// Internal bookkeeping parameters are skipped.
#[must_use]
pub fn render_params(params: &Parameters) -> String {
    let mut result = String::new();
    for param in params.renderable() {
        result.push(';');
        result.push_str(&render_parameter(param));
    }
    result
}

/// Renders a content line as one unfolded logical line, without CRLF.
#[must_use]
pub fn render_content_line(line: &ContentLine) -> String {
    format!(
        "{}{}:{}",
        line.name,
        render_params(&line.params),
        line.raw_value
    )
}

/// Renders a property as folded, CRLF-terminated physical lines.
///
/// `value` must already be in wire form: text values escaped, dates formatted.
#[must_use]
pub fn fold(name: &str, params: &Parameters, value: &str) -> String {
    let logical = format!("{}{}:{value}", name.to_ascii_uppercase(), render_params(params));
    fold_line(&logical)
}
