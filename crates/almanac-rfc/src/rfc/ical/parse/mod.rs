//! iCalendar content line parsing (RFC 5545 §3.1).
//!
//! - Lexer: line unfolding and `NAME;PARAM=VALUE:value` tokenization
//! - Values: DATE, DATE-TIME, UTC-OFFSET, INTEGER, FLOAT and TEXT parsers

mod error;
mod lexer;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines, unfold_lines};
pub use values::{
    parse_date, parse_datetime, parse_float, parse_float_pair, parse_integer, parse_utc_offset,
    unescape_text,
};
