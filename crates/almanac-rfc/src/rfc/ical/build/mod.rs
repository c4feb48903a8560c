//! iCalendar serialization (RFC 5545).
//!
//! - Escape: text and parameter value escaping
//! - Fold: content line folding at 75 octets
//! - Content line: `NAME;PARAM=VALUE:value` rendering

mod content_line;
mod escape;
mod fold;

pub use content_line::{fold, render_content_line, render_parameter, render_params};
pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
