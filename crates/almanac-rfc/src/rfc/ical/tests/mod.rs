//! Cross-module tests for the iCalendar property layer.

mod fixtures;
mod scenarios;
