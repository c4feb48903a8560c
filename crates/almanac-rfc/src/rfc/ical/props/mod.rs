//! Property accessors for one calendar component.
//!
//! Each setter takes ownership of its input, normalizes and validates it, and
//! stores the result. Getters hand out clones, so stored values are never
//! aliased by callers. Rendering goes through the content-line codec.

mod multi;
mod scalar;
mod temporal;
mod text;

use almanac_core::config::OutputConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::{escape_text, fold, fold_line, render_content_line};
use crate::rfc::ical::core::{ContentLine, Parameters, PropertyValue, Value, names, param_names};
use crate::rfc::ical::datetime::format;
use crate::rfc::ical::parse::{unescape_text, unfold_lines};

/// Render order for [`ComponentProperties::to_ical`].
const PROPERTY_ORDER: &[&str] = &[
    names::DTSTAMP,
    names::DTSTART,
    names::DTEND,
    names::DUE,
    names::RECURRENCE_ID,
    names::SUMMARY,
    names::GEO,
    names::TRANSP,
    names::ATTACH,
    names::LAST_MODIFIED,
    names::SEQUENCE,
    names::COLOR,
    names::CONFERENCE,
    names::IMAGE,
    names::STRUCTURED_DATA,
    names::TZOFFSETTO,
];

/// Properties that get the configured default `LANGUAGE` when rendered.
const LANGUAGE_AWARE: &[&str] = &[names::SUMMARY, names::CONFERENCE];

/// The supported properties of one component, plus pass-through lines.
#[derive(Debug, Clone, Default)]
pub struct ComponentProperties {
    config: OutputConfig,

    dtstart: Option<PropertyValue>,
    dtend: Option<PropertyValue>,
    due: Option<PropertyValue>,
    recurrence_id: Option<PropertyValue>,
    dtstamp: Option<PropertyValue>,
    last_modified: Option<PropertyValue>,

    sequence: Option<PropertyValue>,
    geo: Option<PropertyValue>,
    transp: Option<PropertyValue>,
    tzoffsetto: Option<PropertyValue>,
    summary: Option<PropertyValue>,
    color: Option<PropertyValue>,

    attach: Vec<PropertyValue>,
    image: Vec<PropertyValue>,
    conference: Vec<PropertyValue>,
    structured_data: Vec<PropertyValue>,

    /// Lines for properties without an accessor, kept verbatim.
    extra: Vec<ContentLine>,
}

impl ComponentProperties {
    #[must_use]
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// ## Summary
    /// Parses the property lines of one component.
    ///
    /// ## Errors
    /// Returns `MalformedLine` for structural problems, or the first error
    /// raised by a property accessor.
    pub fn parse(input: &str, config: OutputConfig) -> RfcResult<Self> {
        let lines = unfold_lines(input)?;
        Self::from_content_lines(lines, config)
    }

    /// ## Summary
    /// Builds the container from unfolded content lines.
    ///
    /// Lines with an accessor go through it; all others are kept verbatim
    /// and rendered after the known properties.
    ///
    /// ## Errors
    /// Returns the first error raised by a property accessor.
    #[tracing::instrument(skip_all, fields(line_count = lines.len()))]
    pub fn from_content_lines(lines: Vec<ContentLine>, config: OutputConfig) -> RfcResult<Self> {
        let mut props = Self::new(config);
        for line in lines {
            props.apply_line(line)?;
        }
        Ok(props)
    }

    fn apply_line(&mut self, line: ContentLine) -> RfcResult<()> {
        let name = line.name.as_str();
        let escaped_text = name == names::SUMMARY
            || (name == names::STRUCTURED_DATA
                && !line.params.is_value_kind(param_names::BINARY)
                && !line.params.is_value_kind(param_names::URI));

        let value = if line.raw_value.is_empty() {
            Value::Empty
        } else if escaped_text {
            Value::Text(unescape_text(&line.raw_value))
        } else {
            Value::Text(line.raw_value.clone())
        };
        let pv = PropertyValue::with_params(value, line.params.clone());

        match name {
            names::DTSTART => self.set_dtstart(pv),
            names::DTEND => self.set_dtend(pv),
            names::DUE => self.set_due(pv),
            names::RECURRENCE_ID => self.set_recurrence_id(pv),
            names::DTSTAMP => self.set_dtstamp(pv),
            names::LAST_MODIFIED => self.set_last_modified(pv),
            names::SEQUENCE => self.set_sequence(pv),
            names::GEO => self.set_geo(pv),
            names::TRANSP => self.set_transp(pv),
            names::TZOFFSETTO => self.set_tzoffsetto(pv),
            names::SUMMARY => self.set_summary(pv),
            names::COLOR => self.set_color(pv),
            names::ATTACH => self.set_attach(pv, None),
            names::IMAGE => self.set_image(pv, None),
            names::CONFERENCE => self.set_conference(pv, None),
            names::STRUCTURED_DATA => self.set_structured_data(pv, None),
            _ => {
                tracing::trace!(name = %line.name, "Keeping property without accessor");
                self.extra.push(line);
                Ok(())
            }
        }
    }

    /// Returns a copy of a single-valued property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.slot(name)?.clone()
    }

    /// Returns a copy of one occurrence of a multi-valued property.
    #[must_use]
    pub fn get_at(&self, name: &str, index: usize) -> Option<PropertyValue> {
        self.occurrences(name)?.get(index).cloned()
    }

    /// Returns copies of every occurrence of a multi-valued property.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<PropertyValue> {
        self.occurrences(name).cloned().unwrap_or_default()
    }

    /// Returns whether a property holds a non-empty value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        if let Some(slot) = self.slot(name) {
            return slot.as_ref().is_some_and(|pv| !pv.is_empty());
        }
        self.occurrences(name)
            .is_some_and(|all| all.iter().any(|pv| !pv.is_empty()))
    }

    /// Clears a property; for multi-valued properties every occurrence goes.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        if let Some(slot) = self.slot_mut(name) {
            return slot.take().is_some();
        }
        self.occurrences_mut(name).is_some_and(|all| {
            let had_any = !all.is_empty();
            all.clear();
            had_any
        })
    }

    /// Removes one occurrence of a multi-valued property.
    pub fn delete_at(&mut self, name: &str, index: usize) -> bool {
        match self.occurrences_mut(name) {
            Some(all) if index < all.len() => {
                all.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Lines kept verbatim because no accessor handles them.
    #[must_use]
    pub fn extra_lines(&self) -> &[ContentLine] {
        &self.extra
    }

    /// ## Summary
    /// Renders one property as folded, CRLF-terminated lines.
    ///
    /// Absent properties render as nothing; empty ones as `NAME:` when empty
    /// output is allowed.
    #[must_use]
    pub fn create(&self, name: &str) -> String {
        let name = name.to_ascii_uppercase();
        if let Some(slot) = self.slot(&name) {
            return slot
                .as_ref()
                .map(|pv| self.render(&name, pv))
                .unwrap_or_default();
        }
        self.occurrences(&name)
            .map(|all| all.iter().map(|pv| self.render(&name, pv)).collect())
            .unwrap_or_default()
    }

    /// Renders every property, known ones first in a fixed order.
    #[must_use]
    pub fn to_ical(&self) -> String {
        let mut out: String = PROPERTY_ORDER.iter().map(|name| self.create(name)).collect();
        for line in &self.extra {
            out.push_str(&fold_line(&render_content_line(line)));
        }
        out
    }

    fn render(&self, name: &str, pv: &PropertyValue) -> String {
        if pv.is_empty() || pv.is_absent() {
            return if self.config.allow_empty {
                fold(name, &Parameters::new(), "")
            } else {
                String::new()
            };
        }

        let value = wire_value(name, pv);
        match &self.config.language {
            Some(language)
                if LANGUAGE_AWARE.contains(&name) && !pv.has_param_key(param_names::LANGUAGE) =>
            {
                let mut params = pv.params.clone();
                params.add(param_names::LANGUAGE, language.as_str(), true);
                fold(name, &params, &value)
            }
            _ => fold(name, &pv.params, &value),
        }
    }

    /// Checks an incoming blank value against the empty-output switch.
    ///
    /// Returns `true` when the value was blank and has been marked empty.
    fn accept_empty(&self, property: &str, pv: &mut PropertyValue) -> RfcResult<bool> {
        if !pv.is_blank() {
            return Ok(false);
        }
        if !self.config.allow_empty {
            return Err(RfcError::EmptyValueNotAllowed {
                property: property.to_string(),
            });
        }
        pv.set_empty();
        Ok(true)
    }

    fn slot(&self, name: &str) -> Option<&Option<PropertyValue>> {
        Some(match name.to_ascii_uppercase().as_str() {
            names::DTSTART => &self.dtstart,
            names::DTEND => &self.dtend,
            names::DUE => &self.due,
            names::RECURRENCE_ID => &self.recurrence_id,
            names::DTSTAMP => &self.dtstamp,
            names::LAST_MODIFIED => &self.last_modified,
            names::SEQUENCE => &self.sequence,
            names::GEO => &self.geo,
            names::TRANSP => &self.transp,
            names::TZOFFSETTO => &self.tzoffsetto,
            names::SUMMARY => &self.summary,
            names::COLOR => &self.color,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<PropertyValue>> {
        Some(match name.to_ascii_uppercase().as_str() {
            names::DTSTART => &mut self.dtstart,
            names::DTEND => &mut self.dtend,
            names::DUE => &mut self.due,
            names::RECURRENCE_ID => &mut self.recurrence_id,
            names::DTSTAMP => &mut self.dtstamp,
            names::LAST_MODIFIED => &mut self.last_modified,
            names::SEQUENCE => &mut self.sequence,
            names::GEO => &mut self.geo,
            names::TRANSP => &mut self.transp,
            names::TZOFFSETTO => &mut self.tzoffsetto,
            names::SUMMARY => &mut self.summary,
            names::COLOR => &mut self.color,
            _ => return None,
        })
    }

    fn occurrences(&self, name: &str) -> Option<&Vec<PropertyValue>> {
        Some(match name.to_ascii_uppercase().as_str() {
            names::ATTACH => &self.attach,
            names::IMAGE => &self.image,
            names::CONFERENCE => &self.conference,
            names::STRUCTURED_DATA => &self.structured_data,
            _ => return None,
        })
    }

    fn occurrences_mut(&mut self, name: &str) -> Option<&mut Vec<PropertyValue>> {
        Some(match name.to_ascii_uppercase().as_str() {
            names::ATTACH => &mut self.attach,
            names::IMAGE => &mut self.image,
            names::CONFERENCE => &mut self.conference,
            names::STRUCTURED_DATA => &mut self.structured_data,
            _ => return None,
        })
    }
}

/// Stores `pv` at `index`, or appends it when there is no such occurrence.
fn store_at(all: &mut Vec<PropertyValue>, pv: PropertyValue, index: Option<usize>) {
    match index {
        Some(i) if i < all.len() => all[i] = pv,
        _ => all.push(pv),
    }
}

/// Strips trailing line breaks from text input.
fn trim_trailing_newlines(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}

/// Renders a stored value in wire form.
fn wire_value(name: &str, pv: &PropertyValue) -> String {
    match &pv.value {
        Value::Absent | Value::Empty => String::new(),
        Value::Text(s) if is_escaped_text(name, pv) => escape_text(s),
        Value::Text(s) => s.clone(),
        Value::Integer(n) => n.to_string(),
        Value::FloatPair(lat, lon) => format!("{};{}", coordinate(*lat), coordinate(*lon)),
        Value::Binary(bytes) => BASE64.encode(bytes),
        Value::Instant(instant) => format(instant, instant.is_date(), pv.is_local_time()),
        Value::List(items) => items
            .iter()
            .map(|item| {
                let occurrence = PropertyValue::with_params(item.clone(), pv.params.clone());
                wire_value(name, &occurrence)
            })
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn is_escaped_text(name: &str, pv: &PropertyValue) -> bool {
    name == names::SUMMARY
        || (name == names::STRUCTURED_DATA && pv.params.is_value_kind(param_names::TEXT))
}

/// Formats a coordinate with at most six decimals and no trailing zeros.
fn coordinate(n: f64) -> String {
    let fixed = format!("{n:.6}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Decodes base64 text into a binary value, leaving binary values alone.
fn decode_binary(property: &str, pv: &mut PropertyValue) -> RfcResult<()> {
    if let Value::Text(text) = &pv.value {
        let bytes = BASE64
            .decode(text.trim())
            .map_err(|_e| RfcError::type_mismatch(property, "base64 binary", text.as_str()))?;
        pv.set_value(bytes);
    }
    Ok(())
}
