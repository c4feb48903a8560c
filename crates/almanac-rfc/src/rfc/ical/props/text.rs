//! SUMMARY and COLOR.

use super::{ComponentProperties, trim_trailing_newlines};
use crate::error::RfcResult;
use crate::rfc::ical::core::{PropertyValue, names};

impl ComponentProperties {
    /// Sets SUMMARY; trailing line breaks are dropped.
    ///
    /// ## Errors
    /// `TypeMismatch` for non-text values, `EmptyValueNotAllowed` for blank
    /// input when empty output is off.
    pub fn set_summary(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let pv = self.prepare_text(names::SUMMARY, value.into())?;
        self.summary = Some(pv);
        Ok(())
    }

    /// Sets COLOR, a CSS3 color name.
    ///
    /// ## Errors
    /// See [`Self::set_summary`].
    pub fn set_color(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let pv = self.prepare_text(names::COLOR, value.into())?;
        self.color = Some(pv);
        Ok(())
    }

    fn prepare_text(&self, property: &str, mut pv: PropertyValue) -> RfcResult<PropertyValue> {
        if self.accept_empty(property, &mut pv)? {
            return Ok(pv);
        }
        let text = trim_trailing_newlines(pv.value.to_text(property)?).to_string();
        pv.set_value(text);
        Ok(pv)
    }
}
