//! DTSTART and the date properties tied to it, plus the UTC stamps.

use super::ComponentProperties;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{Instant, LOCAL_TIME_MARKER, PropertyValue, names, param_names};
use crate::rfc::ical::datetime::normalize;
use crate::rfc::ical::validation::{assert_in_sequence, assert_same_kind};

impl ComponentProperties {
    /// ## Summary
    /// Sets DTSTART.
    ///
    /// DTEND, DUE and RECURRENCE-ID values already present are checked
    /// against the new start before it is stored.
    ///
    /// ## Errors
    /// Normalization errors, or `KindMismatch`/`OutOfSequence` from a
    /// dependent property.
    pub fn set_dtstart(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let mut pv = value.into();
        if self.accept_empty(names::DTSTART, &mut pv)? {
            self.dtstart = Some(pv);
            return Ok(());
        }

        let pv = normalize(names::DTSTART, pv, false)?;
        if let Some(start) = pv.instant() {
            for (name, dependent) in self.dependents() {
                if let Some(instant) = dependent.and_then(PropertyValue::instant) {
                    check_dependent(start, instant, name)?;
                }
            }
        }
        self.dtstart = Some(pv);
        Ok(())
    }

    /// ## Errors
    /// See [`Self::set_dtstart`]; DTEND must not precede DTSTART.
    pub fn set_dtend(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let pv = self.prepare_dependent(names::DTEND, value.into())?;
        self.dtend = Some(pv);
        Ok(())
    }

    /// ## Errors
    /// See [`Self::set_dtstart`]; DUE must not precede DTSTART.
    pub fn set_due(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let pv = self.prepare_dependent(names::DUE, value.into())?;
        self.due = Some(pv);
        Ok(())
    }

    /// ## Errors
    /// See [`Self::set_dtstart`]; RECURRENCE-ID must not precede DTSTART.
    pub fn set_recurrence_id(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let pv = self.prepare_dependent(names::RECURRENCE_ID, value.into())?;
        self.recurrence_id = Some(pv);
        Ok(())
    }

    /// Sets DTSTAMP, always stored in UTC.
    ///
    /// ## Errors
    /// Normalization errors, or `TypeMismatch` for a DATE value.
    pub fn set_dtstamp(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let pv = self.prepare_utc(names::DTSTAMP, value.into())?;
        self.dtstamp = Some(pv);
        Ok(())
    }

    /// Sets LAST-MODIFIED, always stored in UTC.
    ///
    /// ## Errors
    /// Normalization errors, or `TypeMismatch` for a DATE value.
    pub fn set_last_modified(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let pv = self.prepare_utc(names::LAST_MODIFIED, value.into())?;
        self.last_modified = Some(pv);
        Ok(())
    }

    /// Returns the normalized DTSTART instant, if set.
    #[must_use]
    pub fn dtstart_instant(&self) -> Option<Instant> {
        self.dtstart.as_ref()?.instant().copied()
    }

    fn dependents(&self) -> [(&'static str, Option<&PropertyValue>); 3] {
        [
            (names::DTEND, self.dtend.as_ref()),
            (names::DUE, self.due.as_ref()),
            (names::RECURRENCE_ID, self.recurrence_id.as_ref()),
        ]
    }

    /// Normalizes a value tied to DTSTART and checks it against the start.
    ///
    /// The value inherits `VALUE=DATE` and the local-time marker from a set
    /// DTSTART before normalization.
    fn prepare_dependent(&self, property: &str, mut pv: PropertyValue) -> RfcResult<PropertyValue> {
        if self.accept_empty(property, &mut pv)? {
            return Ok(pv);
        }

        let start = self.dtstart.as_ref().filter(|s| s.instant().is_some());
        if let Some(start) = start {
            if start.is_date_kind() {
                pv.add_param(param_names::VALUE, param_names::DATE, true);
            }
            if start.is_local_time() {
                pv.add_param(LOCAL_TIME_MARKER, "TRUE", true);
            }
        }

        let pv = normalize(property, pv, false)?;
        if let Some(start) = start.and_then(PropertyValue::instant)
            && let Some(instant) = pv.instant()
        {
            check_dependent(start, instant, property)?;
        }
        Ok(pv)
    }

    fn prepare_utc(&self, property: &str, mut pv: PropertyValue) -> RfcResult<PropertyValue> {
        if self.accept_empty(property, &mut pv)? {
            return Ok(pv);
        }
        let pv = normalize(property, pv, true)?;
        if let Some(instant) = pv.instant().filter(|i| i.is_date()) {
            return Err(RfcError::type_mismatch(property, "date-time", instant.to_string()));
        }
        Ok(pv)
    }
}

fn check_dependent(start: &Instant, dependent: &Instant, property: &str) -> RfcResult<()> {
    assert_same_kind(start, dependent, property)?;
    assert_in_sequence(start, dependent, property)
}
