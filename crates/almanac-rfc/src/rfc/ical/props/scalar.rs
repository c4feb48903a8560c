//! SEQUENCE, GEO, TRANSP and TZOFFSETTO.

use super::ComponentProperties;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{PropertyValue, Value, assert_in_range, names};
use crate::rfc::ical::parse::{parse_float_pair, parse_utc_offset};

const TRANSP_VALUES: &[&str] = &["OPAQUE", "TRANSPARENT"];

impl ComponentProperties {
    /// ## Summary
    /// Sets SEQUENCE.
    ///
    /// A blank value bumps the current sequence, starting at 0.
    ///
    /// ## Errors
    /// `TypeMismatch` for non-integers, `RangeViolation` for negatives.
    pub fn set_sequence(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let mut pv = value.into();
        let n = if pv.is_blank() {
            self.sequence
                .as_ref()
                .and_then(|current| current.value.as_integer())
                .map_or(0, |n| n.saturating_add(1))
        } else {
            let n = pv.value.to_integer(names::SEQUENCE)?;
            assert_in_range(names::SEQUENCE, n, 0, i64::MAX)?
        };
        pv.set_value(n);
        self.sequence = Some(pv);
        Ok(())
    }

    /// ## Summary
    /// Sets GEO from a coordinate pair or `lat;lon` text.
    ///
    /// ## Errors
    /// `TypeMismatch` for malformed input, `RangeViolation` for coordinates
    /// off the globe.
    pub fn set_geo(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let mut pv = value.into();
        if self.accept_empty(names::GEO, &mut pv)? {
            self.geo = Some(pv);
            return Ok(());
        }

        let (lat, lon) = match pv.value.expect_scalar(names::GEO)? {
            Value::FloatPair(lat, lon) => (*lat, *lon),
            Value::Text(s) => parse_float_pair(names::GEO, s)?,
            other => {
                return Err(RfcError::type_mismatch(
                    names::GEO,
                    "latitude;longitude",
                    other.type_name(),
                ));
            }
        };
        let lat = assert_in_range(names::GEO, lat, -90.0, 90.0)?;
        let lon = assert_in_range(names::GEO, lon, -180.0, 180.0)?;

        pv.set_value((lat, lon));
        self.geo = Some(pv);
        Ok(())
    }

    /// ## Summary
    /// Sets TRANSP; the value is upper-cased.
    ///
    /// ## Errors
    /// `TypeMismatch` for anything but OPAQUE or TRANSPARENT.
    pub fn set_transp(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let mut pv = value.into();
        if self.accept_empty(names::TRANSP, &mut pv)? {
            self.transp = Some(pv);
            return Ok(());
        }

        let raw = pv.value.to_text(names::TRANSP)?;
        let upper = raw.trim().to_ascii_uppercase();
        if !TRANSP_VALUES.contains(&upper.as_str()) {
            return Err(RfcError::type_mismatch(
                names::TRANSP,
                "OPAQUE or TRANSPARENT",
                raw,
            ));
        }

        pv.set_value(upper);
        self.transp = Some(pv);
        Ok(())
    }

    /// ## Summary
    /// Sets TZOFFSETTO, kept in its `(+|-)HHMM[SS]` text form.
    ///
    /// ## Errors
    /// `TypeMismatch` for a malformed offset.
    pub fn set_tzoffsetto(&mut self, value: impl Into<PropertyValue>) -> RfcResult<()> {
        let mut pv = value.into();
        if self.accept_empty(names::TZOFFSETTO, &mut pv)? {
            self.tzoffsetto = Some(pv);
            return Ok(());
        }

        let raw = pv.value.to_text(names::TZOFFSETTO)?.trim().to_string();
        parse_utc_offset(names::TZOFFSETTO, &raw)?;
        pv.set_value(raw);
        self.tzoffsetto = Some(pv);
        Ok(())
    }
}
