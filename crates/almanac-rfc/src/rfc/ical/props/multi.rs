//! Properties that may occur more than once: ATTACH, IMAGE, CONFERENCE and
//! STRUCTURED-DATA.
//!
//! Each setter takes an optional occurrence index. `None`, or an index past
//! the end, appends a new occurrence.

use super::{ComponentProperties, decode_binary, store_at};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{PropertyValue, Value, names, param_names};

impl ComponentProperties {
    /// ## Summary
    /// Sets an ATTACH occurrence, a URI or inline BASE64 data.
    ///
    /// ## Errors
    /// `TypeMismatch` for undecodable inline data.
    pub fn set_attach(
        &mut self,
        value: impl Into<PropertyValue>,
        index: Option<usize>,
    ) -> RfcResult<()> {
        let mut pv = value.into();
        if !self.accept_empty(names::ATTACH, &mut pv)? {
            if pv.params.is_value_kind(param_names::BINARY) {
                pv.add_param(param_names::ENCODING, param_names::BASE64, true);
                decode_binary(names::ATTACH, &mut pv)?;
            } else {
                expect_text(names::ATTACH, &pv)?;
            }
        }
        store_at(&mut self.attach, pv, index);
        Ok(())
    }

    /// ## Summary
    /// Sets an IMAGE occurrence.
    ///
    /// Inline data gets `VALUE=BINARY;ENCODING=BASE64`, anything else is a
    /// URI. `DISPLAY=BADGE` is the default and is dropped.
    ///
    /// ## Errors
    /// `TypeMismatch` for a VALUE other than URI or BINARY, or for
    /// undecodable inline data.
    pub fn set_image(
        &mut self,
        value: impl Into<PropertyValue>,
        index: Option<usize>,
    ) -> RfcResult<()> {
        let mut pv = value.into();
        if !self.accept_empty(names::IMAGE, &mut pv)? {
            if pv.has_param_key(param_names::ENCODING) || matches!(pv.value, Value::Binary(_)) {
                pv.add_param(param_names::VALUE, param_names::BINARY, true);
            } else {
                pv.params.add_if_absent(param_names::VALUE, param_names::URI);
            }

            if pv.params.is_value_kind(param_names::BINARY) {
                pv.add_param(param_names::ENCODING, param_names::BASE64, true);
                decode_binary(names::IMAGE, &mut pv)?;
            } else if pv.params.is_value_kind(param_names::URI) {
                expect_text(names::IMAGE, &pv)?;
            } else {
                let kind = pv.get_param(param_names::VALUE).unwrap_or_default();
                return Err(RfcError::type_mismatch(names::IMAGE, "VALUE=URI or BINARY", kind));
            }
            pv.remove_param(param_names::DISPLAY, &[param_names::BADGE]);
        }
        store_at(&mut self.image, pv, index);
        Ok(())
    }

    /// ## Summary
    /// Sets a CONFERENCE occurrence, always a URI.
    ///
    /// ## Errors
    /// `TypeMismatch` for non-text values.
    pub fn set_conference(
        &mut self,
        value: impl Into<PropertyValue>,
        index: Option<usize>,
    ) -> RfcResult<()> {
        let mut pv = value.into();
        if !self.accept_empty(names::CONFERENCE, &mut pv)? {
            let uri = pv.value.to_text(names::CONFERENCE)?.trim().to_string();
            pv.set_value(uri);
            pv.params.add_if_absent(param_names::VALUE, param_names::URI);
        }
        store_at(&mut self.conference, pv, index);
        Ok(())
    }

    /// ## Summary
    /// Sets a STRUCTURED-DATA occurrence.
    ///
    /// Defaults to `VALUE=TEXT`. Binary data is decoded and re-encoded as
    /// BASE64 on output.
    ///
    /// ## Errors
    /// `TypeMismatch` for undecodable inline data.
    pub fn set_structured_data(
        &mut self,
        value: impl Into<PropertyValue>,
        index: Option<usize>,
    ) -> RfcResult<()> {
        let mut pv = value.into();
        if !self.accept_empty(names::STRUCTURED_DATA, &mut pv)? {
            pv.params.add_if_absent(param_names::VALUE, param_names::TEXT);
            if pv.params.is_value_kind(param_names::BINARY) {
                pv.params.add_if_absent(param_names::ENCODING, param_names::BASE64);
                decode_binary(names::STRUCTURED_DATA, &mut pv)?;
            } else {
                expect_text(names::STRUCTURED_DATA, &pv)?;
            }
        }
        store_at(&mut self.structured_data, pv, index);
        Ok(())
    }
}

fn expect_text(property: &str, pv: &PropertyValue) -> RfcResult<()> {
    pv.value.to_text(property).map(|_text| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::config::OutputConfig;

    fn props() -> ComponentProperties {
        ComponentProperties::new(OutputConfig::default())
    }

    #[test]
    fn attach_uri_and_binary() {
        let mut props = props();
        props
            .set_attach(
                PropertyValue::new("https://example.com/agenda.pdf")
                    .param("FMTTYPE", "application/pdf"),
                None,
            )
            .unwrap();
        props
            .set_attach(PropertyValue::new("aGVsbG8=").param("VALUE", "BINARY"), None)
            .unwrap();

        let inline = props.get_at(names::ATTACH, 1).unwrap();
        assert_eq!(inline.value, Value::Binary(b"hello".to_vec()));
        assert_eq!(
            props.create(names::ATTACH),
            "ATTACH;FMTTYPE=application/pdf:https://example.com/agenda.pdf\r\n\
             ATTACH;VALUE=BINARY;ENCODING=BASE64:aGVsbG8=\r\n"
        );
    }

    #[test]
    fn attach_rejects_bad_base64() {
        let mut props = props();
        let err = props
            .set_attach(PropertyValue::new("not base64!").param("VALUE", "BINARY"), None)
            .unwrap_err();
        assert!(matches!(err, RfcError::TypeMismatch { .. }));
        assert!(props.get_all(names::ATTACH).is_empty());
    }

    #[test]
    fn index_replaces_or_appends() {
        let mut props = props();
        props.set_attach("https://a.example", None).unwrap();
        props.set_attach("https://b.example", Some(0)).unwrap();
        props.set_attach("https://c.example", Some(9)).unwrap();

        let all: Vec<_> = props
            .get_all(names::ATTACH)
            .into_iter()
            .filter_map(|pv| pv.value.as_text().map(str::to_string))
            .collect();
        assert_eq!(all, ["https://b.example", "https://c.example"]);
    }

    #[test]
    fn image_defaults() {
        let mut props = props();
        props
            .set_image(
                PropertyValue::new("https://example.com/logo.png").param("DISPLAY", "BADGE"),
                None,
            )
            .unwrap();
        props
            .set_image(PropertyValue::new("aGVsbG8=").param("ENCODING", "BASE64"), None)
            .unwrap();

        assert_eq!(
            props.create(names::IMAGE),
            "IMAGE;VALUE=URI:https://example.com/logo.png\r\n\
             IMAGE;ENCODING=BASE64;VALUE=BINARY:aGVsbG8=\r\n"
        );
    }

    #[test]
    fn image_keeps_other_display_values() {
        let mut props = props();
        props
            .set_image(
                PropertyValue::new("https://example.com/t.png").param("DISPLAY", "THUMBNAIL"),
                None,
            )
            .unwrap();
        let image = props.get_at(names::IMAGE, 0).unwrap();
        assert!(image.has_param_value("DISPLAY", "THUMBNAIL"));
    }

    #[test]
    fn image_rejects_other_value_types() {
        let mut props = props();
        let err = props
            .set_image(PropertyValue::new("hello").param("VALUE", "TEXT"), None)
            .unwrap_err();
        assert!(matches!(err, RfcError::TypeMismatch { ref raw, .. } if raw == "TEXT"));
    }

    #[test]
    fn conference_is_a_uri() {
        let mut props = props();
        props
            .set_conference(" https://chat.example/room ", None)
            .unwrap();
        assert_eq!(
            props.create(names::CONFERENCE),
            "CONFERENCE;VALUE=URI:https://chat.example/room\r\n"
        );
    }

    #[test]
    fn structured_data_text_and_binary() {
        let mut props = props();
        props
            .set_structured_data(
                PropertyValue::new("{\"a\":1,\"b\":2}").param("FMTTYPE", "application/json"),
                None,
            )
            .unwrap();
        props
            .set_structured_data(PropertyValue::new("aGVsbG8=").param("VALUE", "BINARY"), None)
            .unwrap();

        assert_eq!(
            props.create(names::STRUCTURED_DATA),
            "STRUCTURED-DATA;FMTTYPE=application/json;VALUE=TEXT:{\"a\":1\\,\"b\":2}\r\n\
             STRUCTURED-DATA;VALUE=BINARY;ENCODING=BASE64:aGVsbG8=\r\n"
        );
    }
}
