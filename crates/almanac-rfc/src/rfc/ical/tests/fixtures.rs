//! Property blocks of one component, written in canonical render order.
//!
//! Adapted from RFC 5545 Appendix A and RFC 7986 examples.

/// RFC 5545 §A.1 - Minimal VEVENT properties
pub const EVENT_MINIMAL: &str = "\
DTSTAMP:19970901T130000Z\r\n\
DTSTART:19970903T163000Z\r\n\
DTEND:19970903T190000Z\r\n\
SUMMARY:Annual Employee Review\r\n\
UID:19970901T130000Z-123401@example.com\r\n";

/// All-day event with DATE values
pub const EVENT_ALL_DAY: &str = "\
DTSTAMP:19970901T130000Z\r\n\
DTSTART;VALUE=DATE:19970714\r\n\
DTEND;VALUE=DATE:19970715\r\n\
SUMMARY:Bastille Day Party\r\n\
TRANSP:TRANSPARENT\r\n";

/// Zoned event with a sequence number
pub const EVENT_WITH_TIMEZONE: &str = "\
DTSTAMP:20220401T120000Z\r\n\
DTSTART;TZID=America/New_York:20220403T090000\r\n\
DTEND;TZID=America/New_York:20220403T100000\r\n\
SUMMARY:Standup\r\n\
LAST-MODIFIED:20220401T130000Z\r\n\
SEQUENCE:2\r\n";

/// VTODO with DUE and a recurrence override
pub const TODO_WITH_DUE: &str = "\
DTSTAMP:19970901T130000Z\r\n\
DTSTART:19970901T090000Z\r\n\
DUE:19970903T090000Z\r\n\
RECURRENCE-ID:19970902T090000Z\r\n\
SUMMARY:Submit Tax Returns\r\n\
STATUS:NEEDS-ACTION\r\n";

/// RFC 5545 §3.8.1.6 GEO plus RFC 7986 properties
pub const EVENT_EXTENDED: &str = "\
DTSTART:20220403T100000Z\r\n\
SUMMARY:Launch\\; all hands\r\n\
GEO:37.386013;-122.082932\r\n\
ATTACH;FMTTYPE=application/pdf:https://example.com/plan.pdf\r\n\
COLOR:turquoise\r\n\
CONFERENCE;VALUE=URI;FEATURE=AUDIO,VIDEO;LABEL=\"Attendee dial-in\":https://c\r\n \
hat.example/launch\r\n\
IMAGE;VALUE=URI;DISPLAY=THUMBNAIL:https://example.com/t.png\r\n\
STRUCTURED-DATA;FMTTYPE=application/ld+json;VALUE=TEXT:{\"@type\":\"Event\"}\r\n";

/// Standard sub-component of a VTIMEZONE
pub const TIMEZONE_STANDARD: &str = "\
DTSTART:19671029T020000\r\n\
TZOFFSETTO:-0500\r\n\
TZOFFSETFROM:-0400\r\n\
TZNAME:EST\r\n";
