//! Definitions of command argument data.
//!
//! Structures in this module are used in [lex](super::lex) part, [parse](super::parse) part, and the output models.

pub mod channel;
pub mod mixin;
pub mod time;

pub(crate) const fn hex_digit_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Decodes exactly two hexadecimal digits into a byte.
pub(crate) fn hex2_to_byte(digits: &str) -> Option<u8> {
    let &[upper, lower] = digits.as_bytes() else {
        return None;
    };
    Some((hex_digit_value(upper)? << 4) | hex_digit_value(lower)?)
}

#[test]
fn test_hex2() {
    assert_eq!(hex2_to_byte("00"), Some(0x00));
    assert_eq!(hex2_to_byte("ff"), Some(0xFF));
    assert_eq!(hex2_to_byte("Af"), Some(0xAF));
    assert_eq!(hex2_to_byte("0g"), None);
    assert_eq!(hex2_to_byte("0"), None);
    assert_eq!(hex2_to_byte("000"), None);
    assert_eq!(hex2_to_byte("あ"), None);
}

/// An object id of `#WAVxx` or `#BMPxx`, the index into the resource tables.
///
/// The representation is 2 digits of hexadecimal characters, case-insensitive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjId(u8);

impl std::fmt::Debug for ObjId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ObjId").field(&format!("{self}")).finish()
    }
}

impl std::fmt::Display for ObjId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl From<u8> for ObjId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<ObjId> for u8 {
    fn from(value: ObjId) -> Self {
        value.0
    }
}

impl<'a> TryFrom<&'a str> for ObjId {
    type Error = &'a str;
    fn try_from(value: &'a str) -> core::result::Result<Self, Self::Error> {
        hex2_to_byte(value).map(Self).ok_or(value)
    }
}

impl ObjId {
    /// Converts the object id into an `u8` value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

#[test]
fn test_obj_id() {
    assert_eq!(ObjId::try_from("aF"), Ok(ObjId::from(0xAF)));
    assert_eq!(ObjId::try_from("01").map(ObjId::as_u8), Ok(1));
    assert_eq!(ObjId::try_from("0x"), Err("0x"));
    assert_eq!(format!("{}", ObjId::from(0x0A)), "0A");
    assert_eq!(format!("{:?}", ObjId::from(0xAF)), "ObjId(\"AF\")");
}
