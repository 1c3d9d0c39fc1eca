//! Definitions of channel command argument data.

/// The channel, or lane, where the message belongs to.
///
/// Only a small alphabet of two-character codes is accepted:
///
/// - `0` followed by one of `1`, `3`, `4` or `6`,
/// - `1` or `2` followed by one of `0` to `7`.
///
/// The code is stored as its hexadecimal reading, so `"10"` is `0x10`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Channel(u8);

const fn is_valid_code(first: u8, second: u8) -> bool {
    match first {
        b'0' => matches!(second, b'1' | b'3' | b'4' | b'6'),
        b'1' | b'2' => matches!(second, b'0'..=b'7'),
        _ => false,
    }
}

impl Channel {
    /// Reads a channel from its two-character code.
    #[must_use]
    pub const fn from_code(code: [u8; 2]) -> Option<Self> {
        if is_valid_code(code[0], code[1]) {
            Some(Self(((code[0] - b'0') << 4) | (code[1] - b'0')))
        } else {
            None
        }
    }

    /// Returns the hexadecimal reading of the channel code.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Channel").field(&format!("{self}")).finish()
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl<'a> TryFrom<&'a str> for Channel {
    type Error = &'a str;
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        let &[first, second] = value.as_bytes() else {
            return Err(value);
        };
        Self::from_code([first, second]).ok_or(value)
    }
}

impl TryFrom<u8> for Channel {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let (upper, lower) = (value >> 4, value & 0x0F);
        if upper > 9 || lower > 9 {
            return Err(value);
        }
        Self::from_code([upper + b'0', lower + b'0']).ok_or(value)
    }
}

impl From<Channel> for u8 {
    fn from(value: Channel) -> Self {
        value.0
    }
}
