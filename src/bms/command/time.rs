//! Definitions of time in BMS.

/// A track, or measure, or bar, in the score.
///
/// It is always written with exactly 3 decimal digits, so it is in `0..=999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct Track(u16);

impl Track {
    /// The largest track which can be written.
    pub const MAX: Self = Self(999);

    /// Creates a new track, or `None` if it is out of `0..=999`.
    #[must_use]
    pub const fn new(track: u16) -> Option<Self> {
        if track <= Self::MAX.0 {
            Some(Self(track))
        } else {
            None
        }
    }

    /// Returns the track number.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl TryFrom<u16> for Track {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

impl From<Track> for u16 {
    fn from(value: Track) -> Self {
        value.0
    }
}

impl<'a> TryFrom<&'a str> for Track {
    type Error = &'a str;

    /// Reads exactly 3 decimal digits. Leading zeros are part of the notation, not the value.
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(value);
        }
        value
            .parse()
            .ok()
            .and_then(Self::new)
            .ok_or(value)
    }
}
