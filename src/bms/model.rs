//! The parsed document of a BMS file.
//!
//! [`Bms`] holds the recorded command lines, global [`Metadata`], the [`Resources`] tables and the
//! [`Timeline`] of messages.

use std::collections::BTreeMap;

use super::{
    command::{ObjId, channel::Channel, time::Track},
    definition::DefValue,
    lex::token::Token,
};

/// The type of value a dedicated metadata field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FieldType {
    Integer,
    Text,
}

/// Global metadata defined by `#KEYWORD value` lines.
///
/// Every field is `None` until its definition appears in the source. Use the accessor methods to
/// read them with their default values applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// `#PLAYER`, the play style of the score.
    pub player: Option<i64>,
    /// `#GENRE`, the genre of the song.
    pub genre: Option<String>,
    /// `#TITLE`, the title of the song.
    pub title: Option<String>,
    /// `#ARTIST`, the artist of the song.
    pub artist: Option<String>,
    /// `#BPM`, the initial tempo.
    pub bpm: Option<i64>,
    /// `#MIDIFILE`, the path to the MIDI background music.
    pub midifile: Option<String>,
    /// `#PLAYLEVEL`, the difficulty shown to players.
    pub playlevel: Option<i64>,
    /// `#RANK`, the judge level.
    pub rank: Option<i64>,
    /// `#VOLWAV`, the relative volume percentage of sounds.
    pub volwav: Option<i64>,
    /// Definitions in the table which have no dedicated field, such as `#RANDOM` or `#IF`.
    /// Keys are lowercase.
    pub extra: BTreeMap<String, DefValue<'static>>,
}

impl Metadata {
    /// The default of [`Metadata::player`], single play.
    pub const DEFAULT_PLAYER: i64 = 1;
    /// The default of [`Metadata::bpm`].
    pub const DEFAULT_BPM: i64 = 130;
    /// The default of [`Metadata::playlevel`].
    pub const DEFAULT_PLAYLEVEL: i64 = 0;
    /// The default of [`Metadata::rank`], which means not specified.
    pub const DEFAULT_RANK: i64 = -1;
    /// The default of [`Metadata::volwav`].
    pub const DEFAULT_VOLWAV: i64 = 100;

    pub(crate) fn field_type(key: &str) -> Option<FieldType> {
        match key {
            "player" | "bpm" | "playlevel" | "rank" | "volwav" => Some(FieldType::Integer),
            "genre" | "title" | "artist" | "midifile" => Some(FieldType::Text),
            _ => None,
        }
    }

    /// Returns the play style, defaults to `1`.
    #[must_use]
    pub fn player(&self) -> i64 {
        self.player.unwrap_or(Self::DEFAULT_PLAYER)
    }

    /// Returns the genre, defaults to empty.
    #[must_use]
    pub fn genre(&self) -> &str {
        self.genre.as_deref().unwrap_or_default()
    }

    /// Returns the title, defaults to empty.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Returns the artist, defaults to empty.
    #[must_use]
    pub fn artist(&self) -> &str {
        self.artist.as_deref().unwrap_or_default()
    }

    /// Returns the tempo, defaults to `130`.
    #[must_use]
    pub fn bpm(&self) -> i64 {
        self.bpm.unwrap_or(Self::DEFAULT_BPM)
    }

    /// Returns the MIDI file path if defined. It has no default.
    #[must_use]
    pub fn midifile(&self) -> Option<&str> {
        self.midifile.as_deref()
    }

    /// Returns the play level, defaults to `0`.
    #[must_use]
    pub fn playlevel(&self) -> i64 {
        self.playlevel.unwrap_or(Self::DEFAULT_PLAYLEVEL)
    }

    /// Returns the judge rank, defaults to `-1`.
    #[must_use]
    pub fn rank(&self) -> i64 {
        self.rank.unwrap_or(Self::DEFAULT_RANK)
    }

    /// Returns the volume percentage, defaults to `100`.
    #[must_use]
    pub fn volwav(&self) -> i64 {
        self.volwav.unwrap_or(Self::DEFAULT_VOLWAV)
    }

    /// Looks up a definition by the keyword ignoring ASCII case, including the ones in [`Metadata::extra`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<DefValue<'_>> {
        fn int(field: &Option<i64>) -> Option<DefValue<'static>> {
            field.map(DefValue::Integer)
        }
        fn text(field: &Option<String>) -> Option<DefValue<'_>> {
            field.as_deref().map(|s| DefValue::Text(s.into()))
        }
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "player" => int(&self.player),
            "genre" => text(&self.genre),
            "title" => text(&self.title),
            "artist" => text(&self.artist),
            "bpm" => int(&self.bpm),
            "midifile" => text(&self.midifile),
            "playlevel" => int(&self.playlevel),
            "rank" => int(&self.rank),
            "volwav" => int(&self.volwav),
            _ => self.extra.get(&key).cloned(),
        }
    }

    /// Assigns the value of the lowercase keyword, overwriting the older one.
    ///
    /// Returns whether the keyword had been assigned before, or `None` if the keyword names a
    /// field of the other type. Nothing is assigned then.
    pub(crate) fn assign(&mut self, key: &str, value: DefValue<'_>) -> Option<bool> {
        fn replace<T>(field: &mut Option<T>, value: T) -> Option<bool> {
            Some(field.replace(value).is_some())
        }
        match (key, value) {
            ("player", DefValue::Integer(v)) => replace(&mut self.player, v),
            ("bpm", DefValue::Integer(v)) => replace(&mut self.bpm, v),
            ("playlevel", DefValue::Integer(v)) => replace(&mut self.playlevel, v),
            ("rank", DefValue::Integer(v)) => replace(&mut self.rank, v),
            ("volwav", DefValue::Integer(v)) => replace(&mut self.volwav, v),
            ("genre", DefValue::Text(v)) => replace(&mut self.genre, v.into_owned()),
            ("title", DefValue::Text(v)) => replace(&mut self.title, v.into_owned()),
            ("artist", DefValue::Text(v)) => replace(&mut self.artist, v.into_owned()),
            ("midifile", DefValue::Text(v)) => replace(&mut self.midifile, v.into_owned()),
            (key, _) if Self::field_type(key).is_some() => None,
            (key, value) => Some(
                self.extra
                    .insert(key.to_string(), value.into_owned())
                    .is_some(),
            ),
        }
    }
}

/// The resource tables defined by `#WAVxx` and `#BMPxx`. The file names are kept verbatim.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    /// Sound file names by object id.
    pub wav: BTreeMap<ObjId, String>,
    /// Image file names by object id.
    pub bmp: BTreeMap<ObjId, String>,
}

/// The messages `#XXXYY:ZZ...` by track and channel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    /// Decoded bytes of the messages.
    pub tracks: BTreeMap<Track, BTreeMap<Channel, Vec<u8>>>,
}

impl Timeline {
    /// Returns the channels of the track.
    #[must_use]
    pub fn track(&self, track: Track) -> Option<&BTreeMap<Channel, Vec<u8>>> {
        self.tracks.get(&track)
    }

    /// Returns the bytes of the message on the track and channel.
    #[must_use]
    pub fn get(&self, track: Track, channel: Channel) -> Option<&[u8]> {
        self.tracks
            .get(&track)
            .and_then(|channels| channels.get(&channel))
            .map(Vec::as_slice)
    }

    /// Returns whether no message is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Places the message, overwriting the older one on the same track and channel.
    ///
    /// Returns whether the track and channel had been placed before.
    pub(crate) fn insert(&mut self, track: Track, channel: Channel, bytes: Vec<u8>) -> bool {
        self.tracks
            .entry(track)
            .or_default()
            .insert(channel, bytes)
            .is_some()
    }
}

/// A parsed BMS document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bms {
    /// Every command line in the source order. Comments are not included.
    pub commands: Vec<Token<'static>>,
    /// The messages placed on the score.
    pub timeline: Timeline,
    /// The global definitions.
    pub metadata: Metadata,
    /// The resource tables.
    pub resources: Resources,
}
