//! Definitions of the token in BMS format.

use std::borrow::Cow;

use crate::bms::{
    command::{ObjId, channel::Channel, mixin::SourceRangeMixin, time::Track},
    definition::DefValue,
};

/// A classified line of BMS format.
///
/// The keyword which determined the kind of the line is not kept, only its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Token<'a> {
    /// `#ENDIF`. It has no arguments.
    EndIf,
    /// `#[keyword] [value]`, one of the keywords in the [`DefinitionTable`](crate::bms::definition::DefinitionTable).
    Definition {
        /// The keyword as written in the source. Compare it ignoring case.
        keyword: Cow<'a, str>,
        /// The value converted by the kind of the keyword.
        value: DefValue<'a>,
    },
    /// `#WAVxx [file name]`. Defines the sound file for the object id.
    Wav(ObjId, Cow<'a, str>),
    /// `#BMPxx [file name]`. Defines the image file for the object id.
    Bmp(ObjId, Cow<'a, str>),
    /// `#XXXYY:ZZ...`. `XXX` is the track, `YY` is the channel, and `ZZ...` is the sequence of hexadecimal bytes.
    Message {
        /// The track, or measure.
        track: Track,
        /// The channel which the message belongs to.
        channel: Channel,
        /// The bytes decoded from the pairs of hexadecimal digits.
        message: Vec<u8>,
    },
    /// A line which does not start with `#`.
    Comment(Cow<'a, str>),
}

/// A token with position information.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

impl Token<'_> {
    /// Returns whether the token is a command line, which is recorded into [`Bms::commands`](crate::bms::model::Bms::commands).
    #[must_use]
    pub const fn is_command(&self) -> bool {
        !matches!(self, Self::Comment(_))
    }

    /// Makes the token independent from the source text.
    #[must_use]
    pub fn into_owned(self) -> Token<'static> {
        fn owned(s: Cow<'_, str>) -> Cow<'static, str> {
            Cow::Owned(s.into_owned())
        }
        match self {
            Self::EndIf => Token::EndIf,
            Self::Definition { keyword, value } => Token::Definition {
                keyword: owned(keyword),
                value: value.into_owned(),
            },
            Self::Wav(id, name) => Token::Wav(id, owned(name)),
            Self::Bmp(id, name) => Token::Bmp(id, owned(name)),
            Self::Message {
                track,
                channel,
                message,
            } => Token::Message {
                track,
                channel,
                message,
            },
            Self::Comment(line) => Token::Comment(owned(line)),
        }
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndIf => write!(f, "#ENDIF"),
            Self::Definition { keyword, value } => {
                write!(f, "#{} {value}", keyword.to_ascii_uppercase())
            }
            Self::Wav(id, name) => write!(f, "#WAV{id} {name}"),
            Self::Bmp(id, name) => write!(f, "#BMP{id} {name}"),
            Self::Message {
                track,
                channel,
                message,
            } => {
                write!(f, "#{track}{channel}:")?;
                message.iter().try_for_each(|byte| write!(f, "{byte:02X}"))
            }
            Self::Comment(line) => write!(f, "{line}"),
        }
    }
}
