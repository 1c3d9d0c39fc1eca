//! Lexical analyzer of BMS format.
//!
//! Raw [String] == [lex](self) ==> [`TokenStream`] == [parse](super::parse) ==> [`Bms`](super::model::Bms)
//!
//! The source is split into lines by [`LineSplitter`], and every line is classified by a
//! [`Grammar`] into a [`Token`]. Lexing stops at the first line which can not be classified, so no
//! part of a malformed file reaches the document.

mod cursor;
mod parser;
pub mod token;

use thiserror::Error;

use crate::bms::command::mixin::SourceRangeMixin;

use self::token::{Token, TokenWithRange};

pub use self::parser::Grammar;

/// A kind of command line, which a grammar recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    /// `#ENDIF`.
    EndIf,
    /// `#[keyword] [value]` of the definition table.
    Definition,
    /// `#WAVxx [name]`.
    Wav,
    /// `#BMPxx [name]`.
    Bmp,
    /// `#XXXYY:ZZ...`.
    Message,
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EndIf => "#ENDIF",
            Self::Definition => "definition",
            Self::Wav => "#WAV",
            Self::Bmp => "#BMP",
            Self::Message => "message",
        };
        write!(f, "{name}")
    }
}

/// An error occurred when lexical analysis.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexError {
    /// The line starts with `#` but no kind of command matched.
    #[error("unknown command `#{command}`")]
    UnknownCommand {
        /// The line after `#`.
        command: String,
    },
    /// The longest matched command did not reach the end of the line.
    #[error("unexpected `{trailing}` after {kind} command")]
    TrailingInput {
        /// The kind of command matched.
        kind: CommandKind,
        /// The rest of the line.
        trailing: String,
    },
    /// The value of a definition is out of the domain of its keyword.
    #[error("`{value}` is out of domain for `#{keyword}`, expected {expected}")]
    OutOfDomain {
        /// The keyword in lowercase.
        keyword: String,
        /// The value as written.
        value: String,
        /// What the domain is.
        expected: String,
    },
    /// The channel of the message was not recognized.
    #[error("channel `{channel}` not recognized")]
    UnknownChannel {
        /// The channel as written.
        channel: String,
    },
}

/// type alias of `core::result::Result<T, LexError>`
pub(crate) type Result<T> = core::result::Result<T, LexError>;

/// A lex error with position information.
pub type LexErrorWithRange = SourceRangeMixin<LexError>;

const fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Splits the source into lines on every run of CR and LF.
///
/// No empty line is produced, whether from adjacent line breaks, a leading one or a trailing one.
/// The lines are not trimmed otherwise.
#[derive(Debug, Clone)]
pub struct LineSplitter<'a> {
    source: &'a str,
    index: usize,
}

impl<'a> LineSplitter<'a> {
    /// Starts splitting the source.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source, index: 0 }
    }
}

impl<'a> Iterator for LineSplitter<'a> {
    type Item = SourceRangeMixin<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.index + self.source[self.index..].find(|c: char| !is_line_break(c))?;
        let end = self.source[start..]
            .find(is_line_break)
            .map_or(self.source.len(), |len| start + len);
        self.index = end;
        Some(SourceRangeMixin::new(&self.source[start..end], start, end))
    }
}

/// The tokens of the source, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenStream<'a> {
    /// The tokens in the source order, including comments.
    pub tokens: Vec<TokenWithRange<'a>>,
}

impl<'a> TokenStream<'a> {
    /// Analyzes and converts the BMS format text into [`TokenStream`].
    ///
    /// # Errors
    ///
    /// Fails at the first line which starts with `#` but no grammar matches entirely.
    pub fn parse_lex(
        source: &'a str,
        grammar: &Grammar<'_>,
    ) -> core::result::Result<Self, LexErrorWithRange> {
        LineSplitter::new(source)
            .map(|line| grammar.classify(line))
            .collect::<core::result::Result<_, _>>()
            .map(|tokens| Self { tokens })
    }

    /// Iterates the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, TokenWithRange<'a>> {
        self.tokens.iter()
    }

    /// Iterates the tokens except comments.
    pub fn commands(&self) -> impl Iterator<Item = &Token<'a>> {
        self.tokens
            .iter()
            .map(SourceRangeMixin::content)
            .filter(|token| token.is_command())
    }
}

impl<'a> IntoIterator for TokenStream<'a> {
    type Item = TokenWithRange<'a>;
    type IntoIter = std::vec::IntoIter<TokenWithRange<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'b, 'a> IntoIterator for &'b TokenStream<'a> {
    type Item = &'b TokenWithRange<'a>;
    type IntoIter = std::slice::Iter<'b, TokenWithRange<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
