//! Parsing [`Bms`] from [`TokenStream`](super::lex::TokenStream).
//!
//! Raw [String] == [lex](super::lex) ==> [`TokenStream`](super::lex::TokenStream) == [parse](self) ==> [`Bms`]
//!
//! Tokens are applied in the source order and a later assignment always overwrites an older one.
//! With [`StrictFlag::DuplicateDefinition`], every overwrite is also recorded and reported as
//! [`DuplicateDefinitions`] after all tokens were applied.
//!
//! A definition token is checked against the definition table of [`ParseConfig`] again, because
//! the stream may have been lexed with another table or built by hand. The first token rejected
//! stops parsing with [`ParseErrorWithRange`].

pub mod duplicates;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::bms::{
    BmsError,
    command::{ObjId, channel::Channel, mixin::SourceRangeMixin, time::Track},
    definition::{ArgKind, DefValue, DefinitionTable},
    lex::{
        Grammar,
        token::{Token, TokenWithRange},
    },
    model::Bms,
};

use self::duplicates::DuplicateDefinitions;

/// A flag to make parsing stricter than the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum StrictFlag {
    /// Reports definitions, resources and messages assigned more than once.
    DuplicateDefinition,
}

/// A token which the definition table of [`ParseConfig`] does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ParseError {
    /// The keyword is not in the definition table.
    #[error("definition `{keyword}` is not in the definition table")]
    UnknownDefinition {
        /// The keyword in lowercase.
        keyword: String,
    },
    /// The value can not be read as the kind of the keyword.
    #[error("value `{value}` of `{keyword}` is not `{expected}`")]
    MismatchedValue {
        /// The keyword in lowercase.
        keyword: String,
        /// The value as written back.
        value: String,
        /// The kind in the definition table.
        expected: ArgKind,
    },
}

/// A [`ParseError`] with the span of the line.
pub type ParseErrorWithRange = SourceRangeMixin<ParseError>;

/// Configuration of parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig<'t> {
    definitions: &'t DefinitionTable,
    strict: BTreeSet<StrictFlag>,
}

/// Creates the default configuration, which uses [`DefinitionTable::builtin`] and no strict flags.
#[must_use]
pub fn default_config() -> ParseConfig<'static> {
    ParseConfig {
        definitions: DefinitionTable::builtin(),
        strict: BTreeSet::new(),
    }
}

impl Default for ParseConfig<'static> {
    fn default() -> Self {
        default_config()
    }
}

impl<'t> ParseConfig<'t> {
    /// Replaces the definition table.
    #[must_use]
    pub fn definitions<'u>(self, definitions: &'u DefinitionTable) -> ParseConfig<'u> {
        ParseConfig {
            definitions,
            strict: self.strict,
        }
    }

    /// Turns on the strict flag.
    #[must_use]
    pub fn strict(mut self, flag: StrictFlag) -> Self {
        self.strict.insert(flag);
        self
    }

    /// Returns the definition table.
    #[must_use]
    pub const fn definition_table(&self) -> &'t DefinitionTable {
        self.definitions
    }

    /// Returns whether the strict flag is on.
    #[must_use]
    pub fn is_strict(&self, flag: StrictFlag) -> bool {
        self.strict.contains(&flag)
    }

    /// Builds the grammar for the definition table.
    #[must_use]
    pub fn grammar(&self) -> Grammar<'t> {
        Grammar::new(self.definitions)
    }
}

/// The document under construction.
#[derive(Debug)]
struct BmsBuilder<'t> {
    bms: Bms,
    definitions: &'t DefinitionTable,
    /// `None` unless duplicates are reported.
    duplicates: Option<DuplicateDefinitions>,
}

impl<'t> BmsBuilder<'t> {
    fn new(config: &ParseConfig<'t>) -> Self {
        Self {
            bms: Bms::default(),
            definitions: config.definition_table(),
            duplicates: config
                .is_strict(StrictFlag::DuplicateDefinition)
                .then(DuplicateDefinitions::default),
        }
    }

    fn apply(&mut self, token: &TokenWithRange<'_>) -> Result<(), ParseErrorWithRange> {
        let content = token.content();
        if !content.is_command() {
            return Ok(());
        }
        match content {
            Token::EndIf | Token::Comment(_) => {}
            Token::Definition { keyword, value } => self
                .set_definition(keyword, value)
                .map_err(|err| SourceRangeMixin::from((err, token.range())))?,
            Token::Wav(id, name) => self.set_wav(*id, name),
            Token::Bmp(id, name) => self.set_bmp(*id, name),
            Token::Message {
                track,
                channel,
                message,
            } => self.set_message(*track, *channel, message),
        }
        self.bms.commands.push(content.clone().into_owned());
        Ok(())
    }

    fn set_definition(&mut self, keyword: &str, value: &DefValue<'_>) -> Result<(), ParseError> {
        let definitions = self.definitions;
        let key = keyword.to_ascii_lowercase();
        let Some(kind) = definitions.get(&key) else {
            return Err(ParseError::UnknownDefinition { keyword: key });
        };
        let mismatched = || ParseError::MismatchedValue {
            keyword: key.clone(),
            value: value.to_string(),
            expected: kind.clone(),
        };
        if !kind.accepts(value) {
            return Err(mismatched());
        }
        let existed = self
            .bms
            .metadata
            .assign(&key, value.clone())
            .ok_or_else(mismatched)?;
        if let Some(duplicates) = self.duplicates.as_mut().filter(|_| existed) {
            duplicates.record_definition(&key);
        }
        Ok(())
    }

    fn set_wav(&mut self, id: ObjId, name: &str) {
        let existed = self.bms.resources.wav.insert(id, name.to_string()).is_some();
        if let Some(duplicates) = self.duplicates.as_mut().filter(|_| existed) {
            duplicates.record_wav(id);
        }
    }

    fn set_bmp(&mut self, id: ObjId, name: &str) {
        let existed = self.bms.resources.bmp.insert(id, name.to_string()).is_some();
        if let Some(duplicates) = self.duplicates.as_mut().filter(|_| existed) {
            duplicates.record_bmp(id);
        }
    }

    fn set_message(&mut self, track: Track, channel: Channel, message: &[u8]) {
        let existed = self.bms.timeline.insert(track, channel, message.to_vec());
        if let Some(duplicates) = self.duplicates.as_mut().filter(|_| existed) {
            duplicates.record_message(track, channel);
        }
    }

    fn finish(self) -> Result<Bms, DuplicateDefinitions> {
        match self.duplicates {
            Some(duplicates) => duplicates.check().map(|()| self.bms),
            None => Ok(self.bms),
        }
    }
}

impl Bms {
    /// Parses a token stream into [`Bms`].
    ///
    /// # Errors
    ///
    /// Fails with [`BmsError::Parse`] at the first definition which the definition table of
    /// the configuration rejects. With [`StrictFlag::DuplicateDefinition`], fails with
    /// [`BmsError::Duplicate`] if anything was assigned more than once. That error collects
    /// all of them in the stream.
    pub fn from_token_stream<'a: 'b, 'b>(
        tokens: impl IntoIterator<Item = &'b TokenWithRange<'a>>,
        config: &ParseConfig<'_>,
    ) -> Result<Self, BmsError> {
        let mut builder = BmsBuilder::new(config);
        for token in tokens {
            builder.apply(token)?;
        }
        Ok(builder.finish()?)
    }
}
