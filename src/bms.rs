//! The parser module of BMS(.bms/.bme/.bml/.pms) file.
//!
//! This module consists of two phases: lexical analyzing and token parsing.
//!
//! `lex` module splits the source into lines and classifies every line into a [`Token`](lex::token::Token) by the
//! longest match among the line grammars: `#ENDIF`, the definitions of a [`DefinitionTable`](definition::DefinitionTable),
//! `#WAVxx`, `#BMPxx` and messages `#XXXYY:ZZ...`. A line not starting with `#` is a comment.
//!
//! `parse` module applies the tokens in order to build a [`Bms`] document, optionally reporting
//! everything assigned more than once.
//!
//! In detail, our policies are:
//!
//! - Support only UTF-8 (as required `&str` to input).
//! - Keywords of commands are case-insensitive, but arguments are kept as written.
//! - Reject a whole source on the first malformed command line, never emit a partial document.
//! - Do not evaluate `#RANDOM` and `#IF`, they are stored as plain definitions.
//!
//! # Usage Example
//!
//! ```rust
//! use bms_grammar::bms::{default_config, parse_bms};
//!
//! let source = "#TITLE Sample\n#PLAYER 1\n#WAV01 kick.wav\n#00111:01";
//! let bms = parse_bms(source, &default_config()).unwrap();
//! assert_eq!(bms.metadata.title(), "Sample");
//! assert_eq!(bms.commands.len(), 4);
//! ```

pub mod command;
pub mod definition;
pub mod lex;
pub mod model;
pub mod parse;
pub mod prelude;

use thiserror::Error;

use self::{
    lex::{LexErrorWithRange, TokenStream},
    parse::{ParseErrorWithRange, duplicates::DuplicateDefinitions},
};

pub use self::{
    model::Bms,
    parse::{ParseConfig, StrictFlag, default_config},
};

/// An error occurred when parsing the BMS format file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BmsError {
    /// An error comes from lexical analyzer.
    #[error("Error: lex: {0}")]
    Lex(#[from] LexErrorWithRange),
    /// A definition which the definition table of [`ParseConfig`] rejects.
    #[error("Error: parse: {0}")]
    Parse(#[from] ParseErrorWithRange),
    /// Duplicates found under [`StrictFlag::DuplicateDefinition`].
    #[error("Error: strict: {0}")]
    Duplicate(#[from] DuplicateDefinitions),
}

/// Parses a BMS source into [`Bms`].
///
/// # Errors
///
/// Fails at the first malformed command line, or on duplicates if
/// [`StrictFlag::DuplicateDefinition`] is on. Nothing of the source is returned then.
pub fn parse_bms(source: &str, config: &ParseConfig<'_>) -> Result<Bms, BmsError> {
    let tokens = TokenStream::parse_lex(source, &config.grammar())?;
    parse_bms_with_tokens(&tokens, config)
}

/// Parses [`Bms`] from an already lexed [`TokenStream`].
///
/// # Errors
///
/// Fails if a definition is rejected by the definition table of `config`, or on duplicates if
/// [`StrictFlag::DuplicateDefinition`] is on.
pub fn parse_bms_with_tokens(
    tokens: &TokenStream<'_>,
    config: &ParseConfig<'_>,
) -> Result<Bms, BmsError> {
    Bms::from_token_stream(tokens, config)
}

#[cfg(feature = "diagnostics")]
mod diagnostics {
    use ariadne::{Color, Report, ReportKind};

    use super::BmsError;
    use crate::diagnostics::{SimpleSource, ToAriadne, build_report};

    impl ToAriadne for super::LexErrorWithRange {
        fn to_report<'a>(
            &self,
            src: &SimpleSource<'a>,
        ) -> Report<'a, (String, std::ops::Range<usize>)> {
            build_report(
                src,
                ReportKind::Error,
                self.range(),
                "lex error",
                self.content(),
                Color::Red,
            )
        }
    }

    impl ToAriadne for super::ParseErrorWithRange {
        fn to_report<'a>(
            &self,
            src: &SimpleSource<'a>,
        ) -> Report<'a, (String, std::ops::Range<usize>)> {
            build_report(
                src,
                ReportKind::Error,
                self.range(),
                "parse error",
                self.content(),
                Color::Red,
            )
        }
    }

    impl ToAriadne for super::DuplicateDefinitions {
        fn to_report<'a>(
            &self,
            src: &SimpleSource<'a>,
        ) -> Report<'a, (String, std::ops::Range<usize>)> {
            let filename = src.name().to_string();
            Report::build(ReportKind::Error, (filename, 0..0))
                .with_message(self.to_string())
                .with_note("lines assigning the same target are overwritten in order")
                .finish()
        }
    }

    impl ToAriadne for BmsError {
        fn to_report<'a>(
            &self,
            src: &SimpleSource<'a>,
        ) -> Report<'a, (String, std::ops::Range<usize>)> {
            match self {
                Self::Lex(e) => e.to_report(src),
                Self::Parse(e) => e.to_report(src),
                Self::Duplicate(e) => e.to_report(src),
            }
        }
    }
}
