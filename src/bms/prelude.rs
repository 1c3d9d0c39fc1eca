//! Prelude module for the BMS crate.
//!
//! This module re-exports all public types from the BMS module for convenient access.
//! You can use `use bms_grammar::bms::prelude::*;` to import all BMS types at once.

// Re-export diagnostics from crate level
#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, collect_bms_reports, emit_bms_error};

// Re-export types from bms module
pub use super::{
    BmsError,
    command::{
        ObjId,
        channel::Channel,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::Track,
    },
    definition::{
        ArgKind, DefValue, Definition, DefinitionTable, DefinitionTableError,
        DefinitionTableErrorKind,
    },
    lex::{
        CommandKind, Grammar, LexError, LexErrorWithRange, LineSplitter, TokenStream,
        token::{Token, TokenWithRange},
    },
    model::{Bms, Metadata, Resources, Timeline},
    parse::{
        ParseConfig, ParseError, ParseErrorWithRange, StrictFlag, default_config,
        duplicates::DuplicateDefinitions,
    },
    parse_bms, parse_bms_with_tokens,
};
