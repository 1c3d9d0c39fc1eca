//! The line grammar of BMS format and a parser for it.
//!
//! A BMS source is a sequence of lines. A line starting with `#` is a command: `#ENDIF`, a
//! definition like `#TITLE ...` whose keywords and argument kinds come from a configurable
//! [`DefinitionTable`](bms::definition::DefinitionTable), a resource `#WAVxx`/`#BMPxx`, or a
//! message `#XXXYY:ZZ...` of the note timeline. Any other line is a comment.
//!
//! # Usage
//!
//! - Call [`bms::parse_bms`] with [`bms::default_config`] to parse a source at once.
//! - Tune [`bms::ParseConfig`] to use your own definition table or report duplicated definitions.
//! - Enable `diagnostics` feature (on by default) to render errors by [`diagnostics`].
//!
//! ```rust
//! use bms_grammar::bms::{StrictFlag, default_config, definition::DefinitionTable, parse_bms};
//!
//! let table: DefinitionTable = "title#text\nbpm#int\nplayer#enum 1 2 3".parse().unwrap();
//! let config = default_config()
//!     .definitions(&table)
//!     .strict(StrictFlag::DuplicateDefinition);
//! let bms = parse_bms("#TITLE one\n#BPM 150\n#TITLE two", &config);
//! assert!(bms.is_err());
//! ```
//!
//! # Features
//!
//! - `diagnostics`: Reports errors through `ariadne`.
//! - `serde`: Serialization and deserialization of tokens, documents and errors.

pub mod bms;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
