//! The definition table, which decides what `#KEYWORD value` lines are accepted and how their values are read.
//!
//! A table is an ordered list of keywords, each paired with an [`ArgKind`]. The crate ships a
//! built-in table ([`DefinitionTable::builtin`]), and other tables can be loaded from text with
//! one entry per line:
//!
//! ```text
//! player#enum 1 2 3
//! title#text
//! volwav#int 3
//! ```
//!
//! Every keyword of the table takes part in the longest-match alternation of the lexer together
//! with the other kinds of command line, so the order of entries only breaks ties.

use std::{borrow::Cow, str::FromStr, sync::LazyLock};

use itertools::Itertools;
use thiserror::Error;

use super::model::{FieldType, Metadata};

/// How the value of a definition is read and validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgKind {
    /// Any text until the end of the line, kept verbatim. Must not be empty.
    Text,
    /// A decimal integer, optionally surrounded by spaces or tabs.
    Int {
        /// The maximum count of digits, or unlimited if `None`.
        max_width: Option<usize>,
    },
    /// A decimal integer which must be one of the members.
    Enum(Vec<i64>),
}

impl ArgKind {
    /// Returns whether the value is converted into an integer.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Self::Text)
    }

    /// Returns whether the value could have been read as this kind.
    #[must_use]
    pub fn accepts(&self, value: &DefValue<'_>) -> bool {
        match self {
            Self::Text => value.as_text().is_some_and(|text| !text.is_empty()),
            Self::Int { max_width } => value.as_integer().is_some_and(|value| {
                value >= 0 && max_width.is_none_or(|width| value.to_string().len() <= width)
            }),
            Self::Enum(members) => value
                .as_integer()
                .is_some_and(|value| members.contains(&value)),
        }
    }

    const fn field_type(&self) -> FieldType {
        if self.is_integer() {
            FieldType::Integer
        } else {
            FieldType::Text
        }
    }
}

impl std::fmt::Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Int { max_width: None } => write!(f, "int"),
            Self::Int {
                max_width: Some(width),
            } => write!(f, "int {width}"),
            Self::Enum(members) => write!(f, "enum {}", members.iter().join(" ")),
        }
    }
}

impl FromStr for ArgKind {
    type Err = DefinitionTableErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();
        let params: Vec<&str> = words.collect();
        let invalid = |param: &str| DefinitionTableErrorKind::InvalidParameter {
            descriptor: name.to_string(),
            param: param.to_string(),
        };
        match (name, params.as_slice()) {
            ("text", []) => Ok(Self::Text),
            ("int", []) => Ok(Self::Int { max_width: None }),
            ("int", [width]) => match width.parse() {
                Ok(width) if width > 0 => Ok(Self::Int {
                    max_width: Some(width),
                }),
                _ => Err(invalid(width)),
            },
            ("enum", members) if !members.is_empty() => members
                .iter()
                .map(|member| member.parse().map_err(|_| invalid(member)))
                .collect::<Result<Vec<_>, _>>()
                .map(|members| Self::Enum(members.into_iter().unique().collect())),
            ("text" | "int" | "enum", params) => Err(invalid(&params.join(" "))),
            _ => Err(DefinitionTableErrorKind::UnknownDescriptor(s.trim().to_string())),
        }
    }
}

/// The value of a definition, converted by its [`ArgKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefValue<'a> {
    /// Converted from [`ArgKind::Int`] or [`ArgKind::Enum`].
    Integer(i64),
    /// Converted from [`ArgKind::Text`].
    Text(Cow<'a, str>),
}

impl DefValue<'_> {
    /// Returns the integer value if it is.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text value if it is.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Integer(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Makes the value independent from the source text.
    #[must_use]
    pub fn into_owned(self) -> DefValue<'static> {
        match self {
            Self::Integer(value) => DefValue::Integer(value),
            Self::Text(text) => DefValue::Text(Cow::Owned(text.into_owned())),
        }
    }
}

impl std::fmt::Display for DefValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// An entry of [`DefinitionTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Definition {
    /// The keyword after `#`, stored in lowercase.
    pub keyword: String,
    /// How the value is read.
    pub kind: ArgKind,
}

/// What was wrong in a line of the definition table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DefinitionTableErrorKind {
    /// The line has no `#` between the keyword and the descriptor.
    #[error("expected `keyword#descriptor`")]
    MissingSeparator,
    /// The keyword is empty or has other than ASCII alphanumerics.
    #[error("keyword `{0}` must consist of ASCII alphanumerics")]
    InvalidKeyword(String),
    /// The descriptor is not one of `text`, `int` or `enum`.
    #[error("unknown descriptor `{0}`")]
    UnknownDescriptor(String),
    /// The parameters of the descriptor are malformed.
    #[error("invalid parameter `{param}` for descriptor `{descriptor}`")]
    InvalidParameter {
        /// The name of the descriptor.
        descriptor: String,
        /// The parameter rejected.
        param: String,
    },
    /// The keyword is already in the table.
    #[error("keyword `{0}` is defined twice")]
    DuplicateKeyword(String),
    /// The keyword names a metadata field which can not hold the kind of value.
    #[error("keyword `{keyword}` can not be read as `{kind}`")]
    IncompatibleKind {
        /// The keyword of the field.
        keyword: String,
        /// The kind requested.
        kind: ArgKind,
    },
}

/// An error occurred when loading a [`DefinitionTable`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("definition table line {line}: {kind}")]
pub struct DefinitionTableError {
    /// The line number, starts with 1.
    pub line: usize,
    /// What was wrong.
    pub kind: DefinitionTableErrorKind,
}

/// The ordered list of definition keywords accepted by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinitionTable {
    entries: Vec<Definition>,
}

static BUILTIN: LazyLock<DefinitionTable> = LazyLock::new(DefinitionTable::default);

impl Default for DefinitionTable {
    /// The built-in table:
    ///
    /// | keyword     | kind            |
    /// | ----------- | --------------- |
    /// | `player`    | `enum 1 2 3`    |
    /// | `genre`     | `text`          |
    /// | `title`     | `text`          |
    /// | `artist`    | `text`          |
    /// | `bpm`       | `int`           |
    /// | `midifile`  | `text`          |
    /// | `playlevel` | `int`           |
    /// | `rank`      | `enum 0 1 2 3`  |
    /// | `volwav`    | `int 3`         |
    /// | `random`    | `int`           |
    /// | `if`        | `int`           |
    fn default() -> Self {
        const INT: ArgKind = ArgKind::Int { max_width: None };
        let entries = [
            ("player", ArgKind::Enum(vec![1, 2, 3])),
            ("genre", ArgKind::Text),
            ("title", ArgKind::Text),
            ("artist", ArgKind::Text),
            ("bpm", INT),
            ("midifile", ArgKind::Text),
            ("playlevel", INT),
            ("rank", ArgKind::Enum(vec![0, 1, 2, 3])),
            ("volwav", ArgKind::Int { max_width: Some(3) }),
            ("random", INT),
            ("if", INT),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(keyword, kind)| Definition {
                    keyword: keyword.to_string(),
                    kind,
                })
                .collect(),
        }
    }
}

impl DefinitionTable {
    /// Returns the shared built-in table. See [`DefinitionTable::default`] for its contents.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Creates an empty table, which accepts no definitions.
    #[must_use]
    pub const fn empty() -> Self {
        Self { entries: vec![] }
    }

    /// Appends an entry into the table.
    ///
    /// # Errors
    ///
    /// Fails if the keyword is malformed, already present, or names a metadata field of another type.
    pub fn push(
        &mut self,
        keyword: &str,
        kind: ArgKind,
    ) -> Result<&mut Self, DefinitionTableErrorKind> {
        if keyword.is_empty() || !keyword.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(DefinitionTableErrorKind::InvalidKeyword(keyword.to_string()));
        }
        let keyword = keyword.to_ascii_lowercase();
        if self.get(&keyword).is_some() {
            return Err(DefinitionTableErrorKind::DuplicateKeyword(keyword));
        }
        if Metadata::field_type(&keyword).is_some_and(|field| field != kind.field_type()) {
            return Err(DefinitionTableErrorKind::IncompatibleKind { keyword, kind });
        }
        self.entries.push(Definition { keyword, kind });
        Ok(self)
    }

    /// Finds the kind of the keyword, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&ArgKind> {
        self.entries
            .iter()
            .find(|def| def.keyword.eq_ignore_ascii_case(keyword))
            .map(|def| &def.kind)
    }

    /// Iterates the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.entries.iter()
    }

    /// Returns the count of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DefinitionTable {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for DefinitionTable {
    type Err = DefinitionTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = Self::empty();
        for (index, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let at_line = |kind| DefinitionTableError {
                line: index + 1,
                kind,
            };
            let (keyword, descriptor) = line
                .split_once('#')
                .ok_or_else(|| at_line(DefinitionTableErrorKind::MissingSeparator))?;
            let kind = descriptor.parse().map_err(at_line)?;
            table.push(keyword.trim(), kind).map_err(at_line)?;
        }
        Ok(table)
    }
}
