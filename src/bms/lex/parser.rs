//! Grammars of command lines.
//!
//! A command line is `#` and one of the five kinds of command, optionally indented by spaces or
//! tabs. Each kind is recognized by a [`LineGrammar`]. All of them are tried on the line and
//! the one which consumed the most input wins; an earlier one wins only on a tie. So a grammar
//! matching just a prefix of the line never shadows another matching the whole line.

use itertools::Itertools;

use crate::bms::{
    command::{
        ObjId,
        channel::Channel,
        hex2_to_byte,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::Track,
    },
    definition::{ArgKind, DefValue, Definition, DefinitionTable},
};

use super::{
    CommandKind, LexError, LexErrorWithRange, Result,
    cursor::{Cursor, CursorCheckpoint, is_blank},
    token::{Token, TokenWithRange},
};

/// A recognizer of a kind of command line.
pub trait LineGrammar {
    /// The kind of command this recognizes.
    fn kind(&self) -> CommandKind;

    /// Attempts to read the command following `#` from the cursor.
    ///
    /// Returns `None` if the line does not have the shape of this kind, or `Some(Err(_))` if it
    /// has the shape but an argument is rejected. Either way, the position of the cursor after
    /// the call tells how far it matched.
    fn try_parse<'a>(&self, cursor: &mut Cursor<'a>) -> Option<Result<Token<'a>>>;
}

/// Tries every attempt from the same position and keeps the one that moved the cursor the furthest.
///
/// The cursor is left at the end of the kept match, or at the start if nothing matched.
fn longest_match<'a, T, F>(
    cursor: &mut Cursor<'a>,
    attempts: impl IntoIterator<Item = F>,
) -> Option<T>
where
    F: FnOnce(&mut Cursor<'a>) -> Option<T>,
{
    let start = cursor.save_checkpoint();
    let mut best: Option<(CursorCheckpoint, T)> = None;
    for attempt in attempts {
        cursor.restore_checkpoint(start);
        let Some(outcome) = attempt(cursor) else {
            continue;
        };
        let end = cursor.save_checkpoint();
        if best
            .as_ref()
            .is_none_or(|(best_end, _)| best_end.index < end.index)
        {
            best = Some((end, outcome));
        }
    }
    let (end, outcome) = best.map_or((start, None), |(end, outcome)| (end, Some(outcome)));
    cursor.restore_checkpoint(end);
    outcome
}

const fn is_keyword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Reads the keyword ignoring case, which must not be followed by another keyword character.
fn eat_keyword<'a>(cursor: &mut Cursor<'a>, keyword: &str) -> Option<&'a str> {
    let start = cursor.save_checkpoint();
    let matched = cursor.eat_ignore_case(keyword)?;
    if cursor.peek_char().is_some_and(is_keyword_char) {
        cursor.restore_checkpoint(start);
        return None;
    }
    Some(matched)
}

fn eat_hex2<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    cursor.eat_exact(2, |c| c.is_ascii_hexdigit())
}

/// `#ENDIF`, followed by optional spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndIfGrammar;

impl LineGrammar for EndIfGrammar {
    fn kind(&self) -> CommandKind {
        CommandKind::EndIf
    }

    fn try_parse<'a>(&self, cursor: &mut Cursor<'a>) -> Option<Result<Token<'a>>> {
        eat_keyword(cursor, "endif")?;
        cursor.eat_blanks();
        Some(Ok(Token::EndIf))
    }
}

/// `#[keyword] [value]` for every keyword in a [`DefinitionTable`].
#[derive(Debug, Clone, Copy)]
pub struct DefinitionGrammar<'t> {
    table: &'t DefinitionTable,
}

impl<'t> DefinitionGrammar<'t> {
    /// Creates the grammar accepting the keywords of the table.
    #[must_use]
    pub const fn new(table: &'t DefinitionTable) -> Self {
        Self { table }
    }

    fn try_parse_one<'a>(
        cursor: &mut Cursor<'a>,
        definition: &Definition,
    ) -> Option<Result<Token<'a>>> {
        let keyword = eat_keyword(cursor, &definition.keyword)?;
        if !cursor.eat_separator() {
            return None;
        }
        let value = read_argument(cursor, keyword, &definition.kind)?;
        Some(value.map(|value| Token::Definition {
            keyword: keyword.into(),
            value,
        }))
    }
}

impl LineGrammar for DefinitionGrammar<'_> {
    fn kind(&self) -> CommandKind {
        CommandKind::Definition
    }

    fn try_parse<'a>(&self, cursor: &mut Cursor<'a>) -> Option<Result<Token<'a>>> {
        longest_match(
            cursor,
            self.table
                .iter()
                .map(|definition| move |c: &mut Cursor<'a>| Self::try_parse_one(c, definition)),
        )
    }
}

/// Reads the value of a definition by its kind.
fn read_argument<'a>(
    cursor: &mut Cursor<'a>,
    keyword: &str,
    kind: &ArgKind,
) -> Option<Result<DefValue<'a>>> {
    if *kind == ArgKind::Text {
        let text = cursor.eat_rest();
        return (!text.is_empty()).then(|| Ok(DefValue::Text(text.into())));
    }
    cursor.eat_blanks();
    let digits = cursor.eat_while(|c| c.is_ascii_digit());
    if digits.is_empty() {
        return None;
    }
    cursor.eat_blanks();
    let out_of_domain = |expected: String| LexError::OutOfDomain {
        keyword: keyword.to_ascii_lowercase(),
        value: digits.to_string(),
        expected,
    };
    let Ok(value) = digits.parse::<i64>() else {
        return Some(Err(out_of_domain("a 64-bit integer".to_string())));
    };
    let checked = match kind {
        ArgKind::Int {
            max_width: Some(width),
        } if digits.len() > *width => Err(out_of_domain(format!("at most {width} digits"))),
        ArgKind::Enum(members) if !members.contains(&value) => Err(out_of_domain(format!(
            "one of {}",
            members.iter().join(", ")
        ))),
        _ => Ok(DefValue::Integer(value)),
    };
    Some(checked)
}

/// `#WAVxx [name]` or `#BMPxx [name]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceGrammar {
    kind: CommandKind,
}

impl ResourceGrammar {
    /// The grammar of `#WAVxx`.
    pub const WAV: Self = Self {
        kind: CommandKind::Wav,
    };
    /// The grammar of `#BMPxx`.
    pub const BMP: Self = Self {
        kind: CommandKind::Bmp,
    };
}

impl LineGrammar for ResourceGrammar {
    fn kind(&self) -> CommandKind {
        self.kind
    }

    fn try_parse<'a>(&self, cursor: &mut Cursor<'a>) -> Option<Result<Token<'a>>> {
        let literal = match self.kind {
            CommandKind::Bmp => "bmp",
            _ => "wav",
        };
        cursor.eat_ignore_case(literal)?;
        let id = ObjId::try_from(eat_hex2(cursor)?).ok()?;
        if !cursor.eat_separator() {
            return None;
        }
        let name = cursor.eat_rest();
        if name.is_empty() {
            return None;
        }
        Some(Ok(match self.kind {
            CommandKind::Bmp => Token::Bmp(id, name.into()),
            _ => Token::Wav(id, name.into()),
        }))
    }
}

/// `#XXXYY:ZZ...`, 3 decimal digits of track, 2 characters of channel, `:` and pairs of hexadecimal digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageGrammar;

impl LineGrammar for MessageGrammar {
    fn kind(&self) -> CommandKind {
        CommandKind::Message
    }

    fn try_parse<'a>(&self, cursor: &mut Cursor<'a>) -> Option<Result<Token<'a>>> {
        let track = Track::try_from(cursor.eat_exact(3, |c| c.is_ascii_digit())?).ok()?;
        let channel_code = cursor.eat_exact(2, |c| c != ':' && !is_blank(c))?;
        if !cursor.eat_char(':') {
            return None;
        }
        let Ok(channel) = Channel::try_from(channel_code) else {
            cursor.eat_rest();
            return Some(Err(LexError::UnknownChannel {
                channel: channel_code.to_string(),
            }));
        };
        let mut message = Vec::new();
        while let Some(byte) = eat_hex2(cursor).and_then(hex2_to_byte) {
            message.push(byte);
        }
        if message.is_empty() {
            return None;
        }
        Some(Ok(Token::Message {
            track,
            channel,
            message,
        }))
    }
}

/// The set of recognizers for every kind of command line.
pub struct Grammar<'t> {
    grammars: Vec<Box<dyn LineGrammar + 't>>,
}

impl std::fmt::Debug for Grammar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.grammars.iter().map(|grammar| grammar.kind()))
            .finish()
    }
}

impl<'t> Grammar<'t> {
    /// Builds the grammars of `#ENDIF`, the definitions in the table, `#WAVxx`, `#BMPxx` and messages, in this order.
    #[must_use]
    pub fn new(table: &'t DefinitionTable) -> Self {
        Self {
            grammars: vec![
                Box::new(EndIfGrammar),
                Box::new(DefinitionGrammar::new(table)),
                Box::new(ResourceGrammar::WAV),
                Box::new(ResourceGrammar::BMP),
                Box::new(MessageGrammar),
            ],
        }
    }

    /// Classifies the line into a token.
    ///
    /// # Errors
    ///
    /// Fails if the line starts with `#` but no grammar matches the whole line, or an argument is out of its domain.
    pub fn classify<'a>(
        &self,
        line: SourceRangeMixin<&'a str>,
    ) -> core::result::Result<TokenWithRange<'a>, LexErrorWithRange> {
        let text = *line.content();
        let mut cursor = Cursor::new(text, line.start());
        cursor.eat_blanks();
        if !cursor.eat_char('#') {
            let comment = Token::Comment(text.into());
            return Ok(comment.into_wrapper(&line));
        }
        cursor.eat_blanks();
        let command_start = cursor.index();
        let attempts = self.grammars.iter().map(|grammar| {
            move |c: &mut Cursor<'a>| grammar.try_parse(c).map(|outcome| (grammar.kind(), outcome))
        });
        let Some((kind, outcome)) = longest_match(&mut cursor, attempts) else {
            return Err(LexError::UnknownCommand {
                command: cursor.rest().to_string(),
            }
            .into_wrapper_range(command_start..line.end()));
        };
        let token = outcome.map_err(|err| err.into_wrapper_range(command_start..cursor.index()))?;
        if !cursor.is_end() {
            return Err(LexError::TrailingInput {
                kind,
                trailing: cursor.rest().to_string(),
            }
            .into_wrapper_range(cursor.index()..cursor.line_end()));
        }
        Ok(token.into_wrapper(&line))
    }
}
