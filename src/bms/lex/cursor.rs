//! A cursor scanning inside a line of the source.

/// Represents a checkpoint state of the cursor that can be saved and restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCheckpoint {
    /// The index position in the line.
    pub index: usize,
}

/// Whether the character is a horizontal whitespace, which separates arguments.
pub(crate) const fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub struct Cursor<'a> {
    /// The line being scanned, without the line break.
    line: &'a str,
    /// The byte offset of the line in the whole source.
    offset: usize,
    /// The index position in the line.
    index: usize,
}

impl<'a> Cursor<'a> {
    pub const fn new(line: &'a str, offset: usize) -> Self {
        Self {
            line,
            offset,
            index: 0,
        }
    }

    /// Returns the current byte index in the whole source.
    pub const fn index(&self) -> usize {
        self.offset + self.index
    }

    /// Returns the byte index of the line end in the whole source.
    pub const fn line_end(&self) -> usize {
        self.offset + self.line.len()
    }

    pub const fn is_end(&self) -> bool {
        self.index >= self.line.len()
    }

    /// Returns the remaining part of this line without moving.
    pub fn rest(&self) -> &'a str {
        &self.line[self.index..]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, len: usize) -> &'a str {
        let ret = &self.line[self.index..self.index + len];
        self.index += len;
        ret
    }

    /// Moves through the character if it comes next.
    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance(expected.len_utf8());
            true
        } else {
            false
        }
    }

    /// Moves through the literal if it comes next, ignoring ASCII case. Returns the text as written.
    pub fn eat_ignore_case(&mut self, literal: &str) -> Option<&'a str> {
        self.rest()
            .get(..literal.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(literal))
            .then(|| self.advance(literal.len()))
    }

    /// Moves through characters while the predicate holds.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let len = self.rest().find(|c: char| !pred(c)).unwrap_or(self.rest().len());
        self.advance(len)
    }

    /// Moves through exactly `count` characters, only if all of them satisfy the predicate.
    pub fn eat_exact(&mut self, count: usize, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let mut len = 0;
        let mut chars = self.rest().chars();
        for _ in 0..count {
            let c = chars.next().filter(|&c| pred(c))?;
            len += c.len_utf8();
        }
        Some(self.advance(len))
    }

    /// Moves through spaces and tabs.
    pub fn eat_blanks(&mut self) -> &'a str {
        self.eat_while(is_blank)
    }

    /// Moves through a single space or tab, not a run of them.
    pub fn eat_separator(&mut self) -> bool {
        self.eat_char(' ') || self.eat_char('\t')
    }

    /// Moves through and returns the remaining part of this line.
    pub fn eat_rest(&mut self) -> &'a str {
        self.advance(self.line.len() - self.index)
    }

    /// Save the current cursor state as a checkpoint.
    pub const fn save_checkpoint(&self) -> CursorCheckpoint {
        CursorCheckpoint { index: self.index }
    }

    /// Restore the cursor state from a checkpoint.
    pub const fn restore_checkpoint(&mut self, checkpoint: CursorCheckpoint) {
        self.index = checkpoint.index;
    }
}

#[test]
fn test_eat() {
    let mut cursor = Cursor::new("  #wAv0A\tfoo bar.wav", 10);

    assert_eq!(cursor.eat_blanks(), "  ");
    assert!(cursor.eat_char('#'));
    assert!(!cursor.eat_char('#'));
    assert_eq!(cursor.eat_ignore_case("wave"), None);
    assert_eq!(cursor.eat_ignore_case("WAV"), Some("wAv"));
    assert_eq!(cursor.eat_exact(3, |c| c.is_ascii_hexdigit()), None);
    assert_eq!(cursor.eat_exact(2, |c| c.is_ascii_hexdigit()), Some("0A"));
    assert_eq!(cursor.index(), 18);
    assert!(cursor.eat_separator());
    assert!(!cursor.eat_separator());
    assert_eq!(cursor.eat_rest(), "foo bar.wav");
    assert!(cursor.is_end());
    assert_eq!(cursor.index(), cursor.line_end());
    assert_eq!(cursor.eat_rest(), "");
}

#[test]
fn test_multibyte() {
    let mut cursor = Cursor::new("GENRE 音楽", 0);

    assert_eq!(cursor.eat_ignore_case("genre"), Some("GENRE"));
    assert!(cursor.eat_separator());
    assert_eq!(cursor.eat_ignore_case("音"), Some("音"));
    assert_eq!(cursor.eat_ignore_case("音楽"), None);
    assert_eq!(cursor.peek_char(), Some('楽'));
    assert_eq!(cursor.eat_exact(1, |_| true), Some("楽"));
    assert_eq!(cursor.peek_char(), None);
}

#[test]
fn test_checkpoint_functionality() {
    let mut cursor = Cursor::new("00211:0303", 0);

    let start = cursor.save_checkpoint();
    assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), "00211");
    let mid = cursor.save_checkpoint();
    assert!(cursor.eat_char(':'));
    assert_eq!(cursor.rest(), "0303");

    cursor.restore_checkpoint(mid);
    assert_eq!(cursor.rest(), ":0303");
    cursor.restore_checkpoint(start);
    assert_eq!(cursor.rest(), "00211:0303");
}
