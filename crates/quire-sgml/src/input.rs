//! Character sources and the entity-expansion input stack.

use core::fmt;
use std::io::{self, BufRead};
use std::str::Chars;

/// A blocking, pull-based supply of characters.
///
/// The caller owns the source; the parser only reads from it.
pub trait CharSource {
    /// The next character, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Any I/O failure of the underlying input.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// Characters from an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Read from `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Characters decoded incrementally from UTF-8 bytes.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
}

impl<R: BufRead> ReadSource<R> {
    /// Decode from `reader`.
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.reader.fill_buf()?.first() {
            Some(&byte) => byte,
            None => return Ok(None),
        };
        self.reader.consume(1);
        Ok(Some(byte))
    }
}

fn invalid_utf8(detail: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("invalid UTF-8: {detail}"))
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };
        let width = match lead {
            0x00..=0x7F => return Ok(Some(char::from(lead))),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(invalid_utf8(&format!("unexpected byte 0x{lead:02X}"))),
        };

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self
                .next_byte()?
                .ok_or_else(|| invalid_utf8("truncated sequence at end of input"))?;
        }
        core::str::from_utf8(&bytes[..width])
            .map_err(|e| invalid_utf8(&e.to_string()))?
            .chars()
            .next()
            .map_or_else(|| Err(invalid_utf8("empty sequence")), |c| Ok(Some(c)))
    }
}

/// Why an entity could not be expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionRefused {
    /// The entity is already being expanded further out.
    Recursive,
    /// Expanding it would nest deeper than the configured limit.
    TooDeep {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for ExpansionRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => write!(f, "it refers to itself"),
            Self::TooDeep { limit } => write!(f, "expansions nest deeper than {limit}"),
        }
    }
}

/// Replacement text being read in place of an entity reference.
///
/// Frames without a name hold characters that were read ahead and pushed
/// back when a new entity frame was opened on top of them.
#[derive(Debug)]
struct Frame {
    entity: Option<String>,
    text: Vec<char>,
    position: usize,
}

/// The caller's source plus a stack of entity expansions, with one
/// character of pushback.
///
/// Reads are served from the pushback cell, then the innermost unexhausted
/// frame, then the caller's source. Exhausted frames are popped lazily,
/// except while [`hold_exhausted`](Self::hold_exhausted) is set.
pub struct InputStack<'s> {
    source: &'s mut dyn CharSource,
    frames: Vec<Frame>,
    pushback: Option<char>,
    line: usize,
    /// A source line end that was peeked but not yet consumed.
    pending_line_end: bool,
    max_depth: usize,
    holding: bool,
}

impl fmt::Debug for InputStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStack")
            .field("frames", &self.frames)
            .field("pushback", &self.pushback)
            .field("line", &self.line)
            .field("holding", &self.holding)
            .finish_non_exhaustive()
    }
}

impl<'s> InputStack<'s> {
    /// Read from `source`, allowing at most `max_depth` nested entities.
    pub fn new(source: &'s mut dyn CharSource, max_depth: usize) -> Self {
        Self {
            source,
            frames: Vec::new(),
            pushback: None,
            line: 1,
            pending_line_end: false,
            max_depth,
            holding: false,
        }
    }

    /// The next character.
    ///
    /// # Errors
    ///
    /// I/O failures of the caller's source.
    pub fn read(&mut self) -> io::Result<Option<char>> {
        let next = self.read_ahead()?;
        if std::mem::take(&mut self.pending_line_end) {
            self.line += 1;
        }
        Ok(next)
    }

    /// The next character, left in place.
    ///
    /// A source line end seen this way is only counted once it is read.
    ///
    /// # Errors
    ///
    /// I/O failures of the caller's source.
    pub fn peek(&mut self) -> io::Result<Option<char>> {
        let next = self.read_ahead()?;
        if let Some(c) = next {
            self.unread(c);
        }
        Ok(next)
    }

    fn read_ahead(&mut self) -> io::Result<Option<char>> {
        if let Some(c) = self.pushback.take() {
            return Ok(Some(c));
        }
        if self.holding {
            for frame in self.frames.iter_mut().rev() {
                if let Some(&c) = frame.text.get(frame.position) {
                    frame.position += 1;
                    return Ok(Some(c));
                }
            }
        } else {
            while let Some(frame) = self.frames.last_mut() {
                if let Some(&c) = frame.text.get(frame.position) {
                    frame.position += 1;
                    return Ok(Some(c));
                }
                let _ = self.frames.pop();
            }
        }
        let next = self.source.next_char()?;
        if next == Some('\n') {
            self.pending_line_end = true;
        }
        Ok(next)
    }

    /// While set, exhausted entity frames stay on the stack and reads pass
    /// over them. Set for the length of one reference, so a name that runs
    /// past the end of a replacement text still counts as inside it.
    pub const fn hold_exhausted(&mut self, holding: bool) {
        self.holding = holding;
    }

    /// Push `c` back so the next [`read`](Self::read) returns it.
    pub fn unread(&mut self, c: char) {
        if let Some(previous) = self.pushback.replace(c) {
            self.frames.push(Frame {
                entity: None,
                text: vec![previous],
                position: 0,
            });
        }
    }

    /// Continue reading from `text`, the replacement text of entity `name`,
    /// until it is exhausted.
    ///
    /// # Errors
    ///
    /// Refuses an entity that is already being expanded, and an expansion
    /// that would nest deeper than the limit. Nothing is pushed then.
    pub fn push_entity(&mut self, name: &str, text: &str) -> Result<(), ExpansionRefused> {
        if self
            .frames
            .iter()
            .any(|frame| frame.entity.as_deref() == Some(name))
        {
            return Err(ExpansionRefused::Recursive);
        }
        if self.depth() >= self.max_depth {
            return Err(ExpansionRefused::TooDeep {
                limit: self.max_depth,
            });
        }

        // A read-ahead character comes after the replacement text.
        if let Some(c) = self.pushback.take() {
            self.frames.push(Frame {
                entity: None,
                text: vec![c],
                position: 0,
            });
        }
        self.frames.push(Frame {
            entity: Some(name.to_string()),
            text: text.chars().collect(),
            position: 0,
        });
        Ok(())
    }

    /// Number of entity expansions currently open.
    ///
    /// An expansion whose text has been read to the end still counts until
    /// a read moves past it (or, while held, until the hold is released), so
    /// a reference at the very end of a replacement text nests inside its
    /// entity.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.entity.is_some())
            .count()
    }

    /// 1-based line number in the caller's source.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}
