//! Canonical textual notation for ids, events, and stamps.
//!
//! Grammar, with no whitespace anywhere:
//!
//! ```text
//! id    := '0' | '1' | '(' id ',' id ')'
//! event := uint | '(' uint ',' event ',' event ')'
//! stamp := '(' id ',' event ')'
//! ```
//!
//! Printing emits canonical form and parsing accepts only canonical
//! trees, so `to_string` and `parse` are exact inverses.

use crate::error::ParseError;
use crate::event::EventTree;
use crate::id::IdTree;
use crate::stamp::Stamp;
use std::fmt;
use std::str::FromStr;

impl fmt::Display for IdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdTree::Zero => write!(f, "0"),
            IdTree::One => write!(f, "1"),
            IdTree::Node(l, r) => write!(f, "({},{})", l, r),
        }
    }
}

impl fmt::Display for EventTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTree::Leaf(n) => write!(f, "{}", n),
            EventTree::Node(n, l, r) => write!(f, "({},{},{})", n, l, r),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.id(), self.event_tree())
    }
}

/// Byte cursor over the input with position-carrying errors.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::Unexpected {
                pos: self.pos,
                expected,
            }),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    fn uint(&mut self) -> Result<u64, ParseError> {
        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
                .ok_or(ParseError::CounterOverflow { pos: start })?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(_) => ParseError::Unexpected {
                    pos: self.pos,
                    expected: "a decimal counter",
                },
                None => ParseError::UnexpectedEnd {
                    expected: "a decimal counter",
                },
            });
        }
        Ok(value)
    }

    // Trees are rebuilt verbatim (raw variants, not the canonicalizing
    // constructors) so non-canonical input is detected, not repaired.

    fn id(&mut self) -> Result<IdTree, ParseError> {
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(IdTree::Zero)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(IdTree::One)
            }
            Some(b'(') => {
                self.pos += 1;
                let l = self.id()?;
                self.expect(b',', "','")?;
                let r = self.id()?;
                self.expect(b')', "')'")?;
                Ok(IdTree::Node(Box::new(l), Box::new(r)))
            }
            Some(_) => Err(ParseError::Unexpected {
                pos: self.pos,
                expected: "'0', '1' or '('",
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: "'0', '1' or '('",
            }),
        }
    }

    fn event(&mut self) -> Result<EventTree, ParseError> {
        if self.peek() == Some(b'(') {
            self.pos += 1;
            let n = self.uint()?;
            self.expect(b',', "','")?;
            let l = self.event()?;
            self.expect(b',', "','")?;
            let r = self.event()?;
            self.expect(b')', "')'")?;
            Ok(EventTree::Node(n, Box::new(l), Box::new(r)))
        } else {
            Ok(EventTree::Leaf(self.uint()?))
        }
    }

    fn finish(&self) -> Result<(), ParseError> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(ParseError::Trailing { pos: self.pos })
        }
    }
}

impl FromStr for IdTree {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        let mut cursor = Cursor::new(input);
        let id = cursor.id()?;
        cursor.finish()?;
        if !id.is_normal() {
            return Err(ParseError::NotCanonical);
        }
        Ok(id)
    }
}

impl FromStr for EventTree {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        let mut cursor = Cursor::new(input);
        let event = cursor.event()?;
        cursor.finish()?;
        if !event.is_normal() {
            return Err(ParseError::NotCanonical);
        }
        Ok(event)
    }
}

impl FromStr for Stamp {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        let mut cursor = Cursor::new(input);
        cursor.expect(b'(', "'('")?;
        let id = cursor.id()?;
        cursor.expect(b',', "','")?;
        let event = cursor.event()?;
        cursor.expect(b')', "')'")?;
        cursor.finish()?;
        if !id.is_normal() || !event.is_normal() {
            return Err(ParseError::NotCanonical);
        }
        Ok(Stamp::new(id, event))
    }
}
