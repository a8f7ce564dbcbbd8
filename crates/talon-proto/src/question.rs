//! DNS question section.
//!
//! Each question names the record set being asked for: a domain name, a
//! query type, and a query class.
//!
//! # Wire Format
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! /                     QNAME                     /
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                     QTYPE                     |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                     QCLASS                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

use crate::class::{Class, RecordClass};
use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DNS question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The domain name being queried.
    pub qname: Name,

    /// The type of record being requested.
    pub qtype: Type,

    /// The class of the query (almost always IN).
    pub qclass: Class,
}

impl Question {
    /// Creates a new question for a known type and class.
    #[inline]
    pub fn new(qname: Name, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            qname,
            qtype: Type::Known(qtype),
            qclass: Class::Known(qclass),
        }
    }

    /// Creates a question for an A record lookup.
    #[inline]
    pub fn a(name: Name) -> Self {
        Self::new(name, RecordType::A, RecordClass::IN)
    }

    /// Creates a question for an AAAA record lookup.
    #[inline]
    pub fn aaaa(name: Name) -> Self {
        Self::new(name, RecordType::AAAA, RecordClass::IN)
    }

    /// Creates a question for an MX record lookup.
    #[inline]
    pub fn mx(name: Name) -> Self {
        Self::new(name, RecordType::MX, RecordClass::IN)
    }

    /// Creates a question for a PTR (reverse DNS) lookup.
    #[inline]
    pub fn ptr(name: Name) -> Self {
        Self::new(name, RecordType::PTR, RecordClass::IN)
    }

    /// Decodes a question from the message at the given offset.
    ///
    /// Returns the question and the number of bytes it occupies.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (qname, name_len) = NameParser::new(data).parse_name(offset)?;

        let mut rd = WireReader::at(data, offset + name_len)?;
        let qtype = Type::from_u16(rd.read_u16()?);
        let qclass = Class::from_u16(rd.read_u16()?);

        Ok((
            Self {
                qname,
                qtype,
                qclass,
            },
            name_len + 4,
        ))
    }

    /// Returns the wire format length (uncompressed).
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.qname.wire_len() + 4
    }

    /// Appends the question to a buffer, name uncompressed.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.qname.write_wire(buf);
        self.write_fields_to(buf);
    }

    /// Appends everything after the name; the compressing message encoder
    /// writes the name itself.
    pub(crate) fn write_fields_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_u16().to_be_bytes());
    }

    /// Encodes the question to wire format bytes.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut buf);
        buf.to_vec()
    }

    /// Returns true if this question matches another, name compared
    /// case-insensitively and type/class exactly.
    pub fn matches(&self, other: &Question) -> bool {
        self.qname == other.qname && self.qtype == other.qtype && self.qclass == other.qclass
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.qname, self.qclass, self.qtype)
    }
}

/// Count-driven cursor over the question section.
#[derive(Debug)]
pub struct QuestionParser<'a> {
    /// The message data.
    data: &'a [u8],
    /// Current offset in the message.
    offset: usize,
    /// Number of questions still expected.
    remaining: u16,
}

impl<'a> QuestionParser<'a> {
    /// Creates a parser for `count` questions starting at `offset`.
    #[inline]
    pub const fn new(data: &'a [u8], offset: usize, count: u16) -> Self {
        Self {
            data,
            offset,
            remaining: count,
        }
    }

    /// Returns the current offset.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Decodes the next question, or returns `None` once the declared count
    /// is satisfied.
    pub fn next(&mut self) -> Result<Option<Question>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let (question, consumed) = Question::parse(self.data, self.offset)?;
        self.offset += consumed;
        self.remaining -= 1;

        Ok(Some(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::str::FromStr;

    #[test]
    fn test_question_wire_layout() {
        let q = Question::a(Name::from_str("example.com").unwrap());
        let wire = q.to_wire();

        assert_eq!(
            wire,
            [
                7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, // qname
                0x00, 0x01, // QTYPE=A
                0x00, 0x01, // QCLASS=IN
            ]
        );

        let (parsed, consumed) = Question::parse(&wire, 0).unwrap();
        assert_eq!(consumed, wire.len());
        assert_eq!(parsed, q);
        assert_eq!(
            parsed.qname.labels().map(|l| l.to_string()).collect::<Vec<_>>(),
            vec!["example", "com"]
        );

        // Decode and re-encode is byte-identical.
        assert_eq!(parsed.to_wire(), wire);
    }

    #[test]
    fn test_question_truncated() {
        let q = Question::aaaa(Name::from_str("example.com").unwrap());
        let wire = q.to_wire();

        // Chop off part of QCLASS.
        let result = Question::parse(&wire[..wire.len() - 1], 0);
        assert!(matches!(result, Err(Error::TruncatedMessage { .. })));
    }

    #[test]
    fn test_question_matching() {
        let q1 = Question::a(Name::from_str("example.com").unwrap());
        let q2 = Question::a(Name::from_str("EXAMPLE.COM").unwrap());
        let q3 = Question::aaaa(Name::from_str("example.com").unwrap());

        assert!(q1.matches(&q2));
        assert!(!q1.matches(&q3));
    }

    #[test]
    fn test_question_display() {
        let q = Question::mx(Name::from_str("example.com").unwrap());
        assert_eq!(q.to_string(), "example.com. IN MX");
    }

    #[test]
    fn test_section_parser() {
        let mut wire = Question::a(Name::from_str("a.example").unwrap()).to_wire();
        wire.extend(Question::aaaa(Name::from_str("b.example").unwrap()).to_wire());

        let mut parser = QuestionParser::new(&wire, 0, 2);
        assert_eq!(
            parser.next().unwrap().unwrap().qname.to_string(),
            "a.example."
        );
        assert_eq!(
            parser.next().unwrap().unwrap().qname.to_string(),
            "b.example."
        );
        assert!(parser.next().unwrap().is_none());
        assert_eq!(parser.offset(), wire.len());
    }
}
