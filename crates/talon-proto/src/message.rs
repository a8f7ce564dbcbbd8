//! DNS message assembly.
//!
//! A message is the unit of every DNS exchange: a fixed header followed by
//! the question, answer, authority, and additional sections. The header's
//! four count fields say how many entries each section holds; decoding is
//! driven by those counts and encoding always derives them from the actual
//! section lengths.

use crate::error::{Error, Result};
use crate::header::{Header, HEADER_SIZE};
use crate::name::NameCompressor;
use crate::opcode::Opcode;
use crate::question::{Question, QuestionParser};
use crate::rcode::Rcode;
use crate::record::{RecordParser, ResourceRecord};
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete DNS message.
///
/// Decoding never returns a partial message: any wire error aborts the
/// whole decode. Encoding a well-formed value cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The message header.
    header: Header,
    /// The question section.
    questions: Vec<Question>,
    /// The answer section.
    answers: Vec<ResourceRecord>,
    /// The authority section.
    authority: Vec<ResourceRecord>,
    /// The additional section.
    additional: Vec<ResourceRecord>,
}

impl Message {
    /// Creates an empty message with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Creates a query message with a random ID and recursion requested.
    pub fn query(question: Question) -> Self {
        Self {
            header: Header::query(),
            questions: vec![question],
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Creates an empty response echoing a query's ID, opcode, RD flag, and
    /// questions.
    pub fn response_from(query: &Message) -> Self {
        let mut header = Header::response_from(&query.header);
        header.qd_count = query.questions.len() as u16;

        Self {
            header,
            questions: query.questions.clone(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    // =========================================================================
    // Header accessors
    // =========================================================================

    /// Returns the message header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    #[inline]
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the transaction ID.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Sets the transaction ID.
    #[inline]
    pub fn set_id(&mut self, id: u16) {
        self.header.id = id;
    }

    /// Returns the opcode.
    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.header.opcode
    }

    /// Returns the response code.
    #[inline]
    pub fn rcode(&self) -> Rcode {
        self.header.rcode
    }

    /// Sets the response code.
    #[inline]
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.header.rcode = rcode;
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        self.header.is_query()
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.header.is_response()
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Returns the question section.
    #[inline]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question, if any.
    #[inline]
    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the answer section.
    #[inline]
    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    /// Returns the authority section.
    #[inline]
    pub fn authority(&self) -> &[ResourceRecord] {
        &self.authority
    }

    /// Returns the additional section.
    #[inline]
    pub fn additional(&self) -> &[ResourceRecord] {
        &self.additional
    }

    /// Adds a question, keeping QDCOUNT in sync.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.qd_count = self.questions.len() as u16;
    }

    /// Adds an answer record, keeping ANCOUNT in sync.
    pub fn add_answer(&mut self, record: ResourceRecord) {
        self.answers.push(record);
        self.header.an_count = self.answers.len() as u16;
    }

    /// Adds an authority record, keeping NSCOUNT in sync.
    pub fn add_authority(&mut self, record: ResourceRecord) {
        self.authority.push(record);
        self.header.ns_count = self.authority.len() as u16;
    }

    /// Adds an additional record, keeping ARCOUNT in sync.
    pub fn add_additional(&mut self, record: ResourceRecord) {
        self.additional.push(record);
        self.header.ar_count = self.additional.len() as u16;
    }

    // =========================================================================
    // Wire format
    // =========================================================================

    /// Decodes a message, tolerating transport padding and nonzero reserved
    /// header bits.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_inner(data, false)
    }

    /// Decodes a message, additionally requiring the reserved Z bits to be
    /// zero and no bytes to remain after the declared sections.
    pub fn parse_strict(data: &[u8]) -> Result<Self> {
        Self::parse_inner(data, true)
    }

    fn parse_inner(data: &[u8], strict: bool) -> Result<Self> {
        let mut rd = crate::wire::WireReader::new(data);
        let header = Header::read_from(&mut rd)?;

        if strict && header.z != 0 {
            return Err(Error::ReservedBitsSet { value: header.z });
        }

        let mut questions = Vec::with_capacity(header.qd_count as usize);
        let mut q_parser = QuestionParser::new(data, rd.position(), header.qd_count);
        while let Some(q) = q_parser.next()? {
            questions.push(q);
        }
        let mut offset = q_parser.offset();

        let mut sections: [Vec<ResourceRecord>; 3] = [
            Vec::with_capacity(header.an_count as usize),
            Vec::with_capacity(header.ns_count as usize),
            Vec::with_capacity(header.ar_count as usize),
        ];
        let counts = [header.an_count, header.ns_count, header.ar_count];

        for (section, count) in sections.iter_mut().zip(counts) {
            let mut parser = RecordParser::new(data, offset, count);
            while let Some(r) = parser.next()? {
                section.push(r);
            }
            offset = parser.offset();
        }

        if strict && offset < data.len() {
            return Err(Error::TrailingGarbage {
                offset,
                remaining: data.len() - offset,
            });
        }

        let [answers, authority, additional] = sections;
        Ok(Self {
            header,
            questions,
            answers,
            authority,
            additional,
        })
    }

    /// Returns the header with counts recomputed from the actual sections.
    fn effective_header(&self) -> Header {
        let mut header = self.header.clone();
        header.qd_count = self.questions.len() as u16;
        header.an_count = self.answers.len() as u16;
        header.ns_count = self.authority.len() as u16;
        header.ar_count = self.additional.len() as u16;
        header
    }

    /// Returns the uncompressed wire format length.
    pub fn wire_len(&self) -> usize {
        HEADER_SIZE
            + self.questions.iter().map(Question::wire_len).sum::<usize>()
            + self.record_sections().map(ResourceRecord::wire_len).sum::<usize>()
    }

    fn record_sections(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
    }

    /// Appends the message to a buffer with no name compression.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.effective_header().write_to(buf);

        for q in &self.questions {
            q.write_to(buf);
        }
        for r in self.record_sections() {
            r.write_to(buf);
        }
    }

    /// Encodes the message with no name compression.
    ///
    /// Decoding the result reproduces this message exactly, and for a
    /// message that was itself decoded from uncompressed wire bytes the
    /// output is byte-identical to the input.
    pub fn to_wire(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut buf);
        buf.freeze()
    }

    /// Encodes the message, compressing question and owner names.
    ///
    /// Names inside RDATA are left uncompressed so that RDLENGTH never
    /// depends on where a record lands in the message.
    pub fn to_wire_compressed(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        let mut compressor = NameCompressor::new();

        self.effective_header().write_to(&mut buf);

        for q in &self.questions {
            compressor.write_name(&mut buf, &q.qname);
            q.write_fields_to(&mut buf);
        }
        for r in self.record_sections() {
            compressor.write_name(&mut buf, r.name());
            r.write_fields_to(&mut buf);
        }

        buf.freeze()
    }

    /// Shrinks the message to fit `max_size` encoded bytes, dropping
    /// additional, then authority, then answer records, and setting the TC
    /// flag if anything was dropped.
    pub fn truncate_to(&mut self, max_size: usize) {
        let mut dropped = false;

        while self.wire_len() > max_size {
            if self.additional.pop().is_some()
                || self.authority.pop().is_some()
                || self.answers.pop().is_some()
            {
                dropped = true;
            } else {
                break;
            }
        }

        if dropped {
            self.header.set_truncated(true);
            self.header.an_count = self.answers.len() as u16;
            self.header.ns_count = self.authority.len() as u16;
            self.header.ar_count = self.additional.len() as u16;
        }
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new(Header::default())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; ->>HEADER<<- {}", self.header)?;

        writeln!(f, ";; QUESTION SECTION:")?;
        for q in &self.questions {
            writeln!(f, ";{q}")?;
        }

        for (title, section) in [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authority),
            ("ADDITIONAL", &self.additional),
        ] {
            if !section.is_empty() {
                writeln!(f, ";; {title} SECTION:")?;
                for r in section {
                    writeln!(f, "{r}")?;
                }
            }
        }

        Ok(())
    }
}
