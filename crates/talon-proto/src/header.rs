//! DNS message header.
//!
//! The header is a fixed 12-byte structure at the start of every message,
//! carrying the transaction ID, flag bits, and the four section counts.
//!
//! # Wire Format
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    QDCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    ANCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    NSCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    ARCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

use crate::error::Result;
use crate::opcode::Opcode;
use crate::rcode::Rcode;
use crate::wire::WireReader;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the DNS header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Mask of the flags word covered by [`HeaderFlags`]; the remaining bits
/// hold the opcode, the reserved Z field, and the rcode.
const FLAGS_MASK: u16 = 0x8000 | 0x0400 | 0x0200 | 0x0100 | 0x0080;

bitflags! {
    /// The single-bit header flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u16 {
        /// Query/Response: 0 = query, 1 = response.
        const QR = 0x8000;

        /// Authoritative Answer: the server is authoritative for the name.
        const AA = 0x0400;

        /// Truncation: the message was cut to fit the transport.
        const TC = 0x0200;

        /// Recursion Desired: the client asks for recursive resolution.
        const RD = 0x0100;

        /// Recursion Available: the server supports recursion.
        const RA = 0x0080;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for HeaderFlags {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for HeaderFlags {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// DNS message header.
///
/// The reserved fields are carried verbatim: a reserved opcode or rcode
/// value and nonzero Z bits survive a decode/encode round trip. Validating
/// Z against zero is the message decoder's job, and only in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Transaction ID, matching responses to queries.
    pub id: u16,

    /// The single-bit flags (QR/AA/TC/RD/RA).
    pub flags: HeaderFlags,

    /// Operation code (4 bits).
    pub opcode: Opcode,

    /// Reserved field (3 bits), must be zero per RFC 1035.
    pub z: u8,

    /// Response code (4 bits).
    pub rcode: Rcode,

    /// Number of questions.
    pub qd_count: u16,

    /// Number of answer records.
    pub an_count: u16,

    /// Number of authority records.
    pub ns_count: u16,

    /// Number of additional records.
    pub ar_count: u16,
}

impl Header {
    /// Creates a new header with the given transaction ID and everything
    /// else zeroed.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: Opcode::Query,
            z: 0,
            rcode: Rcode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a query header with a random ID and recursion requested.
    pub fn query() -> Self {
        Self {
            id: rand::random(),
            flags: HeaderFlags::RD,
            opcode: Opcode::Query,
            z: 0,
            rcode: Rcode::NoError,
            qd_count: 1,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a response header echoing a query's ID, opcode, and RD flag.
    pub fn response_from(query: &Header) -> Self {
        Self {
            id: query.id,
            flags: HeaderFlags::QR | (query.flags & HeaderFlags::RD),
            opcode: query.opcode,
            z: 0,
            rcode: Rcode::NoError,
            qd_count: query.qd_count,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the answer is authoritative.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags.contains(HeaderFlags::AA)
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion was requested.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Returns true if recursion is available.
    #[inline]
    pub fn recursion_available(&self) -> bool {
        self.flags.contains(HeaderFlags::RA)
    }

    /// Sets or clears the QR flag.
    #[inline]
    pub fn set_response(&mut self, response: bool) {
        self.flags.set(HeaderFlags::QR, response);
    }

    /// Sets or clears the AA flag.
    #[inline]
    pub fn set_authoritative(&mut self, aa: bool) {
        self.flags.set(HeaderFlags::AA, aa);
    }

    /// Sets or clears the TC flag.
    #[inline]
    pub fn set_truncated(&mut self, tc: bool) {
        self.flags.set(HeaderFlags::TC, tc);
    }

    /// Sets or clears the RD flag.
    #[inline]
    pub fn set_recursion_desired(&mut self, rd: bool) {
        self.flags.set(HeaderFlags::RD, rd);
    }

    /// Sets or clears the RA flag.
    #[inline]
    pub fn set_recursion_available(&mut self, ra: bool) {
        self.flags.set(HeaderFlags::RA, ra);
    }

    /// Returns the combined record count of the three record sections.
    #[inline]
    pub fn total_record_count(&self) -> usize {
        self.an_count as usize + self.ns_count as usize + self.ar_count as usize
    }

    /// Reads a header from the wire cursor.
    ///
    /// Fails with [`TruncatedMessage`](crate::Error::TruncatedMessage) if
    /// fewer than 12 bytes remain. Count fields are taken at face value;
    /// checking them against the sections that follow is the message
    /// decoder's job.
    pub fn read_from(rd: &mut WireReader<'_>) -> Result<Self> {
        let id = rd.read_u16()?;
        let word = rd.read_u16()?;

        let flags = HeaderFlags::from_bits_truncate(word & FLAGS_MASK);
        let opcode = Opcode::from_u4(((word >> 11) & 0x0F) as u8);
        let z = ((word >> 4) & 0x07) as u8;
        let rcode = Rcode::from_u4((word & 0x0F) as u8);

        let qd_count = rd.read_u16()?;
        let an_count = rd.read_u16()?;
        let ns_count = rd.read_u16()?;
        let ar_count = rd.read_u16()?;

        Ok(Self {
            id,
            flags,
            opcode,
            z,
            rcode,
            qd_count,
            an_count,
            ns_count,
            ar_count,
        })
    }

    /// Parses a header from the start of a buffer.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read_from(&mut WireReader::new(data))
    }

    /// Serializes the header to wire format.
    pub fn to_wire(&self) -> [u8; HEADER_SIZE] {
        let word = (self.flags.bits() & FLAGS_MASK)
            | (u16::from(self.opcode.to_u4()) << 11)
            | (u16::from(self.z & 0x07) << 4)
            | u16::from(self.rcode.to_u4());

        let mut buf = [0u8; HEADER_SIZE];
        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2..4].copy_from_slice(&word.to_be_bytes());
        buf[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.ar_count.to_be_bytes());
        buf
    }

    /// Appends the header to a buffer.
    pub fn write_to(&self, buf: &mut bytes::BytesMut) {
        buf.extend_from_slice(&self.to_wire());
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID:{:04X} {} {} {}",
            self.id,
            if self.is_response() { "qr" } else { "query" },
            self.opcode,
            self.rcode
        )?;

        if self.is_authoritative() {
            write!(f, " AA")?;
        }
        if self.is_truncated() {
            write!(f, " TC")?;
        }
        if self.recursion_desired() {
            write!(f, " RD")?;
        }
        if self.recursion_available() {
            write!(f, " RA")?;
        }

        write!(
            f,
            " QD:{} AN:{} NS:{} AR:{}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_concrete_query_header() {
        // ID=1, RD set, QDCOUNT=1, everything else zero.
        let bytes = [
            0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let header = Header::parse(&bytes).unwrap();

        assert_eq!(header.id, 1);
        assert!(header.is_query());
        assert_eq!(header.opcode, Opcode::Query);
        assert!(header.recursion_desired());
        assert!(!header.is_authoritative());
        assert!(!header.is_truncated());
        assert!(!header.recursion_available());
        assert_eq!(header.z, 0);
        assert_eq!(header.rcode, Rcode::NoError);
        assert_eq!(header.qd_count, 1);
        assert_eq!(header.an_count, 0);
        assert_eq!(header.ns_count, 0);
        assert_eq!(header.ar_count, 0);

        assert_eq!(header.to_wire(), bytes);
    }

    #[test]
    fn test_header_roundtrip() {
        let mut header = Header::new(0x1234);
        header.set_response(true);
        header.set_authoritative(true);
        header.rcode = Rcode::NXDomain;
        header.qd_count = 1;
        header.ns_count = 1;

        let parsed = Header::parse(&header.to_wire()).unwrap();
        assert_eq!(header, parsed);
    }

    #[test]
    fn test_reserved_fields_roundtrip() {
        // Opcode 9, Z=0b101, RCODE 14: all reserved, all preserved.
        let word: u16 = (9 << 11) | (0b101 << 4) | 14;
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[2..4].copy_from_slice(&word.to_be_bytes());

        let header = Header::parse(&bytes).unwrap();
        assert_eq!(header.opcode, Opcode::Reserved(9));
        assert_eq!(header.z, 0b101);
        assert_eq!(header.rcode, Rcode::Reserved(14));

        assert_eq!(header.to_wire(), bytes);
    }

    #[test]
    fn test_header_parse_too_short() {
        let result = Header::parse(&[0; 10]);
        assert!(matches!(result, Err(Error::TruncatedMessage { .. })));
    }

    #[test]
    fn test_response_from_query() {
        let query = Header::query();
        let response = Header::response_from(&query);

        assert_eq!(query.id, response.id);
        assert!(query.is_query());
        assert!(response.is_response());
        assert_eq!(query.recursion_desired(), response.recursion_desired());
    }

    #[test]
    fn test_header_display() {
        let mut header = Header::new(0xABCD);
        header.set_authoritative(true);
        header.qd_count = 1;

        let display = header.to_string();
        assert!(display.contains("ABCD"));
        assert!(display.contains("AA"));
        assert!(display.contains("QD:1"));
    }
}
