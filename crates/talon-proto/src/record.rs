//! DNS resource records.
//!
//! A resource record carries one unit of DNS data: an owner name, TYPE,
//! CLASS, TTL, and a TYPE-dependent payload.
//!
//! # Wire Format
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! /                      NAME                     /
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      TYPE                     |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                     CLASS                     |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      TTL                      |
//! |                                               |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                   RDLENGTH                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! /                     RDATA                     /
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

use crate::class::{Class, RecordClass};
use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rdata::{RData, MX, SOA, TXT};
use crate::rtype::Type;
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DNS resource record.
///
/// RDLENGTH is not stored: it is recomputed from the payload on every
/// encode, so a record built or modified in memory can never carry a stale
/// length onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The owner name.
    name: Name,
    /// The record type.
    rtype: Type,
    /// The record class.
    rclass: Class,
    /// Time to live in seconds.
    ttl: u32,
    /// The record payload.
    rdata: RData,
}

impl ResourceRecord {
    /// Creates a new resource record.
    ///
    /// `rtype` and `rdata` are taken as given; use
    /// [`from_rdata`](Self::from_rdata) to derive the TYPE from the payload.
    pub fn new(name: Name, rtype: Type, rclass: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    /// Creates an IN-class record, deriving the TYPE from the payload.
    pub fn from_rdata(name: Name, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype: rdata.record_type(),
            rclass: Class::Known(RecordClass::IN),
            ttl,
            rdata,
        }
    }

    /// Creates an A record.
    pub fn a(name: Name, ttl: u32, addr: std::net::Ipv4Addr) -> Self {
        Self::from_rdata(name, ttl, RData::A(addr))
    }

    /// Creates an AAAA record.
    pub fn aaaa(name: Name, ttl: u32, addr: std::net::Ipv6Addr) -> Self {
        Self::from_rdata(name, ttl, RData::AAAA(addr))
    }

    /// Creates a CNAME record.
    pub fn cname(name: Name, ttl: u32, target: Name) -> Self {
        Self::from_rdata(name, ttl, RData::CNAME(target))
    }

    /// Creates an NS record.
    pub fn ns(name: Name, ttl: u32, nsdname: Name) -> Self {
        Self::from_rdata(name, ttl, RData::NS(nsdname))
    }

    /// Creates a PTR record.
    pub fn ptr(name: Name, ttl: u32, ptrdname: Name) -> Self {
        Self::from_rdata(name, ttl, RData::PTR(ptrdname))
    }

    /// Creates an MX record.
    pub fn mx(name: Name, ttl: u32, preference: u16, exchange: Name) -> Self {
        Self::from_rdata(name, ttl, RData::MX(MX::new(preference, exchange)))
    }

    /// Creates a TXT record from a single string.
    pub fn txt(name: Name, ttl: u32, text: impl Into<Vec<u8>>) -> Self {
        Self::from_rdata(name, ttl, RData::TXT(TXT::from_string(text)))
    }

    /// Creates an SOA record.
    pub fn soa(name: Name, ttl: u32, soa: SOA) -> Self {
        Self::from_rdata(name, ttl, RData::SOA(soa))
    }

    /// Returns the owner name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type.
    #[inline]
    pub fn rtype(&self) -> Type {
        self.rtype
    }

    /// Returns the record class.
    #[inline]
    pub fn rclass(&self) -> Class {
        self.rclass
    }

    /// Returns the TTL in seconds.
    #[inline]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the record payload.
    #[inline]
    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    /// Decodes a resource record from the message at the given offset.
    ///
    /// Returns the record and the number of bytes it occupies.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (name, name_len) = NameParser::new(data).parse_name(offset)?;

        let mut rd = WireReader::at(data, offset + name_len)?;
        let rtype = Type::from_u16(rd.read_u16()?);
        let rclass = Class::from_u16(rd.read_u16()?);
        let ttl = rd.read_u32()?;
        let rdlength = rd.read_u16()?;

        let rdata_start = rd.position();
        if data.len() < rdata_start + rdlength as usize {
            return Err(Error::truncated(rdata_start, rdlength as usize));
        }

        let rdata = RData::parse(rtype, data, rdata_start, rdlength)?;

        Ok((
            Self {
                name,
                rtype,
                rclass,
                ttl,
                rdata,
            },
            name_len + 10 + rdlength as usize,
        ))
    }

    /// Returns the wire format length (uncompressed).
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + 10 + self.rdata.wire_len()
    }

    /// Appends the record to a buffer, names uncompressed.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.name.write_wire(buf);
        self.write_fields_to(buf);
    }

    /// Appends everything after the owner name; the compressing message
    /// encoder writes the name itself.
    pub(crate) fn write_fields_to(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.rtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.rclass.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());

        let rdlength = self.rdata.wire_len() as u16;
        buf.extend_from_slice(&rdlength.to_be_bytes());
        self.rdata.write_to(buf);
    }

    /// Encodes the record to wire format bytes.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut buf);
        buf.to_vec()
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.rclass, self.rtype, self.rdata
        )
    }
}

/// Count-driven cursor over a resource record section.
#[derive(Debug)]
pub struct RecordParser<'a> {
    /// The message data.
    data: &'a [u8],
    /// Current offset in the message.
    offset: usize,
    /// Number of records still expected.
    remaining: u16,
}

impl<'a> RecordParser<'a> {
    /// Creates a parser for `count` records starting at `offset`.
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

    /// Decodes the next record, or returns `None` once the declared count
    /// is satisfied.
    pub fn next(&mut self) -> Result<Option<ResourceRecord>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let (record, consumed) = ResourceRecord::parse(self.data, self.offset)?;
        self.offset += consumed;
        self.remaining -= 1;

        Ok(Some(record))
    }
}
